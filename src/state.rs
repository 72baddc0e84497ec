use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::AppConfig;
use crate::services::ai::RestaurantAssistant;
use crate::store::DashboardStore;

pub struct AppState {
    pub config: AppConfig,
    pub assistant: Box<dyn RestaurantAssistant>,
    pub store: Mutex<DashboardStore>,
}

impl AppState {
    /// The lock is never held across an await.
    pub fn store(&self) -> MutexGuard<'_, DashboardStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
