use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::models::DashboardSummary;
use crate::state::AppState;

// GET /api/dashboard
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardSummary> {
    let store = state.store();
    Json(DashboardSummary {
        restaurant_name: state.config.restaurant_name.clone(),
        stats: store.stats.clone(),
        pending_reviews: store.pending_reviews(),
        confirmed_reservations: store.confirmed_reservations(),
        total_reservations: store.reservations.len(),
    })
}
