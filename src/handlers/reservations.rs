use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::Reservation;
use crate::services::reservations::{self, OwnerQueryOutcome};
use crate::state::AppState;

// GET /api/reservations
pub async fn list_reservations(State(state): State<Arc<AppState>>) -> Json<Vec<Reservation>> {
    Json(state.store().reservations.clone())
}

#[derive(Deserialize)]
pub struct OwnerQueryRequest {
    pub query: String,
}

// POST /api/reservations/query
pub async fn owner_query(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OwnerQueryRequest>,
) -> Result<Json<OwnerQueryOutcome>, AppError> {
    let query = payload.query.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("query cannot be empty".to_string()));
    }

    tracing::info!(query = %query, "owner query");
    Ok(Json(reservations::owner_query(&state, query).await))
}
