use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Review, ReviewStatus};
use crate::services::reviews;
use crate::state::AppState;

// GET /api/reviews
pub async fn list_reviews(State(state): State<Arc<AppState>>) -> Json<Vec<Review>> {
    Json(state.store().reviews.clone())
}

// POST /api/reviews/:id/draft
pub async fn generate_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Review>, AppError> {
    Ok(Json(reviews::generate_draft(&state, &id).await?))
}

#[derive(Deserialize)]
pub struct EditDraftRequest {
    pub draft: String,
}

// PUT /api/reviews/:id/draft
pub async fn edit_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<EditDraftRequest>,
) -> Result<Json<Review>, AppError> {
    Ok(Json(reviews::edit_draft(&state, &id, &payload.draft)?))
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: ReviewStatus,
}

// POST /api/reviews/:id/status
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<StatusRequest>,
) -> Result<Json<Review>, AppError> {
    Ok(Json(reviews::set_status(&state, &id, payload.status)?))
}
