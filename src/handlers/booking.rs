use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::BookingSession;
use crate::services::booking::{self, BookingChatOutcome};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct BookingChatRequest {
    pub message: String,
    #[serde(default)]
    pub session: BookingSession,
}

// POST /api/booking/chat
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BookingChatRequest>,
) -> Result<Json<BookingChatOutcome>, AppError> {
    let outcome = booking::process_message(&state, &payload.message, payload.session).await?;
    Ok(Json(outcome))
}
