use std::sync::Arc;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::BookingSession;
use crate::state::AppState;

pub const BOOKING_RETRY_MESSAGE: &str =
    "I'm having trouble connecting to the reservation desk right now. Please try again.";

#[derive(Debug, Clone, Serialize)]
pub struct BookingChatOutcome {
    pub reply: String,
    pub session: BookingSession,
    pub degraded: bool,
}

/// Runs one guest turn against the caller's session and hands the session back.
/// Any assistant failure becomes the retry message with the intent left as it was.
pub async fn process_message(
    state: &Arc<AppState>,
    message: &str,
    mut session: BookingSession,
) -> Result<BookingChatOutcome, AppError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("message cannot be empty".to_string()));
    }
    if session.is_complete() {
        return Err(AppError::BadRequest(
            "booking is already complete; start a new session".to_string(),
        ));
    }

    match state
        .assistant
        .continue_booking_conversation(message, &session.turns)
        .await
    {
        Ok(result) => {
            session.record_exchange(message, &result.reply, result.intent);
            Ok(BookingChatOutcome {
                reply: result.reply,
                session,
                degraded: false,
            })
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                unavailable = e.is_unavailable(),
                turns = session.turns.len(),
                "booking turn failed"
            );
            session.record_failure(message, BOOKING_RETRY_MESSAGE);
            Ok(BookingChatOutcome {
                reply: BOOKING_RETRY_MESSAGE.to_string(),
                session,
                degraded: true,
            })
        }
    }
}
