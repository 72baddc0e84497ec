use serde::{Deserialize, Serialize};

use super::schema::BOOKING_TURN;
use super::{GenerationRequest, LlmProvider, OutputContract};
use crate::errors::MediationError;
use crate::models::{BookingIntent, Turn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingReply {
    pub reply: String,
    pub intent: BookingIntent,
}

pub fn booking_directive(restaurant_name: &str) -> String {
    format!(
        "You are a professional AI Assistant for '{restaurant_name}'. Your role is to manage \
         reservations efficiently by gathering: Guest Name, Party Size, Date, and Time, plus any \
         special requests. Be professional, helpful, and direct."
    )
}

/// Replays `history` plus `latest_message` and returns the assistant's reply with
/// the intent as the model now sees it. The caller threads the history.
pub async fn continue_booking_conversation(
    llm: &dyn LlmProvider,
    restaurant_name: &str,
    latest_message: &str,
    history: &[Turn],
) -> Result<BookingReply, MediationError> {
    let mut contents = Vec::with_capacity(history.len() + 1);
    contents.extend_from_slice(history);
    contents.push(Turn::user(latest_message));

    let request = GenerationRequest {
        contents,
        system_instruction: Some(booking_directive(restaurant_name)),
        output: OutputContract::Json(&BOOKING_TURN),
    };

    let output = llm.generate(&request).await?;
    let raw = output
        .text
        .ok_or_else(|| MediationError::malformed("booking reply came back empty"))?;

    let reply = parse_booking_reply(&raw)?;
    tracing::info!(
        turns = request.contents.len(),
        is_complete = reply.intent.is_complete,
        missing = ?reply.intent.missing_fields(),
        "booking turn processed"
    );
    Ok(reply)
}

fn parse_booking_reply(raw: &str) -> Result<BookingReply, MediationError> {
    let value = BOOKING_TURN.parse(raw)?;
    serde_json::from_value(value)
        .map_err(|e| MediationError::malformed(format!("booking_turn: {e}")))
}
