use serde_json::json;

use super::schema::strip_code_fence;
use super::{GenerationRequest, LlmProvider, OutputContract};
use crate::errors::MediationError;
use crate::models::Reservation;

pub const OWNER_QUERY_FALLBACK: &str = "I'm sorry, I couldn't process that operational request.";

const OWNER_QUERY_TEMPERATURE: f32 = 0.7;

fn owner_prompt(restaurant_name: &str, query: &str, reservations: &[Reservation]) -> String {
    format!(
        "You are the Operational AI for '{restaurant_name}'. \
         You are speaking directly to the Restaurant Owner.\n\
         Analyze the following current reservation data and answer the owner's request \
         concisely and professionally.\n\n\
         Current Reservations: {}\n\n\
         Owner Request: \"{query}\"",
        json!(reservations)
    )
}

/// Answers an operational question about the current reservations. An empty
/// reply is replaced by [`OWNER_QUERY_FALLBACK`]; only transport and envelope
/// failures are errors.
pub async fn answer_owner_query(
    llm: &dyn LlmProvider,
    restaurant_name: &str,
    query: &str,
    reservations: &[Reservation],
) -> Result<String, MediationError> {
    let request = GenerationRequest::prompt(
        owner_prompt(restaurant_name, query, reservations),
        OutputContract::Text {
            temperature: Some(OWNER_QUERY_TEMPERATURE),
        },
    );

    let output = llm.generate(&request).await?;
    let reply = match output.text.as_deref().map(clean_reply) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => {
            tracing::warn!("owner query returned no text, using fallback");
            OWNER_QUERY_FALLBACK.to_string()
        }
    };

    tracing::info!(
        reservations = reservations.len(),
        reply_len = reply.len(),
        "owner query answered"
    );
    Ok(reply)
}

fn clean_reply(text: &str) -> &str {
    strip_code_fence(text).trim()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{ReservationSource, ReservationStatus};

    #[test]
    fn test_prompt_embeds_reservations_and_query() {
        let reservations = vec![Reservation {
            id: "1".to_string(),
            guest_name: "David Chen".to_string(),
            party_size: 4,
            date_time: NaiveDate::from_ymd_opt(2023, 11, 20)
                .unwrap()
                .and_hms_opt(19, 30, 0)
                .unwrap(),
            status: ReservationStatus::Confirmed,
            source: ReservationSource::Web,
        }];
        let prompt = owner_prompt("The Gilded Plate", "Who is first?", &reservations);

        assert!(prompt.contains("Operational AI for 'The Gilded Plate'"));
        assert!(prompt.contains(r#""guestName":"David Chen""#));
        assert!(prompt.contains(r#""dateTime":"2023-11-20T19:30:00""#));
        assert!(prompt.ends_with("Owner Request: \"Who is first?\""));
    }

    #[test]
    fn test_prompt_with_no_reservations() {
        let prompt = owner_prompt("The Gilded Plate", "Anything tonight?", &[]);
        assert!(prompt.contains("Current Reservations: []"));
    }

    #[test]
    fn test_clean_reply() {
        assert_eq!(clean_reply("  3 tables.\n"), "3 tables.");
        assert_eq!(clean_reply("```\n3 tables.\n```"), "3 tables.");
        assert_eq!(clean_reply("   "), "");
    }
}
