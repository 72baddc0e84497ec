use serde::{Deserialize, Deserializer, Serialize};

/// Booking details gathered so far in a guest conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingIntent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "party_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub party_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub is_complete: bool,
}

impl BookingIntent {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.guest_name.is_none() {
            missing.push("guestName");
        }
        if self.party_size.is_none() {
            missing.push("partySize");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.time.is_none() {
            missing.push("time");
        }
        missing
    }
}

// Models declare partySize as a JSON number, so 4.0 shows up as often as 4.
fn party_size<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(n) if n >= 1.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => Ok(Some(n as u32)),
        Some(n) => Err(serde::de::Error::custom(format!(
            "partySize must be a positive whole number, got {n}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_intent() {
        let intent: BookingIntent =
            serde_json::from_str(r#"{"guestName":"Ana","partySize":4.0,"isComplete":false}"#)
                .unwrap();
        assert_eq!(intent.guest_name.as_deref(), Some("Ana"));
        assert_eq!(intent.party_size, Some(4));
        assert_eq!(intent.missing_fields(), vec!["date", "time"]);
    }

    #[test]
    fn test_null_fields_are_unset() {
        let intent: BookingIntent =
            serde_json::from_str(r#"{"guestName":null,"partySize":null,"isComplete":false}"#)
                .unwrap();
        assert_eq!(intent, BookingIntent::default());
    }

    #[test]
    fn test_is_complete_required() {
        assert!(serde_json::from_str::<BookingIntent>(r#"{"guestName":"Ana"}"#).is_err());
    }

    #[test]
    fn test_rejects_fractional_party() {
        assert!(
            serde_json::from_str::<BookingIntent>(r#"{"partySize":2.5,"isComplete":false}"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<BookingIntent>(r#"{"partySize":-1,"isComplete":false}"#)
                .is_err()
        );
    }
}
