use serde::{Deserialize, Serialize};

use super::BookingIntent;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    #[serde(alias = "guest")]
    User,
    #[serde(alias = "model", alias = "ai")]
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
        }
    }
}

/// Caller-owned state of one booking chat: an append-only turn log plus the
/// latest intent the assistant reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingSession {
    #[serde(default)]
    pub turns: Vec<Turn>,
    #[serde(default)]
    pub intent: BookingIntent,
}

impl BookingSession {
    pub fn is_complete(&self) -> bool {
        self.intent.is_complete
    }

    pub fn record_exchange(&mut self, message: &str, reply: &str, intent: BookingIntent) {
        self.turns.push(Turn::user(message));
        self.turns.push(Turn::assistant(reply));
        self.intent = intent;
    }

    /// The guest still sees their message and the apology; the intent is kept.
    pub fn record_failure(&mut self, message: &str, apology: &str) {
        self.turns.push(Turn::user(message));
        self.turns.push(Turn::assistant(apology));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_accept_dashboard_aliases() {
        let turns: Vec<Turn> = serde_json::from_value(serde_json::json!([
            { "role": "user", "text": "hi" },
            { "role": "model", "text": "hello" },
            { "role": "ai", "text": "?" }
        ]))
        .unwrap();
        assert_eq!(turns[1].role, TurnRole::Assistant);
        assert_eq!(turns[2].role, TurnRole::Assistant);
    }

    #[test]
    fn test_failure_keeps_intent() {
        let mut session = BookingSession::default();
        let intent = BookingIntent {
            guest_name: Some("Ana".to_string()),
            ..Default::default()
        };
        session.record_exchange("I'm Ana", "Hi Ana, for how many?", intent.clone());
        session.record_failure("four", "Please try again.");

        assert_eq!(session.turns.len(), 4);
        assert_eq!(session.turns[3].role, TurnRole::Assistant);
        assert_eq!(session.intent, intent);
        assert!(!session.is_complete());
    }
}
