use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    /// Case-insensitive; anything outside the three labels is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Responded,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Responded => "responded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidTransition {
    #[error("review cannot move from {} to {}", .from.as_str(), .to.as_str())]
    Status { from: ReviewStatus, to: ReviewStatus },

    #[error("review has no draft to respond with")]
    MissingDraft,

    #[error("draft text cannot be empty")]
    EmptyDraft,

    #[error("review has no generated draft to edit")]
    NoDraftToEdit,

    #[error("review has already been responded to")]
    AlreadyResponded,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub author: String,
    pub rating: u8,
    pub comment: String,
    pub date: String,
    pub sentiment: Sentiment,
    pub status: ReviewStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_draft: Option<String>,
}

impl Review {
    /// Stores the outcome of a successful analysis call. Both fields change together.
    pub fn apply_analysis(&mut self, sentiment: Sentiment, draft: String) {
        self.sentiment = sentiment;
        self.ai_draft = Some(draft);
    }

    /// Revises a generated draft. Only allowed before the response is published.
    pub fn edit_draft(&mut self, draft: &str) -> Result<(), InvalidTransition> {
        if self.status == ReviewStatus::Responded {
            return Err(InvalidTransition::AlreadyResponded);
        }
        if self.ai_draft.is_none() {
            return Err(InvalidTransition::NoDraftToEdit);
        }
        let draft = draft.trim();
        if draft.is_empty() {
            return Err(InvalidTransition::EmptyDraft);
        }
        self.ai_draft = Some(draft.to_string());
        Ok(())
    }

    pub fn transition_to(&mut self, next: ReviewStatus) -> Result<(), InvalidTransition> {
        let allowed = matches!(
            (self.status, next),
            (ReviewStatus::Pending, ReviewStatus::Approved)
                | (ReviewStatus::Pending, ReviewStatus::Responded)
                | (ReviewStatus::Approved, ReviewStatus::Responded)
        );
        if !allowed {
            return Err(InvalidTransition::Status {
                from: self.status,
                to: next,
            });
        }
        if next == ReviewStatus::Responded && self.ai_draft.is_none() {
            return Err(InvalidTransition::MissingDraft);
        }
        self.status = next;
        Ok(())
    }
}
