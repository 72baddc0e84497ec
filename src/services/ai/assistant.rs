use async_trait::async_trait;

use super::booking::{self, BookingReply};
use super::owner;
use super::review::{self, ReviewAnalysis};
use super::LlmProvider;
use crate::errors::MediationError;
use crate::models::{Reservation, Turn};

/// The three AI capabilities the dashboard relies on. Every call is a single
/// stateless round trip; conversation state stays with the caller.
#[async_trait]
pub trait RestaurantAssistant: Send + Sync {
    async fn review_sentiment_and_draft(
        &self,
        comment: &str,
    ) -> Result<ReviewAnalysis, MediationError>;

    async fn continue_booking_conversation(
        &self,
        latest_message: &str,
        history: &[Turn],
    ) -> Result<BookingReply, MediationError>;

    async fn answer_owner_query(
        &self,
        query: &str,
        reservations: &[Reservation],
    ) -> Result<String, MediationError>;
}

/// Assistant backed by a generative text provider.
pub struct LlmAssistant {
    llm: Box<dyn LlmProvider>,
    restaurant_name: String,
}

impl LlmAssistant {
    pub fn new(llm: Box<dyn LlmProvider>, restaurant_name: impl Into<String>) -> Self {
        Self {
            llm,
            restaurant_name: restaurant_name.into(),
        }
    }
}

#[async_trait]
impl RestaurantAssistant for LlmAssistant {
    async fn review_sentiment_and_draft(
        &self,
        comment: &str,
    ) -> Result<ReviewAnalysis, MediationError> {
        review::analyze_review(self.llm.as_ref(), comment).await
    }

    async fn continue_booking_conversation(
        &self,
        latest_message: &str,
        history: &[Turn],
    ) -> Result<BookingReply, MediationError> {
        booking::continue_booking_conversation(
            self.llm.as_ref(),
            &self.restaurant_name,
            latest_message,
            history,
        )
        .await
    }

    async fn answer_owner_query(
        &self,
        query: &str,
        reservations: &[Reservation],
    ) -> Result<String, MediationError> {
        owner::answer_owner_query(self.llm.as_ref(), &self.restaurant_name, query, reservations)
            .await
    }
}
