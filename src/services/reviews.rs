use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{InvalidTransition, Review, ReviewStatus};
use crate::state::AppState;

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("review {id}"))
}

fn ensure_unpublished(review: &Review) -> Result<(), AppError> {
    if review.status == ReviewStatus::Responded {
        return Err(AppError::BadRequest(InvalidTransition::AlreadyResponded.to_string()));
    }
    Ok(())
}

/// Asks the assistant for a sentiment and draft reply. The review is only
/// touched once the call succeeds; on failure it stays exactly as it was.
/// Published reviews keep their response.
pub async fn generate_draft(state: &Arc<AppState>, review_id: &str) -> Result<Review, AppError> {
    let comment = {
        let store = state.store();
        let review = store.review(review_id).ok_or_else(|| not_found(review_id))?;
        ensure_unpublished(review)?;
        review.comment.clone()
    };

    if comment.trim().is_empty() {
        return Err(AppError::BadRequest("review has no comment to analyze".to_string()));
    }

    let analysis = state
        .assistant
        .review_sentiment_and_draft(&comment)
        .await
        .inspect_err(|e| tracing::warn!(review_id, error = %e, "draft generation failed"))?;

    let mut store = state.store();
    let review = store.review_mut(review_id).ok_or_else(|| not_found(review_id))?;
    // Another request may have published the review while the call was in flight.
    ensure_unpublished(review)?;
    review.apply_analysis(analysis.sentiment, analysis.draft);
    tracing::info!(review_id, sentiment = review.sentiment.as_str(), "draft stored");
    Ok(review.clone())
}

pub fn edit_draft(state: &AppState, review_id: &str, draft: &str) -> Result<Review, AppError> {
    let mut store = state.store();
    let review = store.review_mut(review_id).ok_or_else(|| not_found(review_id))?;
    review
        .edit_draft(draft)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(review.clone())
}

pub fn set_status(
    state: &AppState,
    review_id: &str,
    status: ReviewStatus,
) -> Result<Review, AppError> {
    let mut store = state.store();
    let review = store.review_mut(review_id).ok_or_else(|| not_found(review_id))?;
    review
        .transition_to(status)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    tracing::info!(review_id, status = status.as_str(), "review status changed");
    Ok(review.clone())
}
