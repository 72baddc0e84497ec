use serde::Serialize;

use super::schema::REVIEW_ANALYSIS;
use super::{GenerationRequest, LlmProvider, OutputContract};
use crate::errors::MediationError;
use crate::models::Sentiment;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewAnalysis {
    pub sentiment: Sentiment,
    pub draft: String,
}

fn review_prompt(comment: &str) -> String {
    format!(
        "Analyze this customer review and draft a professional business response. \
         The tone should be courteous, balanced, and solutions-oriented. Review: \"{comment}\""
    )
}

/// Classifies a guest review and drafts a reply. Either both parts come back
/// valid or the call fails; there is no partial result.
pub async fn analyze_review(
    llm: &dyn LlmProvider,
    comment: &str,
) -> Result<ReviewAnalysis, MediationError> {
    let request = GenerationRequest::prompt(
        review_prompt(comment),
        OutputContract::Json(&REVIEW_ANALYSIS),
    );

    let output = llm.generate(&request).await?;
    let raw = output
        .text
        .ok_or_else(|| MediationError::malformed("review analysis came back empty"))?;

    let analysis = parse_analysis(&raw)?;
    tracing::info!(
        sentiment = analysis.sentiment.as_str(),
        draft_len = analysis.draft.len(),
        "review analyzed"
    );
    Ok(analysis)
}

fn parse_analysis(raw: &str) -> Result<ReviewAnalysis, MediationError> {
    let value = REVIEW_ANALYSIS.parse(raw)?;

    let label = value["sentiment"].as_str().unwrap_or_default();
    let sentiment = Sentiment::parse(label)
        .ok_or_else(|| MediationError::malformed(format!("unrecognized sentiment `{label}`")))?;

    let draft = value["draft"].as_str().unwrap_or_default().trim();
    if draft.is_empty() {
        return Err(MediationError::malformed("review draft is empty"));
    }

    Ok(ReviewAnalysis {
        sentiment,
        draft: draft.to_string(),
    })
}
