use std::sync::Arc;

use serde::Serialize;

use crate::state::AppState;

/// Shown to the owner when the assistant call fails, whatever the cause.
pub const OWNER_RELAY_APOLOGY: &str = "Operational relay interrupted. Please retry.";

#[derive(Debug, Clone, Serialize)]
pub struct OwnerQueryOutcome {
    pub reply: String,
    /// True when the reply is the apology rather than an answer.
    pub degraded: bool,
}

pub async fn owner_query(state: &Arc<AppState>, query: &str) -> OwnerQueryOutcome {
    let reservations = state.store().reservations.clone();

    match state
        .assistant
        .answer_owner_query(query, &reservations)
        .await
    {
        Ok(reply) => OwnerQueryOutcome {
            reply,
            degraded: false,
        },
        Err(e) => {
            tracing::warn!(error = %e, unavailable = e.is_unavailable(), "owner query failed");
            OwnerQueryOutcome {
                reply: OWNER_RELAY_APOLOGY.to_string(),
                degraded: true,
            }
        }
    }
}
