use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failure of a single call through the AI mediation layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MediationError {
    /// Network failure, timeout, or a non-success status from the text service.
    #[error("AI service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The service answered but the payload breaks the declared output contract.
    #[error("malformed AI response: {0}")]
    MalformedResponse(String),
}

impl MediationError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Classifies a transport error. Every reqwest failure, decode errors of the
    /// vendor envelope excepted, means the service could not be reached in time.
    pub fn from_transport(service: &str, err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::malformed(format!("{service} returned an unreadable body: {err}"));
        }
        if err.is_timeout() {
            return Self::unavailable(format!("{service} request timed out"));
        }
        Self::unavailable(format!("failed to call {service}: {err}"))
    }

    /// Classifies a non-2xx answer. Auth, quota and server errors are all outages
    /// from the caller's point of view.
    pub fn from_status(service: &str, status: reqwest::StatusCode, body: &str) -> Self {
        let kind = match status.as_u16() {
            401 | 403 => "rejected credentials",
            429 => "rate limited",
            500..=599 => "server error",
            _ => "request refused",
        };
        Self::unavailable(format!("{service} {kind} ({status}): {body}"))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Mediation(#[from] MediationError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Mediation(MediationError::ServiceUnavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Mediation(MediationError::MalformedResponse(_)) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
