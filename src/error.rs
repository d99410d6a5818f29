use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::{json, Value};
use thiserror::Error;

/// Failures a proxy handler can report to the browser.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// A required field is missing or the request body is malformed. Never reaches upstream.
    #[error("{0}")]
    Validation(String),
    #[error("Network error: {0}")]
    UpstreamUnreachable(String),
    #[error("Invalid JSON response from API: {0}")]
    UpstreamBadResponse(String),
    #[error("Upstream returned {status}: {message}")]
    UpstreamRejected {
        status: u16,
        message: String,
        details: Value,
    },
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ProxyError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    fn body(&self) -> Value {
        match self {
            Self::Validation(message) => json!({ "error": message }),
            Self::UpstreamUnreachable(details) => {
                json!({ "error": "Network error", "details": details })
            }
            Self::UpstreamBadResponse(details) => {
                json!({ "error": "Invalid JSON response from API", "details": details })
            }
            Self::UpstreamRejected {
                status,
                message,
                details,
            } => json!({ "error": message, "status": status, "details": details }),
            Self::Internal(details) => {
                json!({ "error": "Internal server error", "details": details })
            }
        }
    }
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamUnreachable(_) | Self::UpstreamBadResponse(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamRejected { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(%status, "{}", self);
        } else {
            tracing::warn!(%status, "{}", self);
        }
        HttpResponse::build(status).json(self.body())
    }
}
