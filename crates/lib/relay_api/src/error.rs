//! Relay error types.
//!
//! Every failure after method validation becomes the same 500 response:
//! the fixed fallback reply plus a diagnostic `error` message. The variant
//! only matters for logs and tests.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_core::generation::GenerationError;
use thiserror::Error;

use crate::models::FailureReply;

/// User-facing reply for every failure.
pub const FALLBACK_REPLY: &str =
    "Sorry, Aman's AI server is busy right now. Please use the 'Talk to Aman' link!";

/// Convenience alias for relay results.
pub type RelayResult<T> = Result<T, RelayError>;

/// Relay failures, distinguished internally only.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    InputShape(String),
}

impl RelayError {
    /// Short tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Configuration(_) => "configuration",
            RelayError::Upstream(_) => "upstream",
            RelayError::InputShape(_) => "input_shape",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = Json(FailureReply {
            reply: FALLBACK_REPLY.to_string(),
            error: self.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<GenerationError> for RelayError {
    fn from(e: GenerationError) -> Self {
        RelayError::Upstream(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_is_a_500() {
        for err in [
            RelayError::Configuration("c".into()),
            RelayError::Upstream("u".into()),
            RelayError::InputShape("i".into()),
        ] {
            assert_eq!(
                err.into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[test]
    fn generation_errors_become_upstream() {
        let err = RelayError::from(GenerationError::Status {
            status: 429,
            message: "quota".into(),
        });
        assert_eq!(err.kind(), "upstream");
        assert!(err.to_string().contains("quota"));
    }
}
