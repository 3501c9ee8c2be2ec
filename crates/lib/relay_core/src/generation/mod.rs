//! Generation module — submits a prompt sequence to the text-generation service.
//!
//! # Public API
//!
//! - [`GenerationClient`] — one call per request, returns the generated text
//! - [`GenerationRequest`] — sequence plus sampling parameters
//! - [`gemini::GeminiClient`] — Google Gemini `generateContent` implementation

pub mod gemini;

use async_trait::async_trait;
use thiserror::Error;

use crate::prompt::PromptSequence;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.6;

/// Errors raised by a generation call. Callers treat them uniformly.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generation request failed: {0}")]
    Request(String),

    #[error("Generation service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Generation response parse error: {0}")]
    Parse(String),

    #[error("Generation service returned no text")]
    EmptyResponse,
}

/// A complete generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub sequence: PromptSequence,
    pub model: String,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(sequence: PromptSequence, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            sequence,
            model: model.into(),
            temperature,
        }
    }
}

/// Client for the external generation service.
///
/// The credential is passed per call so the client itself holds no secret
/// and a missing key can be caught before any client is touched.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generates a reply for `request`. No streaming.
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError>;

    /// Client identifier for logging.
    fn name(&self) -> &str;
}
