//! Google Gemini generation client.
//!
//! Calls `POST {base}/models/{model}:generateContent` with the key in the
//! `x-goog-api-key` header. One attempt by default; when configured with
//! more, transport errors and 429/5xx responses are retried with
//! exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

use super::{GenerationClient, GenerationError, GenerationRequest};
use crate::turn::{ChatTurn, Role};

/// Public Gemini API endpoint.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Upper bound on attempts per request, whatever is configured.
pub const MAX_ATTEMPTS: u32 = 5;

/// Transport settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API base URL, without trailing `/models`.
    pub base_url: String,
    /// Total attempts per request (1 = no retry), clamped to [`MAX_ATTEMPTS`].
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub retry_backoff: Duration,
    /// Whole-request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: GEMINI_API_BASE_URL.to_string(),
            max_attempts: 1,
            retry_backoff: Duration::from_secs(2),
            timeout: None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: SamplingConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SamplingConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl<'a> From<&'a ChatTurn> for Content<'a> {
    fn from(turn: &'a ChatTurn) -> Self {
        let role = match turn.role {
            Role::User => "user",
            Role::Assistant => "model",
        };
        Content {
            role,
            parts: vec![Part { text: &turn.text }],
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let texts: Vec<String> = parts.into_iter().filter_map(|p| p.text).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GenerationError::Request(format!("HTTP client build failed: {e}")))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Single upstream call.
    async fn generate_once(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        let body = GenerateContentRequest {
            contents: request.sequence.turns().iter().map(Content::from).collect(),
            generation_config: SamplingConfig {
                temperature: request.temperature,
            },
        };

        let resp = self
            .client
            .post(self.endpoint(&request.model))
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let raw = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let data: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| GenerationError::Parse(e.to_string()))?;

        data.into_text().ok_or(GenerationError::EmptyResponse)
    }
}

/// Delay before retry number `attempt + 1`: `base * 2^attempt`, saturating.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// Transport failures, throttling and server errors may succeed on retry.
fn is_retryable(err: &GenerationError) -> bool {
    match err {
        GenerationError::Request(_) => true,
        GenerationError::Status { status, .. } => {
            *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
        }
        GenerationError::Parse(_) | GenerationError::EmptyResponse => false,
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        let max_attempts = self.config.max_attempts.clamp(1, MAX_ATTEMPTS);
        let mut attempt = 0;

        loop {
            debug!(
                model = %request.model,
                turns = request.sequence.len(),
                attempt,
                "calling Gemini generateContent"
            );

            match self.generate_once(api_key, request).await {
                Ok(text) => return Ok(text),
                Err(e) if attempt + 1 < max_attempts && is_retryable(&e) => {
                    let backoff = backoff_delay(self.config.retry_backoff, attempt);
                    warn!(attempt, error = %e, ?backoff, "Gemini call failed, retrying");
                    sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
