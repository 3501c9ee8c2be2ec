//! Chat relay handler.
//!
//! `POST /api/chat`:
//! 1. Checks the generation-service credential is configured
//! 2. Parses the widget body (leniently)
//! 3. Assembles the persona prompt sequence
//! 4. Calls the generation service once
//! 5. Returns `{reply}` or the uniform fallback

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use tracing::{debug, error, info, warn};

use relay_core::generation::GenerationRequest;
use relay_core::prompt;

use crate::AppState;
use crate::error::{RelayError, RelayResult};
use crate::models::{ChatReply, ChatRequest, ErrorResponse};

/// `POST /api/chat` — relay a chat message to the generation service.
///
/// The body is read as raw bytes so that malformed JSON, or a body that
/// cannot be buffered, ends in the fallback response rather than an
/// extractor rejection.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> RelayResult<Json<ChatReply>> {
    relay(&state, body)
        .await
        .inspect_err(|e| error!(kind = e.kind(), error = %e, "chat relay failed"))
        .map(Json)
}

/// Any method other than POST on the chat route.
pub async fn method_not_allowed() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method Not Allowed".into(),
        }),
    )
}

async fn relay(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> RelayResult<ChatReply> {
    let api_key = state
        .config
        .api_key()
        .ok_or_else(|| RelayError::Configuration("API Key not configured.".into()))?;

    let body =
        body.map_err(|e| RelayError::InputShape(format!("Unreadable request body: {e}")))?;
    let request: ChatRequest = serde_json::from_slice(&body)
        .map_err(|e| RelayError::InputShape(format!("Invalid request body: {e}")))?;

    if request.user_message.is_none() || request.language.is_none() {
        warn!(
            has_user_message = request.user_message.is_some(),
            has_language = request.language.is_some(),
            "chat request missing fields, continuing with empty values"
        );
    }

    let history = request.conversation_history.unwrap_or_default();
    let sequence = prompt::assemble(
        request.user_message.as_deref().unwrap_or_default(),
        &history,
        request.language.as_deref().unwrap_or_default(),
    );
    debug!(history_len = history.len(), turns = sequence.len(), "prompt assembled");

    let generation =
        GenerationRequest::new(sequence, state.config.model.clone(), state.config.temperature);
    let reply = state.generator.generate(api_key, &generation).await?;

    info!(
        generator = state.generator.name(),
        reply_len = reply.len(),
        "chat reply generated"
    );
    Ok(ChatReply { reply })
}
