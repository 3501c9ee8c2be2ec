//! Request and response bodies of the chat endpoint.

use relay_core::turn::HistoryEntry;
use serde::{Deserialize, Serialize};

/// `POST /api/chat` request body.
///
/// Every field is optional; absent values are replayed as empty text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub user_message: Option<String>,
    #[serde(default)]
    pub conversation_history: Option<Vec<HistoryEntry>>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Successful reply: the generated text, untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Failure reply: fixed fallback text plus a diagnostic message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureReply {
    pub reply: String,
    pub error: String,
}

/// Body for requests rejected before reaching the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
