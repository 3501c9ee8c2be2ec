//! Conversation turns.

use serde::Deserialize;

/// Speaker of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One message in a conversation, tagged with its speaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// A transcript entry as the chat widget sends it.
///
/// Both fields are optional: entries are replayed best-effort and never
/// rejected for missing data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl From<&HistoryEntry> for ChatTurn {
    /// `"user"` maps to [`Role::User`]; any other sender, or none, is the assistant.
    fn from(entry: &HistoryEntry) -> Self {
        let role = match entry.sender.as_deref() {
            Some("user") => Role::User,
            _ => Role::Assistant,
        };
        Self {
            role,
            text: entry.content.clone().unwrap_or_default(),
        }
    }
}
