//! Persona prompt assembly.
//!
//! Every sequence sent upstream opens with the persona instruction and a
//! fixed acknowledgment, followed by the replayed transcript and the new
//! message. The generation service is conditioned positionally, so the
//! persona must come before any real conversation content.

use crate::turn::{ChatTurn, HistoryEntry};

/// Assistant turn that acknowledges the persona instruction.
pub const PERSONA_ACKNOWLEDGMENT: &str = "Understood. I will follow all instructions.";

/// Number of fixed turns preceding caller-supplied content.
pub const PERSONA_TURNS: usize = 2;

/// Persona instruction for replies in `language`.
pub fn persona_instruction(language: &str) -> String {
    format!(
        "You are AC Assistant, a friendly, professional chatbot for Aman Malik, \
         an AC Technician in Dhawni, Rampur. Respond to ALL messages in {language}. \
         Keep replies concise. Your primary job is to provide preliminary diagnosis, \
         quotes (e.g., ₹1800-₹3500), and guide users to the 'Talk to Aman' WhatsApp \
         link for booking or emergency service, as you cannot book appointments yourself."
    )
}

/// Ordered turns submitted to the generation service.
///
/// Only constructible through [`assemble`], so it always holds the two
/// persona turns and the new message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSequence(Vec<ChatTurn>);

impl PromptSequence {
    pub fn turns(&self) -> &[ChatTurn] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for an assembled sequence.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Builds `[persona, acknowledgment, ...history, user_message]`.
pub fn assemble(user_message: &str, history: &[HistoryEntry], language: &str) -> PromptSequence {
    let mut turns = Vec::with_capacity(history.len() + PERSONA_TURNS + 1);
    turns.push(ChatTurn::user(persona_instruction(language)));
    turns.push(ChatTurn::assistant(PERSONA_ACKNOWLEDGMENT));
    turns.extend(history.iter().map(ChatTurn::from));
    turns.push(ChatTurn::user(user_message));
    PromptSequence(turns)
}
