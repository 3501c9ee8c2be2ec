//! # relay_core
//!
//! Core domain logic for the chat relay.
//!
//! - [`turn`] — conversation turns and the caller's transcript entries
//! - [`prompt`] — persona prompt assembly
//! - [`generation`] — generation request, client trait, and the Gemini client

pub mod generation;
pub mod prompt;
pub mod turn;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
