//! Relay configuration.

use relay_core::generation::gemini::GeminiConfig;
use relay_core::generation::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Configuration for the relay. Built once at startup and never mutated.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// Generation-service API key. `None` fails every chat request.
    pub api_key: Option<String>,
    /// Model identifier sent with every generation call.
    pub model: String,
    /// Sampling temperature sent with every generation call.
    pub temperature: f32,
    /// Upstream transport settings.
    pub gemini: GeminiConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            api_key: None,
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            gemini: GeminiConfig::default(),
        }
    }
}

impl RelayConfig {
    /// The credential, treating an empty string as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}
