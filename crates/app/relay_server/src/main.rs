//! Chat relay server binary.
//!
//! Serves `POST /api/chat`, relaying widget messages to Gemini.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use relay_api::config::{DEFAULT_BIND_ADDR, RelayConfig};
use relay_core::generation::gemini::{GEMINI_API_BASE_URL, GeminiClient, GeminiConfig};
use relay_core::generation::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use tracing::{info, warn};

/// CLI arguments for the relay server.
#[derive(Parser, Debug)]
#[command(name = "relay_server", about = "Chat relay server", version)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    bind_addr: String,

    /// Gemini API key. Without it every chat request returns the fallback reply.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model identifier.
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Sampling temperature.
    #[arg(long, env = "GEMINI_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Gemini API base URL.
    #[arg(long, env = "GEMINI_API_BASE_URL", default_value = GEMINI_API_BASE_URL)]
    api_base_url: String,

    /// Attempts per generation call (1 = no retry, at most 5).
    #[arg(long, env = "GEMINI_MAX_ATTEMPTS", default_value_t = 1)]
    max_attempts: u32,

    /// Upstream request timeout in seconds. Unset keeps the transport default.
    #[arg(long, env = "GEMINI_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

impl Args {
    fn into_config(self) -> RelayConfig {
        RelayConfig {
            bind_addr: self.bind_addr,
            api_key: self.api_key.filter(|k| !k.is_empty()),
            model: self.model,
            temperature: self.temperature,
            gemini: GeminiConfig {
                base_url: self.api_base_url,
                max_attempts: self.max_attempts,
                timeout: self.timeout_secs.map(Duration::from_secs),
                ..GeminiConfig::default()
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,relay_api=debug,relay_core=debug".parse().unwrap()),
        )
        .init();

    let config = Args::parse().into_config();

    info!(
        bind_addr = %config.bind_addr,
        model = %config.model,
        temperature = config.temperature,
        max_attempts = config.gemini.max_attempts,
        "starting relay_server"
    );

    if config.api_key().is_none() {
        warn!("GEMINI_API_KEY is not set; every chat request will return the fallback reply");
    }

    let generator = GeminiClient::new(config.gemini.clone())?;
    let state = relay_api::AppState {
        config: config.clone(),
        generator: Arc::new(generator),
    };

    let app = relay_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, route = relay_api::CHAT_ROUTE, "chat relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("relay_server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
