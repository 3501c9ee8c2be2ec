//! # relay_api
//!
//! HTTP API library for the chat relay.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::routing::post;
use relay_core::generation::GenerationClient;
use tower_http::cors::{Any, CorsLayer};

use crate::config::RelayConfig;
use crate::handlers::chat;

/// Path of the chat endpoint.
pub const CHAT_ROUTE: &str = "/api/chat";

/// Shared application state passed to all handlers.
///
/// Read-only after startup; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    /// Relay configuration, including the generation-service credential.
    pub config: RelayConfig,
    /// Client for the generation service.
    pub generator: Arc<dyn GenerationClient>,
}

/// Builds the Axum router with the chat route and shared state.
///
/// The chat route has no body size limit: transcripts are replayed in full.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers(Any);

    Router::new()
        .route(
            CHAT_ROUTE,
            post(chat::chat_handler)
                .fallback(chat::method_not_allowed)
                .layer(DefaultBodyLimit::disable()),
        )
        .layer(cors)
        .with_state(state)
}
