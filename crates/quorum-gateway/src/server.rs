// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, CORS, and shared state for the chat endpoint.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use quorum_consensus::ConsensusController;
use quorum_core::{CompletionBackend, QuorumError};
use tower_http::cors::CorsLayer;

use crate::handlers::{self, Backend};

/// One configured single-call backend.
#[derive(Clone)]
pub struct SingleBackend {
    /// Client for the backend's completion endpoint.
    pub client: Arc<dyn CompletionBackend>,
    /// Model used when the request names none.
    pub default_model: String,
}

/// Shared state for axum request handlers.
///
/// A `None` backend means no credential was configured for it; requests
/// selecting it are rejected before any call is attempted.
#[derive(Clone)]
pub struct GatewayState {
    /// Fan-out controller for the primary provider.
    pub consensus: Option<Arc<ConsensusController>>,
    /// Groq single-call backend.
    pub groq: Option<SingleBackend>,
    /// Mistral single-call backend.
    pub mistral: Option<SingleBackend>,
    /// Server-owned system prompt, prepended to every conversation.
    pub system_prompt: Arc<String>,
    /// Temperature used when the request does not specify one.
    pub default_temperature: f64,
}

impl GatewayState {
    /// Looks up the single-call backend for a selector, if configured.
    pub fn single_backend(&self, backend: Backend) -> Option<&SingleBackend> {
        match backend {
            Backend::Groq => self.groq.as_ref(),
            Backend::Mistral => self.mistral.as_ref(),
            Backend::Openrouter => None,
        }
    }
}

/// Gateway server configuration (mirrors ServerConfig from quorum-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the gateway router. Exposed separately from [`start_server`] so
/// tests can drive it without binding a socket.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/v1/chat", post(handlers::post_chat))
        .route("/v1/health", get(handlers::get_health))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Start the gateway HTTP server.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), QuorumError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| QuorumError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| QuorumError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8787,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
        assert!(debug.contains("8787"));
    }

    #[test]
    fn gateway_state_is_clone() {
        let state = GatewayState {
            consensus: None,
            groq: None,
            mistral: None,
            system_prompt: Arc::new("prompt".to_string()),
            default_temperature: 0.7,
        };
        let cloned = state.clone();
        assert!(cloned.single_backend(Backend::Groq).is_none());
        assert!(cloned.single_backend(Backend::Mistral).is_none());
    }
}
