// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `quorum serve` command implementation.
//!
//! Wires configuration into provider clients, the circuit breaker registry,
//! the consensus controller, and the gateway HTTP server. Backends without
//! a configured API key are disabled; requests selecting them are rejected
//! by the gateway before any call.

use std::sync::Arc;

use quorum_config::QuorumConfig;
use quorum_config::model::BackendConfig;
use quorum_consensus::ConsensusController;
use quorum_core::QuorumError;
use quorum_gateway::{GatewayState, ServerConfig, SingleBackend, start_server};
use quorum_provider::ProviderClient;
use quorum_resilience::CircuitBreakerRegistry;
use tracing::{info, warn};

const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";

const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const MISTRAL_DEFAULT_MODEL: &str = "mistral-small-latest";

/// Runs the `quorum serve` command.
pub async fn run_serve(config: QuorumConfig) -> Result<(), QuorumError> {
    init_tracing(&config.agent.log_level);

    info!("starting quorum serve");

    let state = build_state(&config)?;

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    start_server(&server_config, state).await
}

/// Builds gateway state from configuration.
fn build_state(config: &QuorumConfig) -> Result<GatewayState, QuorumError> {
    let consensus = match &config.providers.openrouter.api_key {
        Some(key) => {
            let base_url = config
                .providers
                .openrouter
                .base_url
                .clone()
                .unwrap_or_else(|| OPENROUTER_BASE_URL.to_string());
            let client = ProviderClient::new(base_url, key)?;
            info!(
                models = ?config.consensus.models,
                "consensus backend enabled"
            );
            Some(Arc::new(ConsensusController::new(
                Arc::new(client),
                Arc::new(CircuitBreakerRegistry::new()),
                config.consensus.models.clone(),
            )))
        }
        None => {
            warn!("openrouter API key not configured; consensus backend disabled");
            None
        }
    };

    let groq = single_backend(
        &config.providers.groq,
        GROQ_BASE_URL,
        GROQ_DEFAULT_MODEL,
        "groq",
    )?;
    let mistral = single_backend(
        &config.providers.mistral,
        MISTRAL_BASE_URL,
        MISTRAL_DEFAULT_MODEL,
        "mistral",
    )?;

    Ok(GatewayState {
        consensus,
        groq,
        mistral,
        system_prompt: Arc::new(config.agent.system_prompt.clone()),
        default_temperature: config.consensus.temperature,
    })
}

/// Builds one single-call backend if its API key is configured.
fn single_backend(
    backend_config: &BackendConfig,
    default_base_url: &str,
    default_model: &str,
    name: &str,
) -> Result<Option<SingleBackend>, QuorumError> {
    match &backend_config.api_key {
        Some(key) => {
            let base_url = backend_config
                .base_url
                .clone()
                .unwrap_or_else(|| default_base_url.to_string());
            let client = ProviderClient::new(base_url, key)?;
            info!(backend = name, "single-call backend enabled");
            Ok(Some(SingleBackend {
                client: Arc::new(client),
                default_model: backend_config
                    .model
                    .clone()
                    .unwrap_or_else(|| default_model.to_string()),
            }))
        }
        None => {
            warn!(backend = name, "API key not configured; backend disabled");
            Ok(None)
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quorum={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
