// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Quorum gateway.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Quorum configuration.
///
/// Loaded from TOML files with environment variable overrides. All sections
/// are optional and default to sensible values; API keys have no defaults
/// and are expected to arrive via `QUORUM_PROVIDERS_*` environment variables
/// or the local config file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QuorumConfig {
    /// HTTP server bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Agent behavior settings (log level, system prompt).
    #[serde(default)]
    pub agent: AgentConfig,

    /// Consensus fan-out settings.
    #[serde(default)]
    pub consensus: ConsensusConfig,

    /// Upstream provider credentials and endpoints.
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// HTTP server bind configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Agent behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Server-owned system prompt. Always prepended to every conversation;
    /// client-supplied system messages are discarded in its favor.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            system_prompt: default_system_prompt(),
        }
    }
}

/// Consensus fan-out configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConsensusConfig {
    /// Primary-provider model roster queried concurrently on fan-out.
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Sampling temperature used when the request does not specify one.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            temperature: default_temperature(),
        }
    }
}

/// Per-backend credentials and endpoint configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    /// OpenRouter (fan-out primary).
    #[serde(default)]
    pub openrouter: BackendConfig,

    /// Groq (single-call alternate).
    #[serde(default)]
    pub groq: BackendConfig,

    /// Mistral (single-call alternate).
    #[serde(default)]
    pub mistral: BackendConfig,
}

/// Credentials and endpoint for one upstream backend.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Bearer API key. A backend without a key is disabled and requests
    /// selecting it are rejected before any network call.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Completion endpoint base URL. Falls back to the backend's public
    /// endpoint when unset.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Default model for single-call backends when the request names none.
    #[serde(default)]
    pub model: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_system_prompt() -> String {
    "You are a careful assistant. Answer concisely and factually.".to_string()
}

fn default_models() -> Vec<String> {
    vec![
        "openai/gpt-4o-mini".to_string(),
        "anthropic/claude-3.5-haiku".to_string(),
        "meta-llama/llama-3.3-70b-instruct".to_string(),
    ]
}

fn default_temperature() -> f64 {
    0.7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = QuorumConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.agent.log_level, "info");
        assert_eq!(config.consensus.models.len(), 3);
        assert!(config.providers.openrouter.api_key.is_none());
        assert!(config.providers.groq.api_key.is_none());
        assert!(config.providers.mistral.api_key.is_none());
    }

    #[test]
    fn default_roster_has_three_distinct_models() {
        let models = default_models();
        assert_eq!(models.len(), 3);
        let unique: std::collections::HashSet<_> = models.iter().collect();
        assert_eq!(unique.len(), 3);
    }
}
