// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports `./quorum.toml` > `~/.config/quorum/quorum.toml` >
//! `/etc/quorum/quorum.toml` with environment variable overrides via the
//! `QUORUM_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::QuorumConfig;

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/quorum/quorum.toml` (system-wide)
/// 3. `~/.config/quorum/quorum.toml` (user XDG config)
/// 4. `./quorum.toml` (local directory)
/// 5. `QUORUM_*` environment variables
pub fn load_config() -> Result<QuorumConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(QuorumConfig::default()))
        .merge(Toml::file("/etc/quorum/quorum.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("quorum/quorum.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("quorum.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for testing and embedded configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<QuorumConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(QuorumConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<QuorumConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(QuorumConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `QUORUM_PROVIDERS_OPENROUTER_API_KEY`
/// must map to `providers.openrouter.api_key`, not `providers.openrouter.api.key`.
fn env_provider() -> Env {
    Env::prefixed("QUORUM_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("agent_", "agent.", 1)
            .replacen("consensus_", "consensus.", 1)
            .replacen("providers_openrouter_", "providers.openrouter.", 1)
            .replacen("providers_groq_", "providers.groq.", 1)
            .replacen("providers_mistral_", "providers.mistral.", 1);
        mapped.into()
    })
}
