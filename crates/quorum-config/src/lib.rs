// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Quorum gateway.
//!
//! TOML files merged in layers via Figment, with `QUORUM_*` environment
//! variable overrides for credentials and deploy-time settings.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::QuorumConfig;

/// Error produced by the configuration loader.
pub use figment::Error as ConfigError;
