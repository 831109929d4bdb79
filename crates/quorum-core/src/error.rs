// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Quorum consensus gateway.

use thiserror::Error;

/// The primary error type used across Quorum crates.
#[derive(Debug, Error)]
pub enum QuorumError {
    /// Configuration errors (missing API key, invalid TOML, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Upstream provider errors (API failure, non-2xx status, malformed response).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An outbound call exceeded its deadline.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
