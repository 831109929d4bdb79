// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion backend trait for upstream AI provider integrations.

use async_trait::async_trait;

use crate::error::QuorumError;
use crate::types::ChatMessage;

/// One completion call against one model of one upstream provider.
///
/// Implementors issue a single request and normalize the result into plain
/// text. Breaker bookkeeping and consensus reconciliation are the caller's
/// responsibility, which keeps implementations swappable for scripted mocks
/// in tests.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Sends the message sequence to the named model and returns the primary
    /// textual completion.
    ///
    /// An empty string is a valid completion: a well-formed response with no
    /// content field yields `Ok("")`, not an error.
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        temperature: f64,
    ) -> Result<String, QuorumError>;
}
