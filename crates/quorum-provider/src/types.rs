// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for OpenAI-compatible chat completion endpoints.

use quorum_core::ChatMessage;
use serde::{Deserialize, Serialize};

/// Request body for POST {base_url}/chat/completions.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier (e.g., "openai/gpt-4o-mini").
    pub model: String,
    /// Conversation messages in order.
    pub messages: Vec<WireMessage>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Response-length cap.
    pub max_tokens: u32,
}

/// A single message in the OpenAI-compatible wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    /// Role string: "system", "user", or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.to_string(),
            content: msg.content.clone(),
        }
    }
}

/// Response body from a chat completion endpoint.
///
/// Every field is defaulted: a structurally valid response missing the
/// expected content path normalizes to an empty completion rather than a
/// parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ChatCompletionResponse {
    /// Extracts the primary textual completion, or empty when absent.
    pub fn primary_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default()
    }
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

/// The assistant message within a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}
