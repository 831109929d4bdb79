// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles POST /v1/chat and GET /v1/health. Every failure path returns the
//! uniform `{ ok: false, error, details? }` envelope; nothing escapes as an
//! unhandled fault.

use std::str::FromStr;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::{Display, EnumString};
use tracing::debug;

use quorum_core::{ChatMessage, Role};
use quorum_consensus::Verdict;

use crate::server::GatewayState;

/// Maximum conversation length after the server prompt is prepended.
pub const MAX_MESSAGES: usize = 30;

/// Maximum content length of a single message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 6000;

/// Selectable upstream backend variants. Resolved once at entry so the
/// downstream dispatch stays switch-free over raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Backend {
    /// Fan-out-capable primary: three models, breaker-gated, consensus.
    Openrouter,
    /// Single-call alternate.
    Groq,
    /// Single-call alternate.
    Mistral,
}

impl Backend {
    /// Selector strings accepted by the chat operation.
    pub const SUPPORTED: [&'static str; 3] = ["openrouter", "groq", "mistral"];
}

/// Request body for POST /v1/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages, in order.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Backend selector. Kept as a string so unknown values produce the
    /// enumerated `unknown_provider` error rather than a decode failure.
    #[serde(default)]
    pub backend: String,
    /// Optional model override.
    #[serde(default)]
    pub model: Option<String>,
    /// Optional sampling temperature.
    #[serde(default)]
    pub temperature: Option<f64>,
}

/// Success body for the fan-out backend.
#[derive(Debug, Serialize)]
pub struct ConsensusChatResponse {
    pub ok: bool,
    pub backend: String,
    pub verdict: Verdict,
    pub winner_model: String,
    pub message: String,
    /// Models that produced any successful response.
    pub tried_models: Vec<String>,
    /// Truncated per-model failure reasons, for diagnostics.
    pub errors: Vec<String>,
}

/// Success body for single-call backends.
#[derive(Debug, Serialize)]
pub struct SingleChatResponse {
    pub ok: bool,
    pub backend: String,
    pub model: String,
    pub result: String,
}

/// Uniform error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

fn error_response(
    status: StatusCode,
    code: &str,
    details: Option<serde_json::Value>,
) -> Response {
    (
        status,
        Json(ErrorResponse {
            ok: false,
            error: code.to_string(),
            details,
        }),
    )
        .into_response()
}

/// POST /v1/chat
///
/// Validates the conversation, substitutes the server-owned system prompt,
/// and dispatches to the consensus fan-out or a single-call backend.
pub async fn post_chat(
    State(state): State<GatewayState>,
    Json(body): Json<ChatRequest>,
) -> Response {
    if body.messages.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "messages array required", None);
    }

    // Client-supplied system messages are always discarded in favor of the
    // server-owned prompt, which is always prepended.
    let mut messages = Vec::with_capacity(body.messages.len() + 1);
    messages.push(ChatMessage::system(state.system_prompt.as_str()));
    messages.extend(
        body.messages
            .iter()
            .filter(|m| m.role != Role::System)
            .cloned(),
    );

    if messages.len() > MAX_MESSAGES {
        return error_response(
            StatusCode::BAD_REQUEST,
            "too_many_messages",
            Some(json!({ "max": MAX_MESSAGES })),
        );
    }
    if messages
        .iter()
        .any(|m| m.content.chars().count() > MAX_MESSAGE_CHARS)
    {
        return error_response(
            StatusCode::BAD_REQUEST,
            "message_too_long",
            Some(json!({ "max_chars": MAX_MESSAGE_CHARS })),
        );
    }

    let Ok(backend) = Backend::from_str(&body.backend) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "unknown_provider",
            Some(json!({ "supported": Backend::SUPPORTED })),
        );
    };

    let temperature = body.temperature.unwrap_or(state.default_temperature);
    debug!(backend = %backend, messages = messages.len(), "dispatching chat request");

    match backend {
        Backend::Openrouter => {
            let Some(controller) = state.consensus.as_ref() else {
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "missing_api_key",
                    Some(json!({ "backend": backend.to_string() })),
                );
            };
            let result = controller
                .fan_out(&messages, temperature, body.model.as_deref())
                .await;
            let tried_models: Vec<String> =
                result.successes.iter().map(|s| s.model.clone()).collect();
            match result.winner {
                Some(winner) => (
                    StatusCode::OK,
                    Json(ConsensusChatResponse {
                        ok: true,
                        backend: backend.to_string(),
                        verdict: result.verdict,
                        winner_model: winner.model,
                        message: winner.content,
                        tried_models,
                        errors: result.failures,
                    }),
                )
                    .into_response(),
                // Verdict `fail`: total failure, or successes that never
                // corroborate. Either way the caller gets no answer.
                None => error_response(
                    StatusCode::BAD_GATEWAY,
                    "all_models_failed",
                    Some(json!({
                        "errors": result.failures,
                        "tried_models": tried_models,
                    })),
                ),
            }
        }
        Backend::Groq | Backend::Mistral => {
            let Some(single) = state.single_backend(backend) else {
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "missing_api_key",
                    Some(json!({ "backend": backend.to_string() })),
                );
            };
            let model = body
                .model
                .clone()
                .unwrap_or_else(|| single.default_model.clone());
            match single.client.complete(&model, &messages, temperature).await {
                Ok(result) => (
                    StatusCode::OK,
                    Json(SingleChatResponse {
                        ok: true,
                        backend: backend.to_string(),
                        model,
                        result,
                    }),
                )
                    .into_response(),
                Err(e) => error_response(
                    StatusCode::BAD_GATEWAY,
                    "provider_error",
                    Some(json!({ "message": e.to_string() })),
                ),
            }
        }
    }
}

/// Response body for GET /v1/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /v1/health
pub async fn get_health(State(_state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
