// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible chat completion endpoints.
//!
//! Provides [`ProviderClient`], which handles request construction, bearer
//! authentication, the per-call timeout, and normalization of the response
//! envelope into plain completion text.

use std::time::Duration;

use async_trait::async_trait;
use quorum_core::{ChatMessage, CompletionBackend, QuorumError};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::reason;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, WireMessage};

/// Hard per-call deadline. Expiry aborts the in-flight call only.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed response-length cap carried on every request.
const MAX_COMPLETION_TOKENS: u32 = 2048;

/// HTTP client for one upstream backend's completion endpoint.
///
/// One instance per backend; model selection happens per call. Cloning is
/// cheap (reqwest pools connections internally).
#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProviderClient {
    /// Creates a client for the given endpoint base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: &str) -> Result<Self, QuorumError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| QuorumError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| QuorumError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionBackend for ProviderClient {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        temperature: f64,
    ) -> Result<String, QuorumError> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: messages.iter().map(WireMessage::from).collect(),
            temperature,
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        let response = self
            .client
            .post(self.completions_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QuorumError::Timeout {
                        duration: REQUEST_TIMEOUT,
                    }
                } else {
                    QuorumError::Provider {
                        message: format!("HTTP request failed: {e}"),
                        source: Some(Box::new(e)),
                    }
                }
            })?;

        let status = response.status();
        debug!(status = %status, model, "completion response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuorumError::Provider {
                message: reason::summarize_failure(status.as_u16(), &body),
                source: None,
            });
        }

        let parsed: ChatCompletionResponse =
            response.json().await.map_err(|e| QuorumError::Provider {
                message: format!("failed to parse completion response: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(parsed.primary_content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> ProviderClient {
        ProviderClient::new(base_url, "test-api-key").unwrap()
    }

    fn test_messages() -> Vec<ChatMessage> {
        vec![
            ChatMessage::system("You are helpful."),
            ChatMessage::user("Hello"),
        ]
    }

    #[tokio::test]
    async fn complete_extracts_primary_content() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "id": "cmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Hi there!"}}
            ]
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client
            .complete("test-model", &test_messages(), 0.7)
            .await
            .unwrap();
        assert_eq!(result, "Hi there!");
    }

    #[tokio::test]
    async fn complete_sends_auth_and_body_fields() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "choices": [{"message": {"content": "ok"}}]
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "model": "test-model",
                "max_tokens": 2048
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete("test-model", &test_messages(), 0.7).await;
        assert!(result.is_ok(), "request should match: {result:?}");
    }

    #[tokio::test]
    async fn complete_preserves_message_order() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "choices": [{"message": {"content": "ok"}}]
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "You are helpful."},
                    {"role": "user", "content": "Hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(
            client
                .complete("test-model", &test_messages(), 0.7)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn missing_content_field_yields_empty_string() {
        let server = MockServer::start().await;

        // Structurally valid envelope with no message content.
        let response_body = serde_json::json!({"choices": [{"index": 0}]});

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client
            .complete("test-model", &test_messages(), 0.7)
            .await
            .unwrap();
        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn non_success_status_is_summarized() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"message": "model overloaded", "type": "overloaded_error"}
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .complete("test-model", &test_messages(), 0.7)
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("HTTP 503"), "got: {msg}");
        assert!(msg.contains("overloaded"), "got: {msg}");
    }

    #[tokio::test]
    async fn error_body_secrets_never_surface() {
        let server = MockServer::start().await;

        let leaky_body = format!(
            "bad key sk-or-v1-{} in request",
            "a".repeat(40)
        );

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string(leaky_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .complete("test-model", &test_messages(), 0.7)
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(!msg.contains("sk-or-v1"), "got: {msg}");
        assert!(msg.contains("[REDACTED]"), "got: {msg}");
    }

    #[tokio::test]
    async fn oversized_error_body_is_truncated() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(5000)))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .complete("test-model", &test_messages(), 0.7)
            .await
            .unwrap_err();
        assert!(err.to_string().len() < 300, "reason must be truncated");
    }
}
