// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Failure-reason summarization for upstream error bodies.
//!
//! Upstream error bodies can echo request headers or carry provider-side
//! detail of unbounded size. Reasons surfaced to the breaker and caller are
//! redacted against known secret formats and truncated to a fixed budget.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum length of a surfaced failure reason, in characters.
const MAX_REASON_CHARS: usize = 200;

/// The redaction placeholder.
const REDACTED: &str = "[REDACTED]";

/// Known secret patterns to redact from surfaced error text.
static REDACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // OpenRouter / OpenAI style keys: sk-..., sk-or-...
        Regex::new(r"sk-[a-zA-Z0-9_\-]{16,}").unwrap(),
        // Groq keys: gsk_...
        Regex::new(r"gsk_[a-zA-Z0-9]{16,}").unwrap(),
        // Bearer tokens echoed in headers
        Regex::new(r"Bearer\s+[a-zA-Z0-9._\-]{10,}").unwrap(),
    ]
});

/// Summarize a non-success response into a safe failure reason.
///
/// The body is redacted first so truncation cannot split a secret into a
/// surviving prefix.
pub fn summarize_failure(status: u16, body: &str) -> String {
    let mut text = body.trim().to_string();
    for pattern in REDACTION_PATTERNS.iter() {
        text = pattern.replace_all(&text, REDACTED).to_string();
    }
    let summary = truncate_chars(&text, MAX_REASON_CHARS);
    if summary.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {summary}")
    }
}

/// Truncate to at most `max` characters, appending an ellipsis marker when
/// anything was cut. Operates on chars, never splitting a UTF-8 boundary.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_passes_through() {
        let reason = summarize_failure(502, r#"{"error": "bad gateway"}"#);
        assert_eq!(reason, r#"HTTP 502: {"error": "bad gateway"}"#);
    }

    #[test]
    fn empty_body_yields_status_only() {
        assert_eq!(summarize_failure(503, ""), "HTTP 503");
        assert_eq!(summarize_failure(503, "   "), "HTTP 503");
    }

    #[test]
    fn long_body_is_truncated() {
        let body = "x".repeat(500);
        let reason = summarize_failure(500, &body);
        assert!(reason.chars().count() < 220, "got {} chars", reason.chars().count());
        assert!(reason.ends_with('…'));
    }

    #[test]
    fn api_keys_are_redacted() {
        let body = "invalid key sk-or-v1-abcdefghijklmnopqrstuvwxyz0123456789 rejected";
        let reason = summarize_failure(401, body);
        assert!(!reason.contains("abcdefghijklmnop"), "got: {reason}");
        assert!(reason.contains("[REDACTED]"));
    }

    #[test]
    fn bearer_tokens_are_redacted() {
        let body = "unauthorized: Bearer gsk_abc123def456ghi789jkl was refused";
        let reason = summarize_failure(401, body);
        assert!(!reason.contains("gsk_abc123"), "got: {reason}");
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        let body = "é".repeat(300);
        let reason = summarize_failure(500, &body);
        assert!(reason.ends_with('…'));
    }
}
