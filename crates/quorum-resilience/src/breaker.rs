// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-model circuit breaker registry.
//!
//! Tracks consecutive failures per model name and disallows calls for a
//! cooldown window once a model trips the threshold. State lives for the
//! process lifetime only; the breaker guards against transient upstream
//! flakiness and resetting on restart is harmless.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

/// Consecutive failures before a breaker opens.
const FAILURE_THRESHOLD: u32 = 3;

/// How long an open breaker disallows calls.
const COOLDOWN: Duration = Duration::from_secs(60);

#[derive(Debug, Default)]
struct BreakerEntry {
    consecutive_failures: u32,
    cooldown_until: Option<Instant>,
}

/// Failure-tracking guard keyed by model name.
///
/// Passed around as an `Arc` handle so tests can instantiate isolated
/// registries per case. Entries are created lazily on first reference and
/// are logically independent of each other; a single mutex over the map is
/// sufficient since every mutation is a short synchronous critical section.
/// Concurrent requests racing on the same model may lose an increment,
/// which merely delays tripping by one failure.
#[derive(Debug, Default)]
pub struct CircuitBreakerRegistry {
    entries: Mutex<HashMap<String, BreakerEntry>>,
}

impl CircuitBreakerRegistry {
    /// Creates an empty registry with all breakers closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if calls to `model` are currently allowed.
    ///
    /// A model with no recorded state, no armed cooldown, or an expired
    /// cooldown is allowed. No side effects.
    pub fn is_call_allowed(&self, model: &str) -> bool {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(model) {
            Some(entry) => entry
                .cooldown_until
                .is_none_or(|until| Instant::now() >= until),
            None => true,
        }
    }

    /// Records one failed call for `model`.
    ///
    /// On the threshold-th consecutive failure the breaker opens: a cooldown
    /// is armed from the current time and the failure counter resets so the
    /// next trip requires a fresh run of failures.
    pub fn report_failure(&self, model: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries.entry(model.to_string()).or_default();
        entry.consecutive_failures += 1;
        if entry.consecutive_failures >= FAILURE_THRESHOLD {
            entry.cooldown_until = Some(Instant::now() + COOLDOWN);
            entry.consecutive_failures = 0;
            warn!(
                model,
                cooldown_secs = COOLDOWN.as_secs(),
                "circuit breaker opened"
            );
        }
    }

    /// Records one successful call for `model`, fully healing its breaker.
    ///
    /// Resets the failure counter and clears any active cooldown, even
    /// mid-cooldown: a success can only be reported for a model that was
    /// actually dispatched, e.g. via an explicit override that bypassed the
    /// `is_call_allowed` check.
    pub fn report_success(&self, model: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries.entry(model.to_string()).or_default();
        if entry.cooldown_until.is_some() {
            debug!(model, "circuit breaker healed by success");
        }
        entry.consecutive_failures = 0;
        entry.cooldown_until = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn unknown_model_is_allowed() {
        let registry = CircuitBreakerRegistry::new();
        assert!(registry.is_call_allowed("never-seen"));
    }

    #[tokio::test(start_paused = true)]
    async fn opens_after_three_consecutive_failures() {
        let registry = CircuitBreakerRegistry::new();
        registry.report_failure("m1");
        registry.report_failure("m1");
        assert!(registry.is_call_allowed("m1"), "below threshold stays closed");
        registry.report_failure("m1");
        assert!(!registry.is_call_allowed("m1"), "third failure opens breaker");
    }

    #[tokio::test(start_paused = true)]
    async fn cooldown_expiry_closes_breaker() {
        let registry = CircuitBreakerRegistry::new();
        for _ in 0..3 {
            registry.report_failure("m1");
        }
        assert!(!registry.is_call_allowed("m1"));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(!registry.is_call_allowed("m1"), "still within cooldown");

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(registry.is_call_allowed("m1"), "cooldown elapsed");
    }

    #[tokio::test(start_paused = true)]
    async fn success_heals_mid_cooldown() {
        let registry = CircuitBreakerRegistry::new();
        for _ in 0..3 {
            registry.report_failure("m1");
        }
        assert!(!registry.is_call_allowed("m1"));

        registry.report_success("m1");
        assert!(registry.is_call_allowed("m1"), "success clears cooldown");
    }

    #[tokio::test(start_paused = true)]
    async fn success_resets_failure_counter() {
        let registry = CircuitBreakerRegistry::new();
        registry.report_failure("m1");
        registry.report_failure("m1");
        registry.report_success("m1");

        // Two more failures must not trip: the counter restarted from zero.
        registry.report_failure("m1");
        registry.report_failure("m1");
        assert!(registry.is_call_allowed("m1"));

        registry.report_failure("m1");
        assert!(!registry.is_call_allowed("m1"));
    }

    #[tokio::test(start_paused = true)]
    async fn counter_is_zero_after_reopening() {
        let registry = CircuitBreakerRegistry::new();
        for _ in 0..3 {
            registry.report_failure("m1");
        }
        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(registry.is_call_allowed("m1"));

        // After expiry the counter was already reset when the breaker armed,
        // so a fresh run of three failures is needed to trip again.
        registry.report_failure("m1");
        registry.report_failure("m1");
        assert!(registry.is_call_allowed("m1"));
        registry.report_failure("m1");
        assert!(!registry.is_call_allowed("m1"));
    }

    #[tokio::test(start_paused = true)]
    async fn models_are_independent() {
        let registry = CircuitBreakerRegistry::new();
        for _ in 0..3 {
            registry.report_failure("m1");
        }
        assert!(!registry.is_call_allowed("m1"));
        assert!(registry.is_call_allowed("m2"));
    }
}
