// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrent multi-model fan-out with similarity-based winner selection.
//!
//! The controller consults the circuit breaker registry before dispatch,
//! queries every candidate model concurrently, reports each outcome back to
//! the breaker, and reconciles the successful answers pairwise with the
//! similarity scorer. Two corroborating answers out of three make a `pass`;
//! a single uncorroborated answer is only ever surfaced as `weak`.

use std::sync::Arc;

use futures::future::join_all;
use quorum_core::{ChatMessage, CompletionBackend};
use quorum_resilience::CircuitBreakerRegistry;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, info};

use crate::similarity;

/// Minimum pairwise score for two answers to corroborate each other.
pub const SIMILARITY_THRESHOLD: f64 = 0.6;

/// Outcome classification of one fan-out invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Verdict {
    /// At least two answers corroborate; the winner is trustworthy.
    Pass,
    /// Exactly one model answered; usable but lower-confidence.
    Weak,
    /// No usable answer: every model failed, or none corroborate.
    Fail,
}

/// A successful completion from one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelAnswer {
    pub model: String,
    pub content: String,
}

/// Similarity score for one unordered pair of successes, by index into
/// [`ConsensusResult::successes`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairScore {
    pub i: usize,
    pub j: usize,
    pub score: f64,
}

/// Immutable result of one fan-out invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsensusResult {
    pub verdict: Verdict,
    pub winner: Option<ModelAnswer>,
    pub successes: Vec<ModelAnswer>,
    pub failures: Vec<String>,
    /// Full pairwise score table, kept for diagnostics and tests.
    pub pair_scores: Vec<PairScore>,
}

impl ConsensusResult {
    fn failed(failures: Vec<String>) -> Self {
        Self {
            verdict: Verdict::Fail,
            winner: None,
            successes: Vec::new(),
            failures,
            pair_scores: Vec::new(),
        }
    }
}

/// Orchestrates concurrent calls to the primary provider's model roster.
pub struct ConsensusController {
    backend: Arc<dyn CompletionBackend>,
    breaker: Arc<CircuitBreakerRegistry>,
    roster: Vec<String>,
}

impl ConsensusController {
    /// Creates a controller over the given backend, breaker registry, and
    /// model roster.
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        breaker: Arc<CircuitBreakerRegistry>,
        roster: Vec<String>,
    ) -> Self {
        Self {
            backend,
            breaker,
            roster,
        }
    }

    /// The configured model roster.
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    /// Fans the conversation out to every candidate model concurrently and
    /// reconciles the settled outcomes into a [`ConsensusResult`].
    ///
    /// With `model_override` the roster and breaker checks are bypassed and
    /// only that model is queried. Otherwise candidates are the roster
    /// filtered to breaker-allowed models; if that filter empties the set,
    /// the roster head is tried regardless of breaker state so the system
    /// never refuses to try entirely.
    ///
    /// Every dispatched call settles independently; one failure never
    /// cancels the others. Settled outcomes are reported back to the
    /// breaker. Models the breaker filtered out are never dispatched and
    /// never counted as fresh failures.
    pub async fn fan_out(
        &self,
        messages: &[ChatMessage],
        temperature: f64,
        model_override: Option<&str>,
    ) -> ConsensusResult {
        let candidates: Vec<String> = match model_override {
            Some(model) => vec![model.to_string()],
            None => {
                let allowed: Vec<String> = self
                    .roster
                    .iter()
                    .filter(|m| self.breaker.is_call_allowed(m))
                    .cloned()
                    .collect();
                if allowed.is_empty() {
                    match self.roster.first() {
                        Some(first) => {
                            debug!(
                                model = first.as_str(),
                                "all breakers open, falling back to roster head"
                            );
                            vec![first.clone()]
                        }
                        None => {
                            return ConsensusResult::failed(vec![
                                "no models configured for fan-out".to_string(),
                            ]);
                        }
                    }
                } else {
                    allowed
                }
            }
        };

        debug!(candidates = ?candidates, "dispatching consensus fan-out");

        let calls = candidates.iter().map(|model| {
            let model = model.clone();
            async move {
                let outcome = self.backend.complete(&model, messages, temperature).await;
                (model, outcome)
            }
        });
        let settled = join_all(calls).await;

        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for (model, outcome) in settled {
            match outcome {
                Ok(content) => {
                    self.breaker.report_success(&model);
                    successes.push(ModelAnswer { model, content });
                }
                Err(e) => {
                    self.breaker.report_failure(&model);
                    failures.push(format!("{model}: {e}"));
                }
            }
        }

        let result = reconcile(successes, failures);
        info!(
            verdict = %result.verdict,
            successes = result.successes.len(),
            failures = result.failures.len(),
            winner = result.winner.as_ref().map(|w| w.model.as_str()),
            "consensus fan-out settled"
        );
        result
    }
}

/// Classifies settled outcomes into a verdict and picks the winner.
fn reconcile(successes: Vec<ModelAnswer>, failures: Vec<String>) -> ConsensusResult {
    match successes.len() {
        0 => ConsensusResult {
            verdict: Verdict::Fail,
            winner: None,
            successes,
            failures,
            pair_scores: Vec::new(),
        },
        1 => {
            // No peer to compare against: usable, flagged lower-confidence.
            let winner = successes[0].clone();
            ConsensusResult {
                verdict: Verdict::Weak,
                winner: Some(winner),
                successes,
                failures,
                pair_scores: Vec::new(),
            }
        }
        _ => {
            let mut pair_scores = Vec::new();
            let mut best: Option<PairScore> = None;
            for i in 0..successes.len() {
                for j in (i + 1)..successes.len() {
                    let pair = PairScore {
                        i,
                        j,
                        score: similarity::score(&successes[i].content, &successes[j].content),
                    };
                    pair_scores.push(pair);
                    // Strict > keeps the first pair on ties, in the stable
                    // ascending (i, j) enumeration order.
                    if best.is_none_or(|b| pair.score > b.score) {
                        best = Some(pair);
                    }
                }
            }

            // len >= 2 guarantees at least one pair.
            let Some(top) = best else {
                return ConsensusResult {
                    verdict: Verdict::Fail,
                    winner: None,
                    successes,
                    failures,
                    pair_scores,
                };
            };

            if top.score >= SIMILARITY_THRESHOLD {
                // Longer content wins the pair; ties go to the first member.
                let first = &successes[top.i];
                let second = &successes[top.j];
                let winner = if second.content.chars().count() > first.content.chars().count() {
                    second.clone()
                } else {
                    first.clone()
                };
                ConsensusResult {
                    verdict: Verdict::Pass,
                    winner: Some(winner),
                    successes,
                    failures,
                    pair_scores,
                }
            } else {
                // Successes exist but none corroborate: no reliable answer
                // beats an unverified one.
                ConsensusResult {
                    verdict: Verdict::Fail,
                    winner: None,
                    successes,
                    failures,
                    pair_scores,
                }
            }
        }
    }
}
