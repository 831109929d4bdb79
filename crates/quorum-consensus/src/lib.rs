// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consensus orchestration for the Quorum gateway.
//!
//! This crate provides:
//! - [`similarity`]: Jaccard token-overlap scoring between response texts
//! - [`ConsensusController`]: concurrent fan-out to the primary provider's
//!   model roster, breaker-gated, with 2-of-3 similarity corroboration
//!
//! Fan-out bounds latency to the slowest of the concurrent calls rather
//! than their sum, and the similarity check is a cheap proxy for "the
//! winning answer is not a hallucinated outlier".

pub mod fanout;
pub mod similarity;

pub use fanout::{
    ConsensusController, ConsensusResult, ModelAnswer, PairScore, SIMILARITY_THRESHOLD, Verdict,
};
