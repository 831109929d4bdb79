// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Circuit breaker and resilience primitives for the Quorum gateway.
//!
//! The [`CircuitBreakerRegistry`] tracks failures per named model and
//! temporarily disallows calls to models that keep failing, so the fan-out
//! controller stops spending its timeout budget on backends already known
//! to be down.

pub mod breaker;

pub use breaker::CircuitBreakerRegistry;
