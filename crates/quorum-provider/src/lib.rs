// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP provider client for the Quorum gateway.
//!
//! One [`ProviderClient`] per upstream backend, speaking the
//! OpenAI-compatible `/chat/completions` wire format. The client implements
//! [`quorum_core::CompletionBackend`], so the consensus controller and the
//! gateway never depend on reqwest directly.

pub mod client;
pub mod reason;
pub mod types;

pub use client::{ProviderClient, REQUEST_TIMEOUT};
