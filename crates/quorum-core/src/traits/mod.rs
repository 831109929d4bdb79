// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions that seam the core orchestration off from its
//! collaborators.

pub mod provider;

pub use provider::CompletionBackend;
