// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Quorum consensus gateway.
//!
//! This crate provides the foundational trait definitions, error types, and
//! chat message types used throughout the Quorum workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::QuorumError;
pub use traits::CompletionBackend;
pub use types::{ChatMessage, Role};
