// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Quorum consensus chat operation.
//!
//! Exposes POST /v1/chat with the uniform `{ ok, ... }` envelope over the
//! consensus fan-out and the single-call backends, plus GET /v1/health.

pub mod handlers;
pub mod server;

pub use handlers::Backend;
pub use server::{GatewayState, ServerConfig, SingleBackend, build_router, start_server};
