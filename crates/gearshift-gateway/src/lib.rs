// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Gearshift classification service.
//!
//! Exposes three routes:
//! - POST /classify: classify a prompt and recommend generation settings
//! - GET /healthcheck: liveness probe
//! - GET /latency: running average classification latency

pub mod handlers;
pub mod server;

pub use server::{router, start_server, GatewayState, ServerConfig};
