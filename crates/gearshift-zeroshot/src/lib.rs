// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hosted zero-shot classification client for Gearshift.
//!
//! Implements [`gearshift_core::IntentClassifier`] over an HTTP inference
//! endpoint speaking the HuggingFace zero-shot classification API shape.

mod client;
mod types;

pub use client::ZeroShotClient;
pub use types::{ZeroShotParameters, ZeroShotRequest, ZeroShotResponse};
