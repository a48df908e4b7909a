// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for external capabilities consumed by the router core.

pub mod classifier;

pub use classifier::IntentClassifier;
