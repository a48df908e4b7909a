// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Category selection and settings-merge policy engine for Gearshift.
//!
//! This crate provides:
//! - [`SelectionPolicy`]: the dual-threshold ranking filter that turns a
//!   ranked `(label, confidence)` list into the selected category set
//! - [`merge`]: the per-field settings reduction with an explicit
//!   all-or-nothing fallback ([`MergeOutcome`])
//! - [`ClassificationEngine`]: the thin orchestration composing the
//!   classifier capability, filter, merger, registry, and latency ledger

pub mod engine;
pub mod filter;
pub mod merge;

pub use engine::ClassificationEngine;
pub use filter::SelectionPolicy;
pub use merge::{merge, MergeOutcome};
