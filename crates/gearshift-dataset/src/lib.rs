// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synthetic labeled-prompt dataset generation for Gearshift.
//!
//! An offline batch tool: it shares the category vocabulary with the
//! classification service but none of its runtime state.

mod generator;
mod prompt;
mod types;

pub use generator::{append_examples, DatasetGenerator};
pub use prompt::build_prompt;
pub use types::SyntheticExample;
