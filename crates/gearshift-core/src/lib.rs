// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Gearshift prompt router.
//!
//! Provides the shared domain types (category registry, ordinal settings
//! vocabularies, scored labels), the error taxonomy, and the
//! [`IntentClassifier`] trait abstracting the external zero-shot classifier.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GearshiftError;
pub use traits::IntentClassifier;
pub use types::{
    CategoryEntry, CategoryKey, CategoryRegistry, Classification, ModelSettings, ReasoningEffort,
    ScoredCategory, ScoredLabel, SettingsReport, Verbosity, WebAccess,
};
