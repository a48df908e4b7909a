// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Gearshift workspace.
//!
//! The ordinal settings vocabularies are closed enums: an out-of-vocabulary
//! value cannot be represented past deserialization, and `Ord` on each enum
//! follows the weakest-to-strongest declaration order, so the settings merger
//! can use plain `max()` for its reductions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::GearshiftError;

/// Canonical short name for a prompt-intent category (e.g. "Coding").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryKey(pub String);

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One classifier output pair: a candidate label and its confidence in [0, 1].
///
/// Produced fresh per request; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    pub label: String,
    pub score: f64,
}

impl ScoredLabel {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Reasoning effort requested from the downstream model, weakest to strongest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Minimal,
    Medium,
    High,
    Maximal,
}

/// Web access mode, most-restrictive to least-restrictive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WebAccess {
    Disabled,
    Optional,
    Mandatory,
}

/// Response verbosity, terse to verbose.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Concise,
    Balanced,
    Verbose,
}

/// Recommended generation settings for one category, or the merged result
/// across several.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub temperature: f64,
    pub reasoning_effort: ReasoningEffort,
    pub web: WebAccess,
    pub verbosity: Verbosity,
}

/// The per-request settings recommendation returned to the caller:
/// merged settings plus this request's classification latency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettingsReport {
    #[serde(flatten)]
    pub settings: ModelSettings,
    pub latency_seconds: f64,
}

/// One selected category with its classifier confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCategory {
    pub name: CategoryKey,
    pub confidence: f64,
}

/// The complete per-request classification result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub categories: Vec<ScoredCategory>,
    pub settings: SettingsReport,
}

/// One registry entry: a category key, its candidate-label description fed to
/// the classifier, and its recommended settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryEntry {
    pub key: CategoryKey,
    pub label: String,
    pub settings: ModelSettings,
}

/// Immutable mapping from category keys to candidate labels and settings.
///
/// Built once at startup from validated configuration; read-only thereafter.
/// Entry order is insertion order, and the first-inserted entry supplies the
/// deterministic process-wide default settings.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    entries: Vec<CategoryEntry>,
    by_key: HashMap<String, usize>,
    by_label: HashMap<String, usize>,
}

impl CategoryRegistry {
    /// Build a registry from ordered entries.
    ///
    /// Fails on an empty entry list or on a duplicate key or label; the
    /// label-to-key mapping must be a bijection.
    pub fn new(entries: Vec<CategoryEntry>) -> Result<Self, GearshiftError> {
        if entries.is_empty() {
            return Err(GearshiftError::Config(
                "category registry must contain at least one category".to_string(),
            ));
        }

        let mut by_key = HashMap::with_capacity(entries.len());
        let mut by_label = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if by_key.insert(entry.key.0.clone(), idx).is_some() {
                return Err(GearshiftError::Config(format!(
                    "duplicate category key `{}` in registry",
                    entry.key
                )));
            }
            if by_label.insert(entry.label.clone(), idx).is_some() {
                return Err(GearshiftError::Config(format!(
                    "duplicate candidate label `{}` in registry",
                    entry.label
                )));
            }
        }

        Ok(Self {
            entries,
            by_key,
            by_label,
        })
    }

    /// Number of registered categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// Settings for a category key, if registered.
    pub fn get(&self, key: &CategoryKey) -> Option<&ModelSettings> {
        self.by_key.get(&key.0).map(|&i| &self.entries[i].settings)
    }

    /// The category key a candidate label maps to, if any.
    pub fn key_for_label(&self, label: &str) -> Option<&CategoryKey> {
        self.by_label.get(label).map(|&i| &self.entries[i].key)
    }

    /// The fixed candidate-label set, in insertion order, for classifier calls.
    pub fn candidate_labels(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.label.clone()).collect()
    }

    /// Deterministic process-wide default settings: the first-inserted entry.
    pub fn default_settings(&self) -> ModelSettings {
        // Constructor guarantees at least one entry.
        self.entries[0].settings
    }
}
