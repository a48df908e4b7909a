// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings merger: per-field reduction across the selected categories.
//!
//! Temperature takes the minimum across selected categories (bias toward the
//! most deterministic setting when intents disagree); the three ordinal
//! fields take the maximum under their fixed orderings (bias toward the most
//! capable setting the most demanding intent needs).
//!
//! A missing registry mapping abandons the merge entirely: the fallback is
//! all-or-nothing, explicit in [`MergeOutcome`], and resolves to the
//! registry's deterministic default settings. Partial merges never leak.

use gearshift_core::{CategoryRegistry, ModelSettings, ScoredLabel};
use tracing::warn;

/// Result of merging the selected categories' settings.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// All selected categories resolved; fields reduced per the policy.
    Merged(ModelSettings),
    /// At least one selected label had no registry mapping; the whole
    /// computation was abandoned.
    Fallback { reason: String },
}

impl MergeOutcome {
    /// Resolve to concrete settings, substituting the registry defaults on
    /// fallback (logged with the offending context).
    pub fn resolve(self, registry: &CategoryRegistry) -> ModelSettings {
        match self {
            MergeOutcome::Merged(settings) => settings,
            MergeOutcome::Fallback { reason } => {
                warn!(%reason, "settings merge fell back to defaults");
                registry.default_settings()
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, MergeOutcome::Fallback { .. })
    }
}

/// Merge the settings of every selected label's category.
///
/// `selected` is the ranking filter's output: surviving labels with their
/// confidences. Each label is resolved to its category through the registry;
/// any resolution failure yields `Fallback` without partial results.
pub fn merge(selected: &[ScoredLabel], registry: &CategoryRegistry) -> MergeOutcome {
    if selected.is_empty() {
        return MergeOutcome::Fallback {
            reason: "no labels selected".to_string(),
        };
    }

    let mut resolved = Vec::with_capacity(selected.len());
    for scored in selected {
        let Some(key) = registry.key_for_label(&scored.label) else {
            return MergeOutcome::Fallback {
                reason: format!("no category mapping for label `{}`", scored.label),
            };
        };
        let Some(settings) = registry.get(key) else {
            return MergeOutcome::Fallback {
                reason: format!("no registry entry for category `{key}`"),
            };
        };
        resolved.push(*settings);
    }

    let first = resolved[0];
    let merged = resolved.iter().skip(1).fold(first, |acc, s| ModelSettings {
        temperature: acc.temperature.min(s.temperature),
        reasoning_effort: acc.reasoning_effort.max(s.reasoning_effort),
        web: acc.web.max(s.web),
        verbosity: acc.verbosity.max(s.verbosity),
    });

    MergeOutcome::Merged(merged)
}

#[cfg(test)]
mod tests {
    use gearshift_core::{CategoryEntry, CategoryKey, ReasoningEffort, Verbosity, WebAccess};

    use super::*;

    fn entry(
        key: &str,
        label: &str,
        temperature: f64,
        reasoning_effort: ReasoningEffort,
        web: WebAccess,
        verbosity: Verbosity,
    ) -> CategoryEntry {
        CategoryEntry {
            key: CategoryKey::from(key),
            label: label.to_string(),
            settings: ModelSettings {
                temperature,
                reasoning_effort,
                web,
                verbosity,
            },
        }
    }

    fn test_registry() -> CategoryRegistry {
        CategoryRegistry::new(vec![
            entry(
                "Creative_Writing",
                "creative writing",
                0.9,
                ReasoningEffort::Minimal,
                WebAccess::Disabled,
                Verbosity::Verbose,
            ),
            entry(
                "Coding",
                "coding",
                0.7,
                ReasoningEffort::High,
                WebAccess::Optional,
                Verbosity::Balanced,
            ),
            entry(
                "Factual_QA",
                "factual qa",
                0.3,
                ReasoningEffort::Medium,
                WebAccess::Mandatory,
                Verbosity::Concise,
            ),
        ])
        .unwrap()
    }

    #[test]
    fn single_category_merges_to_its_own_settings() {
        let registry = test_registry();
        let outcome = merge(&[ScoredLabel::new("coding", 0.8)], &registry);
        assert_eq!(
            outcome,
            MergeOutcome::Merged(*registry.get(&CategoryKey::from("Coding")).unwrap())
        );
    }

    #[test]
    fn temperature_takes_minimum_ordinals_take_maximum() {
        let registry = test_registry();
        let outcome = merge(
            &[
                ScoredLabel::new("creative writing", 0.6),
                ScoredLabel::new("coding", 0.55),
            ],
            &registry,
        );
        // temperatures [0.9, 0.7] -> 0.7; efforts [minimal, high] -> high
        let MergeOutcome::Merged(settings) = outcome else {
            panic!("expected merged outcome");
        };
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.reasoning_effort, ReasoningEffort::High);
        assert_eq!(settings.web, WebAccess::Optional);
        assert_eq!(settings.verbosity, Verbosity::Verbose);
    }

    #[test]
    fn three_way_merge_reduces_every_field_independently() {
        let registry = test_registry();
        let outcome = merge(
            &[
                ScoredLabel::new("creative writing", 0.6),
                ScoredLabel::new("coding", 0.58),
                ScoredLabel::new("factual qa", 0.55),
            ],
            &registry,
        );
        let MergeOutcome::Merged(settings) = outcome else {
            panic!("expected merged outcome");
        };
        assert_eq!(settings.temperature, 0.3);
        assert_eq!(settings.reasoning_effort, ReasoningEffort::High);
        assert_eq!(settings.web, WebAccess::Mandatory);
        assert_eq!(settings.verbosity, Verbosity::Verbose);
    }

    #[test]
    fn merged_temperature_stays_within_contributing_range() {
        let registry = test_registry();
        let outcome = merge(
            &[
                ScoredLabel::new("coding", 0.6),
                ScoredLabel::new("factual qa", 0.55),
            ],
            &registry,
        );
        let MergeOutcome::Merged(settings) = outcome else {
            panic!("expected merged outcome");
        };
        assert!(settings.temperature >= 0.3 && settings.temperature <= 0.7);
    }

    #[test]
    fn unknown_label_abandons_the_whole_merge() {
        let registry = test_registry();
        let outcome = merge(
            &[
                ScoredLabel::new("coding", 0.6),
                ScoredLabel::new("no such label", 0.55),
            ],
            &registry,
        );
        assert!(outcome.is_fallback());

        // Resolution substitutes the full default configuration, never a
        // partially-merged one.
        let settings = outcome.resolve(&registry);
        assert_eq!(settings, registry.default_settings());
        assert_eq!(settings.temperature, 0.9);
        assert_eq!(settings.reasoning_effort, ReasoningEffort::Minimal);
    }

    #[test]
    fn empty_selection_is_a_fallback() {
        let registry = test_registry();
        assert!(merge(&[], &registry).is_fallback());
    }

    #[test]
    fn merged_outcome_resolves_to_itself() {
        let registry = test_registry();
        let outcome = merge(&[ScoredLabel::new("factual qa", 0.9)], &registry);
        let settings = outcome.resolve(&registry);
        assert_eq!(settings.web, WebAccess::Mandatory);
        assert_eq!(settings.temperature, 0.3);
    }
}
