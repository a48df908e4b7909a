// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification orchestration: the thin composition over filter, merger,
//! registry, and ledger.
//!
//! Two terminal outcomes only: the classifier succeeded and the filtered
//! path runs, or the classifier failed/returned nothing and the default path
//! runs. Classifier, registry, and ledger failures are all recovered here;
//! `classify` is infallible by construction and always returns a
//! structurally valid response.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use gearshift_core::{
    CategoryRegistry, Classification, GearshiftError, IntentClassifier, ScoredCategory,
    ScoredLabel, SettingsReport,
};
use gearshift_latency::LatencyLedger;

use crate::filter::SelectionPolicy;
use crate::merge;

/// The classification engine: immutable policy plus injected collaborators.
pub struct ClassificationEngine {
    classifier: Arc<dyn IntentClassifier>,
    registry: Arc<CategoryRegistry>,
    ledger: Arc<LatencyLedger>,
    policy: SelectionPolicy,
    classifier_timeout: Duration,
    multi_label: bool,
}

impl ClassificationEngine {
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        registry: Arc<CategoryRegistry>,
        ledger: Arc<LatencyLedger>,
        policy: SelectionPolicy,
        classifier_timeout: Duration,
        multi_label: bool,
    ) -> Self {
        Self {
            classifier,
            registry,
            ledger,
            policy,
            classifier_timeout,
            multi_label,
        }
    }

    /// The registry this engine routes against.
    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// Classify a prompt into categories and a merged settings
    /// recommendation.
    ///
    /// The classifier call is the only blocking step; its latency is
    /// measured wall-clock and attached to the returned settings. Classifier
    /// failure, timeout, or empty output skips filtering and merging
    /// entirely and returns the default settings with no categories.
    pub async fn classify(&self, prompt: &str) -> Classification {
        let start = Instant::now();
        let ranked = self.invoke_classifier(prompt).await;
        let latency = round_millis(start.elapsed().as_secs_f64());

        if ranked.is_empty() {
            warn!(latency_seconds = latency, "no classifier output, returning defaults");
            return Classification {
                categories: Vec::new(),
                settings: SettingsReport {
                    settings: self.registry.default_settings(),
                    latency_seconds: latency,
                },
            };
        }

        let selected = self.policy.select(&ranked);
        for scored in &selected {
            info!(label = %scored.label, score = scored.score, "label selected");
        }

        let categories: Vec<ScoredCategory> = selected
            .iter()
            .filter_map(|scored| match self.registry.key_for_label(&scored.label) {
                Some(key) => Some(ScoredCategory {
                    name: key.clone(),
                    confidence: scored.score,
                }),
                None => {
                    warn!(label = %scored.label, "selected label has no registry mapping");
                    None
                }
            })
            .collect();

        let settings = merge::merge(&selected, &self.registry).resolve(&self.registry);

        let (_, average) = self.ledger.record(prompt, latency).await;
        info!(
            latency_seconds = latency,
            average_latency = average,
            categories = categories.len(),
            "classification complete"
        );

        Classification {
            categories,
            settings: SettingsReport {
                settings,
                latency_seconds: latency,
            },
        }
    }

    /// Invoke the external classifier under the configured timeout.
    ///
    /// Any failure (error, timeout, malformed output) collapses to the
    /// empty-result case; nothing propagates raw.
    async fn invoke_classifier(&self, prompt: &str) -> Vec<ScoredLabel> {
        let candidate_labels = self.registry.candidate_labels();
        let call = self
            .classifier
            .classify_text(prompt, &candidate_labels, self.multi_label);

        match tokio::time::timeout(self.classifier_timeout, call).await {
            Ok(Ok(ranked)) => ranked,
            Ok(Err(e)) => {
                error!(error = %e, "classifier call failed");
                Vec::new()
            }
            Err(_) => {
                let err = GearshiftError::Timeout {
                    duration: self.classifier_timeout,
                };
                error!(error = %err, "classifier call timed out");
                Vec::new()
            }
        }
    }
}

/// Round a latency in seconds to millisecond precision.
fn round_millis(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use gearshift_core::{
        CategoryEntry, CategoryKey, GearshiftError, ModelSettings, ReasoningEffort, Verbosity,
        WebAccess,
    };
    use tokio::sync::Mutex;

    use super::*;

    /// Scripted classifier: pops one pre-configured result per call.
    struct ScriptedClassifier {
        results: Mutex<Vec<Result<Vec<ScoredLabel>, GearshiftError>>>,
        delay: Option<Duration>,
    }

    impl ScriptedClassifier {
        fn returning(result: Result<Vec<ScoredLabel>, GearshiftError>) -> Self {
            Self {
                results: Mutex::new(vec![result]),
                delay: None,
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                results: Mutex::new(vec![Ok(vec![ScoredLabel::new("coding", 0.9)])]),
                delay: Some(delay),
            }
        }
    }

    #[async_trait]
    impl IntentClassifier for ScriptedClassifier {
        async fn classify_text(
            &self,
            _prompt: &str,
            _candidate_labels: &[String],
            _multi_label: bool,
        ) -> Result<Vec<ScoredLabel>, GearshiftError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.results
                .lock()
                .await
                .pop()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn entry(
        key: &str,
        label: &str,
        temperature: f64,
        reasoning_effort: ReasoningEffort,
    ) -> CategoryEntry {
        CategoryEntry {
            key: CategoryKey::from(key),
            label: label.to_string(),
            settings: ModelSettings {
                temperature,
                reasoning_effort,
                web: WebAccess::Optional,
                verbosity: Verbosity::Balanced,
            },
        }
    }

    fn test_registry() -> Arc<CategoryRegistry> {
        Arc::new(
            CategoryRegistry::new(vec![
                entry("Coding", "coding", 0.2, ReasoningEffort::High),
                entry("ChitChat", "chitchat", 0.9, ReasoningEffort::Minimal),
                entry("Factual_QA", "factual qa", 0.3, ReasoningEffort::Medium),
            ])
            .unwrap(),
        )
    }

    fn engine_with(
        classifier: ScriptedClassifier,
        dir: &tempfile::TempDir,
    ) -> ClassificationEngine {
        ClassificationEngine::new(
            Arc::new(classifier),
            test_registry(),
            Arc::new(LatencyLedger::new(dir.path().join("latency_log.json"))),
            SelectionPolicy::default(),
            Duration::from_secs(5),
            true,
        )
    }

    #[tokio::test]
    async fn dominant_label_selects_single_category_with_its_settings() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with(
            ScriptedClassifier::returning(Ok(vec![
                ScoredLabel::new("coding", 0.9),
                ScoredLabel::new("chitchat", 0.4),
                ScoredLabel::new("factual qa", 0.3),
            ])),
            &dir,
        );

        let result = engine.classify("write a sort function").await;
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].name, CategoryKey::from("Coding"));
        assert_eq!(result.categories[0].confidence, 0.9);
        // Settings equal the Coding registry entry exactly.
        assert_eq!(result.settings.settings.temperature, 0.2);
        assert_eq!(
            result.settings.settings.reasoning_effort,
            ReasoningEffort::High
        );
        assert!(result.settings.latency_seconds >= 0.0);
    }

    #[tokio::test]
    async fn close_scores_merge_both_categories() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with(
            ScriptedClassifier::returning(Ok(vec![
                ScoredLabel::new("chitchat", 0.6),
                ScoredLabel::new("coding", 0.55),
            ])),
            &dir,
        );

        let result = engine.classify("hey, also fix my loop").await;
        assert_eq!(result.categories.len(), 2);
        // min temperature, max reasoning effort across the two categories.
        assert_eq!(result.settings.settings.temperature, 0.2);
        assert_eq!(
            result.settings.settings.reasoning_effort,
            ReasoningEffort::High
        );
    }

    #[tokio::test]
    async fn classifier_error_returns_defaults_with_latency() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with(
            ScriptedClassifier::returning(Err(GearshiftError::Classifier {
                message: "HTTP 500".into(),
                source: None,
            })),
            &dir,
        );

        let result = engine.classify("anything").await;
        assert!(result.categories.is_empty());
        // Defaults come from the first-inserted registry entry (Coding).
        assert_eq!(result.settings.settings.temperature, 0.2);
        assert!(result.settings.latency_seconds >= 0.0);
    }

    #[tokio::test]
    async fn empty_classifier_output_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with(ScriptedClassifier::returning(Ok(Vec::new())), &dir);

        let result = engine.classify("anything").await;
        assert!(result.categories.is_empty());
        assert_eq!(
            result.settings.settings,
            engine.registry().default_settings()
        );
    }

    #[tokio::test]
    async fn classifier_timeout_is_a_failure_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let engine = ClassificationEngine::new(
            Arc::new(ScriptedClassifier::slow(Duration::from_secs(60))),
            test_registry(),
            Arc::new(LatencyLedger::new(dir.path().join("latency_log.json"))),
            SelectionPolicy::default(),
            Duration::from_millis(20),
            true,
        );

        let result = engine.classify("anything").await;
        assert!(result.categories.is_empty());
        assert_eq!(
            result.settings.settings,
            engine.registry().default_settings()
        );
    }

    #[tokio::test]
    async fn unknown_label_is_omitted_and_settings_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_with(
            ScriptedClassifier::returning(Ok(vec![
                ScoredLabel::new("coding", 0.6),
                ScoredLabel::new("label nobody registered", 0.58),
            ])),
            &dir,
        );

        let result = engine.classify("anything").await;
        // The unmappable label is dropped from the category list.
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].name, CategoryKey::from("Coding"));
        // The merge is all-or-nothing: full defaults, not Coding's settings
        // merged with nothing.
        assert_eq!(
            result.settings.settings,
            engine.registry().default_settings()
        );
    }

    #[tokio::test]
    async fn successful_classification_records_to_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger_path = dir.path().join("latency_log.json");
        let engine = ClassificationEngine::new(
            Arc::new(ScriptedClassifier::returning(Ok(vec![ScoredLabel::new(
                "coding", 0.9,
            )]))),
            test_registry(),
            Arc::new(LatencyLedger::new(&ledger_path)),
            SelectionPolicy::default(),
            Duration::from_secs(5),
            true,
        );

        engine.classify("write a parser").await;

        let bytes = std::fs::read(&ledger_path).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["queries"].as_array().unwrap().len(), 1);
        assert_eq!(json["queries"][0]["prompt"], "write a parser");
    }

    #[tokio::test]
    async fn failed_classification_does_not_touch_the_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger_path = dir.path().join("latency_log.json");
        let engine = ClassificationEngine::new(
            Arc::new(ScriptedClassifier::returning(Ok(Vec::new()))),
            test_registry(),
            Arc::new(LatencyLedger::new(&ledger_path)),
            SelectionPolicy::default(),
            Duration::from_secs(5),
            true,
        );

        engine.classify("anything").await;
        assert!(!ledger_path.exists());
    }

    #[test]
    fn round_millis_truncates_to_three_decimals() {
        assert_eq!(round_millis(0.123456), 0.123);
        assert_eq!(round_millis(0.9996), 1.0);
        assert_eq!(round_millis(0.0), 0.0);
    }
}
