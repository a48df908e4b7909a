// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete classification stack with a mock
//! classifier, a temp-dir ledger file, and the compiled-in default category
//! registry. Provides `classify()` to drive the full pipeline in tests.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use gearshift_config::GearshiftConfig;
use gearshift_core::{CategoryRegistry, Classification, GearshiftError, ScoredLabel};
use gearshift_latency::LatencyLedger;
use gearshift_router::{ClassificationEngine, SelectionPolicy};

use crate::mock_classifier::MockClassifier;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    results: Vec<Result<Vec<ScoredLabel>, GearshiftError>>,
    policy: SelectionPolicy,
    registry: Option<CategoryRegistry>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            results: Vec::new(),
            policy: SelectionPolicy::default(),
            registry: None,
        }
    }

    /// Queue scripted classifier results, one per classify call.
    pub fn with_results(
        mut self,
        results: Vec<Result<Vec<ScoredLabel>, GearshiftError>>,
    ) -> Self {
        self.results = results;
        self
    }

    /// Queue a single successful ranking.
    pub fn with_ranking(mut self, ranked: Vec<ScoredLabel>) -> Self {
        self.results.push(Ok(ranked));
        self
    }

    /// Override the selection policy.
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the category registry. Defaults to the compiled-in categories.
    pub fn with_registry(mut self, registry: CategoryRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub fn build(self) -> Result<TestHarness, GearshiftError> {
        let temp_dir = tempfile::TempDir::new().map_err(|e| {
            GearshiftError::Internal(format!("failed to create temp dir: {e}"))
        })?;
        let ledger_path = temp_dir.path().join("latency_log.json");

        let registry = match self.registry {
            Some(registry) => registry,
            None => GearshiftConfig::default().build_registry()?,
        };
        let registry = Arc::new(registry);

        let classifier = Arc::new(if self.results.is_empty() {
            MockClassifier::new()
        } else {
            MockClassifier::with_results(self.results)
        });
        let ledger = Arc::new(LatencyLedger::new(&ledger_path));

        let engine = Arc::new(ClassificationEngine::new(
            Arc::clone(&classifier) as Arc<dyn gearshift_core::IntentClassifier>,
            Arc::clone(&registry),
            Arc::clone(&ledger),
            self.policy,
            Duration::from_secs(5),
            true,
        ));

        Ok(TestHarness {
            classifier,
            engine,
            ledger,
            registry,
            ledger_path,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a mock classifier and temp ledger.
pub struct TestHarness {
    /// The mock classifier; queue more results between calls.
    pub classifier: Arc<MockClassifier>,
    /// The assembled classification engine.
    pub engine: Arc<ClassificationEngine>,
    /// Latency ledger over the temp file.
    pub ledger: Arc<LatencyLedger>,
    /// The registry the engine routes against.
    pub registry: Arc<CategoryRegistry>,
    /// Path of the ledger file for direct assertions.
    pub ledger_path: PathBuf,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Classify a prompt through the full pipeline.
    pub async fn classify(&self, prompt: &str) -> Classification {
        self.engine.classify(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builder_creates_working_environment() {
        let harness = TestHarness::builder().build().unwrap();
        // The compiled-in registry has the full category set.
        assert_eq!(harness.registry.len(), 10);
        assert!(!harness.ledger_path.exists());
    }

    #[tokio::test]
    async fn scripted_ranking_drives_the_pipeline() {
        let harness = TestHarness::builder()
            .with_ranking(vec![ScoredLabel::new(
                "The user is asking about programming or code.",
                0.9,
            )])
            .build()
            .unwrap();

        // The default registry maps this candidate label to Coding.
        let result = harness.classify("reverse list python").await;
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].name.0, "Coding");
        assert!(harness.ledger_path.exists());
    }

    #[tokio::test]
    async fn empty_queue_takes_the_default_path() {
        let harness = TestHarness::builder().build().unwrap();
        let result = harness.classify("anything").await;
        assert!(result.categories.is_empty());
        assert_eq!(
            result.settings.settings,
            harness.registry.default_settings()
        );
    }

    #[tokio::test]
    async fn temp_ledger_is_unique_per_harness() {
        let h1 = TestHarness::builder().build().unwrap();
        let h2 = TestHarness::builder().build().unwrap();
        assert_ne!(h1.ledger_path, h2.ledger_path);
    }
}
