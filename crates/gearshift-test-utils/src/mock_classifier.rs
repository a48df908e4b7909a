// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock intent classifier for deterministic testing.
//!
//! `MockClassifier` implements `IntentClassifier` with pre-configured
//! results, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gearshift_core::{GearshiftError, IntentClassifier, ScoredLabel};

/// A mock classifier that returns pre-configured results.
///
/// Results are popped from a FIFO queue. When the queue is empty, an empty
/// ranking is returned, which drives callers down their default path.
pub struct MockClassifier {
    results: Arc<Mutex<VecDeque<Result<Vec<ScoredLabel>, GearshiftError>>>>,
}

impl MockClassifier {
    /// Create a new mock classifier with an empty result queue.
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Create a mock classifier pre-loaded with the given results.
    pub fn with_results(results: Vec<Result<Vec<ScoredLabel>, GearshiftError>>) -> Self {
        Self {
            results: Arc::new(Mutex::new(VecDeque::from(results))),
        }
    }

    /// Add a successful ranking to the end of the queue.
    pub async fn add_ranking(&self, ranked: Vec<ScoredLabel>) {
        self.results.lock().await.push_back(Ok(ranked));
    }

    /// Add an error result to the end of the queue.
    pub async fn add_error(&self, error: GearshiftError) {
        self.results.lock().await.push_back(Err(error));
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntentClassifier for MockClassifier {
    async fn classify_text(
        &self,
        _prompt: &str,
        _candidate_labels: &[String],
        _multi_label: bool,
    ) -> Result<Vec<ScoredLabel>, GearshiftError> {
        self.results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
