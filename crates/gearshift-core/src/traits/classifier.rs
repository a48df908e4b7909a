// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait for the external zero-shot classifier capability.

use async_trait::async_trait;

use crate::error::GearshiftError;
use crate::types::ScoredLabel;

/// An external capability that ranks a fixed candidate-label set against a
/// prompt by semantic confidence.
///
/// Implementations handle their own transport, retry, and model details.
/// Callers treat any failure as the empty-result case; errors from this trait
/// are never surfaced raw past the classification orchestration.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classify `prompt` against `candidate_labels`, returning labels ranked
    /// by descending confidence. With `multi_label`, each label is scored
    /// independently rather than as a softmax over the set.
    async fn classify_text(
        &self,
        prompt: &str,
        candidate_labels: &[String],
        multi_label: bool,
    ) -> Result<Vec<ScoredLabel>, GearshiftError>;
}
