// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dual-threshold ranking filter.
//!
//! Decides which classifier labels survive to represent a prompt's intent:
//! a clearly dominant top label is committed to exclusively, otherwise every
//! label within a relative band of the top score (floored by an absolute
//! minimum) is kept as a multi-intent selection.

use std::cmp::Ordering;

use gearshift_core::ScoredLabel;

/// Dual-threshold selection policy.
///
/// The defaults match the production policy constants; all three values are
/// configurable through `[selection]` rather than hardcoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPolicy {
    /// Score gap above which the top label alone dominates.
    pub high_gap: f64,
    /// Relative band below the top score admitting additional labels.
    pub ratio: f64,
    /// Absolute floor below which no label is ever admitted.
    pub min_threshold: f64,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            high_gap: 0.15,
            ratio: 0.8,
            min_threshold: 0.2,
        }
    }
}

impl SelectionPolicy {
    pub fn new(high_gap: f64, ratio: f64, min_threshold: f64) -> Self {
        Self {
            high_gap,
            ratio,
            min_threshold,
        }
    }

    /// Select the labels that represent the prompt's intent(s).
    ///
    /// Sorts by score descending first (stable, so ties keep input order),
    /// then applies the dual-threshold rule:
    /// - `top - second > high_gap`: the top label dominates; singleton result.
    /// - otherwise: every label with
    ///   `score >= max(min_threshold, top * ratio)`, in sorted order.
    ///
    /// Never returns an empty selection for a non-empty input: when even the
    /// top score sits below the absolute floor, the top label alone is kept.
    /// Pure function, no side effects.
    pub fn select(&self, ranked: &[ScoredLabel]) -> Vec<ScoredLabel> {
        if ranked.is_empty() {
            return Vec::new();
        }

        let mut sorted = ranked.to_vec();
        sorted.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let top = sorted[0].clone();
        let second_score = sorted.get(1).map_or(0.0, |s| s.score);
        let delta = top.score - second_score;

        if delta > self.high_gap {
            return vec![top];
        }

        let threshold = self.min_threshold.max(top.score * self.ratio);
        let band: Vec<ScoredLabel> = sorted.into_iter().filter(|s| s.score >= threshold).collect();

        if band.is_empty() {
            // Reachable only when the top score sits below the absolute
            // floor; the selection must still never be empty.
            return vec![top];
        }
        band
    }
}
