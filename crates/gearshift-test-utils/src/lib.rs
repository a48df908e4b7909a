// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Gearshift integration tests.
//!
//! Provides a mock classifier and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockClassifier`] - Mock intent classifier with pre-configured results
//! - [`TestHarness`] - Fully wired classification engine over a temp ledger

pub mod harness;
pub mod mock_classifier;

pub use harness::TestHarness;
pub use mock_classifier::MockClassifier;
