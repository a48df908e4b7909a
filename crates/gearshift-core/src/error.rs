// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Gearshift prompt router.

use thiserror::Error;

/// The primary error type used across Gearshift crates.
///
/// Classifier, registry, and ledger failures are recovered locally before the
/// orchestration boundary; variants here exist so the recovery sites can log
/// and branch on a structured error rather than a string.
#[derive(Debug, Error)]
pub enum GearshiftError {
    /// Configuration errors (invalid TOML, missing required fields, bad registry entries).
    #[error("configuration error: {0}")]
    Config(String),

    /// External classifier errors (API failure, malformed output, transport).
    #[error("classifier error: {message}")]
    Classifier {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Latency ledger I/O errors (unreadable, unwritable, or corrupt ledger file).
    #[error("ledger error: {message}")]
    Ledger {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Dataset generation errors (generation API failure, unparseable output).
    #[error("dataset error: {message}")]
    Dataset {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
