// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted ledger of per-request classification latencies.
//!
//! The ledger is the only shared mutable state in the router. Every record is
//! a full read-modify-write cycle against one JSON file, serialized behind a
//! tokio `Mutex` so concurrent requests can neither lose updates nor
//! interleave partial writes. Ledger I/O failures degrade, they never raise:
//! the caller always gets a latency pair back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use gearshift_core::GearshiftError;

/// One recorded classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub prompt: String,
    pub latency: f64,
}

/// On-disk ledger document, rewritten in full on every update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LedgerDocument {
    #[serde(default)]
    queries: Vec<LedgerEntry>,
    #[serde(default)]
    average_latency: f64,
}

/// Process-wide latency accumulator backed by a JSON file.
///
/// State is loaded lazily on first access and cached; the cache is only
/// committed after a successful file write, so the in-memory average never
/// diverges from persisted state when storage fails.
pub struct LatencyLedger {
    path: PathBuf,
    state: Mutex<Option<LedgerDocument>>,
}

impl LatencyLedger {
    /// Create a ledger over the given file path. The file is not touched
    /// until the first record or query.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            state: Mutex::new(None),
        }
    }

    /// Append a `(prompt, latency)` entry, recompute the running average over
    /// all entries, and rewrite the ledger file.
    ///
    /// Returns `(this_latency, running_average)`. If the ledger cannot be
    /// read or written, logs the condition and returns
    /// `(latency_seconds, latency_seconds)` with persisted and cached state
    /// left unchanged.
    pub async fn record(&self, prompt: &str, latency_seconds: f64) -> (f64, f64) {
        let mut guard = self.state.lock().await;

        let current = match &*guard {
            Some(doc) => doc.clone(),
            None => match self.load().await {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(error = %e, path = %self.path.display(), "failed to read latency ledger");
                    return (latency_seconds, latency_seconds);
                }
            },
        };

        let mut next = current;
        next.queries.push(LedgerEntry {
            prompt: prompt.to_string(),
            latency: latency_seconds,
        });
        let total: f64 = next.queries.iter().map(|q| q.latency).sum();
        next.average_latency = total / next.queries.len() as f64;

        if let Err(e) = self.persist(&next).await {
            warn!(error = %e, path = %self.path.display(), "failed to write latency ledger");
            return (latency_seconds, latency_seconds);
        }

        let average = next.average_latency;
        debug!(
            entries = next.queries.len(),
            latency_seconds,
            average_latency = average,
            "latency recorded"
        );
        *guard = Some(next);
        (latency_seconds, average)
    }

    /// The last known running average, without mutating anything.
    ///
    /// Returns 0.0 when no ledger exists yet or it cannot be read.
    pub async fn average(&self) -> f64 {
        let mut guard = self.state.lock().await;
        match &*guard {
            Some(doc) => doc.average_latency,
            None => match self.load().await {
                Ok(doc) => {
                    let average = doc.average_latency;
                    *guard = Some(doc);
                    average
                }
                Err(e) => {
                    warn!(error = %e, path = %self.path.display(), "failed to read latency ledger");
                    0.0
                }
            },
        }
    }

    /// Read the ledger file, treating a missing file as an empty ledger.
    async fn load(&self) -> Result<LedgerDocument, GearshiftError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| GearshiftError::Ledger {
                message: format!("corrupt ledger file {}", self.path.display()),
                source: Some(Box::new(e)),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LedgerDocument::default()),
            Err(e) => Err(GearshiftError::Ledger {
                message: format!("cannot read ledger file {}", self.path.display()),
                source: Some(Box::new(e)),
            }),
        }
    }

    /// Rewrite the ledger file in full.
    async fn persist(&self, doc: &LedgerDocument) -> Result<(), GearshiftError> {
        let bytes = serde_json::to_vec_pretty(doc).map_err(|e| GearshiftError::Ledger {
            message: "cannot serialize ledger".to_string(),
            source: Some(Box::new(e)),
        })?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| GearshiftError::Ledger {
                message: format!("cannot write ledger file {}", self.path.display()),
                source: Some(Box::new(e)),
            })
    }
}
