// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Latency tracking for the Gearshift router.
//!
//! Provides [`LatencyLedger`], the persisted, mutex-guarded record of past
//! request latencies and their running average.

pub mod ledger;

pub use ledger::{LatencyLedger, LedgerEntry};
