// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./gearshift.toml` >
//! `~/.config/gearshift/gearshift.toml` > `/etc/gearshift/gearshift.toml`,
//! with environment variable overrides via the `GEARSHIFT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::GearshiftConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/gearshift/gearshift.toml` (system-wide)
/// 3. `~/.config/gearshift/gearshift.toml` (user XDG config)
/// 4. `./gearshift.toml` (local directory)
/// 5. `GEARSHIFT_*` environment variables
pub fn load_config() -> Result<GearshiftConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GearshiftConfig::default()))
        .merge(Toml::file("/etc/gearshift/gearshift.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("gearshift/gearshift.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("gearshift.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<GearshiftConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GearshiftConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GearshiftConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GearshiftConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay unambiguous: `GEARSHIFT_LATENCY_LEDGER_PATH` must map to
/// `latency.ledger_path`, not `latency.ledger.path`.
fn env_provider() -> Env {
    Env::prefixed("GEARSHIFT_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        // Example: GEARSHIFT_SERVER_LOG_LEVEL -> "server_log_level"
        let mapped = key
            .as_str()
            .replacen("server_", "server.", 1)
            .replacen("classifier_", "classifier.", 1)
            .replacen("selection_", "selection.", 1)
            .replacen("latency_", "latency.", 1)
            .replacen("dataset_", "dataset.", 1);
        mapped.into()
    })
}
