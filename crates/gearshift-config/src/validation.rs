// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: address shapes, threshold ranges, and category registry
//! integrity. Registry problems must fail here, at load time, never during a
//! request.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::GearshiftConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &GearshiftConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    validate_server(config, &mut errors);
    validate_classifier(config, &mut errors);
    validate_selection(config, &mut errors);
    validate_latency(config, &mut errors);
    validate_categories(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_server(config: &GearshiftConfig, errors: &mut Vec<ConfigError>) {
    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
        return;
    }

    let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
    let is_valid_hostname = host
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
    if !is_valid_ip && !is_valid_hostname {
        errors.push(ConfigError::Validation {
            message: format!("server.host `{host}` is not a valid IP address or hostname"),
        });
    }
}

fn validate_classifier(config: &GearshiftConfig, errors: &mut Vec<ConfigError>) {
    let endpoint = config.classifier.endpoint.trim();
    if endpoint.is_empty() {
        errors.push(ConfigError::Validation {
            message: "classifier.endpoint must not be empty".to_string(),
        });
    } else if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("classifier.endpoint `{endpoint}` must be an http(s) URL"),
        });
    }

    if config.classifier.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "classifier.timeout_secs must be at least 1".to_string(),
        });
    }
}

fn validate_selection(config: &GearshiftConfig, errors: &mut Vec<ConfigError>) {
    for (name, value) in [
        ("selection.high_gap", config.selection.high_gap),
        ("selection.ratio", config.selection.ratio),
        ("selection.min_threshold", config.selection.min_threshold),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ConfigError::Validation {
                message: format!("{name} must be within [0.0, 1.0], got {value}"),
            });
        }
    }
}

fn validate_latency(config: &GearshiftConfig, errors: &mut Vec<ConfigError>) {
    if config.latency.ledger_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "latency.ledger_path must not be empty".to_string(),
        });
    }
}

fn validate_categories(config: &GearshiftConfig, errors: &mut Vec<ConfigError>) {
    if config.categories.is_empty() {
        errors.push(ConfigError::Validation {
            message: "at least one [[categories]] entry is required".to_string(),
        });
        return;
    }

    let mut seen_keys = HashSet::new();
    let mut seen_labels = HashSet::new();
    for (i, category) in config.categories.iter().enumerate() {
        if category.key.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("categories[{i}].key must not be empty"),
            });
        }
        if category.label.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("categories[{i}].label must not be empty"),
            });
        }
        if !seen_keys.insert(&category.key) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "duplicate category key `{}` in [[categories]] array",
                    category.key
                ),
            });
        }
        if !seen_labels.insert(&category.label) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "duplicate candidate label `{}` in [[categories]] array",
                    category.label
                ),
            });
        }
        if !(0.0..=2.0).contains(&category.temperature) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "categories[{i}].temperature must be within [0.0, 2.0], got {}",
                    category.temperature
                ),
            });
        }
    }
}
