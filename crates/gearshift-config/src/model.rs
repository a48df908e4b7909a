// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Gearshift router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages. The
//! `[[categories]]` array is the category registry source of truth: each
//! entry pairs a canonical key with the candidate-label description sent to
//! the classifier and the settings recommended for that intent.

use gearshift_core::{
    CategoryEntry, CategoryKey, CategoryRegistry, GearshiftError, ModelSettings, ReasoningEffort,
    Verbosity, WebAccess,
};
use serde::{Deserialize, Serialize};

/// Top-level Gearshift configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections default to a working standalone setup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GearshiftConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// External zero-shot classifier settings.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Dual-threshold label selection policy constants.
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Latency ledger settings.
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Synthetic dataset generation settings.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Category registry entries, in priority order. The first entry supplies
    /// the process-wide default settings.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,
}

impl Default for GearshiftConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            classifier: ClassifierConfig::default(),
            selection: SelectionConfig::default(),
            latency: LatencyConfig::default(),
            dataset: DatasetConfig::default(),
            categories: default_categories(),
        }
    }
}

impl GearshiftConfig {
    /// Build the immutable [`CategoryRegistry`] from the configured entries.
    ///
    /// Duplicate or empty entries fail here, at load time, never at request
    /// time.
    pub fn build_registry(&self) -> Result<CategoryRegistry, GearshiftError> {
        let entries = self
            .categories
            .iter()
            .map(|c| CategoryEntry {
                key: CategoryKey(c.key.clone()),
                label: c.label.clone(),
                settings: ModelSettings {
                    temperature: c.temperature,
                    reasoning_effort: c.reasoning_effort,
                    web: c.web,
                    verbosity: c.verbosity,
                },
            })
            .collect();
        CategoryRegistry::new(entries)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8642
}

fn default_log_level() -> String {
    "info".to_string()
}

/// External zero-shot classifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Inference endpoint URL for the zero-shot classification model.
    #[serde(default = "default_classifier_endpoint")]
    pub endpoint: String,

    /// Bearer token for the inference API. `None` sends no Authorization header.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Per-request classifier timeout in seconds. Expiry is handled as a
    /// classifier failure, never surfaced to the caller.
    #[serde(default = "default_classifier_timeout_secs")]
    pub timeout_secs: u64,

    /// Score each candidate label independently instead of softmaxing over
    /// the set.
    #[serde(default = "default_multi_label")]
    pub multi_label: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_classifier_endpoint(),
            api_token: None,
            timeout_secs: default_classifier_timeout_secs(),
            multi_label: default_multi_label(),
        }
    }
}

fn default_classifier_endpoint() -> String {
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli".to_string()
}

fn default_classifier_timeout_secs() -> u64 {
    30
}

fn default_multi_label() -> bool {
    true
}

/// Dual-threshold selection policy constants.
///
/// These are policy values, not hardcoded behavior: the compiled defaults
/// match the observed production values and every one can be overridden.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionConfig {
    /// Score gap above which the top label alone dominates.
    #[serde(default = "default_high_gap")]
    pub high_gap: f64,

    /// Relative band below the top score admitting additional labels.
    #[serde(default = "default_ratio")]
    pub ratio: f64,

    /// Absolute floor below which no label is ever admitted.
    #[serde(default = "default_min_threshold")]
    pub min_threshold: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            high_gap: default_high_gap(),
            ratio: default_ratio(),
            min_threshold: default_min_threshold(),
        }
    }
}

fn default_high_gap() -> f64 {
    0.15
}

fn default_ratio() -> f64 {
    0.8
}

fn default_min_threshold() -> f64 {
    0.2
}

/// Latency ledger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LatencyConfig {
    /// Path of the JSON ledger file, rewritten in full on every record.
    #[serde(default = "default_ledger_path")]
    pub ledger_path: String,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            ledger_path: default_ledger_path(),
        }
    }
}

fn default_ledger_path() -> String {
    "latency_log.json".to_string()
}

/// Synthetic dataset generation configuration (offline batch tool).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// OpenAI-compatible chat-completions endpoint.
    #[serde(default = "default_dataset_endpoint")]
    pub endpoint: String,

    /// API key for the generation endpoint. `None` requires an env override.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Generation model identifier.
    #[serde(default = "default_dataset_model")]
    pub model: String,

    /// Sampling temperature for example generation.
    #[serde(default = "default_dataset_temperature")]
    pub temperature: f64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            endpoint: default_dataset_endpoint(),
            api_key: None,
            model: default_dataset_model(),
            temperature: default_dataset_temperature(),
        }
    }
}

fn default_dataset_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_dataset_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_dataset_temperature() -> f64 {
    0.8
}

/// One category registry entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    /// Canonical short category name, e.g. "Coding".
    pub key: String,

    /// Candidate-label description sent to the classifier. Must be unique:
    /// the label-to-key mapping is a fixed bijection.
    pub label: String,

    /// Recommended sampling temperature for this intent.
    pub temperature: f64,

    /// Recommended reasoning effort.
    pub reasoning_effort: ReasoningEffort,

    /// Recommended web access mode.
    pub web: WebAccess,

    /// Recommended verbosity.
    pub verbosity: Verbosity,
}

/// Compiled default registry: the ten intent categories with their
/// candidate-label descriptions. The settings bias each intent toward its
/// natural operating point (deterministic for code, exploratory for creative
/// work, maximal care for medical/legal).
fn default_categories() -> Vec<CategoryConfig> {
    fn cat(
        key: &str,
        label: &str,
        temperature: f64,
        reasoning_effort: ReasoningEffort,
        web: WebAccess,
        verbosity: Verbosity,
    ) -> CategoryConfig {
        CategoryConfig {
            key: key.to_string(),
            label: label.to_string(),
            temperature,
            reasoning_effort,
            web,
            verbosity,
        }
    }

    vec![
        cat(
            "Coding",
            "The user is asking about programming or code.",
            0.2,
            ReasoningEffort::High,
            WebAccess::Optional,
            Verbosity::Balanced,
        ),
        cat(
            "Debugging",
            "The user is asking for help debugging an error.",
            0.1,
            ReasoningEffort::High,
            WebAccess::Optional,
            Verbosity::Verbose,
        ),
        cat(
            "Creative_Writing",
            "The user wants creative writing or storytelling.",
            1.0,
            ReasoningEffort::Medium,
            WebAccess::Disabled,
            Verbosity::Verbose,
        ),
        cat(
            "Factual_QA",
            "The user wants factual general knowledge.",
            0.3,
            ReasoningEffort::Medium,
            WebAccess::Mandatory,
            Verbosity::Concise,
        ),
        cat(
            "Summarization",
            "The user wants a summary of text.",
            0.3,
            ReasoningEffort::Minimal,
            WebAccess::Disabled,
            Verbosity::Concise,
        ),
        cat(
            "Translation",
            "The user wants translation to another language.",
            0.2,
            ReasoningEffort::Minimal,
            WebAccess::Disabled,
            Verbosity::Concise,
        ),
        cat(
            "Data_Analysis",
            "The user wants data analysis or statistics.",
            0.2,
            ReasoningEffort::High,
            WebAccess::Optional,
            Verbosity::Balanced,
        ),
        cat(
            "Planning_Itinerary",
            "The user is planning a trip, schedule or time.",
            0.7,
            ReasoningEffort::Medium,
            WebAccess::Mandatory,
            Verbosity::Balanced,
        ),
        cat(
            "Sensitive_Medical_Legal",
            "The user is asking medical or legal questions.",
            0.2,
            ReasoningEffort::Maximal,
            WebAccess::Mandatory,
            Verbosity::Verbose,
        ),
        cat(
            "ChitChat",
            "The user is having casual chitchat or greeting.",
            0.9,
            ReasoningEffort::Minimal,
            WebAccess::Disabled,
            Verbosity::Concise,
        ),
    ]
}
