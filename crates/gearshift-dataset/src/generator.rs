// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch generation of synthetic labeled prompts.
//!
//! Talks to an OpenAI-compatible chat completions endpoint and appends each
//! parsed batch to a JSON output file. Unlike the classification path, errors
//! here propagate: the generator is an offline tool and a failed batch should
//! stop the run, not degrade silently.

use std::path::Path;

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{info, warn};

use gearshift_core::GearshiftError;

use crate::prompt;
use crate::types::{ChatMessage, ChatRequest, ChatResponse, SyntheticExample};

/// Consecutive zero-yield batches tolerated before a run is aborted.
const MAX_EMPTY_BATCHES: usize = 3;

/// Client for generating synthetic labeled prompts.
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: f64,
}

impl DatasetGenerator {
    /// Creates a generator against an OpenAI-compatible chat endpoint.
    pub fn new(
        endpoint: String,
        api_key: Option<&str>,
        model: String,
        temperature: f64,
    ) -> Result<Self, GearshiftError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| GearshiftError::Config(format!("invalid API key value: {e}")))?;
            headers.insert("authorization", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GearshiftError::Dataset {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint,
            model,
            temperature,
        })
    }

    /// Generate one batch of examples for a category.
    ///
    /// Examples whose category field does not match the requested category
    /// are dropped with a warning rather than poisoning the output file.
    pub async fn generate_batch(
        &self,
        category: &str,
        batch_size: usize,
    ) -> Result<Vec<SyntheticExample>, GearshiftError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(prompt::system_prompt()),
                ChatMessage::user(prompt::build_prompt(category, batch_size)),
            ],
            temperature: self.temperature,
            top_p: 1.0,
            max_tokens: 2000,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| GearshiftError::Dataset {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GearshiftError::Dataset {
                message: format!("API returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| GearshiftError::Dataset {
            message: format!("malformed completion response: {e}"),
            source: Some(Box::new(e)),
        })?;
        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| GearshiftError::Dataset {
                message: "completion response contained no choices".to_string(),
                source: None,
            })?;

        let examples: Vec<SyntheticExample> = serde_json::from_str(strip_code_fence(content))
            .map_err(|e| GearshiftError::Dataset {
                message: format!("model output is not a JSON example array: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(examples
            .into_iter()
            .filter(|example| {
                if example.category == category {
                    true
                } else {
                    warn!(
                        expected = category,
                        got = %example.category,
                        "dropping example with mismatched category"
                    );
                    false
                }
            })
            .collect())
    }

    /// Generate `total` examples in batches of `batch_size`, appending each
    /// batch to `output`.
    ///
    /// Only examples surviving the category check count toward `total`, so a
    /// short batch is retried with a smaller request. Consecutive batches
    /// that yield nothing usable abort the run after `MAX_EMPTY_BATCHES`
    /// attempts, otherwise a model stuck on the wrong category would keep
    /// the loop issuing identical requests.
    ///
    /// Returns the number of examples written across all batches.
    pub async fn run(
        &self,
        category: &str,
        total: usize,
        batch_size: usize,
        output: &Path,
    ) -> Result<usize, GearshiftError> {
        let mut generated = 0;
        let mut empty_batches = 0;
        while generated < total {
            let request_size = batch_size.min(total - generated);
            let batch = self.generate_batch(category, request_size).await?;

            if batch.is_empty() {
                empty_batches += 1;
                if empty_batches >= MAX_EMPTY_BATCHES {
                    return Err(GearshiftError::Dataset {
                        message: format!(
                            "{empty_batches} consecutive batches yielded no usable \
                             examples for `{category}`, aborting after {generated} \
                             of {total}"
                        ),
                        source: None,
                    });
                }
                warn!(category, empty_batches, "batch yielded no usable examples");
                continue;
            }
            empty_batches = 0;

            let file_total = append_examples(output, &batch).await?;
            generated += batch.len();
            info!(
                category,
                batch = batch.len(),
                generated,
                file_total,
                "batch written"
            );
        }
        Ok(generated)
    }
}

/// Strip a Markdown code fence (```json ... ``` or ``` ... ```) if the model
/// wrapped its JSON output in one.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Append examples to the output file, read-extend-rewrite.
///
/// A missing or unparseable file starts over from an empty list. Returns the
/// total number of examples in the file after the write.
pub async fn append_examples(
    path: &Path,
    batch: &[SyntheticExample],
) -> Result<usize, GearshiftError> {
    let mut existing: Vec<SyntheticExample> = match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "existing dataset file unreadable, starting over");
            Vec::new()
        }),
        Err(_) => Vec::new(),
    };

    existing.extend_from_slice(batch);

    let bytes = serde_json::to_vec_pretty(&existing).map_err(|e| GearshiftError::Dataset {
        message: format!("failed to encode dataset: {e}"),
        source: Some(Box::new(e)),
    })?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| GearshiftError::Dataset {
            message: format!("failed to write {}: {e}", path.display()),
            source: Some(Box::new(e)),
        })?;

    Ok(existing.len())
}
