// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a hosted zero-shot classification endpoint.
//!
//! Speaks the HuggingFace Inference API shape for zero-shot classification
//! (default model: facebook/bart-large-mnli) and retries once on transient
//! errors. Every failure maps into [`GearshiftError::Classifier`]; the
//! orchestration converts that to the default-settings path, so nothing here
//! ever reaches a caller raw.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use tracing::{debug, warn};

use gearshift_core::{GearshiftError, IntentClassifier, ScoredLabel};

use crate::types::{ApiErrorResponse, ZeroShotParameters, ZeroShotRequest, ZeroShotResponse};

/// HTTP client for zero-shot classification calls.
#[derive(Debug, Clone)]
pub struct ZeroShotClient {
    client: reqwest::Client,
    endpoint: String,
    max_retries: u32,
}

impl ZeroShotClient {
    /// Creates a new zero-shot classification client.
    ///
    /// # Arguments
    /// * `endpoint` - Inference endpoint URL
    /// * `api_token` - Optional bearer token for the inference API
    /// * `timeout` - Per-request HTTP timeout
    pub fn new(
        endpoint: String,
        api_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, GearshiftError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        if let Some(token) = api_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| GearshiftError::Config(format!("invalid API token value: {e}")))?;
            headers.insert("authorization", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| GearshiftError::Classifier {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint,
            max_retries: 1,
        })
    }

    async fn post_once(
        &self,
        request: &ZeroShotRequest<'_>,
    ) -> Result<reqwest::Response, GearshiftError> {
        self.client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| GearshiftError::Classifier {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })
    }
}

/// Statuses worth one retry: rate limiting, transient server errors, and the
/// inference API's cold-start unavailability.
fn is_transient_error(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::SERVICE_UNAVAILABLE
    )
}

#[async_trait]
impl IntentClassifier for ZeroShotClient {
    async fn classify_text(
        &self,
        prompt: &str,
        candidate_labels: &[String],
        multi_label: bool,
    ) -> Result<Vec<ScoredLabel>, GearshiftError> {
        let request = ZeroShotRequest {
            inputs: prompt,
            parameters: ZeroShotParameters {
                candidate_labels,
                multi_label,
            },
        };

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying zero-shot request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self.post_once(&request).await?;
            let status = response.status();
            debug!(status = %status, attempt, "zero-shot response received");

            if status.is_success() {
                let parsed: ZeroShotResponse =
                    response.json().await.map_err(|e| GearshiftError::Classifier {
                        message: format!("malformed classifier response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                if parsed.labels.len() != parsed.scores.len() {
                    return Err(GearshiftError::Classifier {
                        message: format!(
                            "classifier returned {} labels but {} scores",
                            parsed.labels.len(),
                            parsed.scores.len()
                        ),
                        source: None,
                    });
                }
                return Ok(parsed
                    .labels
                    .into_iter()
                    .zip(parsed.scores)
                    .map(|(label, score)| ScoredLabel { label, score })
                    .collect());
            }

            let body = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(GearshiftError::Classifier {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!("inference API error: {}", api_err.error),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(GearshiftError::Classifier {
                message,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| GearshiftError::Classifier {
            message: "retries exhausted".to_string(),
            source: None,
        }))
    }
}
