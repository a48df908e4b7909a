// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the classification REST API.
//!
//! Handles POST /classify, GET /healthcheck, GET /latency.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use gearshift_core::Classification;

use crate::server::GatewayState;

/// Request body for POST /classify.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    /// The prompt to classify.
    pub prompt: String,
}

/// Response body for GET /healthcheck.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
}

/// Response body for GET /latency.
#[derive(Debug, Serialize)]
pub struct LatencyResponse {
    /// Running arithmetic mean over all recorded classifications, in seconds.
    pub average_latency_seconds: f64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// POST /classify
///
/// Classifies the prompt and returns the selected categories together with
/// the merged generation settings. A blank prompt is rejected with 422
/// before any classifier call is made.
pub async fn post_classify(
    State(state): State<GatewayState>,
    Json(body): Json<ClassifyRequest>,
) -> Response {
    if body.prompt.trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: "prompt must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let classification: Classification = state.engine.classify(&body.prompt).await;
    (StatusCode::OK, Json(classification)).into_response()
}

/// GET /healthcheck
///
/// Liveness probe for process supervisors.
pub async fn get_healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /latency
///
/// Returns the running average classification latency. Reads only; an empty
/// or unreadable ledger reports 0.0.
pub async fn get_latency(State(state): State<GatewayState>) -> Json<LatencyResponse> {
    Json(LatencyResponse {
        average_latency_seconds: state.ledger.average().await,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_request_deserializes() {
        let json = r#"{"prompt": "write a binary search in rust"}"#;
        let req: ClassifyRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.prompt, "write a binary search in rust");
    }

    #[test]
    fn classify_request_rejects_missing_prompt() {
        let json = r#"{"text": "hello"}"#;
        assert!(serde_json::from_str::<ClassifyRequest>(json).is_err());
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "ok".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
    }

    #[test]
    fn latency_response_serializes() {
        let resp = LatencyResponse {
            average_latency_seconds: 0.123,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"average_latency_seconds\":0.123"));
    }

    #[test]
    fn error_response_serializes() {
        let resp = ErrorResponse {
            error: "prompt must not be empty".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("prompt must not be empty"));
    }
}
