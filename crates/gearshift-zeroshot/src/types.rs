// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the hosted zero-shot classification API.

use serde::{Deserialize, Serialize};

/// Request body for a zero-shot classification call.
#[derive(Debug, Clone, Serialize)]
pub struct ZeroShotRequest<'a> {
    /// The prompt to classify.
    pub inputs: &'a str,
    pub parameters: ZeroShotParameters<'a>,
}

/// Zero-shot parameters: the fixed candidate-label set and scoring mode.
#[derive(Debug, Clone, Serialize)]
pub struct ZeroShotParameters<'a> {
    pub candidate_labels: &'a [String],
    pub multi_label: bool,
}

/// Response body: parallel label/score sequences, descending by confidence.
#[derive(Debug, Clone, Deserialize)]
pub struct ZeroShotResponse {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

/// Error body returned by the inference API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_expected_shape() {
        let labels = vec!["label one".to_string(), "label two".to_string()];
        let request = ZeroShotRequest {
            inputs: "reverse a list in python",
            parameters: ZeroShotParameters {
                candidate_labels: &labels,
                multi_label: true,
            },
        };
        let json: serde_json::Value = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"], "reverse a list in python");
        assert_eq!(json["parameters"]["multi_label"], true);
        assert_eq!(json["parameters"]["candidate_labels"][1], "label two");
    }

    #[test]
    fn response_tolerates_extra_fields() {
        let body = r#"{
            "sequence": "reverse a list in python",
            "labels": ["a", "b"],
            "scores": [0.9, 0.1]
        }"#;
        let response: ZeroShotResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.labels, vec!["a", "b"]);
        assert_eq!(response.scores, vec![0.9, 0.1]);
    }
}
