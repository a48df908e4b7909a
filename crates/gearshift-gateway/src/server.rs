// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the classification API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use gearshift_core::GearshiftError;
use gearshift_latency::LatencyLedger;
use gearshift_router::ClassificationEngine;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The classification engine serving POST /classify.
    pub engine: Arc<ClassificationEngine>,
    /// Latency ledger backing GET /latency.
    pub ledger: Arc<LatencyLedger>,
}

/// Gateway server configuration (mirrors ServerConfig from gearshift-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the gateway router over the given state.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/classify", post(handlers::post_classify))
        .route("/healthcheck", get(handlers::get_healthcheck))
        .route("/latency", get(handlers::get_latency))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves routes:
/// - POST /classify
/// - GET /healthcheck
/// - GET /latency
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), GearshiftError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GearshiftError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| GearshiftError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use gearshift_core::{
        CategoryEntry, CategoryKey, CategoryRegistry, IntentClassifier, ModelSettings,
        ReasoningEffort, ScoredLabel, Verbosity, WebAccess,
    };
    use gearshift_router::SelectionPolicy;

    use super::*;

    struct FixedClassifier {
        ranked: Vec<ScoredLabel>,
    }

    #[async_trait]
    impl IntentClassifier for FixedClassifier {
        async fn classify_text(
            &self,
            _prompt: &str,
            _candidate_labels: &[String],
            _multi_label: bool,
        ) -> Result<Vec<ScoredLabel>, gearshift_core::GearshiftError> {
            Ok(self.ranked.clone())
        }
    }

    fn test_registry() -> Arc<CategoryRegistry> {
        Arc::new(
            CategoryRegistry::new(vec![
                CategoryEntry {
                    key: CategoryKey::from("Coding"),
                    label: "coding".to_string(),
                    settings: ModelSettings {
                        temperature: 0.2,
                        reasoning_effort: ReasoningEffort::High,
                        web: WebAccess::Optional,
                        verbosity: Verbosity::Balanced,
                    },
                },
                CategoryEntry {
                    key: CategoryKey::from("ChitChat"),
                    label: "chitchat".to_string(),
                    settings: ModelSettings {
                        temperature: 0.9,
                        reasoning_effort: ReasoningEffort::Minimal,
                        web: WebAccess::Disabled,
                        verbosity: Verbosity::Concise,
                    },
                },
            ])
            .unwrap(),
        )
    }

    fn test_state(ranked: Vec<ScoredLabel>, dir: &tempfile::TempDir) -> GatewayState {
        let ledger = Arc::new(LatencyLedger::new(dir.path().join("latency_log.json")));
        let engine = Arc::new(ClassificationEngine::new(
            Arc::new(FixedClassifier { ranked }),
            test_registry(),
            Arc::clone(&ledger),
            SelectionPolicy::default(),
            Duration::from_secs(5),
            true,
        ));
        GatewayState { engine, ledger }
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn classify_returns_categories_and_settings() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(
            vec![
                ScoredLabel::new("coding", 0.9),
                ScoredLabel::new("chitchat", 0.1),
            ],
            &dir,
        ));

        let response = app
            .oneshot(json_request("/classify", r#"{"prompt": "fix my loop"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["categories"][0]["name"], "Coding");
        assert_eq!(json["settings"]["temperature"], 0.2);
        assert_eq!(json["settings"]["reasoning_effort"], "high");
        assert!(json["settings"]["latency_seconds"].is_number());
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_with_422() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(vec![ScoredLabel::new("coding", 0.9)], &dir));

        let response = app
            .oneshot(json_request("/classify", r#"{"prompt": "   "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(json["error"], "prompt must not be empty");
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(Vec::new(), &dir));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/healthcheck")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn latency_starts_at_zero_and_tracks_classifications() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(vec![ScoredLabel::new("coding", 0.9)], &dir);

        let response = router(state.clone())
            .oneshot(
                Request::builder()
                    .uri("/latency")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(response).await["average_latency_seconds"], 0.0);

        router(state.clone())
            .oneshot(json_request("/classify", r#"{"prompt": "fix my loop"}"#))
            .await
            .unwrap();

        let response = router(state)
            .oneshot(
                Request::builder()
                    .uri("/latency")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert!(json["average_latency_seconds"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn blank_prompt_does_not_touch_the_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger_path = dir.path().join("latency_log.json");
        let app = router(test_state(vec![ScoredLabel::new("coding", 0.9)], &dir));

        app.oneshot(json_request("/classify", r#"{"prompt": ""}"#))
            .await
            .unwrap();
        assert!(!ledger_path.exists());
    }
}
