// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `serve` subcommand: assemble the classification stack and run the
//! HTTP gateway until shutdown.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use gearshift_config::GearshiftConfig;
use gearshift_core::GearshiftError;
use gearshift_gateway::{GatewayState, ServerConfig};
use gearshift_latency::LatencyLedger;
use gearshift_router::{ClassificationEngine, SelectionPolicy};
use gearshift_zeroshot::ZeroShotClient;

pub async fn run(config: GearshiftConfig) -> Result<(), GearshiftError> {
    let registry = Arc::new(config.build_registry()?);
    info!(categories = registry.len(), "category registry built");

    let ledger = Arc::new(LatencyLedger::new(&config.latency.ledger_path));

    let classifier = Arc::new(ZeroShotClient::new(
        config.classifier.endpoint.clone(),
        config.classifier.api_token.as_deref(),
        Duration::from_secs(config.classifier.timeout_secs),
    )?);

    let engine = Arc::new(ClassificationEngine::new(
        classifier,
        Arc::clone(&registry),
        Arc::clone(&ledger),
        SelectionPolicy::new(
            config.selection.high_gap,
            config.selection.ratio,
            config.selection.min_threshold,
        ),
        Duration::from_secs(config.classifier.timeout_secs),
        config.classifier.multi_label,
    ));

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    gearshift_gateway::start_server(&server_config, GatewayState { engine, ledger }).await
}
