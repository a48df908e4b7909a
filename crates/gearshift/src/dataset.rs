// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `dataset` subcommand: batch-generate synthetic labeled prompts for
//! one category and append them to a JSON file.

use std::path::PathBuf;

use tracing::info;

use gearshift_config::GearshiftConfig;
use gearshift_core::GearshiftError;
use gearshift_dataset::DatasetGenerator;

pub async fn run(
    config: GearshiftConfig,
    category: &str,
    total: usize,
    batch: usize,
    output: Option<PathBuf>,
) -> Result<(), GearshiftError> {
    if batch == 0 || total == 0 {
        return Err(GearshiftError::Dataset {
            message: "total and batch must both be at least 1".to_string(),
            source: None,
        });
    }
    if !config.categories.iter().any(|c| c.key == category) {
        return Err(GearshiftError::Dataset {
            message: format!("unknown category {category:?}"),
            source: None,
        });
    }

    let output = output.unwrap_or_else(|| PathBuf::from(format!("{category}_synthetic_data.json")));

    let generator = DatasetGenerator::new(
        config.dataset.endpoint.clone(),
        config.dataset.api_key.as_deref(),
        config.dataset.model.clone(),
        config.dataset.temperature,
    )?;

    let written = generator.run(category, total, batch, &output).await?;
    info!(category, written, output = %output.display(), "dataset generation complete");
    println!(
        "generated {written} examples for {category} into {}",
        output.display()
    );
    Ok(())
}
