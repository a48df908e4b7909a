// SPDX-FileCopyrightText: 2026 Gearshift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gearshift - prompt intent classification and model settings recommendation.
//!
//! This is the binary entry point for the Gearshift service.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod dataset;
mod serve;

/// Gearshift - prompt intent classification and settings recommendation.
#[derive(Parser, Debug)]
#[command(name = "gearshift", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the classification HTTP server.
    Serve,
    /// Generate synthetic labeled prompts for one category.
    Dataset {
        /// Category key to generate examples for (e.g. "Coding").
        #[arg(long)]
        category: String,
        /// Total number of examples to generate.
        #[arg(long, default_value_t = 100)]
        total: usize,
        /// Examples requested per API call.
        #[arg(long, default_value_t = 20)]
        batch: usize,
        /// Output JSON file. Defaults to <category>_synthetic_data.json.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match gearshift_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            gearshift_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.server.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run(config).await,
        Some(Commands::Dataset {
            category,
            total,
            batch,
            output,
        }) => dataset::run(config, &category, total, batch, output).await,
        None => {
            println!("gearshift: use --help for available commands");
            return;
        }
    };

    if let Err(e) = result {
        eprintln!("gearshift: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the configured log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gearshift={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed)
        let config = gearshift_config::load_and_validate()
            .expect("default config should be valid");
        assert_eq!(config.server.port, 8642);
        assert_eq!(config.categories.len(), 10);
    }
}
