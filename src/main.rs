// Mailmerge - Batch Email Draft Generator
// Copyright (c) 2025 Mailmerge Contributors
// Licensed under the MIT License

use clap::Parser;
use mailmerge::cli::{Cli, Commands};
use mailmerge::config::{load_config_or_default, MergeConfig};
use mailmerge::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // The logging section is read up front; a broken file is reported by the
    // command itself, so fall back to console-only logging here.
    let config = match &cli.command {
        Commands::Init(_) => MergeConfig::default(),
        _ => load_config_or_default(&cli.config).unwrap_or_default(),
    };

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.application.log_level.clone());

    let guard = match init_logging(&log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Mailmerge - Batch Email Draft Generator"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors, so flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Generate(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
