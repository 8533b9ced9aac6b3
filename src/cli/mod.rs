//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for mailmerge using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// mailmerge - personalized email drafts from a template and a workbook
#[derive(Parser, Debug)]
#[command(name = "mailmerge")]
#[command(version, about, long_about = None)]
#[command(author = "Mailmerge Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "mailmerge.toml", env = "MAILMERGE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MAILMERGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one draft per dataset row
    Generate(commands::generate::GenerateArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
