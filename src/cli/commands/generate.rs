//! Generate command implementation
//!
//! This module implements the `generate` command, which runs one mail-merge
//! batch and reports its progress and summary.

use crate::adapters::mailstore::create_message_store;
use crate::config::{load_config_or_default, MergeConfig};
use crate::core::batch::{BatchController, BatchOptions, BatchState, ProgressSnapshot};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Arguments for the generate command
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Override the template file (.html, .htm, .msg, .eml)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Override the dataset workbook (.xlsx, .xlsm)
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// Override the output directory for drafts
    #[arg(long)]
    pub destination: Option<PathBuf>,

    /// Override the worksheet to read
    #[arg(long)]
    pub sheet: Option<String>,

    /// Compose every draft without saving any
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Execute the generate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting generate command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let request = match config.request() {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Incomplete merge request");
                eprintln!("{e}");
                eprintln!("Set it in {config_path} or pass it on the command line.");
                return Ok(2);
            }
        };

        let dry_run = config.application.dry_run;
        if dry_run {
            tracing::info!("Dry run mode enabled - no drafts will be saved");
            println!("🔍 DRY RUN MODE - No drafts will be saved");
            println!();
        }

        println!("🚀 Generating drafts");
        println!("  Template: {}", request.template_path.display());
        println!("  Dataset: {}", request.dataset_path.display());
        println!("  Destination: {}", request.destination.display());
        println!();

        let store = create_message_store(&config.message_store);
        let handle = BatchController::new(request, store, BatchOptions { dry_run }).start();
        let printer = spawn_progress_printer(handle.progress());

        let outcome = handle.outcome().await;
        // the worker dropped its sender, so the printer has seen the last update
        let _ = printer.await;
        println!();

        let summary = match outcome {
            Ok(s) => s,
            Err(e) => {
                eprintln!("❌ Generation failed ({:?}): {e}", e.kind());
                return Ok(5);
            }
        };

        println!("📊 Batch Summary:");
        println!("  Batch ID: {}", summary.batch_id);
        println!("  Rows: {}", summary.total_rows);
        println!("  Drafts Written: {}", summary.drafts_written);
        println!("  Files: {}", summary.unique_files());
        if summary.duplicate_subjects > 0 {
            println!(
                "  ⚠️  Overwritten (same subject): {}",
                summary.duplicate_subjects
            );
        }
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();
        println!("✅ Generation completed successfully!");

        Ok(0)
    }

    fn apply_overrides(&self, config: &mut MergeConfig) {
        if let Some(template) = &self.template {
            tracing::info!(template = %template.display(), "Overriding template from CLI");
            config.merge.template_path = Some(template.clone());
        }
        if let Some(dataset) = &self.dataset {
            tracing::info!(dataset = %dataset.display(), "Overriding dataset from CLI");
            config.merge.dataset_path = Some(dataset.clone());
        }
        if let Some(destination) = &self.destination {
            tracing::info!(destination = %destination.display(), "Overriding destination from CLI");
            config.merge.destination_path = Some(destination.clone());
        }
        if let Some(sheet) = &self.sheet {
            config.merge.sheet_name = Some(sheet.clone());
        }
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
    }
}

fn spawn_progress_printer(mut progress: watch::Receiver<ProgressSnapshot>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let snapshot = *progress.borrow_and_update();
            if snapshot.state == BatchState::Running && snapshot.rows_written > 0 {
                print!(
                    "\r  Progress: {:>3}% ({}/{})",
                    snapshot.percent, snapshot.rows_written, snapshot.total_rows
                );
                let _ = std::io::stdout().flush();
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_args_defaults() {
        let args = GenerateArgs::default();

        assert!(args.template.is_none());
        assert!(args.dataset.is_none());
        assert!(args.destination.is_none());
        assert!(!args.dry_run);
    }

    #[test]
    fn test_apply_overrides() {
        let args = GenerateArgs {
            template: Some(PathBuf::from("t.html")),
            dataset: Some(PathBuf::from("d.xlsx")),
            destination: Some(PathBuf::from("out")),
            sheet: Some("Brokers".to_string()),
            dry_run: true,
        };
        let mut config = MergeConfig::default();

        args.apply_overrides(&mut config);

        let request = config.request().unwrap();
        assert_eq!(request.template_path, PathBuf::from("t.html"));
        assert_eq!(request.dataset_path, PathBuf::from("d.xlsx"));
        assert_eq!(request.destination, PathBuf::from("out"));
        assert_eq!(request.sheet_name.as_deref(), Some("Brokers"));
        assert!(config.application.dry_run);
    }

    #[tokio::test]
    async fn test_missing_paths_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let config_path = dir.path().join("absent.toml");

        let code = GenerateArgs::default()
            .execute(&config_path.to_string_lossy())
            .await
            .unwrap();

        assert_eq!(code, 2);
    }
}
