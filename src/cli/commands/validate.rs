//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the mailmerge configuration file.

use crate::config::{load_config, MessageStoreBackend};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also require the template, dataset and destination paths to be set
    #[arg(long)]
    pub require_paths: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates every section
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        if self.require_paths {
            if let Err(e) = config.request() {
                println!("❌ Configuration is incomplete");
                println!("   Error: {e}");
                return Ok(2);
            }
        }

        let show = |path: &Option<std::path::PathBuf>| {
            path.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set)".to_string())
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Template: {}", show(&config.merge.template_path));
        println!("  Dataset: {}", show(&config.merge.dataset_path));
        println!("  Destination: {}", show(&config.merge.destination_path));
        println!(
            "  Sheet: {}",
            config.merge.sheet_name.as_deref().unwrap_or("(first sheet)")
        );
        println!(
            "  Message Store: {}",
            match config.message_store.backend {
                MessageStoreBackend::Mime => "mime",
                MessageStoreBackend::Disabled => "disabled",
            }
        );
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let args = ValidateArgs {
            require_paths: false,
        };
        assert_eq!(args.execute("missing-mailmerge.toml").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_invalid_rotation_is_config_error() {
        let file = config_file("[logging]\nlocal_rotation = \"weekly\"\n");
        let args = ValidateArgs {
            require_paths: false,
        };
        assert_eq!(
            args.execute(&file.path().to_string_lossy()).await.unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn test_require_paths() {
        let file = config_file("[merge]\ntemplate_path = \"t.html\"\n");
        let path = file.path().to_string_lossy().to_string();

        let lenient = ValidateArgs {
            require_paths: false,
        };
        let strict = ValidateArgs {
            require_paths: true,
        };

        assert_eq!(lenient.execute(&path).await.unwrap(), 0);
        assert_eq!(strict.execute(&path).await.unwrap(), 2);
    }
}
