//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "mailmerge.toml")]
    pub output: String,

    /// Include comments explaining every option
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing mailmerge configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your template and dataset paths", self.output);
                println!("  2. Validate configuration: mailmerge validate-config");
                println!("  3. Preview the batch: mailmerge generate --dry-run");
                println!("  4. Generate drafts: mailmerge generate");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# mailmerge configuration

[application]
log_level = "info"
dry_run = false

[merge]
template_path = "templates/turnover.html"
dataset_path = "data/brokers.xlsx"
destination_path = "drafts"
# sheet_name = "Sheet1"

[message_store]
backend = "mime"
# sender = "operations@example.com"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# mailmerge configuration
#
# Values may reference environment variables as ${VAR_NAME}, and any key can
# be overridden with MAILMERGE_<SECTION>_<KEY>, for example
# MAILMERGE_MERGE_DESTINATION_PATH=/tmp/drafts.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Compose every draft but save none
dry_run = false

# ============================================================================
# Merge Inputs
# ============================================================================
[merge]
# Template body: .html/.htm read as UTF-8, or a .msg/.eml message whose
# HTML body is used. Tokens look like [COLUMN_NAME].
template_path = "templates/turnover.html"

# Recipient workbook (.xlsx or .xlsm). Row 1 holds the column names and
# must include COMPANY_NAME, EMAIL_TO and EMAIL_CC.
dataset_path = "data/brokers.xlsx"

# Output directory, created when missing
destination_path = "drafts"

# Worksheet to read; the first sheet when unset
# sheet_name = "Brokers"

# ============================================================================
# Message Store
# ============================================================================
[message_store]
# mime: save drafts as RFC 5322 message files
# disabled: no store; only markup templates and dry runs work
backend = "mime"

# From address stamped on every draft
# sender = "operations@example.com"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# JSON log files next to console output
local_enabled = false

# Log directory
local_path = "logs"

# Rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MergeConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generated_configs_parse_and_validate() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: MergeConfig = toml::from_str(&content).unwrap();
            config.validate().unwrap();
            assert!(config.request().is_ok());
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("mailmerge.toml");
        std::fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "existing");

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().await.unwrap(), 0);
        assert!(std::fs::read_to_string(&output)
            .unwrap()
            .contains("[merge]"));
    }
}
