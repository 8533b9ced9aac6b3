//! Configuration schema types
//!
//! This module defines the configuration structure for mailmerge.

use crate::domain::{MergeError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Message store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageStoreBackend {
    /// RFC 5322 message files written and read locally
    #[default]
    Mime,
    /// No message store; rich templates and draft saving are unavailable
    Disabled,
}

/// Main mailmerge configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MergeConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Template, dataset and destination paths
    #[serde(default)]
    pub merge: MergePathsConfig,

    /// Message store collaborator
    #[serde(default)]
    pub message_store: MessageStoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MergeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.application.validate()?;
        self.merge.validate()?;
        self.message_store.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Bundles the configured paths into an immutable [`MergeRequest`]
    ///
    /// # Errors
    ///
    /// Returns `MergeError::Configuration` if any of the three paths is unset
    pub fn request(&self) -> Result<MergeRequest> {
        fn required(value: &Option<PathBuf>, key: &str) -> Result<PathBuf> {
            value
                .clone()
                .filter(|p| !p.as_os_str().is_empty())
                .ok_or_else(|| MergeError::Configuration(format!("merge.{key} is not set")))
        }

        Ok(MergeRequest {
            template_path: required(&self.merge.template_path, "template_path")?,
            dataset_path: required(&self.merge.dataset_path, "dataset_path")?,
            destination: required(&self.merge.destination_path, "destination_path")?,
            sheet_name: self.merge.sheet_name.clone(),
        })
    }
}

/// Paths and inputs for one batch run, fixed for the duration of the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    /// Markup or rich-message template
    pub template_path: PathBuf,
    /// Recipient workbook
    pub dataset_path: PathBuf,
    /// Output directory for drafts
    pub destination: PathBuf,
    /// Worksheet to read (first sheet when unset)
    pub sheet_name: Option<String>,
}

impl MergeRequest {
    /// Creates a request reading the first worksheet
    pub fn new(
        template_path: impl Into<PathBuf>,
        dataset_path: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            template_path: template_path.into(),
            dataset_path: dataset_path.into(),
            destination: destination.into(),
            sheet_name: None,
        }
    }

    /// Selects a worksheet by name
    pub fn with_sheet(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = Some(sheet_name.into());
        self
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (compose drafts without saving them)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Template, dataset and destination paths
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MergePathsConfig {
    /// Template file (.html, .htm, .msg, .eml)
    #[serde(default)]
    pub template_path: Option<PathBuf>,

    /// Dataset workbook (.xlsx, .xlsm)
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,

    /// Output directory
    #[serde(default)]
    pub destination_path: Option<PathBuf>,

    /// Worksheet name (first sheet when unset)
    #[serde(default)]
    pub sheet_name: Option<String>,
}

impl MergePathsConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(sheet) = &self.sheet_name {
            if sheet.trim().is_empty() {
                return Err("merge.sheet_name cannot be empty when set".to_string());
            }
        }
        Ok(())
    }
}

/// Message store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessageStoreConfig {
    /// Backend used to read rich templates and save drafts
    #[serde(default)]
    pub backend: MessageStoreBackend,

    /// Optional From address stamped on saved drafts
    #[serde(default)]
    pub sender: Option<String>,
}

impl MessageStoreConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(sender) = &self.sender {
            if sender.trim().is_empty() {
                return Err("message_store.sender cannot be empty when set".to_string());
            }
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
