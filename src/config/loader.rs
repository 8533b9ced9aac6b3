//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{MergeConfig, MessageStoreBackend};
use crate::domain::errors::MergeError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MergeConfig
/// 4. Applies environment variable overrides (MAILMERGE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `MergeError::Configuration` if the file is missing or unreadable,
/// a referenced environment variable is unset, parsing fails or validation
/// fails.
///
/// # Examples
///
/// ```no_run
/// use mailmerge::config::loader::load_config;
///
/// let config = load_config("mailmerge.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MergeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MergeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MergeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: MergeConfig = toml::from_str(&contents)
        .map_err(|e| MergeError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config
        .validate()
        .map_err(|e| MergeError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Loads the configuration file if it exists, otherwise starts from defaults
///
/// Environment overrides apply in both cases. Validation is left to the caller
/// so that command-line overrides can be applied first.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<MergeConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    let mut config = MergeConfig::default();
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MergeError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(MergeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using MAILMERGE_* prefix
///
/// Environment variables follow the pattern: MAILMERGE_<SECTION>_<KEY>
/// For example: MAILMERGE_MERGE_DESTINATION_PATH, MAILMERGE_APPLICATION_DRY_RUN
fn apply_env_overrides(config: &mut MergeConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("MAILMERGE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("MAILMERGE_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Merge path overrides
    if let Ok(val) = std::env::var("MAILMERGE_MERGE_TEMPLATE_PATH") {
        config.merge.template_path = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("MAILMERGE_MERGE_DATASET_PATH") {
        config.merge.dataset_path = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("MAILMERGE_MERGE_DESTINATION_PATH") {
        config.merge.destination_path = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("MAILMERGE_MERGE_SHEET_NAME") {
        config.merge.sheet_name = Some(val);
    }

    // Message store overrides
    if let Ok(val) = std::env::var("MAILMERGE_MESSAGE_STORE_BACKEND") {
        match val.to_lowercase().as_str() {
            "mime" => config.message_store.backend = MessageStoreBackend::Mime,
            "disabled" => config.message_store.backend = MessageStoreBackend::Disabled,
            other => tracing::warn!(backend = %other, "Ignoring unknown message store backend"),
        }
    }
    if let Ok(val) = std::env::var("MAILMERGE_MESSAGE_STORE_SENDER") {
        config.message_store.sender = Some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("MAILMERGE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("MAILMERGE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("MAILMERGE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
