//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Local JSON file logging with rotation
//! - Logging macros for batch events
//!
//! # Example
//!
//! ```no_run
//! use mailmerge::logging::init_logging;
//! use mailmerge::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a batch run
///
/// # Example
///
/// ```no_run
/// use mailmerge::log_batch_start;
///
/// let batch_id = uuid::Uuid::new_v4();
/// log_batch_start!(batch_id, "template.html", "brokers.xlsx", "drafts");
/// ```
#[macro_export]
macro_rules! log_batch_start {
    ($batch_id:expr, $template:expr, $dataset:expr, $destination:expr) => {
        tracing::info!(
            batch_id = %$batch_id,
            template = %$template,
            dataset = %$dataset,
            destination = %$destination,
            "Starting batch"
        );
    };
}

/// Log a draft written for one row
///
/// # Example
///
/// ```no_run
/// use mailmerge::log_row_written;
/// use std::path::Path;
///
/// log_row_written!(3, Path::new("drafts/a.msg"), 60u8);
/// ```
#[macro_export]
macro_rules! log_row_written {
    ($row:expr, $path:expr, $progress:expr) => {
        tracing::debug!(
            row = $row,
            path = %$path.display(),
            progress = $progress,
            "Draft written"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use mailmerge::log_error_with_context;
/// use mailmerge::domain::MergeError;
///
/// let error = MergeError::Configuration("merge.template_path is not set".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            kind = ?$error.kind(),
            context = %$context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::MergeError;
    use std::path::PathBuf;

    #[test]
    fn test_macros_expand() {
        let path = PathBuf::from("drafts/a.msg");
        let error = MergeError::Worker("gone".to_string());

        crate::log_batch_start!(uuid::Uuid::nil(), "t.html", "d.xlsx", "out");
        crate::log_row_written!(1usize, &path, 100u8);
        crate::log_error_with_context!(&error, "test");
    }
}
