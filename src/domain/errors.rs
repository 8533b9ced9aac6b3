//! Domain error types
//!
//! This module defines the error hierarchy for mailmerge. Every failure that
//! can abort a batch is a variant of [`MergeError`]; presentation is left to
//! the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Main mailmerge error type
///
/// All variants are fatal to the batch that raised them. The first failure
/// aborts the remaining rows and is surfaced whole through the batch outcome.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Template path does not exist
    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// Template extension is not a markup or rich-message file
    #[error("Unsupported template format: {0}")]
    TemplateUnsupportedFormat(String),

    /// The message store needed to open a rich-message template is unreachable
    #[error("Template source unavailable: {0}")]
    TemplateSourceUnavailable(String),

    /// Dataset path does not exist
    #[error("Dataset not found: {}", .0.display())]
    DatasetNotFound(PathBuf),

    /// Dataset is unreadable or malformed
    #[error("Dataset format error: {0}")]
    DatasetFormatError(String),

    /// A row lacks one of the columns the composer requires
    #[error("Row {row} is missing required field '{field}'")]
    RowMissingRequiredField {
        /// 1-based data row number (header excluded)
        row: usize,
        /// Name of the missing column
        field: String,
    },

    /// Destination directory could not be created or is not a directory
    #[error("Destination unwritable: {0}")]
    DestinationUnwritable(String),

    /// The message-creation collaborator failed to persist a draft
    #[error("Failed to persist draft {}: {message}", .path.display())]
    DraftPersistError {
        /// Target file of the failed write
        path: PathBuf,
        /// Collaborator error message
        message: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors outside the categories above
    #[error("I/O error: {0}")]
    Io(String),

    /// The background worker stopped before producing an outcome
    #[error("Batch worker error: {0}")]
    Worker(String),
}

/// Stable classification of a [`MergeError`], used in logs and CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Template missing, unsupported or unreachable
    Template,
    /// Dataset missing or malformed
    Dataset,
    /// Row-level data problem
    Row,
    /// Destination or draft persistence failure
    Storage,
    /// Configuration problem
    Configuration,
    /// Anything else
    Internal,
}

impl MergeError {
    /// Returns the classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MergeError::TemplateNotFound(_)
            | MergeError::TemplateUnsupportedFormat(_)
            | MergeError::TemplateSourceUnavailable(_) => ErrorKind::Template,
            MergeError::DatasetNotFound(_) | MergeError::DatasetFormatError(_) => {
                ErrorKind::Dataset
            }
            MergeError::RowMissingRequiredField { .. } => ErrorKind::Row,
            MergeError::DestinationUnwritable(_) | MergeError::DraftPersistError { .. } => {
                ErrorKind::Storage
            }
            MergeError::Configuration(_) => ErrorKind::Configuration,
            MergeError::Io(_) | MergeError::Worker(_) => ErrorKind::Internal,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for MergeError {
    fn from(err: std::io::Error) -> Self {
        MergeError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MergeError {
    fn from(err: toml::de::Error) -> Self {
        MergeError::Configuration(format!("TOML parse error: {err}"))
    }
}
