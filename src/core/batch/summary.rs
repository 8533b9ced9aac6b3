//! Batch summary and reporting
//!
//! This module defines the report returned by a completed batch.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Summary of a completed batch
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Unique id of this run, also attached to its log lines
    pub batch_id: Uuid,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Rows in the dataset
    pub total_rows: usize,

    /// Drafts handed to the message store (or reported in dry-run mode)
    pub drafts_written: usize,

    /// Path of every draft in row order; repeats when subjects collide
    pub written_paths: Vec<PathBuf>,

    /// Rows whose draft replaced an earlier draft of the same run
    pub duplicate_subjects: usize,

    /// Whether the run skipped the message store
    pub dry_run: bool,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl BatchSummary {
    /// Create a new empty summary
    pub fn new(batch_id: Uuid, dry_run: bool) -> Self {
        Self {
            batch_id,
            started_at: Utc::now(),
            total_rows: 0,
            drafts_written: 0,
            written_paths: Vec::new(),
            duplicate_subjects: 0,
            dry_run,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a written draft
    pub fn record_draft(&mut self, path: PathBuf, duplicate: bool) {
        self.drafts_written += 1;
        if duplicate {
            self.duplicate_subjects += 1;
        }
        self.written_paths.push(path);
    }

    /// Distinct files left in the destination
    pub fn unique_files(&self) -> usize {
        self.drafts_written - self.duplicate_subjects
    }

    /// Check that every row produced a draft
    pub fn is_successful(&self) -> bool {
        self.drafts_written == self.total_rows
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            batch_id = %self.batch_id,
            total_rows = self.total_rows,
            drafts_written = self.drafts_written,
            unique_files = self.unique_files(),
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis() as u64,
            "Batch completed"
        );

        if self.duplicate_subjects > 0 {
            tracing::warn!(
                batch_id = %self.batch_id,
                duplicate_subjects = self.duplicate_subjects,
                "Some drafts were overwritten by later rows with the same subject"
            );
        }
    }
}
