//! Batch controller - runs a mail merge on a background task
//!
//! The controller owns the request and the message store, spawns one worker
//! task per run and hands back a [`BatchHandle`]. Rows are processed strictly
//! in order on that task; the caller only waits on the handle.

use crate::adapters::dataset::DatasetReader;
use crate::adapters::mailstore::MessageStore;
use crate::config::MergeRequest;
use crate::core::batch::job::GenerationJob;
use crate::core::batch::progress::{ProgressSnapshot, ProgressTracker};
use crate::core::batch::summary::BatchSummary;
use crate::core::persist::DraftWriter;
use crate::core::template::TemplateLoader;
use crate::domain::{MergeError, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Options for one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Compose every draft but do not save any
    pub dry_run: bool,
}

/// Starts batch runs
pub struct BatchController {
    request: MergeRequest,
    store: Arc<dyn MessageStore>,
    options: BatchOptions,
}

impl BatchController {
    /// Create a new batch controller
    pub fn new(request: MergeRequest, store: Arc<dyn MessageStore>, options: BatchOptions) -> Self {
        Self {
            request,
            store,
            options,
        }
    }

    /// Spawns the worker task and returns immediately
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self) -> BatchHandle {
        let (tracker, progress) = ProgressTracker::channel();
        let join = tokio::spawn(self.run(tracker));
        BatchHandle { join, progress }
    }

    async fn run(self, tracker: ProgressTracker) -> Result<BatchSummary> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4();
        let summary = BatchSummary::new(batch_id, self.options.dry_run);

        tracker.begin();
        crate::log_batch_start!(
            batch_id,
            self.request.template_path.display(),
            self.request.dataset_path.display(),
            self.request.destination.display()
        );

        match self.execute(&tracker, summary).await {
            Ok(summary) => {
                tracker.complete();
                let summary = summary.with_duration(start_time.elapsed());
                summary.log_summary();
                Ok(summary)
            }
            Err(e) => {
                tracker.fail();
                crate::log_error_with_context!(&e, format!("batch {batch_id} failed"));
                Err(e)
            }
        }
    }

    async fn execute(&self, tracker: &ProgressTracker, summary: BatchSummary) -> Result<BatchSummary> {
        let loader = TemplateLoader::new(self.store.clone());
        let reader = DatasetReader::with_sheet(self.request.sheet_name.clone());

        let job = GenerationJob::prepare(&self.request, &loader, &reader).await?;
        tracker.set_total_rows(job.total_rows());

        if job.total_rows() == 0 {
            tracing::warn!(batch_id = %summary.batch_id, "Dataset has no rows, nothing to generate");
        }

        let writer = DraftWriter::new(self.store.clone(), self.options.dry_run);
        job.run(&writer, tracker, summary).await
    }
}

/// Handle to a running batch
///
/// Progress can be observed any number of times; the outcome is consumed
/// exactly once.
#[derive(Debug)]
pub struct BatchHandle {
    join: JoinHandle<Result<BatchSummary>>,
    progress: watch::Receiver<ProgressSnapshot>,
}

impl BatchHandle {
    /// A receiver that observes every progress update
    pub fn progress(&self) -> watch::Receiver<ProgressSnapshot> {
        self.progress.clone()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> ProgressSnapshot {
        *self.progress.borrow()
    }

    /// Whether the worker has stopped
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Waits for the batch to finish
    ///
    /// # Errors
    ///
    /// Returns the first row or setup failure, or `Worker` if the task
    /// panicked or was cancelled.
    pub async fn outcome(self) -> Result<BatchSummary> {
        self.join
            .await
            .map_err(|e| MergeError::Worker(format!("batch task did not complete: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mailstore::DisabledMessageStore;
    use crate::core::batch::progress::BatchState;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_template_fails_batch() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("drafts");
        let request = MergeRequest::new(
            dir.path().join("missing.html"),
            dir.path().join("rows.xlsx"),
            &destination,
        );

        let handle =
            BatchController::new(request, Arc::new(DisabledMessageStore), BatchOptions::default())
                .start();
        let progress = handle.progress();

        let err = handle.outcome().await.unwrap_err();

        assert!(matches!(err, MergeError::TemplateNotFound(_)));
        let snapshot = *progress.borrow();
        assert_eq!(snapshot.state, BatchState::Failed);
        assert_eq!(snapshot.percent, 0);
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_missing_dataset_fails_batch() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("t.html");
        std::fs::write(&template, "Dear [NAME]").unwrap();
        let request = MergeRequest::new(&template, dir.path().join("rows.xlsx"), dir.path());

        let handle =
            BatchController::new(request, Arc::new(DisabledMessageStore), BatchOptions::default())
                .start();

        let err = handle.outcome().await.unwrap_err();
        assert!(matches!(err, MergeError::DatasetNotFound(_)));
    }
}
