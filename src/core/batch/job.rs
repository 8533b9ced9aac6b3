//! One batch run over a loaded template and dataset

use crate::adapters::dataset::{Dataset, DatasetReader};
use crate::config::MergeRequest;
use crate::core::batch::progress::ProgressTracker;
use crate::core::batch::summary::BatchSummary;
use crate::core::compose::compose;
use crate::core::persist::{ensure_destination, DraftWriter};
use crate::core::substitute::Renderer;
use crate::core::template::{Template, TemplateLoader};
use crate::domain::{Result, Row};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Template, rows and destination bound together for one run
///
/// The template body and the destination are read-only once the job exists.
#[derive(Debug)]
pub struct GenerationJob {
    template: Template,
    dataset: Dataset,
    destination: PathBuf,
    renderer: Renderer,
}

impl GenerationJob {
    /// Binds already loaded inputs into a job
    ///
    /// # Errors
    ///
    /// Returns `DatasetFormatError` if no token matcher can be built for the
    /// dataset's columns.
    pub fn new(template: Template, dataset: Dataset, destination: impl Into<PathBuf>) -> Result<Self> {
        let renderer = Renderer::for_columns(dataset.columns())?;
        Ok(Self {
            template,
            dataset,
            destination: destination.into(),
            renderer,
        })
    }

    /// Loads the template, then the dataset, then makes sure the destination
    /// exists
    pub async fn prepare(
        request: &MergeRequest,
        loader: &TemplateLoader,
        reader: &DatasetReader,
    ) -> Result<Self> {
        let template = loader.load(&request.template_path).await?;
        let dataset = reader.load(&request.dataset_path).await?;
        ensure_destination(&request.destination).await?;

        Self::new(template, dataset, &request.destination)
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn total_rows(&self) -> usize {
        self.dataset.len()
    }

    /// Processes every row in order, stopping at the first failure
    ///
    /// Progress advances only after a row's draft has been written. Drafts
    /// already written stay in place when a later row fails.
    pub async fn run(
        &self,
        writer: &DraftWriter,
        tracker: &ProgressTracker,
        mut summary: BatchSummary,
    ) -> Result<BatchSummary> {
        summary.total_rows = self.total_rows();
        let mut seen: HashSet<PathBuf> = HashSet::with_capacity(self.total_rows());

        for row in self.dataset.rows() {
            let path = self.process_row(row, writer).await.inspect_err(|e| {
                tracing::error!(
                    batch_id = %summary.batch_id,
                    row = row.number(),
                    error = %e,
                    "Row failed, aborting batch"
                );
            })?;

            let duplicate = !seen.insert(path.clone());
            tracker.row_written();
            crate::log_row_written!(row.number(), &path, tracker.snapshot().percent);

            summary.record_draft(path, duplicate);
        }

        Ok(summary)
    }

    async fn process_row(&self, row: &Row, writer: &DraftWriter) -> Result<PathBuf> {
        let body = self.renderer.render(self.template.body(), row);
        let draft = compose(&body, row)?;
        writer.write(draft, &self.destination).await
    }
}
