//! Workbook reader backed by umya-spreadsheet

use super::Dataset;
use crate::domain::{MergeError, Result, Row};
use std::collections::HashSet;
use std::path::Path;
use umya_spreadsheet::Worksheet;

/// Workbook extensions the reader accepts
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["xlsx", "xlsm"];

/// Reads recipient rows from an `.xlsx`/`.xlsm` workbook
///
/// Parsing runs on the blocking thread pool so the calling task stays
/// responsive for large workbooks.
///
/// # Examples
///
/// ```no_run
/// use mailmerge::adapters::dataset::DatasetReader;
///
/// # async fn example() -> mailmerge::domain::Result<()> {
/// let dataset = DatasetReader::new().load("brokers.xlsx").await?;
/// println!("{} recipients", dataset.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DatasetReader {
    sheet_name: Option<String>,
}

impl DatasetReader {
    /// Creates a reader for the first worksheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reader for a named worksheet, or the first one when `None`
    pub fn with_sheet(sheet_name: Option<String>) -> Self {
        Self { sheet_name }
    }

    /// Loads every row of the workbook
    ///
    /// # Errors
    ///
    /// - `DatasetNotFound` if the path does not exist
    /// - `DatasetFormatError` for unsupported extensions, unreadable
    ///   workbooks, a missing worksheet or a malformed header
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref().to_path_buf();

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(MergeError::DatasetNotFound(path));
        }
        check_extension(&path)?;

        let sheet_name = self.sheet_name.clone();
        let dataset = tokio::task::spawn_blocking(move || read_workbook(&path, sheet_name.as_deref()))
            .await
            .map_err(|e| MergeError::Worker(format!("dataset reader task failed: {e}")))??;

        tracing::debug!(
            columns = dataset.columns().len(),
            rows = dataset.len(),
            "Dataset loaded"
        );

        Ok(dataset)
    }
}

fn check_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(MergeError::DatasetFormatError(format!(
            "unsupported dataset format '.{}' for {} (expected one of: {})",
            extension,
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        )))
    }
}

fn read_workbook(path: &Path, sheet_name: Option<&str>) -> Result<Dataset> {
    let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
        MergeError::DatasetFormatError(format!("failed to parse workbook {}: {e}", path.display()))
    })?;

    let sheet = match sheet_name {
        Some(name) => book.get_sheet_by_name(name).ok_or_else(|| {
            MergeError::DatasetFormatError(format!(
                "sheet '{}' not found in {}",
                name,
                path.display()
            ))
        })?,
        None => book.get_sheet_collection().first().ok_or_else(|| {
            MergeError::DatasetFormatError(format!("workbook {} has no sheets", path.display()))
        })?,
    };

    read_sheet(sheet)
}

fn cell_text(sheet: &Worksheet, col: u32, row: u32) -> String {
    sheet
        .get_cell((col, row))
        .map(|cell| cell.get_value().to_string())
        .unwrap_or_default()
}

fn read_sheet(sheet: &Worksheet) -> Result<Dataset> {
    let (max_col, max_row) = sheet.get_highest_column_and_row();
    if max_row == 0 || max_col == 0 {
        return Err(MergeError::DatasetFormatError(
            "worksheet is empty; expected a header row".to_string(),
        ));
    }

    let mut columns: Vec<String> = (1..=max_col)
        .map(|col| cell_text(sheet, col, 1).trim().to_string())
        .collect();

    // Formatting can extend the used range past the last named column
    while columns.last().is_some_and(|c| c.is_empty()) {
        columns.pop();
    }
    if columns.is_empty() {
        return Err(MergeError::DatasetFormatError(
            "header row has no column names".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for (idx, column) in columns.iter().enumerate() {
        if column.is_empty() {
            return Err(MergeError::DatasetFormatError(format!(
                "header column {} has no name",
                idx + 1
            )));
        }
        if !seen.insert(column.as_str()) {
            return Err(MergeError::DatasetFormatError(format!(
                "duplicate header column '{column}'"
            )));
        }
    }

    let mut rows = Vec::new();
    for row_idx in 2..=max_row {
        let mut row = Row::new((row_idx - 1) as usize);
        for (col_idx, column) in columns.iter().enumerate() {
            row.insert(column.as_str(), cell_text(sheet, col_idx as u32 + 1, row_idx));
        }
        if row.is_blank() {
            tracing::trace!(row = row.number(), "Skipping blank row");
            continue;
        }
        rows.push(row);
    }

    Ok(Dataset::new(columns, rows))
}
