//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use mailmerge::adapters::mailstore::MessageStore;
use mailmerge::domain::{Draft, MergeError, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Writes a single-sheet workbook; empty strings leave the cell unset
pub fn write_workbook(path: &Path, cells: &[&[&str]]) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
    for (r, row) in cells.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet
                    .get_cell_mut((c as u32 + 1, r as u32 + 1))
                    .set_value(*value);
            }
        }
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

/// Message store double that records every saved draft
///
/// Writes a placeholder file so callers can see what landed on disk. When
/// `fail_on` is set, that save (1-based) fails instead.
#[derive(Default)]
pub struct RecordingStore {
    saved: Mutex<Vec<(PathBuf, Draft)>>,
    fail_on: Option<usize>,
    template_body: Option<String>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(save_number: usize) -> Self {
        Self {
            fail_on: Some(save_number),
            ..Self::default()
        }
    }

    pub fn with_template_body(body: &str) -> Self {
        Self {
            template_body: Some(body.to_string()),
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Vec<(PathBuf, Draft)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageStore for RecordingStore {
    fn name(&self) -> &str {
        "recording"
    }

    async fn read_html_body(&self, path: &Path) -> Result<String> {
        self.template_body.clone().ok_or_else(|| {
            MergeError::TemplateSourceUnavailable(format!("no body for {}", path.display()))
        })
    }

    async fn save_draft(&self, draft: &Draft, path: &Path) -> Result<()> {
        let attempt = self.saved.lock().unwrap().len() + 1;
        if self.fail_on == Some(attempt) {
            return Err(MergeError::DraftPersistError {
                path: path.to_path_buf(),
                message: "store rejected the draft".to_string(),
            });
        }

        std::fs::write(path, draft.body()).map_err(|e| MergeError::DraftPersistError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.saved
            .lock()
            .unwrap()
            .push((path.to_path_buf(), draft.clone()));
        Ok(())
    }
}
