//! Recipient dataset adapter
//!
//! Loads a tabular workbook into an ordered sequence of [`Row`]s. The first
//! row of the worksheet names the columns; every following non-blank row
//! becomes one [`Row`] carrying every header column.

pub mod xlsx;

use crate::domain::Row;

pub use xlsx::DatasetReader;

/// A fully materialized dataset
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Creates a dataset from header columns and rows in source order
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Header columns in source order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in source order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when the header contains `column`
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}
