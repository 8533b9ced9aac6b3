//! Row domain model
//!
//! A [`Row`] is one recipient's data from the dataset: an ordered mapping from
//! column name to stringified cell value.

use super::errors::MergeError;
use super::result::Result;
use indexmap::IndexMap;

/// Column holding the company name used in the subject
pub const COMPANY_NAME: &str = "COMPANY_NAME";

/// Column holding comma-separated To recipients
pub const EMAIL_TO: &str = "EMAIL_TO";

/// Column holding comma-separated CC recipients
pub const EMAIL_CC: &str = "EMAIL_CC";

/// Columns every row must carry for a draft to be composed
pub const REQUIRED_COLUMNS: [&str; 3] = [COMPANY_NAME, EMAIL_TO, EMAIL_CC];

/// One recipient's data extracted from the dataset
///
/// Column order follows the dataset header. Column names are unique within a
/// row; inserting an existing name replaces its value in place.
///
/// # Examples
///
/// ```
/// use mailmerge::domain::Row;
///
/// let row = Row::new(1)
///     .with("NAME", "Alice")
///     .with("COMPANY_NAME", "Acme");
///
/// assert_eq!(row.get("NAME"), Some("Alice"));
/// assert_eq!(row.columns().collect::<Vec<_>>(), vec!["NAME", "COMPANY_NAME"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    number: usize,
    cells: IndexMap<String, String>,
}

impl Row {
    /// Creates an empty row with the given 1-based data row number
    pub fn new(number: usize) -> Self {
        Self {
            number,
            cells: IndexMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.insert(column, value);
        self
    }

    /// Sets a cell value, stringifying it
    pub fn insert(&mut self, column: impl Into<String>, value: impl ToString) {
        self.cells.insert(column.into(), value.to_string());
    }

    /// 1-based data row number (header excluded)
    pub fn number(&self) -> usize {
        self.number
    }

    /// Returns the value of a column, if present
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Returns the value of a column or fails with `RowMissingRequiredField`
    pub fn require(&self, column: &str) -> Result<&str> {
        self.get(column)
            .ok_or_else(|| MergeError::RowMissingRequiredField {
                row: self.number,
                field: column.to_string(),
            })
    }

    /// Column names in source order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// `(column, value)` pairs in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the row has no columns
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell is blank
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }
}
