//! Draft composition
//!
//! Turns a rendered body and its row into a [`Draft`]: subject from the
//! company column, recipient lists from the email columns.

use crate::domain::{Draft, Result, Row, COMPANY_NAME, EMAIL_CC, EMAIL_TO, REQUIRED_COLUMNS};

/// Characters dropped from the end of the full subject to form the header
/// subject. Tied to the `"Waybill No"` suffix of [`subject_phrase`].
pub const SUBJECT_TRUNCATION: usize = 4;

/// Separator between addresses in the dataset's email columns
pub const DATASET_ADDRESS_SEPARATOR: char = ',';

/// Full subject text for a company
pub fn subject_phrase(company: &str) -> String {
    format!("BROKER TURN OVER FOR {company}, Waybill No")
}

/// Drops the last `count` characters of `text`
fn drop_last_chars(text: &str, count: usize) -> &str {
    match text.char_indices().rev().nth(count.saturating_sub(1)) {
        Some((idx, _)) if count > 0 => &text[..idx],
        _ if count == 0 => text,
        _ => "",
    }
}

/// Splits a comma-separated address field into a recipient list
///
/// Entries are trimmed and empty entries dropped, so an empty field gives an
/// empty list.
pub fn split_recipients(field: &str) -> Vec<String> {
    field
        .split(DATASET_ADDRESS_SEPARATOR)
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .collect()
}

/// Composes the draft for one row
///
/// # Errors
///
/// Returns `RowMissingRequiredField` if the row lacks `COMPANY_NAME`,
/// `EMAIL_TO` or `EMAIL_CC`.
pub fn compose(rendered_body: &str, row: &Row) -> Result<Draft> {
    for column in REQUIRED_COLUMNS {
        row.require(column)?;
    }

    let file_subject = subject_phrase(row.require(COMPANY_NAME)?);
    let subject = drop_last_chars(&file_subject, SUBJECT_TRUNCATION).to_string();
    let to = split_recipients(row.require(EMAIL_TO)?);
    let cc = split_recipients(row.require(EMAIL_CC)?);

    Ok(Draft::new(subject, file_subject, rendered_body, to, cc))
}
