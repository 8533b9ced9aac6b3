//! Draft domain model
//!
//! A [`Draft`] is one fully composed, not-yet-persisted email record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used when recipient lists are rendered as a single field
pub const ADDRESS_SEPARATOR: &str = ";";

/// Body format of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    /// Rich (HTML) rendering
    #[default]
    Html,
}

impl fmt::Display for BodyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyFormat::Html => write!(f, "html"),
        }
    }
}

/// One composed email draft
///
/// `subject` is the text placed in the message's Subject header.
/// `file_subject` is the untruncated subject the output file is named after.
/// A draft is immutable once composed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    subject: String,
    file_subject: String,
    body: String,
    to: Vec<String>,
    cc: Vec<String>,
    format: BodyFormat,
}

impl Draft {
    /// Creates a new HTML draft
    pub fn new(
        subject: impl Into<String>,
        file_subject: impl Into<String>,
        body: impl Into<String>,
        to: Vec<String>,
        cc: Vec<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            file_subject: file_subject.into(),
            body: body.into(),
            to,
            cc,
            format: BodyFormat::Html,
        }
    }

    /// Subject header text
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Untruncated subject used to name the output file
    pub fn file_subject(&self) -> &str {
        &self.file_subject
    }

    /// Rendered body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// To recipients in source order
    pub fn to(&self) -> &[String] {
        &self.to
    }

    /// CC recipients in source order
    pub fn cc(&self) -> &[String] {
        &self.cc
    }

    /// Body format
    pub fn format(&self) -> BodyFormat {
        self.format
    }

    /// To recipients joined with `;`
    pub fn to_field(&self) -> String {
        self.to.join(ADDRESS_SEPARATOR)
    }

    /// CC recipients joined with `;`
    pub fn cc_field(&self) -> String {
        self.cc.join(ADDRESS_SEPARATOR)
    }
}
