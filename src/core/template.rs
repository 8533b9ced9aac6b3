//! Template loading
//!
//! Resolves a template path into a raw body string. The source kind is
//! decided once from the file extension; markup files are read directly and
//! rich-message files go through the [`MessageStore`]. No substitution
//! happens here.

use crate::adapters::mailstore::MessageStore;
use crate::domain::{MergeError, Result};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Kind of template source, resolved from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateSource {
    /// `.html` / `.htm` file read as UTF-8 text
    MarkupFile,
    /// `.msg` / `.eml` message whose HTML body is extracted by the message store
    RichMessageFile,
}

impl TemplateSource {
    /// Resolves the source kind from a path's extension (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns `TemplateUnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "html" | "htm" => Ok(TemplateSource::MarkupFile),
            "msg" | "eml" => Ok(TemplateSource::RichMessageFile),
            _ => Err(MergeError::TemplateUnsupportedFormat(format!(
                "'{}' is not a .html, .htm, .msg or .eml file",
                path.display()
            ))),
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::MarkupFile => write!(f, "markup"),
            TemplateSource::RichMessageFile => write!(f, "rich-message"),
        }
    }
}

/// Raw template body, captured once per batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: TemplateSource,
    body: String,
}

impl Template {
    /// Creates a template from an already loaded body
    pub fn new(source: TemplateSource, body: impl Into<String>) -> Self {
        Self {
            source,
            body: body.into(),
        }
    }

    /// Where the body came from
    pub fn source(&self) -> TemplateSource {
        self.source
    }

    /// Raw, unsubstituted body
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Loads templates, delegating rich-message files to a [`MessageStore`]
pub struct TemplateLoader {
    store: Arc<dyn MessageStore>,
}

impl TemplateLoader {
    /// Creates a loader backed by `store`
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Loads the raw body of the template at `path`
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if the path does not exist
    /// - `TemplateUnsupportedFormat` for unknown extensions or non UTF-8 markup
    /// - `TemplateSourceUnavailable` if the message store cannot be reached
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<Template> {
        let path = path.as_ref();

        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(MergeError::TemplateNotFound(path.to_path_buf()));
        }

        let source = TemplateSource::from_path(path)?;
        let body = match source {
            TemplateSource::MarkupFile => read_markup(path).await?,
            TemplateSource::RichMessageFile => self.store.read_html_body(path).await?,
        };

        tracing::info!(
            path = %path.display(),
            source = %source,
            store = self.store.name(),
            bytes = body.len(),
            "Template loaded"
        );

        Ok(Template::new(source, body))
    }
}

async fn read_markup(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    String::from_utf8(bytes).map_err(|e| {
        MergeError::TemplateUnsupportedFormat(format!(
            "{} is not valid UTF-8: {e}",
            path.display()
        ))
    })
}
