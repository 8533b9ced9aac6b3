//! Message store abstraction
//!
//! The message store is the external collaborator that opens rich-message
//! templates and materializes drafts as native message files.

use crate::domain::{Draft, Result};
use async_trait::async_trait;
use std::path::Path;

/// Message store trait
///
/// Implementations are not assumed safe for concurrent use; the batch
/// controller calls them strictly sequentially.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &str;

    /// Opens a stored message and returns its HTML body
    ///
    /// # Errors
    ///
    /// Returns `TemplateSourceUnavailable` if the store cannot be reached and
    /// `TemplateUnsupportedFormat` if the file holds no HTML body.
    async fn read_html_body(&self, path: &Path) -> Result<String>;

    /// Materializes a draft as a message file at `path`, replacing any
    /// existing file
    ///
    /// # Errors
    ///
    /// Returns `DraftPersistError` if the message cannot be built or written.
    async fn save_draft(&self, draft: &Draft, path: &Path) -> Result<()>;
}
