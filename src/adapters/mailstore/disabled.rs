//! Message store used when no mail host is available

use super::traits::MessageStore;
use crate::domain::{Draft, MergeError, Result};
use async_trait::async_trait;
use std::path::Path;

/// Message store that rejects every call
///
/// Markup templates still work with this store; rich-message templates fail
/// with `TemplateSourceUnavailable` and every draft write fails with
/// `DraftPersistError`. Dry runs never reach the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledMessageStore;

#[async_trait]
impl MessageStore for DisabledMessageStore {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn read_html_body(&self, path: &Path) -> Result<String> {
        Err(MergeError::TemplateSourceUnavailable(format!(
            "message store is disabled; cannot open {}",
            path.display()
        )))
    }

    async fn save_draft(&self, _draft: &Draft, path: &Path) -> Result<()> {
        Err(MergeError::DraftPersistError {
            path: path.to_path_buf(),
            message: "message store is disabled".to_string(),
        })
    }
}
