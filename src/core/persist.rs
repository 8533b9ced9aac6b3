//! Draft persistence
//!
//! Ensures the destination directory exists and hands each draft to the
//! [`MessageStore`] under a file named from its untruncated subject. Two
//! drafts with the same subject map to the same file; the later write
//! replaces the earlier one.

use crate::adapters::mailstore::MessageStore;
use crate::domain::{Draft, MergeError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extension of saved draft files
pub const DRAFT_EXTENSION: &str = "msg";

/// Characters replaced with `_` when a subject becomes a file name
const INVALID_FILE_NAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Creates the destination directory if it is absent
///
/// Calling this on an existing directory is a no-op.
///
/// # Errors
///
/// Returns `DestinationUnwritable` if the path exists but is not a directory,
/// or the directory cannot be created.
pub async fn ensure_destination(path: &Path) -> Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => {
            tracing::debug!(path = %path.display(), "Destination already exists");
            Ok(())
        }
        Ok(_) => Err(MergeError::DestinationUnwritable(format!(
            "{} exists and is not a directory",
            path.display()
        ))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tokio::fs::create_dir_all(path).await.map_err(|e| {
                MergeError::DestinationUnwritable(format!(
                    "failed to create {}: {e}",
                    path.display()
                ))
            })?;
            tracing::info!(path = %path.display(), "Created destination directory");
            Ok(())
        }
        Err(e) => Err(MergeError::DestinationUnwritable(format!(
            "cannot access {}: {e}",
            path.display()
        ))),
    }
}

/// File name for a draft: `"<untruncated subject>.msg"`
///
/// Path separators and other characters that are invalid in file names are
/// replaced with `_`.
pub fn draft_file_name(draft: &Draft) -> String {
    let stem: String = draft
        .file_subject()
        .chars()
        .map(|c| {
            if c.is_control() || INVALID_FILE_NAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("{stem}.{DRAFT_EXTENSION}")
}

/// Writes drafts through a [`MessageStore`]
pub struct DraftWriter {
    store: Arc<dyn MessageStore>,
    dry_run: bool,
}

impl DraftWriter {
    /// Creates a writer; in dry-run mode drafts are never handed to the store
    pub fn new(store: Arc<dyn MessageStore>, dry_run: bool) -> Self {
        Self { store, dry_run }
    }

    /// Persists `draft` into `destination` and returns the file path
    ///
    /// The draft is consumed; it is discarded once written.
    ///
    /// # Errors
    ///
    /// Returns `DraftPersistError` if the message store fails.
    pub async fn write(&self, draft: Draft, destination: &Path) -> Result<PathBuf> {
        let path = destination.join(draft_file_name(&draft));

        if self.dry_run {
            tracing::info!(
                path = %path.display(),
                to = %draft.to_field(),
                cc = %draft.cc_field(),
                "Dry run: draft not saved"
            );
            return Ok(path);
        }

        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::warn!(path = %path.display(), "Overwriting existing draft with the same subject");
        }

        self.store.save_draft(&draft, &path).await?;

        tracing::debug!(
            path = %path.display(),
            subject = %draft.subject(),
            to = %draft.to_field(),
            cc = %draft.cc_field(),
            "Draft saved"
        );

        Ok(path)
    }
}
