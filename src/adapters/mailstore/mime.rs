//! RFC 5322 message store
//!
//! Drafts are written as MIME messages carrying To, Cc, Subject and an HTML
//! body, flagged with `X-Unsent: 1` so desktop mail clients open them as
//! editable drafts. Rich-message templates are read back with mail-parser.

use super::traits::MessageStore;
use crate::domain::{Draft, MergeError, Result};
use async_trait::async_trait;
use mail_builder::headers::raw::Raw;
use mail_builder::MessageBuilder;
use mail_parser::{MessageParser, PartType};
use std::path::Path;

/// Message store writing and reading MIME message files
#[derive(Debug, Clone, Default)]
pub struct MimeMessageStore {
    sender: Option<String>,
}

impl MimeMessageStore {
    /// Creates a store; `sender` becomes the From header when set
    pub fn new(sender: Option<String>) -> Self {
        Self { sender }
    }

    /// Serializes a draft to RFC 5322 bytes
    pub fn build_message(&self, draft: &Draft) -> std::io::Result<Vec<u8>> {
        let mut builder = MessageBuilder::new()
            .header("X-Unsent", Raw::new("1"))
            .subject(draft.subject())
            .html_body(draft.body());

        if let Some(sender) = &self.sender {
            builder = builder.from(sender.as_str());
        }
        if !draft.to().is_empty() {
            builder = builder.to(draft.to().iter().map(String::as_str).collect::<Vec<_>>());
        }
        if !draft.cc().is_empty() {
            builder = builder.cc(draft.cc().iter().map(String::as_str).collect::<Vec<_>>());
        }

        builder.write_to_vec()
    }
}

#[async_trait]
impl MessageStore for MimeMessageStore {
    fn name(&self) -> &str {
        "mime"
    }

    async fn read_html_body(&self, path: &Path) -> Result<String> {
        let raw = tokio::fs::read(path).await.map_err(|e| {
            MergeError::TemplateSourceUnavailable(format!(
                "unable to open message {}: {e}",
                path.display()
            ))
        })?;

        let message = MessageParser::default().parse(raw.as_slice()).ok_or_else(|| {
            MergeError::TemplateUnsupportedFormat(format!(
                "{} could not be parsed as a message",
                path.display()
            ))
        })?;

        message
            .parts
            .iter()
            .find_map(|part| match &part.body {
                PartType::Html(html) => Some(html.to_string()),
                _ => None,
            })
            .ok_or_else(|| {
                MergeError::TemplateUnsupportedFormat(format!(
                    "message {} has no HTML body",
                    path.display()
                ))
            })
    }

    async fn save_draft(&self, draft: &Draft, path: &Path) -> Result<()> {
        let persist_error = |message: String| MergeError::DraftPersistError {
            path: path.to_path_buf(),
            message,
        };

        let bytes = self
            .build_message(draft)
            .map_err(|e| persist_error(format!("failed to build message: {e}")))?;

        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| persist_error(format!("failed to write message: {e}")))
    }
}
