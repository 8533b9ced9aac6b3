//! Message store factory
//!
//! This module creates the configured [`MessageStore`] implementation.

use super::disabled::DisabledMessageStore;
use super::mime::MimeMessageStore;
use super::traits::MessageStore;
use crate::config::schema::{MessageStoreBackend, MessageStoreConfig};
use std::sync::Arc;

/// Create a message store based on the configuration
///
/// # Arguments
///
/// * `config` - The message store section of the configuration
///
/// # Returns
///
/// Returns an Arc-wrapped trait object that implements MessageStore
pub fn create_message_store(config: &MessageStoreConfig) -> Arc<dyn MessageStore> {
    match config.backend {
        MessageStoreBackend::Mime => {
            tracing::debug!(sender = ?config.sender, "Creating MIME message store");
            Arc::new(MimeMessageStore::new(config.sender.clone()))
        }
        MessageStoreBackend::Disabled => {
            tracing::warn!("Message store disabled; only markup templates and dry runs will work");
            Arc::new(DisabledMessageStore)
        }
    }
}
