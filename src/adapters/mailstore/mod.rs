//! Message store collaborator
//!
//! This module provides a trait-based abstraction over the store that opens
//! rich-message templates and saves composed drafts, so the batch engine does
//! not depend on a particular mail host.

pub mod disabled;
pub mod factory;
pub mod mime;
pub mod traits;

pub use disabled::DisabledMessageStore;
pub use factory::create_message_store;
pub use mime::MimeMessageStore;
pub use traits::MessageStore;
