//! External collaborators for mailmerge.
//!
//! - [`dataset`] - Recipient workbook reader
//! - [`mailstore`] - Message store that reads rich templates and saves drafts
//!
//! # Design Pattern
//!
//! The message store sits behind the [`mailstore::MessageStore`] trait so the
//! batch pipeline can run against the MIME file store, a disabled store, or a
//! test double. [`mailstore::create_message_store`] picks the implementation
//! from configuration.
//!
//! ```rust,no_run
//! use mailmerge::adapters::mailstore::create_message_store;
//! use mailmerge::config::MessageStoreConfig;
//!
//! let store = create_message_store(&MessageStoreConfig::default());
//! println!("Using {} store", store.name());
//! ```

pub mod dataset;
pub mod mailstore;
