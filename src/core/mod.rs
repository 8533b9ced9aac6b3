//! Core business logic for mailmerge.
//!
//! This module contains the merge pipeline and its orchestration.
//!
//! # Modules
//!
//! - [`template`] - Template loading from markup or rich-message files
//! - [`substitute`] - `[COLUMN]` token substitution
//! - [`compose`] - Draft composition (subject, recipients, body)
//! - [`persist`] - Destination handling and draft writing
//! - [`batch`] - Batch controller, progress and summary
//!
//! # Merge Workflow
//!
//! 1. **Load Template**: Read the raw body once per batch
//! 2. **Load Dataset**: Read the recipient workbook into rows
//! 3. **Prepare Destination**: Create the output directory if needed
//! 4. **Per Row**: Render the body, compose the draft, write it, advance progress
//! 5. **Report**: Return a batch summary, or the first failure
//!
//! # Example
//!
//! ```rust,no_run
//! use mailmerge::adapters::mailstore::MimeMessageStore;
//! use mailmerge::config::MergeRequest;
//! use mailmerge::core::batch::{BatchController, BatchOptions};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = MergeRequest::new("template.html", "brokers.xlsx", "drafts");
//! let store = Arc::new(MimeMessageStore::default());
//!
//! let handle = BatchController::new(request, store, BatchOptions::default()).start();
//! let summary = handle.outcome().await?;
//!
//! println!("Drafts written: {}", summary.drafts_written);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod compose;
pub mod persist;
pub mod substitute;
pub mod template;
