// Mailmerge - Batch Email Draft Generator
// Copyright (c) 2025 Mailmerge Contributors
// Licensed under the MIT License

//! # Mailmerge - Batch Email Draft Generator
//!
//! Mailmerge generates one personalized email draft per row of a recipient
//! workbook from a single template, and saves each draft to a destination
//! directory.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Loading** a template body from an HTML file or a stored message
//! - **Reading** recipient rows from an `.xlsx` workbook
//! - **Substituting** `[COLUMN]` tokens with each row's values
//! - **Composing** drafts with subject and recipients taken from the row
//! - **Persisting** drafts through a pluggable message store
//! - **Running** the whole batch on a background task with progress reporting
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Merge pipeline (template, substitution, composition, persistence, batch)
//! - [`adapters`] - External collaborators (dataset reader, message store)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mailmerge::adapters::mailstore::create_message_store;
//! use mailmerge::config::load_config;
//! use mailmerge::core::batch::{BatchController, BatchOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("mailmerge.toml")?;
//!     let store = create_message_store(&config.message_store);
//!
//!     let handle = BatchController::new(config.request()?, store, BatchOptions::default()).start();
//!     let mut progress = handle.progress();
//!     tokio::spawn(async move {
//!         while progress.changed().await.is_ok() {
//!             println!("{}%", progress.borrow_and_update().percent);
//!         }
//!     });
//!
//!     let summary = handle.outcome().await?;
//!     println!("Wrote {} drafts", summary.drafts_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Substitution
//!
//! Every `[COLUMN]` token naming a dataset column is replaced in one pass.
//! Unknown tokens are left as they are and substituted values are never
//! scanned again:
//!
//! ```rust
//! use mailmerge::core::substitute::render;
//! use mailmerge::domain::Row;
//!
//! let row = Row::new(1).with("NAME", "Alice").with("NOTE", "[NAME]");
//! assert_eq!(render("Dear [NAME] [NOTE] [REF]", &row).unwrap(), "Dear Alice [NAME] [REF]");
//! ```
//!
//! ## Error Handling
//!
//! Every failure is a [`domain::MergeError`]. The first failing row aborts
//! the batch; drafts written before it stay on disk.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
