//! Configuration management for mailmerge.
//!
//! mailmerge reads an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MAILMERGE_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation per section
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run switch
//! - [`MergePathsConfig`] - Template, dataset and destination paths
//! - [`MessageStoreConfig`] - Message store backend and sender
//! - [`LoggingConfig`] - File logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [merge]
//! template_path = "templates/turnover.html"
//! dataset_path = "data/brokers.xlsx"
//! destination_path = "${HOME}/drafts"
//!
//! [message_store]
//! backend = "mime"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mailmerge::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("mailmerge.toml")?;
//! let request = config.request()?;
//! println!("Writing drafts to {}", request.destination.display());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, LoggingConfig, MergeConfig, MergePathsConfig, MergeRequest,
    MessageStoreBackend, MessageStoreConfig,
};
