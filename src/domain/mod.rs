//! Domain models and types for mailmerge.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Rows** ([`Row`]) read from the recipient dataset
//! - **Drafts** ([`Draft`]) composed per row
//! - **Error types** ([`MergeError`], [`ErrorKind`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, MergeError>`]:
//!
//! ```rust
//! use mailmerge::domain::{MergeError, Result, Row};
//!
//! fn company(row: &Row) -> Result<&str> {
//!     row.require("COMPANY_NAME")
//! }
//!
//! let row = Row::new(1);
//! assert!(matches!(
//!     company(&row),
//!     Err(MergeError::RowMissingRequiredField { .. })
//! ));
//! ```

pub mod draft;
pub mod errors;
pub mod result;
pub mod row;

// Re-export commonly used types for convenience
pub use draft::{BodyFormat, Draft};
pub use errors::{ErrorKind, MergeError};
pub use result::Result;
pub use row::{Row, COMPANY_NAME, EMAIL_CC, EMAIL_TO, REQUIRED_COLUMNS};
