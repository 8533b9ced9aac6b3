//! Result type alias for mailmerge

use super::errors::MergeError;

/// Result type alias for mailmerge operations
///
/// # Examples
///
/// ```
/// use mailmerge::domain::result::Result;
/// use mailmerge::domain::errors::MergeError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MergeError::DatasetFormatError("empty header".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MergeError>;
