//! Result type alias
//!
//! This module provides a convenient Result type alias that uses GranthaError
//! as the error type.

use super::errors::GranthaError;

/// Result type alias for export operations
///
/// # Examples
///
/// ```
/// use grantha_export::domain::result::Result;
/// use grantha_export::domain::errors::GranthaError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(GranthaError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, GranthaError>;
