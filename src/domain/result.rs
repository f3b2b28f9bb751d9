//! Result type alias for sfvault
//!
//! This module provides a convenient Result type alias that uses SfVaultError
//! as the error type.

use super::errors::SfVaultError;

/// Result type alias for sfvault operations
///
/// # Examples
///
/// ```
/// use sfvault::domain::result::Result;
/// use sfvault::domain::errors::SfVaultError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(SfVaultError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, SfVaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(SfVaultError::Validation("test error".to_string()));
        assert!(result.is_err());
    }
}
