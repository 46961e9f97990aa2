//! Filter error types

use thiserror::Error;

/// Errors raised when building selection inputs
///
/// Filtering itself never fails: a selection matching no rows yields an
/// empty summary table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Payload bounds are not finite or are reversed
    #[error("Invalid payload range: {0}")]
    InvalidRange(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
