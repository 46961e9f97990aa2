//! Dataset error types
//!
//! Every error here is fatal at startup: the dashboard never serves a
//! partially loaded dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the launch dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// I/O operation failed
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Header row lacks a required column
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A data row failed validation
    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    /// A record carries a payload mass that is negative or not finite
    #[error("Invalid payload mass for {site}: {value}")]
    InvalidPayload { site: String, value: f64 },

    /// The file has a header but no data rows
    #[error("Dataset contains no launch records")]
    Empty,
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DatasetError::MissingColumn("Launch Site".to_string());
        assert_eq!(err.to_string(), "Missing required column: Launch Site");

        let err = DatasetError::InvalidRecord {
            line: 4,
            reason: "class must be 0 or 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid record on line 4: class must be 0 or 1"
        );

        assert_eq!(
            DatasetError::Empty.to_string(),
            "Dataset contains no launch records"
        );
    }
}
