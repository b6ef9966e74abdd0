//! Error types for reading MARC files and writing completeness reports.
//!
//! This module provides the [`MarcError`] type for all library operations
//! and the [`Result`] convenience type.
//!
//! Scoring itself never fails: missing or malformed fields degrade to rule
//! defaults. Errors only come from decoding the binary record stream or from
//! writing the summary table.

use thiserror::Error;

/// Error type for all library operations.
#[derive(Error, Debug)]
pub enum MarcError {
    /// Error indicating an invalid or malformed MARC record.
    #[error("Invalid MARC record: {0}")]
    InvalidRecord(String),

    /// Error indicating an invalid leader (24-byte header).
    #[error("Invalid leader: {0}")]
    InvalidLeader(String),

    /// Error indicating an invalid field structure.
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// Error indicating a truncated or incomplete record.
    #[error("Truncated record: {0}")]
    TruncatedRecord(String),

    /// A record could not be decoded; carries the 1-based position in the file.
    #[error("Record {index} in {file}: {source}")]
    RecordAt {
        /// Position of the failing record within its file, starting at 1.
        index: usize,
        /// File the record was read from.
        file: String,
        /// Underlying decoding error.
        #[source]
        source: Box<MarcError>,
    },

    /// Failure while writing the CSV report.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Failure while writing the JSON report.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`MarcError`].
pub type Result<T> = std::result::Result<T, MarcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_at_wraps_source() {
        let err = MarcError::RecordAt {
            index: 3,
            file: "batch.mrc".to_string(),
            source: Box::new(MarcError::TruncatedRecord("short read".to_string())),
        };
        let msg = err.to_string();
        assert!(msg.contains("Record 3 in batch.mrc"));
        assert!(msg.contains("short read"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: MarcError = io.into();
        assert!(matches!(err, MarcError::IoError(_)));
    }
}
