//! Error types for tabular parsing.

use thiserror::Error;

/// Errors raised while turning a payload into raw rows.
///
/// These stay inside the parser; the pipeline collapses all of them into a
/// single parse failure for the attempt.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Payload Errors ===
    /// Payload exceeds the configured size limit.
    #[error("payload is {size} bytes, larger than the {max_size} byte limit")]
    PayloadTooLarge { size: u64, max_size: u64 },

    /// Text payload uses an encoding we do not decode.
    #[error("unsupported text encoding: {encoding}")]
    UnsupportedEncoding { encoding: &'static str },

    /// The file could not be read before parsing.
    #[error("failed to read {file}: {message}")]
    Read { file: String, message: String },

    // === Delimited Text Errors ===
    /// Polars rejected the delimited text.
    #[error("failed to parse delimited text: {message}")]
    DelimitedParse { message: String },

    // === Spreadsheet Errors ===
    /// The workbook could not be opened or a sheet could not be read.
    #[error("failed to read spreadsheet: {message}")]
    Spreadsheet { message: String },

    /// The workbook has no sheets.
    #[error("workbook contains no worksheets")]
    NoWorksheet,
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DelimitedParse {
            message: err.to_string(),
        }
    }
}

impl From<calamine::Error> for IngestError {
    fn from(err: calamine::Error) -> Self {
        Self::Spreadsheet {
            message: err.to_string(),
        }
    }
}

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::PayloadTooLarge {
            size: 2048,
            max_size: 1024,
        };
        assert_eq!(
            err.to_string(),
            "payload is 2048 bytes, larger than the 1024 byte limit"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::NoData("empty CSV".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DelimitedParse { .. }));
    }
}
