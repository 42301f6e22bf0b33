//! Result of a single upload attempt.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::CanonicalRecordSet;

/// Why an upload attempt produced no record set.
///
/// Every failure is terminal for its attempt. The presentation layer maps each
/// variant onto one message category; nothing here formats user text beyond
/// the `Display` impl used for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IngestFailure {
    /// Informational: the upload was triggered without a file.
    #[error("no file selected")]
    NoFileSelected,

    /// The tabular parser has not reported ready yet.
    #[error("tabular parser is not ready")]
    ParserNotReady,

    /// The file could not be read or parsed.
    #[error("failed to parse file: {message}")]
    ParseError { message: String },

    /// The file parsed but no row had both a territory key and an owner.
    #[error("no rows with both a territory key and an owner name")]
    NoValidRows,
}

impl IngestFailure {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }
}

/// Outcome of one ingestion attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestionOutcome {
    Success {
        records: CanonicalRecordSet,
        record_count: usize,
    },
    Failure {
        reason: IngestFailure,
    },
}

impl IngestionOutcome {
    pub fn success(records: CanonicalRecordSet) -> Self {
        let record_count = records.len();
        Self::Success {
            records,
            record_count,
        }
    }

    pub fn failure(reason: IngestFailure) -> Self {
        Self::Failure { reason }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Number of canonical records, zero on failure.
    pub fn record_count(&self) -> usize {
        match self {
            Self::Success { record_count, .. } => *record_count,
            Self::Failure { .. } => 0,
        }
    }

    pub fn failure_reason(&self) -> Option<&IngestFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason } => Some(reason),
        }
    }
}

impl From<IngestFailure> for IngestionOutcome {
    fn from(reason: IngestFailure) -> Self {
        Self::failure(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CanonicalRecord;

    #[test]
    fn test_failure_display() {
        let err = IngestFailure::parse("unexpected end of file");
        assert_eq!(
            err.to_string(),
            "failed to parse file: unexpected end of file"
        );
        assert_eq!(
            IngestFailure::NoValidRows.to_string(),
            "no rows with both a territory key and an owner name"
        );
    }

    #[test]
    fn test_success_counts_records() {
        let records: CanonicalRecordSet = vec![
            CanonicalRecord::new("West-1", "Alice"),
            CanonicalRecord::new("East-9", "Carol"),
        ]
        .into();
        let outcome = IngestionOutcome::success(records);
        assert!(outcome.is_success());
        assert_eq!(outcome.record_count(), 2);
        assert!(outcome.failure_reason().is_none());
    }
}
