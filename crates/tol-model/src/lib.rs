//! Data model for territory owner lookup.
//!
//! Rows enter as [`RawRow`]s with whatever headers the source file had, are
//! projected onto [`CanonicalRecord`]s, and leave as [`QueryResult`]s.

pub mod cell;
pub mod outcome;
pub mod query;
pub mod record;
pub mod row;

pub use cell::CellValue;
pub use outcome::{IngestFailure, IngestionOutcome};
pub use query::QueryResult;
pub use record::{CanonicalRecord, CanonicalRecordSet, FieldTag};
pub use row::RawRow;
