//! Tabular parsing: payload kinds and the parser collaborator.

mod cell;
mod delimited;
mod spreadsheet;
mod text;

use std::fmt;
use std::path::Path;

use tol_model::RawRow;

use crate::error::{IngestError, Result};

pub use cell::{any_to_cell, data_to_cell};
pub use delimited::{dataframe_rows, read_delimited};
pub use spreadsheet::{range_rows, read_spreadsheet};
pub use text::decode_text;

/// Maximum payload size (500 MB default).
pub const MAX_PAYLOAD_SIZE: u64 = 500 * 1024 * 1024;

/// How a payload is handed to the parser, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Decoded as text and split on `delimiter`.
    DelimitedText { delimiter: u8 },
    /// Passed through as a workbook byte buffer.
    Spreadsheet,
}

impl PayloadKind {
    /// Picks the payload kind from a file name's extension (case-insensitive).
    ///
    /// `csv` and `txt` are comma-delimited text, `tsv` is tab-delimited text,
    /// and anything else, including no extension, is treated as a spreadsheet.
    pub fn from_file_name(name: &str) -> Self {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv" | "txt") => Self::DelimitedText { delimiter: b',' },
            Some("tsv") => Self::DelimitedText { delimiter: b'\t' },
            _ => Self::Spreadsheet,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::DelimitedText { .. })
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DelimitedText { delimiter: b'\t' } => f.write_str("tab-delimited text"),
            Self::DelimitedText { .. } => f.write_str("delimited text"),
            Self::Spreadsheet => f.write_str("spreadsheet"),
        }
    }
}

/// The tabular parsing collaborator.
///
/// Both entry points read the first sheet/table only and return rows in
/// source order. Readiness is explicit so a parser that loads lazily can
/// refuse uploads until it is available.
pub trait TabularParser {
    /// Returns true once the parser can accept payloads.
    fn is_ready(&self) -> bool {
        true
    }

    /// Parses a delimited text payload.
    fn parse_text(&self, text: &str, delimiter: u8) -> Result<Vec<RawRow>>;

    /// Parses a spreadsheet byte buffer.
    fn parse_buffer(&self, bytes: &[u8]) -> Result<Vec<RawRow>>;
}

/// Default parser: Polars for delimited text, calamine for workbooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookParser;

impl TabularParser for WorkbookParser {
    fn parse_text(&self, text: &str, delimiter: u8) -> Result<Vec<RawRow>> {
        read_delimited(text, delimiter)
    }

    fn parse_buffer(&self, bytes: &[u8]) -> Result<Vec<RawRow>> {
        read_spreadsheet(bytes)
    }
}

/// Checks a payload against the size limit.
pub fn check_payload_size(size: u64, max_size: u64) -> Result<()> {
    if size > max_size {
        return Err(IngestError::PayloadTooLarge { size, max_size });
    }
    Ok(())
}

/// Hands a payload to `parser` according to `kind`.
pub fn parse_payload<P>(parser: &P, kind: PayloadKind, bytes: &[u8]) -> Result<Vec<RawRow>>
where
    P: TabularParser + ?Sized,
{
    match kind {
        PayloadKind::DelimitedText { delimiter } => {
            let text = decode_text(bytes)?;
            parser.parse_text(&text, delimiter)
        }
        PayloadKind::Spreadsheet => parser.parse_buffer(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tol_model::CellValue;

    #[test]
    fn test_payload_kind_from_extension() {
        assert_eq!(
            PayloadKind::from_file_name("owners.csv"),
            PayloadKind::DelimitedText { delimiter: b',' }
        );
        assert_eq!(
            PayloadKind::from_file_name("OWNERS.CSV"),
            PayloadKind::DelimitedText { delimiter: b',' }
        );
        assert_eq!(
            PayloadKind::from_file_name("owners.tsv"),
            PayloadKind::DelimitedText { delimiter: b'\t' }
        );
        assert_eq!(
            PayloadKind::from_file_name("owners.txt"),
            PayloadKind::DelimitedText { delimiter: b',' }
        );
        assert_eq!(
            PayloadKind::from_file_name("owners.xlsx"),
            PayloadKind::Spreadsheet
        );
        assert_eq!(PayloadKind::from_file_name("owners"), PayloadKind::Spreadsheet);
        assert_eq!(
            PayloadKind::from_file_name("owners.csv.xlsx"),
            PayloadKind::Spreadsheet
        );
    }

    #[test]
    fn test_check_payload_size() {
        assert!(check_payload_size(10, 10).is_ok());
        assert!(matches!(
            check_payload_size(11, 10),
            Err(IngestError::PayloadTooLarge {
                size: 11,
                max_size: 10
            })
        ));
    }

    #[test]
    fn test_parse_payload_text_strips_bom() {
        let parser = WorkbookParser;
        let rows = parse_payload(
            &parser,
            PayloadKind::DelimitedText { delimiter: b',' },
            b"\xEF\xBB\xBFSales Level 6,SDR\nWest-1,Alice\n",
        )
        .unwrap();
        assert_eq!(rows[0].get("Sales Level 6"), Some(&CellValue::from("West-1")));
    }
}
