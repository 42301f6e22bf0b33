//! Delimited text reading through the Polars CSV reader.

use std::io::Cursor;

use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, SerReader};
use tol_model::RawRow;

use crate::error::Result;

use super::cell::any_to_cell;

/// Reads delimited text with a single header row into raw rows.
///
/// Every column is read as text, so keys such as `00123` keep their exact
/// spelling and a late non-numeric value cannot fail the read. Empty fields
/// become blanks. Ragged lines are truncated to the header width. Empty or
/// whitespace-only text yields no rows.
pub fn read_delimited(text: &str, delimiter: u8) -> Result<Vec<RawRow>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|options| {
            options
                .with_separator(delimiter)
                .with_truncate_ragged_lines(true)
        })
        .into_reader_with_file_handle(Cursor::new(text.as_bytes().to_vec()))
        .finish()?;

    if df.width() > 500 {
        tracing::warn!(
            columns = df.width(),
            "Dataset has more than 500 columns - may impact performance"
        );
    }

    Ok(dataframe_rows(&df))
}

/// Converts every DataFrame row into a [`RawRow`], skipping fully blank rows.
pub fn dataframe_rows(df: &DataFrame) -> Vec<RawRow> {
    let columns = df.get_columns();
    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut row = RawRow::with_capacity(columns.len());
        for column in columns {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            row.push(column.name().as_str(), any_to_cell(value));
        }
        if !row.is_blank() {
            rows.push(row);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use tol_model::CellValue;

    #[test]
    fn test_reads_header_and_rows() {
        let rows = read_delimited("Sales Level 6,SDR Name\nWest-1,Alice\nEast-9,Carol\n", b',')
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Sales Level 6"), Some(&CellValue::from("West-1")));
        assert_eq!(rows[1].get("SDR Name"), Some(&CellValue::from("Carol")));
    }

    #[test]
    fn test_numeric_looking_keys_stay_text() {
        let rows = read_delimited(
            "Sales Level 6,SDR,Headcount\n00123,Dana,3\n9007199254740993,Eve,4\n",
            b',',
        )
        .unwrap();
        assert_eq!(rows[0].get("Sales Level 6"), Some(&CellValue::from("00123")));
        assert_eq!(rows[0].get("Headcount"), Some(&CellValue::from("3")));
        assert_eq!(
            rows[1].get("Sales Level 6"),
            Some(&CellValue::from("9007199254740993"))
        );
    }

    #[test]
    fn test_late_text_after_numeric_keys() {
        let mut text = String::from("Sales Level 6,SDR\n");
        for key in 1000..1150 {
            text.push_str(&format!("{key},Owner{key}\n"));
        }
        text.push_str("West-1,Alice\n");

        let rows = read_delimited(&text, b',').unwrap();
        assert_eq!(rows.len(), 151);
        assert_eq!(rows[0].get("Sales Level 6"), Some(&CellValue::from("1000")));
        assert_eq!(rows[150].get("Sales Level 6"), Some(&CellValue::from("West-1")));
    }

    #[test]
    fn test_tab_delimiter() {
        let rows = read_delimited("Sales Level 6\tSDR\nWest-1\tAlice\n", b'\t').unwrap();
        assert_eq!(rows[0].get("SDR"), Some(&CellValue::from("Alice")));
    }

    #[test]
    fn test_quoted_fields() {
        let rows = read_delimited(
            "Sales Level 6,SDR\n\"West, Coast-1\",\"O'Brien\"\n",
            b',',
        )
        .unwrap();
        assert_eq!(
            rows[0].get("Sales Level 6"),
            Some(&CellValue::from("West, Coast-1"))
        );
    }

    #[test]
    fn test_missing_cells_are_blank() {
        let rows = read_delimited("Sales Level 6,SDR\nWest-1,\n", b',').unwrap();
        assert_eq!(rows[0].get("SDR"), Some(&CellValue::Blank));
    }

    #[test]
    fn test_empty_text_has_no_rows() {
        assert!(read_delimited("", b',').unwrap().is_empty());
        assert!(read_delimited("  \n", b',').unwrap().is_empty());
    }

    #[test]
    fn test_header_only_has_no_rows() {
        assert!(read_delimited("Sales Level 6,SDR\n", b',').unwrap().is_empty());
    }
}
