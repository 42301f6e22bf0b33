//! Spreadsheet reading through calamine.

use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use tol_model::RawRow;

use crate::error::{IngestError, Result};

use super::cell::data_to_cell;

/// Reads the first worksheet of a workbook buffer into raw rows.
///
/// The workbook format (xlsx, xlsm, xlsb, xls, ods) is detected from the
/// buffer itself.
pub fn read_spreadsheet(bytes: &[u8]) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)??;
    Ok(range_rows(&range))
}

/// Converts a sheet range into raw rows.
///
/// The first row supplies the headers. Header cells that are empty get a
/// positional name (`column_1`, `column_2`, ...). Fully blank rows are skipped.
pub fn range_rows(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let name = cell.to_string();
            if name.trim().is_empty() {
                format!("column_{}", idx + 1)
            } else {
                name
            }
        })
        .collect();

    let mut out = Vec::new();
    for cells in rows {
        let row: RawRow = headers
            .iter()
            .zip(cells.iter())
            .map(|(header, cell)| (header.as_str(), data_to_cell(cell)))
            .collect();
        if !row.is_blank() {
            out.push(row);
        }
    }
    out
}
