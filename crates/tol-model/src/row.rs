//! Raw rows as handed over by a tabular parser.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// One input row: source headers paired with their cell values.
///
/// Headers are kept exactly as the parser saw them and in source column
/// order. Nothing about their naming is assumed at this boundary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Appends a header/value pair.
    pub fn push(&mut self, header: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.push((header.into(), value.into()));
    }

    /// Looks up the first cell whose header equals `header` exactly.
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value)
    }

    /// Iterates header/value pairs in source column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells
            .iter()
            .map(|(header, value)| (header.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true if every cell in the row is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.is_blank())
    }
}

impl<H, V> FromIterator<(H, V)> for RawRow
where
    H: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (H, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(header, value)| (header.into(), value.into()))
                .collect(),
        }
    }
}
