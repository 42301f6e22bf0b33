//! Scalar cell values as produced by the tabular parsers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell from a source table.
///
/// Parsers only ever produce these four shapes. Spreadsheet-specific values
/// such as dates or error cells arrive as [`CellValue::Text`] in their display
/// form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    #[default]
    Blank,
}

impl CellValue {
    /// Returns true if the cell carries a usable value.
    ///
    /// Blank cells, empty strings, `0`, `NaN` and `false` are all falsy.
    /// Whitespace-only text counts as present, matching the way the source
    /// spreadsheet tools treat it.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::Bool(flag) => *flag,
            Self::Blank => false,
        }
    }

    /// Returns true for [`CellValue::Blank`].
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Coerces the cell to its string form, preserving text casing.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => write!(f, "{value}"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Blank => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Largest magnitude at which every integer has an exact `f64`.
const MAX_EXACT_INTEGER: u64 = 1 << 53;

/// Integers beyond the exact `f64` range are kept as their decimal text.
impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        if value.unsigned_abs() <= MAX_EXACT_INTEGER {
            Self::Number(value as f64)
        } else {
            Self::Text(value.to_string())
        }
    }
}

/// Integers beyond the exact `f64` range are kept as their decimal text.
impl From<u64> for CellValue {
    fn from(value: u64) -> Self {
        if value <= MAX_EXACT_INTEGER {
            Self::Number(value as f64)
        } else {
            Self::Text(value.to_string())
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
