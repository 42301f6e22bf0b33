//! Conversions from parser-native cell types into [`CellValue`].

use calamine::Data;
use polars::prelude::AnyValue;
use tol_model::CellValue;

/// Converts a Polars value into a cell. Nulls become blanks.
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Blank,
        AnyValue::Boolean(b) => CellValue::Bool(b),
        AnyValue::Int8(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int16(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int64(v) => CellValue::from(v),
        AnyValue::UInt8(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => CellValue::from(v),
        AnyValue::Float32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Float64(v) => CellValue::Number(v),
        AnyValue::String(s) => CellValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => CellValue::Text(s.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

/// Converts a spreadsheet cell. Dates and error cells keep their display form,
/// and integers too large for an exact `f64` keep their digits as text.
pub fn data_to_cell(value: &Data) -> CellValue {
    match value {
        Data::Empty => CellValue::Blank,
        Data::Int(v) => CellValue::from(*v),
        Data::Float(v) => CellValue::Number(*v),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_cell() {
        assert_eq!(any_to_cell(AnyValue::Null), CellValue::Blank);
        assert_eq!(any_to_cell(AnyValue::Int64(12)), CellValue::Number(12.0));
        assert_eq!(
            any_to_cell(AnyValue::UInt64(9_007_199_254_740_993)),
            CellValue::from("9007199254740993")
        );
        assert_eq!(any_to_cell(AnyValue::Float64(1.5)), CellValue::Number(1.5));
        assert_eq!(any_to_cell(AnyValue::Boolean(true)), CellValue::Bool(true));
        assert_eq!(
            any_to_cell(AnyValue::String("West-1")),
            CellValue::Text("West-1".to_string())
        );
    }

    #[test]
    fn test_data_to_cell() {
        assert_eq!(data_to_cell(&Data::Empty), CellValue::Blank);
        assert_eq!(data_to_cell(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(
            data_to_cell(&Data::Int(9_007_199_254_740_993)),
            CellValue::from("9007199254740993")
        );
        assert_eq!(data_to_cell(&Data::Float(0.25)), CellValue::Number(0.25));
        assert_eq!(data_to_cell(&Data::Bool(false)), CellValue::Bool(false));
        assert_eq!(
            data_to_cell(&Data::String("Alice".to_string())),
            CellValue::Text("Alice".to_string())
        );
        assert_eq!(
            data_to_cell(&Data::DateTimeIso("2024-01-15".to_string())),
            CellValue::Text("2024-01-15".to_string())
        );
    }
}
