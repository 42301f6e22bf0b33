//! Projection of raw rows onto canonical records.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tol_model::{CanonicalRecord, CanonicalRecordSet, CellValue, FieldTag, RawRow};

use crate::header::normalize_header;

/// Aggregate statistics about one projection.
///
/// Diagnostic only: missing columns and empty input both still end up as an
/// empty record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionStats {
    /// Number of input rows.
    pub rows_seen: usize,
    /// Rows missing a territory key or an owner name.
    pub rows_dropped: usize,
    /// Source headers that mapped onto the territory key.
    pub territory_headers: BTreeSet<String>,
    /// Source headers that mapped onto the owner name.
    pub owner_headers: BTreeSet<String>,
}

impl ProjectionStats {
    /// Returns true if both required columns were present in the input.
    pub fn has_required_headers(&self) -> bool {
        !self.territory_headers.is_empty() && !self.owner_headers.is_empty()
    }
}

/// Canonical records plus statistics about how they were produced.
#[derive(Debug, Clone, Default)]
pub struct ProjectionReport {
    pub records: CanonicalRecordSet,
    pub stats: ProjectionStats,
}

/// Projects rows onto canonical records, keeping input order.
pub fn project_records<'a, I>(rows: I) -> CanonicalRecordSet
where
    I: IntoIterator<Item = &'a RawRow>,
{
    project_rows(rows).records
}

/// Projects rows onto canonical records and reports what happened.
///
/// Rows without a truthy territory key and owner name are dropped silently.
/// When several headers in a row map to the same canonical field, the
/// rightmost one wins.
pub fn project_rows<'a, I>(rows: I) -> ProjectionReport
where
    I: IntoIterator<Item = &'a RawRow>,
{
    let mut stats = ProjectionStats::default();
    let mut records = Vec::new();

    for row in rows {
        stats.rows_seen += 1;
        let mut territory: Option<&CellValue> = None;
        let mut owner: Option<&CellValue> = None;
        let mut passthrough = BTreeMap::new();

        for (header, value) in row.iter() {
            let matched = normalize_header(header);
            match matched.tag {
                Some(FieldTag::TerritoryKey) => {
                    stats.territory_headers.insert(header.trim().to_string());
                    territory = Some(value);
                }
                Some(FieldTag::OwnerName) => {
                    stats.owner_headers.insert(header.trim().to_string());
                    owner = Some(value);
                }
                None => {
                    passthrough.insert(matched.key, value.clone());
                }
            }
        }

        match (territory, owner) {
            (Some(territory), Some(owner)) if territory.is_truthy() && owner.is_truthy() => {
                records.push(CanonicalRecord {
                    territory_key: territory.to_text(),
                    owner_name: owner.to_text(),
                    passthrough,
                });
            }
            _ => stats.rows_dropped += 1,
        }
    }

    let records = CanonicalRecordSet::new(records);
    tracing::debug!(
        rows = stats.rows_seen,
        kept = records.len(),
        dropped = stats.rows_dropped,
        "projected rows onto canonical records"
    );
    ProjectionReport { records, stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, CellValue)]) -> RawRow {
        pairs
            .iter()
            .map(|(header, value)| (*header, value.clone()))
            .collect()
    }

    fn text(value: &str) -> CellValue {
        CellValue::from(value)
    }

    #[test]
    fn test_projects_required_fields_and_passthrough() {
        let rows = vec![row(&[
            ("Sales Level 6", text("West-1")),
            ("SDR Name", text("Alice")),
            (" Region ", text("West")),
        ])];
        let report = project_rows(&rows);
        assert_eq!(report.records.len(), 1);
        let record = &report.records.records()[0];
        assert_eq!(record.territory_key, "West-1");
        assert_eq!(record.owner_name, "Alice");
        assert_eq!(record.passthrough.get("region"), Some(&text("West")));
        assert!(report.stats.has_required_headers());
    }

    #[test]
    fn test_drops_rows_missing_required_values() {
        let rows = vec![
            row(&[("Sales Level 6", text("West-1")), ("SDR", text(""))]),
            row(&[("Sales Level 6", CellValue::Blank), ("SDR", text("Bob"))]),
            row(&[("Sales Level 6", text("East-9"))]),
            row(&[("Sales Level 6", text("East-9")), ("SDR", text("Carol"))]),
        ];
        let report = project_rows(&rows);
        assert_eq!(report.stats.rows_seen, 4);
        assert_eq!(report.stats.rows_dropped, 3);
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn test_coerces_numbers_to_text() {
        let rows = vec![row(&[
            ("Sales Level 6", CellValue::from(4021_i64)),
            ("SDR", text("Dana")),
        ])];
        let records = project_records(&rows);
        assert_eq!(records.records()[0].territory_key, "4021");
    }

    #[test]
    fn test_zero_is_falsy() {
        let rows = vec![row(&[
            ("Sales Level 6", CellValue::from(0.0)),
            ("SDR", text("Dana")),
        ])];
        assert!(project_records(&rows).is_empty());
    }

    #[test]
    fn test_preserves_casing() {
        let rows = vec![row(&[
            ("sales level 6", text("NoRtH-2")),
            ("sdr", text("McDonald")),
        ])];
        let records = project_records(&rows);
        assert_eq!(records.records()[0].territory_key, "NoRtH-2");
        assert_eq!(records.records()[0].owner_name, "McDonald");
    }

    #[test]
    fn test_rightmost_duplicate_header_wins() {
        let rows = vec![row(&[
            ("SDR", text("Alice")),
            ("Sales Level 6", text("West-1")),
            ("SDR Backup", text("Bob")),
        ])];
        let records = project_records(&rows);
        assert_eq!(records.records()[0].owner_name, "Bob");
    }

    #[test]
    fn test_unmatched_headers_yield_nothing() {
        let rows = vec![row(&[("Region", text("West-1")), ("Owner", text("Alice"))])];
        let report = project_rows(&rows);
        assert!(report.records.is_empty());
        assert!(!report.stats.has_required_headers());
        assert_eq!(report.stats.rows_dropped, 1);
    }

    #[test]
    fn test_preserves_input_order() {
        let rows = vec![
            row(&[("Sales Level 6", text("B")), ("SDR", text("2"))]),
            row(&[("Sales Level 6", text("A")), ("SDR", text("1"))]),
            row(&[("Sales Level 6", text("C")), ("SDR", text("3"))]),
        ];
        let keys: Vec<String> = project_records(&rows)
            .iter()
            .map(|record| record.territory_key.clone())
            .collect();
        assert_eq!(keys, vec!["B", "A", "C"]);
    }
}
