//! Canonical records produced by header normalization.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// Canonical field a source header can be mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldTag {
    /// The "Sales Level 6" column, used as the search key.
    TerritoryKey,
    /// The "SDR" column, returned for a matching key.
    OwnerName,
}

impl FieldTag {
    /// Canonical field name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TerritoryKey => "territoryKey",
            Self::OwnerName => "ownerName",
        }
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row after header normalization and required-field validation.
///
/// Both required fields are non-empty; the projector never builds a record
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    pub territory_key: String,
    pub owner_name: String,
    /// Unmatched columns keyed by their trimmed, lowercased header.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub passthrough: BTreeMap<String, CellValue>,
}

impl CanonicalRecord {
    pub fn new(territory_key: impl Into<String>, owner_name: impl Into<String>) -> Self {
        Self {
            territory_key: territory_key.into(),
            owner_name: owner_name.into(),
            passthrough: BTreeMap::new(),
        }
    }

    /// Adds a passthrough field, replacing any previous value under `key`.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.passthrough.insert(key.into(), value.into());
        self
    }
}

/// Ordered canonical records, in input row order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalRecordSet {
    records: Vec<CanonicalRecord>,
}

impl CanonicalRecordSet {
    pub fn new(records: Vec<CanonicalRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted, de-duplicated passthrough keys across all records.
    pub fn passthrough_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .records
            .iter()
            .flat_map(|record| record.passthrough.keys().map(String::as_str))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }
}

impl From<Vec<CanonicalRecord>> for CanonicalRecordSet {
    fn from(records: Vec<CanonicalRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<CanonicalRecord> for CanonicalRecordSet {
    fn from_iter<I: IntoIterator<Item = CanonicalRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CanonicalRecordSet {
    type Item = &'a CanonicalRecord;
    type IntoIter = std::slice::Iter<'a, CanonicalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_tag_names() {
        assert_eq!(FieldTag::TerritoryKey.to_string(), "territoryKey");
        assert_eq!(FieldTag::OwnerName.as_str(), "ownerName");
    }

    #[test]
    fn test_passthrough_keys_sorted_unique() {
        let set: CanonicalRecordSet = vec![
            CanonicalRecord::new("West-1", "Alice").with_field("region", "West"),
            CanonicalRecord::new("East-9", "Carol")
                .with_field("region", "East")
                .with_field("notes", "new hire"),
        ]
        .into();
        assert_eq!(set.passthrough_keys(), vec!["notes", "region"]);
    }
}
