//! Query result type.

use serde::{Deserialize, Serialize};

use crate::record::CanonicalRecord;

/// One owner assignment for a distinct territory key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Territory key in its original casing.
    pub territory_key: String,
    pub owner_name: String,
}

impl QueryResult {
    pub fn new(territory_key: impl Into<String>, owner_name: impl Into<String>) -> Self {
        Self {
            territory_key: territory_key.into(),
            owner_name: owner_name.into(),
        }
    }
}

impl From<&CanonicalRecord> for QueryResult {
    fn from(record: &CanonicalRecord) -> Self {
        Self::new(record.territory_key.clone(), record.owner_name.clone())
    }
}
