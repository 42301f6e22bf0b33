//! Territory key lookup with first-wins deduplication.

use std::collections::HashSet;

use tol_model::{CanonicalRecordSet, QueryResult};

/// Returns one result per distinct territory key containing `query`.
///
/// Matching is a case-insensitive substring test against the territory key.
/// When several records share a key (ignoring case) only the earliest one in
/// input order is reported. Results follow first-match order. An empty query
/// yields no results.
pub fn lookup(records: &CanonicalRecordSet, query: &str) -> Vec<QueryResult> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let mut seen: HashSet<String> = HashSet::new();
    let mut results = Vec::new();
    for record in records {
        let identity = record.territory_key.to_lowercase();
        if !identity.contains(&needle) {
            continue;
        }
        if seen.insert(identity) {
            results.push(QueryResult::from(record));
        }
    }
    tracing::trace!(
        query_len = query.len(),
        matches = results.len(),
        "evaluated territory query"
    );
    results
}

/// Borrowed view over a record set for repeated per-keystroke queries.
///
/// Holds nothing but the borrow: every query re-walks the records, so the
/// answer is always a pure function of the records and the query string.
#[derive(Debug, Clone, Copy)]
pub struct LookupIndex<'a> {
    records: &'a CanonicalRecordSet,
}

impl<'a> LookupIndex<'a> {
    pub fn new(records: &'a CanonicalRecordSet) -> Self {
        Self { records }
    }

    pub fn query(&self, query: &str) -> Vec<QueryResult> {
        lookup(self.records, query)
    }

    /// Number of records behind the index (duplicates included).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct territory keys, ignoring case.
    pub fn distinct_keys(&self) -> usize {
        self.records
            .iter()
            .map(|record| record.territory_key.to_lowercase())
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tol_model::CanonicalRecord;

    fn records(pairs: &[(&str, &str)]) -> CanonicalRecordSet {
        pairs
            .iter()
            .map(|(key, owner)| CanonicalRecord::new(*key, *owner))
            .collect()
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let set = records(&[("West-1", "Alice")]);
        assert!(lookup(&set, "").is_empty());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let set = records(&[("West-1", "Alice"), ("west-1", "Bob"), ("East-9", "Carol")]);
        let results = lookup(&set, "west");
        assert_eq!(results, vec![QueryResult::new("West-1", "Alice")]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let set = records(&[("NORTH-2", "Dana")]);
        assert_eq!(lookup(&set, "north").len(), 1);
        assert_eq!(lookup(&set, "NoRtH-2").len(), 1);
    }

    #[test]
    fn test_results_follow_first_match_order() {
        let set = records(&[
            ("Central-3", "Eve"),
            ("Central-1", "Frank"),
            ("central-3", "Grace"),
            ("Central-2", "Heidi"),
        ]);
        let keys: Vec<String> = lookup(&set, "central")
            .into_iter()
            .map(|result| result.territory_key)
            .collect();
        assert_eq!(keys, vec!["Central-3", "Central-1", "Central-2"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let set = records(&[("West-1", "Alice")]);
        assert!(lookup(&set, "zzz").is_empty());
    }

    #[test]
    fn test_index_distinct_keys() {
        let set = records(&[("West-1", "Alice"), ("WEST-1", "Bob"), ("East-9", "Carol")]);
        let index = LookupIndex::new(&set);
        assert_eq!(index.len(), 3);
        assert_eq!(index.distinct_keys(), 2);
        assert_eq!(index.query("east"), vec![QueryResult::new("East-9", "Carol")]);
    }
}
