//! Header normalization onto canonical fields.

use tol_model::FieldTag;

/// Substring identifying the territory key column.
pub const TERRITORY_HEADER_PATTERN: &str = "sales level 6";

/// Substring identifying the owner column.
pub const OWNER_HEADER_PATTERN: &str = "sdr";

/// Result of normalizing one source header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Trimmed, lowercased header. Used as the passthrough key when `tag` is `None`.
    pub key: String,
    /// Canonical field the header maps onto, if any.
    pub tag: Option<FieldTag>,
}

impl HeaderMatch {
    pub fn is_passthrough(&self) -> bool {
        self.tag.is_none()
    }
}

/// Normalizes a raw header and classifies it.
///
/// Matching is a case-insensitive substring test, so "Sales Level 6
/// (Territory)" and "SDR Name" both match. The territory pattern is checked
/// first.
pub fn normalize_header(raw: &str) -> HeaderMatch {
    let key = raw.trim().to_lowercase();
    let tag = classify(&key);
    HeaderMatch { key, tag }
}

/// Canonical tag for an already trimmed and lowercased header.
fn classify(key: &str) -> Option<FieldTag> {
    if key.contains(TERRITORY_HEADER_PATTERN) {
        Some(FieldTag::TerritoryKey)
    } else if key.contains(OWNER_HEADER_PATTERN) {
        Some(FieldTag::OwnerName)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_territory_variants() {
        for raw in [
            "Sales Level 6",
            "  sales level 6  ",
            "SALES LEVEL 6 (Territory)",
            "Region / Sales Level 6",
        ] {
            assert_eq!(normalize_header(raw).tag, Some(FieldTag::TerritoryKey), "{raw}");
        }
    }

    #[test]
    fn test_owner_variants() {
        for raw in ["SDR", "SDR Name", "assigned sdr", " Sdr "] {
            assert_eq!(normalize_header(raw).tag, Some(FieldTag::OwnerName), "{raw}");
        }
    }

    #[test]
    fn test_territory_wins_over_owner() {
        let matched = normalize_header("SDR Sales Level 6");
        assert_eq!(matched.tag, Some(FieldTag::TerritoryKey));
    }

    #[test]
    fn test_passthrough_key() {
        let matched = normalize_header("  Region Name ");
        assert!(matched.is_passthrough());
        assert_eq!(matched.key, "region name");
    }

    #[test]
    fn test_no_fuzzy_matching() {
        assert_eq!(normalize_header("Sales Lvl 6").tag, None);
        assert_eq!(normalize_header("Sales Level6").tag, None);
        assert_eq!(normalize_header("S.D.R.").tag, None);
    }

    #[test]
    fn test_canonical_names_are_passthrough() {
        assert_eq!(normalize_header("territoryKey").tag, None);
        assert_eq!(normalize_header("ownerName").tag, None);
    }

    #[test]
    fn test_idempotent() {
        for raw in ["Sales Level 6 (Territory)", "SDR Name", "Region", "territorykey"] {
            let once = normalize_header(raw);
            let twice = normalize_header(&once.key);
            assert_eq!(once, twice, "{raw}");
        }
    }
}
