//! # Dashboard Projection
//!
//! The register list is fetched in full and narrowed on the client. The
//! projection is recomputed from the held records on every read, so it can
//! never be stale with respect to the search term, the sort order, or the
//! underlying set.
//!
//! ## Algorithm
//!
//! 1. Normalize the term: trim, then lowercase.
//! 2. Keep a record iff its lowercased full names, its identity number, or
//!    its lowercased code contains the normalized term. The empty term keeps
//!    everything.
//! 3. Sort the kept records by `createdAt` (ascending = earliest first). The
//!    sort is stable: records with equal timestamps keep their held order.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::record::Record;

/// Date ordering of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Oldest first.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Newest first.
    #[serde(rename = "desc")]
    Descending,
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" | "oldest" => Ok(Self::Ascending),
            "desc" | "descending" | "newest" => Ok(Self::Descending),
            _ => Err(ValidationError::UnknownSortOrder(s.to_string())),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ascending => f.write_str("asc"),
            Self::Descending => f.write_str("desc"),
        }
    }
}

/// Trim and case-fold a search term.
pub fn normalize_search_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Whether `record` matches an already-normalized term.
pub fn matches_search(record: &Record, normalized: &str) -> bool {
    if normalized.is_empty() {
        return true;
    }
    record.full_names.to_lowercase().contains(normalized)
        || record.identity_number.contains(normalized)
        || record.code.as_str().to_lowercase().contains(normalized)
}

/// Filter `records` by `term` and order the survivors by creation date.
pub fn project<'a>(records: &'a [Record], term: &str, order: SortOrder) -> Vec<&'a Record> {
    let normalized = normalize_search_term(term);
    let mut kept: Vec<&Record> = records
        .iter()
        .filter(|r| matches_search(r, &normalized))
        .collect();
    match order {
        SortOrder::Ascending => kept.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Descending => kept.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    kept
}


#[cfg(test)]
mod proptests {
    use super::tests::record;
    use super::*;
    use proptest::prelude::*;

    fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
        prop::collection::vec(("[A-Za-z ]{0,12}", "[0-9]{0,6}", "[A-Z]{0,2}-[0-9]{1,3}", 1u32..28), 0..16)
            .prop_map(|rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (name, idno, code, day))| {
                        record(&format!("r{i}"), &code, &name, &idno, day)
                    })
                    .collect()
            })
    }

    fn order_strategy() -> impl Strategy<Value = SortOrder> {
        prop_oneof![Just(SortOrder::Ascending), Just(SortOrder::Descending)]
    }

    proptest! {
        /// The view is a subset of the held records, and membership follows the match rule.
        #[test]
        fn filter_is_subset_and_exact(records in records_strategy(), term in "[A-Za-z0-9 -]{0,4}") {
            let view = project(&records, &term, SortOrder::Ascending);
            let normalized = normalize_search_term(&term);
            for r in &records {
                let expected = r.full_names.to_lowercase().contains(&normalized)
                    || r.identity_number.contains(&normalized)
                    || r.code.as_str().to_lowercase().contains(&normalized);
                let included = view.iter().any(|v| v.id == r.id);
                prop_assert_eq!(included, expected);
            }
        }

        /// The empty term keeps every record: a permutation, nothing added or removed.
        #[test]
        fn empty_term_is_permutation(records in records_strategy(), order in order_strategy()) {
            let view = project(&records, "", order);
            prop_assert_eq!(view.len(), records.len());
            let mut seen: Vec<&str> = view.iter().map(|r| r.id.as_str()).collect();
            let mut held: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
            seen.sort_unstable();
            held.sort_unstable();
            prop_assert_eq!(seen, held);
        }

        /// Ordered by createdAt per direction; equal timestamps keep held order.
        #[test]
        fn sorted_and_stable(records in records_strategy(), order in order_strategy()) {
            let view = project(&records, "", order);
            let position = |r: &Record| records.iter().position(|h| h.id == r.id).unwrap_or(usize::MAX);
            for pair in view.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                match order {
                    SortOrder::Ascending => prop_assert!(a.created_at <= b.created_at),
                    SortOrder::Descending => prop_assert!(a.created_at >= b.created_at),
                }
                if a.created_at == b.created_at {
                    prop_assert!(position(a) < position(b));
                }
            }
        }
    }
}
