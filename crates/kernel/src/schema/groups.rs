//! Picker group ordering.
//!
//! Groups are plain strings on each block type. The rank table decides in
//! which order the groups appear; an unknown group is reported instead of
//! sorted arbitrarily so schema typos surface immediately.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{SchemaError, SchemaResult};

/// Default group ranks. Ungrouped blocks sort first.
const STANDARD_RANKS: &[(&str, i32)] = &[
    ("", 0),
    ("Basic", 10),
    ("Multimedia", 20),
    ("Navigation", 30),
    ("News & Calendar", 40),
    ("Social Media", 50),
    ("Misc", 60),
    ("Special", 70),
];

/// Lookup table from group name to sort rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRanks {
    ranks: Arc<BTreeMap<String, i32>>,
}

impl Default for GroupRanks {
    fn default() -> Self {
        Self::standard()
    }
}

impl GroupRanks {
    /// The standard table used by the block catalog.
    pub fn standard() -> Self {
        Self::from_pairs(STANDARD_RANKS.iter().map(|(g, r)| (*g, *r)))
    }

    /// Build a table from `(group, rank)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, i32)>) -> Self {
        Self {
            ranks: Arc::new(
                pairs
                    .into_iter()
                    .map(|(g, r)| (g.to_string(), r))
                    .collect(),
            ),
        }
    }

    /// Return a copy of this table with one group added or re-ranked.
    pub fn with_group(&self, group: &str, rank: i32) -> Self {
        let mut ranks = (*self.ranks).clone();
        ranks.insert(group.to_string(), rank);
        Self {
            ranks: Arc::new(ranks),
        }
    }

    /// Rank of a group, or `UnknownGroup` naming it.
    pub fn rank(&self, group: &str) -> SchemaResult<i32> {
        self.ranks
            .get(group)
            .copied()
            .ok_or_else(|| SchemaError::UnknownGroup {
                group: group.to_string(),
            })
    }

    pub fn contains(&self, group: &str) -> bool {
        self.ranks.contains_key(group)
    }

    /// Known groups in rank order.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<(&str, i32)> =
            self.ranks.iter().map(|(g, r)| (g.as_str(), *r)).collect();
        groups.sort_by_key(|(_, r)| *r);
        groups.into_iter().map(|(g, _)| g).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_orders_groups() {
        let ranks = GroupRanks::standard();
        assert_eq!(ranks.rank("").unwrap(), 0);
        assert!(ranks.rank("Basic").unwrap() < ranks.rank("Multimedia").unwrap());
        assert!(ranks.rank("Misc").unwrap() < ranks.rank("Special").unwrap());
        assert_eq!(ranks.groups().first(), Some(&""));
        assert_eq!(ranks.groups().last(), Some(&"Special"));
    }

    #[test]
    fn unknown_group_is_named() {
        let err = GroupRanks::standard().rank("Widgets").unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownGroup {
                group: "Widgets".to_string()
            }
        );
    }

    #[test]
    fn group_names_are_case_sensitive() {
        assert!(GroupRanks::standard().rank("basic").is_err());
    }

    #[test]
    fn with_group_leaves_source_untouched() {
        let base = GroupRanks::standard();
        let extended = base.with_group("Widgets", 65);
        assert_eq!(extended.rank("Widgets").unwrap(), 65);
        assert!(!base.contains("Widgets"));
    }
}
