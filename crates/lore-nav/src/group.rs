//! Grouping, ordering, and density classification of resolved relations.

use crate::resolver::ResolvedRelation;
use serde::Serialize;
use std::collections::BTreeMap;

/// Group keys in display order. Keys not listed sort alphabetically after all of these.
pub const GROUP_PRIORITY: &[&str] = &[
    // family
    "sibling",
    "parent",
    "child",
    "spouse",
    "ancestor",
    "descendant",
    "adoptive-family",
    // romance
    "lover",
    "ex-lover",
    "unrequited-love",
    // alliance
    "mentor",
    "student",
    "apprentice",
    "friend",
    "ally",
    "comrade",
    "creator",
    "creation",
    "host",
    "faction-member",
    // rivalry and hostility
    "rival",
    "strained",
    "tense",
    "nemesis",
    "enemy",
    "betrayed",
    "betrayer",
    "hunts",
    "hunted-by",
    "hunter",
    "predator",
    "prey",
    "killer",
    "victim",
    "corrupted",
    "corrupted-by",
    "related",
];

/// Layout hint derived from group size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    /// Horizontally scrollable carousel.
    Dense,
    /// Static multi-column grid.
    Sparse,
}

/// Relations sharing one normalized kind string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationGroup {
    pub key: String,
    pub density: Density,
    pub entries: Vec<ResolvedRelation>,
}

/// Dense when the group holds more than `threshold` entries.
pub fn classify_density(count: usize, threshold: usize) -> Density {
    if count > threshold {
        Density::Dense
    } else {
        Density::Sparse
    }
}

fn priority_rank(key: &str) -> usize {
    GROUP_PRIORITY
        .iter()
        .position(|k| *k == key)
        .unwrap_or(GROUP_PRIORITY.len())
}

/// Sort group keys: prioritized kinds by list position, the rest alphabetically after.
pub fn sort_group_keys(keys: &mut [String]) {
    keys.sort_by(|a, b| {
        priority_rank(a)
            .cmp(&priority_rank(b))
            .then_with(|| a.cmp(b))
    });
}

/// Group by normalized kind string and order dense groups before sparse ones.
///
/// Entry order inside a group follows input order; each density tier keeps
/// the key order from [`sort_group_keys`].
pub fn group_relations(entries: Vec<ResolvedRelation>, threshold: usize) -> Vec<RelationGroup> {
    let mut by_key: BTreeMap<String, Vec<ResolvedRelation>> = BTreeMap::new();
    for entry in entries {
        by_key
            .entry(entry.relation_type.to_string())
            .or_default()
            .push(entry);
    }

    let mut keys: Vec<String> = by_key.keys().cloned().collect();
    sort_group_keys(&mut keys);

    let mut dense = Vec::new();
    let mut sparse = Vec::new();
    for key in keys {
        let Some(entries) = by_key.remove(&key) else {
            continue;
        };
        let density = classify_density(entries.len(), threshold);
        let group = RelationGroup {
            key,
            density,
            entries,
        };
        match density {
            Density::Dense => dense.push(group),
            Density::Sparse => sparse.push(group),
        }
    }

    dense.extend(sparse);
    dense
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_boundary() {
        assert_eq!(classify_density(3, 3), Density::Sparse);
        assert_eq!(classify_density(4, 3), Density::Dense);
        assert_eq!(classify_density(0, 3), Density::Sparse);
    }

    #[test]
    fn test_sort_keys_priority_then_alpha() {
        let mut keys: Vec<String> = [
            "zealot",
            "related",
            "enemy",
            "sibling",
            "blood-oath",
            "ally",
            "mentor",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        sort_group_keys(&mut keys);
        assert_eq!(
            keys,
            vec![
                "sibling",
                "mentor",
                "ally",
                "enemy",
                "related",
                "blood-oath",
                "zealot"
            ]
        );
    }

    #[test]
    fn test_every_priority_key_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for key in GROUP_PRIORITY {
            assert!(seen.insert(key), "duplicate priority key {key}");
        }
    }
}
