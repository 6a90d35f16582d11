//! Faction expansion and target deduplication.

use lore_core::kind::RelationKind;
use lore_core::model::{Entity, RelationEntry};
use std::collections::HashSet;

/// Result of expanding faction-wide relations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactionExpansion {
    /// Relations with every faction-wide entry replaced by its members.
    pub relations: Vec<RelationEntry>,
    /// Lower-cased faction tags that matched no entity.
    pub unmatched: Vec<String>,
}

/// Replace each `faction-wide` entry with one `faction-member` entry per
/// entity in `universe` carrying that faction tag.
///
/// The focal entity and targets already in the list are skipped. New members
/// are appended in universe order; `faction-wide` entries are always dropped.
pub fn expand_factions(
    relations: Vec<RelationEntry>,
    focal_name: &str,
    universe: &[Entity],
) -> FactionExpansion {
    let mut present: HashSet<String> = relations
        .iter()
        .filter(|r| !r.relation_type.is_faction_wide())
        .map(|r| r.target_name.clone())
        .collect();

    let mut members = Vec::new();
    let mut unmatched = Vec::new();

    for entry in relations.iter().filter(|r| r.relation_type.is_faction_wide()) {
        let tag = entry.target_name.trim().to_lowercase();
        let mut matched = 0usize;
        for entity in universe
            .iter()
            .filter(|e| e.name != focal_name && e.has_faction(&tag))
        {
            matched += 1;
            if present.insert(entity.name.clone()) {
                members.push(RelationEntry::new(
                    entity.name.clone(),
                    RelationKind::FactionMember,
                ));
            }
        }
        if matched == 0 {
            tracing::debug!("faction '{}' on {} matched no entities", tag, focal_name);
            if !unmatched.contains(&tag) {
                unmatched.push(tag);
            }
        }
    }

    let mut expanded: Vec<RelationEntry> = relations
        .into_iter()
        .filter(|r| !r.relation_type.is_faction_wide())
        .collect();
    expanded.extend(members);

    FactionExpansion {
        relations: expanded,
        unmatched,
    }
}

/// Keep only the first entry for each target name.
pub fn dedup_by_target(entries: Vec<RelationEntry>) -> Vec<RelationEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.target_name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noxus_universe() -> Vec<Entity> {
        vec![
            Entity::champion("darius", "Darius").with_factions(["noxus"]),
            Entity::champion("draven", "Draven").with_factions(["noxus"]),
            Entity::champion("swain", "Swain").with_factions(["noxus"]),
            Entity::champion("irelia", "Irelia").with_factions(["ionia"]),
            Entity::champion("katarina", "Katarina").with_factions(["noxus"]),
        ]
    }

    #[test]
    fn test_expands_members_excluding_focal_and_present() {
        let relations = vec![
            RelationEntry::new("Draven", "sibling"),
            RelationEntry::new("Noxus", "faction-wide"),
        ];
        let result = expand_factions(relations, "Darius", &noxus_universe());

        let names: Vec<&str> = result
            .relations
            .iter()
            .map(|r| r.target_name.as_str())
            .collect();
        assert_eq!(names, vec!["Draven", "Swain", "Katarina"]);
        assert_eq!(result.relations[0].relation_type, RelationKind::Sibling);
        assert!(
            result.relations[1..]
                .iter()
                .all(|r| r.relation_type == RelationKind::FactionMember)
        );
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn test_unmatched_faction_is_dropped_and_reported() {
        let relations = vec![
            RelationEntry::new("Noxsus", "faction-wide"),
            RelationEntry::new("Irelia", "rival"),
        ];
        let result = expand_factions(relations, "Darius", &noxus_universe());
        assert_eq!(result.relations, vec![RelationEntry::new("Irelia", "rival")]);
        assert_eq!(result.unmatched, vec!["noxsus".to_string()]);
    }

    #[test]
    fn test_focal_only_member_counts_as_unmatched() {
        let universe = vec![Entity::champion("irelia", "Irelia").with_factions(["ionia"])];
        let relations = vec![RelationEntry::new("ionia", "faction-wide")];
        let result = expand_factions(relations, "Irelia", &universe);
        assert!(result.relations.is_empty());
        assert_eq!(result.unmatched, vec!["ionia".to_string()]);
    }

    #[test]
    fn test_two_faction_entries_do_not_duplicate_members() {
        let universe = vec![
            Entity::champion("swain", "Swain").with_factions(["noxus", "black-rose"]),
            Entity::champion("leblanc", "LeBlanc").with_factions(["black-rose"]),
        ];
        let relations = vec![
            RelationEntry::new("noxus", "faction-wide"),
            RelationEntry::new("Black-Rose", "faction-wide"),
        ];
        let result = expand_factions(relations, "Darius", &universe);
        let names: Vec<&str> = result
            .relations
            .iter()
            .map(|r| r.target_name.as_str())
            .collect();
        assert_eq!(names, vec!["Swain", "LeBlanc"]);
    }

    #[test]
    fn test_dedup_keeps_first() {
        let entries = vec![
            RelationEntry::new("Swain", "ally").with_note("first"),
            RelationEntry::new("Draven", "sibling"),
            RelationEntry::new("Swain", "rival"),
        ];
        let deduped = dedup_by_target(entries);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].relation_type, RelationKind::Ally);
        assert_eq!(deduped[0].note.as_deref(), Some("first"));
    }
}
