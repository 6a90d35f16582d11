//! Validated name → identifier lookup for the data-access boundary.
//!
//! Relations join on display names. This index makes that join explicit:
//! resolving a name that matches no entity, or more than one, is an error.

use crate::error::LoreError;
use crate::model::{EntityKind, LoreSnapshot};
use std::collections::BTreeMap;

/// Identifier of one entity within its collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

/// All entities of a snapshot indexed by display name.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    by_name: BTreeMap<String, Vec<EntityRef>>,
}

impl NameIndex {
    pub fn from_snapshot(snapshot: &LoreSnapshot) -> Self {
        let mut by_name: BTreeMap<String, Vec<EntityRef>> = BTreeMap::new();
        for entity in snapshot.all_entities() {
            by_name
                .entry(entity.name.clone())
                .or_default()
                .push(EntityRef {
                    kind: entity.kind,
                    id: entity.id.clone(),
                });
        }
        Self { by_name }
    }

    /// Resolve a display name to exactly one entity.
    pub fn resolve(&self, name: &str) -> Result<&EntityRef, LoreError> {
        match self.by_name.get(name).map(Vec::as_slice) {
            None | Some([]) => Err(LoreError::UnknownName(name.to_string())),
            Some([single]) => Ok(single),
            Some(many) => Err(LoreError::AmbiguousName {
                name: name.to_string(),
                ids: many.iter().map(|r| r.id.clone()).collect(),
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Names shared by more than one entity, in name order.
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &[EntityRef])> {
        self.by_name
            .iter()
            .filter(|(_, refs)| refs.len() > 1)
            .map(|(name, refs)| (name.as_str(), refs.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entity;

    fn snapshot() -> LoreSnapshot {
        let mut s = LoreSnapshot::new();
        s.insert_champion(Entity::champion("darius", "Darius"));
        s.insert_champion(Entity::champion("draven", "Draven"));
        s.insert_lore_character(Entity::lore_character("darius-elder", "Darius"));
        s.insert_lore_character(Entity::lore_character("boram", "Boram Darkwill"));
        s
    }

    #[test]
    fn test_resolve_unique_name() {
        let index = NameIndex::from_snapshot(&snapshot());
        let found = index.resolve("Boram Darkwill").unwrap();
        assert_eq!(found.kind, EntityKind::LoreCharacter);
        assert_eq!(found.id, "boram");
    }

    #[test]
    fn test_resolve_unknown_name() {
        let index = NameIndex::from_snapshot(&snapshot());
        assert_eq!(
            index.resolve("Swain"),
            Err(LoreError::UnknownName("Swain".to_string()))
        );
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let index = NameIndex::from_snapshot(&snapshot());
        assert!(index.resolve("draven").is_err());
    }

    #[test]
    fn test_resolve_ambiguous_name() {
        let index = NameIndex::from_snapshot(&snapshot());
        let err = index.resolve("Darius").unwrap_err();
        assert_eq!(
            err,
            LoreError::AmbiguousName {
                name: "Darius".to_string(),
                ids: vec!["darius".to_string(), "darius-elder".to_string()],
            }
        );
        let dups: Vec<&str> = index.duplicates().map(|(name, _)| name).collect();
        assert_eq!(dups, vec!["Darius"]);
    }
}
