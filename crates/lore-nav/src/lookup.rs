//! Target resolution: relation target name → champion, lore character, or unknown stub.

use anyhow::Result;
use lore_core::model::{Entity, LoreSnapshot};
use serde::Serialize;
use std::collections::HashMap;

/// Which universe a relation target was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    Champion,
    Lore,
    /// Target exists in neither universe; rendered as plain text with a placeholder image.
    Unknown,
}

/// Render information for a relation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetResolution {
    pub kind: ResolutionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl TargetResolution {
    fn found(kind: ResolutionKind, entity: &Entity) -> Self {
        Self {
            kind,
            identifier: Some(entity.id.clone()),
            image: entity.image.clone(),
        }
    }

    pub fn unknown() -> Self {
        Self {
            kind: ResolutionKind::Unknown,
            identifier: None,
            image: None,
        }
    }

    /// Whether the renderer should emit a navigable link.
    pub fn is_linkable(&self) -> bool {
        self.kind != ResolutionKind::Unknown
    }
}

/// Exact, case-sensitive name indexes over both universes.
///
/// When a name repeats within a universe, the first entity wins.
pub struct EntityLookup<'a> {
    champions: HashMap<&'a str, &'a Entity>,
    lore: HashMap<&'a str, &'a Entity>,
}

impl<'a> EntityLookup<'a> {
    pub fn new(champions: &'a [Entity], lore_characters: &'a [Entity]) -> Self {
        Self {
            champions: index_by_name(champions),
            lore: index_by_name(lore_characters),
        }
    }

    /// Champions first, then lore characters, then an unknown stub.
    pub fn resolve(&self, name: &str) -> TargetResolution {
        if let Some(entity) = self.champions.get(name) {
            return TargetResolution::found(ResolutionKind::Champion, entity);
        }
        if let Some(entity) = self.lore.get(name) {
            return TargetResolution::found(ResolutionKind::Lore, entity);
        }
        TargetResolution::unknown()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.champions.contains_key(name) || self.lore.contains_key(name)
    }
}

fn index_by_name(entities: &[Entity]) -> HashMap<&str, &Entity> {
    let mut index = HashMap::with_capacity(entities.len());
    for entity in entities {
        index.entry(entity.name.as_str()).or_insert(entity);
    }
    index
}

/// Find a focal entity by display name, champions first.
pub fn find_focal<'a>(snapshot: &'a LoreSnapshot, name: &str) -> Result<&'a Entity> {
    snapshot
        .champion_by_name(name)
        .or_else(|| snapshot.lore_by_name(name))
        .ok_or_else(|| anyhow::anyhow!("entity not found: {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universes() -> (Vec<Entity>, Vec<Entity>) {
        let champions = vec![
            Entity::champion("draven", "Draven").with_image("draven.png"),
            Entity::champion("kayn", "Kayn"),
        ];
        let lore = vec![
            Entity::lore_character("boram", "Boram Darkwill").with_image("boram.png"),
            Entity::lore_character("kayn-lore", "Kayn"),
        ];
        (champions, lore)
    }

    #[test]
    fn test_champion_match() {
        let (c, l) = universes();
        let lookup = EntityLookup::new(&c, &l);
        let r = lookup.resolve("Draven");
        assert_eq!(r.kind, ResolutionKind::Champion);
        assert_eq!(r.identifier.as_deref(), Some("draven"));
        assert_eq!(r.image.as_deref(), Some("draven.png"));
        assert!(r.is_linkable());
    }

    #[test]
    fn test_lore_match() {
        let (c, l) = universes();
        let lookup = EntityLookup::new(&c, &l);
        let r = lookup.resolve("Boram Darkwill");
        assert_eq!(r.kind, ResolutionKind::Lore);
        assert_eq!(r.identifier.as_deref(), Some("boram"));
    }

    #[test]
    fn test_champion_wins_over_lore() {
        let (c, l) = universes();
        let lookup = EntityLookup::new(&c, &l);
        assert_eq!(
            lookup.resolve("Kayn").identifier.as_deref(),
            Some("kayn")
        );
    }

    #[test]
    fn test_unknown_and_case_sensitive() {
        let (c, l) = universes();
        let lookup = EntityLookup::new(&c, &l);
        assert_eq!(lookup.resolve("draven"), TargetResolution::unknown());
        assert_eq!(
            lookup.resolve("The Ruined King").kind,
            ResolutionKind::Unknown
        );
        assert!(!lookup.resolve("nobody").is_linkable());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let champions = vec![
            Entity::champion("first", "Twin"),
            Entity::champion("second", "Twin"),
        ];
        let lookup = EntityLookup::new(&champions, &[]);
        assert_eq!(lookup.resolve("Twin").identifier.as_deref(), Some("first"));
    }

    #[test]
    fn test_find_focal() {
        let mut snapshot = LoreSnapshot::new();
        snapshot.insert_lore_character(Entity::lore_character("boram", "Boram Darkwill"));
        assert_eq!(find_focal(&snapshot, "Boram Darkwill").unwrap().id, "boram");
        assert!(find_focal(&snapshot, "Nobody").is_err());
    }
}
