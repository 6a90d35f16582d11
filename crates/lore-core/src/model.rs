//! Data model for lore snapshots: entities, relations, and locale-aware notes.

use crate::error::LoreError;
use crate::kind::RelationKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// A read-only snapshot of everything the relation panel needs.
///
/// Curated relations and API fallbacks are keyed by the focal entity's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoreSnapshot {
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: SnapshotMetadata,
    #[serde(default)]
    pub champions: Vec<Entity>,
    #[serde(default)]
    pub lore_characters: Vec<Entity>,
    /// Manually curated relation table: focal name → authored relations.
    #[serde(default)]
    pub relations: BTreeMap<String, Vec<RawRelation>>,
    /// Externally supplied "related" lists used when no curated data exists.
    #[serde(default)]
    pub api_related: BTreeMap<String, Vec<ApiRelated>>,
}

/// Aggregate counts, recomputed by [`LoreSnapshot::refresh_metadata`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotMetadata {
    pub total_champions: usize,
    pub total_lore_characters: usize,
    pub curated_entities: usize,
    pub total_relations: usize,
    pub total_factions: usize,
}

/// A champion or lore character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub kind: EntityKind,
    /// Display name; relations join on this exact string.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Lower-cased faction/region tags (e.g. "noxus", "ionia").
    #[serde(default)]
    pub factions: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Champion,
    LoreCharacter,
}

/// An authored relation as stored, carrying one note per supported locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRelation {
    pub target: String,
    pub kind: RelationKind,
    #[serde(default, skip_serializing_if = "LocalizedNote::is_empty")]
    pub note: LocalizedNote,
}

/// Parallel note fields for the supported locales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedNote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pl: Option<String>,
}

/// A relation after the locale has been chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationEntry {
    pub target_name: String,
    pub relation_type: RelationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One item from the external "related entities" fallback source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRelated {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Supported content locales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pl,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pl => "pl",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = LoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "pl" => Ok(Locale::Pl),
            other => Err(LoreError::UnknownLocale(other.to_string())),
        }
    }
}

impl LocalizedNote {
    pub fn en(text: impl Into<String>) -> Self {
        Self {
            en: Some(text.into()),
            pl: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.en.is_none() && self.pl.is_none()
    }

    /// Note text for `locale`, falling back to English. Blank strings count as absent.
    pub fn pick(&self, locale: Locale) -> Option<&str> {
        fn non_blank(s: &Option<String>) -> Option<&str> {
            s.as_deref().filter(|t| !t.trim().is_empty())
        }
        match locale {
            Locale::En => non_blank(&self.en),
            Locale::Pl => non_blank(&self.pl).or_else(|| non_blank(&self.en)),
        }
    }
}

impl RawRelation {
    pub fn new(target: impl Into<String>, kind: impl Into<RelationKind>) -> Self {
        Self {
            target: target.into(),
            kind: kind.into(),
            note: LocalizedNote::default(),
        }
    }

    pub fn with_note(mut self, note: LocalizedNote) -> Self {
        self.note = note;
        self
    }

    /// Collapse to a display entry for the given locale.
    pub fn localize(&self, locale: Locale) -> RelationEntry {
        RelationEntry {
            target_name: self.target.clone(),
            relation_type: self.kind.clone(),
            note: self.note.pick(locale).map(str::to_string),
        }
    }
}

impl RelationEntry {
    pub fn new(target_name: impl Into<String>, relation_type: impl Into<RelationKind>) -> Self {
        Self {
            target_name: target_name.into(),
            relation_type: relation_type.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl ApiRelated {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            image: None,
        }
    }
}

impl Entity {
    pub fn new(kind: EntityKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            title: None,
            factions: BTreeSet::new(),
            image: None,
        }
    }

    pub fn champion(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(EntityKind::Champion, id, name)
    }

    pub fn lore_character(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(EntityKind::LoreCharacter, id, name)
    }

    /// Add faction tags. Tags are lower-cased and trimmed.
    pub fn with_factions<I, S>(mut self, factions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.factions
            .extend(factions.into_iter().map(|f| f.as_ref().trim().to_lowercase()));
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn has_faction(&self, tag: &str) -> bool {
        self.factions.contains(tag)
    }

    /// Lower-case and trim faction tags in place.
    pub fn normalize_factions(&mut self) {
        self.factions = std::mem::take(&mut self.factions)
            .into_iter()
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty())
            .collect();
    }
}

impl Default for LoreSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl LoreSnapshot {
    /// Create a new empty snapshot.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            version: crate::schema::CURRENT_VERSION.to_string(),
            created_at: now,
            updated_at: now,
            metadata: SnapshotMetadata::default(),
            champions: Vec::new(),
            lore_characters: Vec::new(),
            relations: BTreeMap::new(),
            api_related: BTreeMap::new(),
        }
    }

    pub fn insert_champion(&mut self, mut entity: Entity) {
        entity.kind = EntityKind::Champion;
        self.champions.push(entity);
    }

    pub fn insert_lore_character(&mut self, mut entity: Entity) {
        entity.kind = EntityKind::LoreCharacter;
        self.lore_characters.push(entity);
    }

    /// Replace the curated relation list for a focal entity.
    pub fn set_relations(&mut self, focal: impl Into<String>, relations: Vec<RawRelation>) {
        self.relations.insert(focal.into(), relations);
    }

    /// Replace the API fallback list for a focal entity.
    pub fn set_api_related(&mut self, focal: impl Into<String>, related: Vec<ApiRelated>) {
        self.api_related.insert(focal.into(), related);
    }

    pub fn champion_by_name(&self, name: &str) -> Option<&Entity> {
        self.champions.iter().find(|e| e.name == name)
    }

    pub fn lore_by_name(&self, name: &str) -> Option<&Entity> {
        self.lore_characters.iter().find(|e| e.name == name)
    }

    pub fn entity_by_id(&self, kind: EntityKind, id: &str) -> Option<&Entity> {
        let pool = match kind {
            EntityKind::Champion => &self.champions,
            EntityKind::LoreCharacter => &self.lore_characters,
        };
        pool.iter().find(|e| e.id == id)
    }

    /// Champions followed by lore characters.
    pub fn all_entities(&self) -> impl Iterator<Item = &Entity> {
        self.champions.iter().chain(self.lore_characters.iter())
    }

    /// Curated relations for `name`; empty when none were authored.
    pub fn focal_relations(&self, name: &str) -> &[RawRelation] {
        self.relations.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// API fallback list for `name`; empty when none exists.
    pub fn api_related_for(&self, name: &str) -> &[ApiRelated] {
        self.api_related.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every faction tag carried by any entity, sorted.
    pub fn faction_tags(&self) -> BTreeSet<&str> {
        self.all_entities()
            .flat_map(|e| e.factions.iter().map(String::as_str))
            .collect()
    }

    /// Lower-case faction tags across all entities.
    pub fn normalize(&mut self) {
        for entity in self
            .champions
            .iter_mut()
            .chain(self.lore_characters.iter_mut())
        {
            entity.normalize_factions();
        }
    }

    /// Recompute metadata from current state.
    pub fn refresh_metadata(&mut self) {
        self.metadata.total_champions = self.champions.len();
        self.metadata.total_lore_characters = self.lore_characters.len();
        self.metadata.curated_entities = self.relations.values().filter(|r| !r.is_empty()).count();
        self.metadata.total_relations = self.relations.values().map(Vec::len).sum();
        self.metadata.total_factions = self.faction_tags().len();
        self.updated_at = Utc::now();
    }
}
