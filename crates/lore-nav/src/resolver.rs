//! Relation panel resolver.
//!
//! Turns a focal entity's raw relations into display-ready groups:
//! locale collapse → source merge → faction expansion → dedup →
//! categorization → target resolution → grouping.
//!
//! Resolution is pure. It never fails; empty inputs yield an empty panel.
//! The focal entity never appears among its own targets, whichever source named it.

use crate::category::{self, DisplayCategory, IconToken};
use crate::expand::{dedup_by_target, expand_factions};
use crate::group::{RelationGroup, group_relations};
use crate::lookup::{EntityLookup, TargetResolution};
use crate::merge::{collapse_notes, merge_sources};
use lore_core::kind::RelationKind;
use lore_core::model::{ApiRelated, Entity, Locale, LoreSnapshot, RawRelation};
use serde::Serialize;

/// Default group size above which a group is dense.
pub const DEFAULT_DENSE_THRESHOLD: usize = 3;

/// Everything the resolver needs about one focal entity.
#[derive(Debug, Clone, Copy)]
pub struct ResolverInput<'a> {
    pub focal_name: &'a str,
    pub raw_relations: &'a [RawRelation],
    pub api_related: &'a [ApiRelated],
    pub locale: Locale,
}

/// A relation ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRelation {
    pub target_name: String,
    pub relation_type: RelationKind,
    pub category: DisplayCategory,
    pub icon: IconToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub resolution: TargetResolution,
}

/// The resolved relationship panel of one focal entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationPanel {
    pub focal_name: String,
    pub locale: Locale,
    pub groups: Vec<RelationGroup>,
    /// Faction-wide tags that expanded to nothing. Empty in well-formed content.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmatched_factions: Vec<String>,
}

impl RelationPanel {
    /// All resolved relations in display order.
    pub fn entries(&self) -> impl Iterator<Item = &ResolvedRelation> {
        self.groups.iter().flat_map(|g| g.entries.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> ResolverInput<'a> {
    /// Gather a focal entity's relation sources from a snapshot.
    pub fn from_snapshot(snapshot: &'a LoreSnapshot, focal_name: &'a str, locale: Locale) -> Self {
        Self {
            focal_name,
            raw_relations: snapshot.focal_relations(focal_name),
            api_related: snapshot.api_related_for(focal_name),
            locale,
        }
    }
}

/// Resolves relation panels against fixed champion and lore-character universes.
pub struct RelationGraphResolver<'a> {
    champions: &'a [Entity],
    lookup: EntityLookup<'a>,
    dense_threshold: usize,
}

impl<'a> RelationGraphResolver<'a> {
    pub fn new(champions: &'a [Entity], lore_characters: &'a [Entity]) -> Self {
        Self {
            champions,
            lookup: EntityLookup::new(champions, lore_characters),
            dense_threshold: DEFAULT_DENSE_THRESHOLD,
        }
    }

    pub fn from_snapshot(snapshot: &'a LoreSnapshot) -> Self {
        Self::new(&snapshot.champions, &snapshot.lore_characters)
    }

    pub fn with_dense_threshold(mut self, threshold: usize) -> Self {
        self.dense_threshold = threshold;
        self
    }

    /// Resolve the panel for one focal entity.
    pub fn resolve(&self, input: &ResolverInput<'_>) -> RelationPanel {
        let curated = collapse_notes(input.raw_relations, input.locale);
        let merged = merge_sources(&curated, input.api_related);
        let expansion = expand_factions(merged, input.focal_name, self.champions);
        let relations: Vec<_> = dedup_by_target(expansion.relations)
            .into_iter()
            .filter(|entry| entry.target_name != input.focal_name)
            .collect();

        let resolved: Vec<ResolvedRelation> = relations
            .into_iter()
            .map(|entry| ResolvedRelation {
                category: category::categorize(&entry.relation_type),
                icon: category::icon(&entry.relation_type),
                resolution: self.lookup.resolve(&entry.target_name),
                target_name: entry.target_name,
                relation_type: entry.relation_type,
                note: entry.note,
            })
            .collect();

        tracing::debug!(
            focal = input.focal_name,
            relations = resolved.len(),
            unmatched_factions = expansion.unmatched.len(),
            "resolved relation panel"
        );

        RelationPanel {
            focal_name: input.focal_name.to_string(),
            locale: input.locale,
            groups: group_relations(resolved, self.dense_threshold),
            unmatched_factions: expansion.unmatched,
        }
    }
}

/// Resolve a focal entity's panel straight from a snapshot.
pub fn resolve_for_snapshot(
    snapshot: &LoreSnapshot,
    focal_name: &str,
    locale: Locale,
    dense_threshold: usize,
) -> RelationPanel {
    RelationGraphResolver::from_snapshot(snapshot)
        .with_dense_threshold(dense_threshold)
        .resolve(&ResolverInput::from_snapshot(snapshot, focal_name, locale))
}
