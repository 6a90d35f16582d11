//! Relation source merge: curated table first, API fallback otherwise.

use lore_core::kind::RelationKind;
use lore_core::model::{ApiRelated, Locale, RawRelation, RelationEntry};

/// Collapse authored relations to display entries for one locale.
pub fn collapse_notes(raw: &[RawRelation], locale: Locale) -> Vec<RelationEntry> {
    raw.iter().map(|r| r.localize(locale)).collect()
}

/// Build the candidate relation list for a focal entity.
///
/// A non-empty curated list supersedes the fallback entirely. Otherwise every
/// fallback item becomes a `related` entry without a note.
pub fn merge_sources(curated: &[RelationEntry], api_related: &[ApiRelated]) -> Vec<RelationEntry> {
    if !curated.is_empty() {
        return curated.to_vec();
    }
    api_related
        .iter()
        .map(|item| RelationEntry::new(item.name.clone(), RelationKind::Related))
        .collect()
}
