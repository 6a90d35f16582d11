//! Memoized relation panels keyed by (focal entity, locale).
//!
//! Each cached panel is tagged with the entity names it shows (including
//! faction-expanded members) and the faction tags its inputs mention, so
//! content edits can evict exactly the affected panels.

use crate::resolver::{RelationGraphResolver, RelationPanel, ResolverInput};
use lore_core::cache::TaggedCache;
use lore_core::model::Locale;
use std::collections::BTreeSet;
use std::convert::Infallible;

type PanelKey = (String, Locale);

pub fn entity_tag(name: &str) -> String {
    format!("entity:{}", name)
}

pub fn faction_tag(faction: &str) -> String {
    format!("faction:{}", faction.trim().to_lowercase())
}

pub fn locale_tag(locale: Locale) -> String {
    format!("locale:{}", locale)
}

/// Bounded cache of resolved panels.
pub struct PanelCache {
    inner: TaggedCache<PanelKey, RelationPanel>,
}

impl PanelCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: TaggedCache::new(capacity),
        }
    }

    /// Return the cached panel for the input's (focal, locale), resolving on a miss.
    pub fn get_or_resolve(
        &mut self,
        resolver: &RelationGraphResolver<'_>,
        input: &ResolverInput<'_>,
    ) -> &RelationPanel {
        let key = (input.focal_name.to_string(), input.locale);
        match self.inner.get_or_try_insert_tagged_with(key, || {
            let panel = resolver.resolve(input);
            let tags = panel_tags(input, &panel);
            Ok::<_, Infallible>((panel, tags))
        }) {
            Ok(panel) => panel,
            Err(never) => match never {},
        }
    }

    /// Evict every panel that mentions `name` as focal entity or target.
    pub fn invalidate_entity(&mut self, name: &str) -> usize {
        self.inner.invalidate_tag(&entity_tag(name))
    }

    /// Evict every panel whose relations expand `faction`.
    ///
    /// Membership changes do not show up in a panel's inputs, so callers that
    /// edit an entity's factions should invalidate each affected faction too.
    pub fn invalidate_faction(&mut self, faction: &str) -> usize {
        self.inner.invalidate_tag(&faction_tag(faction))
    }

    pub fn invalidate_locale(&mut self, locale: Locale) -> usize {
        self.inner.invalidate_tag(&locale_tag(locale))
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// (hits, misses)
    pub fn stats(&self) -> (u64, u64) {
        self.inner.stats()
    }
}

fn panel_tags(input: &ResolverInput<'_>, panel: &RelationPanel) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    tags.insert(entity_tag(input.focal_name));
    tags.insert(locale_tag(input.locale));
    for relation in input.raw_relations {
        if relation.kind.is_faction_wide() {
            tags.insert(faction_tag(&relation.target));
        } else {
            tags.insert(entity_tag(&relation.target));
        }
    }
    for item in input.api_related {
        tags.insert(entity_tag(&item.name));
    }
    for relation in panel.entries() {
        tags.insert(entity_tag(&relation.target_name));
    }
    tags
}
