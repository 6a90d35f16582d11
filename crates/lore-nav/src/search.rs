//! Search-as-you-type over champion and lore-character names.

use lore_core::model::{Entity, EntityKind, LoreSnapshot};
use std::cmp::Ordering;

/// Default minimum similarity for a fuzzy token match.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.6;

/// A search hit with relevance score.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub kind: EntityKind,
    pub id: String,
    pub name: String,
    pub title: Option<String>,
    pub score: f64,
}

/// Search parameters.
#[derive(Debug, Clone, Copy)]
pub struct SearchParams<'a> {
    pub query: &'a str,
    pub limit: usize,
    /// Fuzzy token matches below this normalized Levenshtein similarity are ignored.
    pub min_similarity: f64,
    /// Restrict results to one entity kind.
    pub kind_filter: Option<EntityKind>,
}

/// Search all entities by name with the default similarity cutoff.
pub fn search_entities(snapshot: &LoreSnapshot, query: &str, limit: usize) -> Vec<SearchHit> {
    search_with_params(
        snapshot,
        &SearchParams {
            query,
            limit,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            kind_filter: None,
        },
    )
}

/// Search with full parameters.
///
/// Results are ordered by score descending, then by name, so partial queries
/// typed one character at a time produce a stable ranking.
pub fn search_with_params(snapshot: &LoreSnapshot, params: &SearchParams) -> Vec<SearchHit> {
    let query = params.query.trim().to_lowercase();
    if query.is_empty() || params.limit == 0 {
        return Vec::new();
    }
    let query_terms: Vec<&str> = query.split_whitespace().collect();

    let mut hits: Vec<SearchHit> = snapshot
        .all_entities()
        .filter(|e| params.kind_filter.is_none_or(|k| e.kind == k))
        .filter_map(|entity| {
            let score = score_entity(entity, &query, &query_terms, params.min_similarity);
            (score > 0.0).then(|| SearchHit {
                kind: entity.kind,
                id: entity.id.clone(),
                name: entity.name.clone(),
                title: entity.title.clone(),
                score,
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    hits.truncate(params.limit);
    hits
}

/// Score one entity against a lower-cased query using several signals:
/// 1. Exact name match
/// 2. Name prefix, then word prefix, then substring
/// 3. Edit distance between query terms and name tokens (typos)
/// 4. Title substring (weak)
fn score_entity(entity: &Entity, query: &str, query_terms: &[&str], min_similarity: f64) -> f64 {
    let name = entity.name.to_lowercase();
    let name_tokens: Vec<&str> = name
        .split(|c: char| c.is_whitespace() || c == '-' || c == '\'')
        .filter(|t| !t.is_empty())
        .collect();

    let lexical: f64 = if name == query {
        1.5
    } else if name.starts_with(query) {
        1.0
    } else if name_tokens.iter().any(|t| t.starts_with(query)) {
        0.8
    } else if name.contains(query) {
        0.6
    } else {
        0.0
    };

    let mut fuzzy = 0.0;
    for term in query_terms {
        let best = name_tokens
            .iter()
            .map(|token| strsim::normalized_levenshtein(term, token))
            .filter(|sim| *sim >= min_similarity)
            .fold(0.0_f64, f64::max);
        fuzzy += best;
    }
    if !query_terms.is_empty() {
        fuzzy /= query_terms.len() as f64;
    }

    let title_bonus = if entity
        .title
        .as_deref()
        .is_some_and(|t| t.to_lowercase().contains(query))
    {
        0.3
    } else {
        0.0
    };

    lexical.max(fuzzy * 0.5).max(title_bonus)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> LoreSnapshot {
        let mut s = LoreSnapshot::new();
        s.insert_champion(Entity::champion("darius", "Darius").with_title("the Hand of Noxus"));
        s.insert_champion(Entity::champion("draven", "Draven").with_title("the Glorious Executioner"));
        s.insert_champion(Entity::champion("aurelion-sol", "Aurelion Sol"));
        s.insert_champion(Entity::champion("kaisa", "Kai'Sa"));
        s.insert_lore_character(Entity::lore_character("dariusz", "Dariusz the Elder"));
        s
    }

    #[test]
    fn test_prefix_ties_break_by_name() {
        let hits = search_entities(&snapshot(), "dar", 10);
        let names: Vec<&str> = hits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Darius", "Dariusz the Elder"]);
    }

    #[test]
    fn test_exact_match_ranks_first() {
        let hits = search_entities(&snapshot(), "darius", 10);
        assert_eq!(hits[0].id, "darius");
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn test_word_prefix_match() {
        let hits = search_entities(&snapshot(), "sol", 10);
        assert_eq!(hits[0].name, "Aurelion Sol");
    }

    #[test]
    fn test_typo_tolerance() {
        let hits = search_entities(&snapshot(), "draveen", 10);
        assert_eq!(hits[0].name, "Draven");
    }

    #[test]
    fn test_title_match() {
        let hits = search_entities(&snapshot(), "executioner", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Draven");
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        assert!(search_entities(&snapshot(), "   ", 10).is_empty());
    }

    #[test]
    fn test_kind_filter_and_limit() {
        let params = SearchParams {
            query: "dar",
            limit: 1,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            kind_filter: Some(EntityKind::LoreCharacter),
        };
        let hits = search_with_params(&snapshot(), &params);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, EntityKind::LoreCharacter);
    }
}
