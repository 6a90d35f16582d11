//! Relation kinds between lore entities.
//!
//! Authored content uses free-text kind strings. Known kinds parse into a
//! closed set of variants; anything else is kept as [`RelationKind::Custom`]
//! so it still renders, and is reported by content lint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of relationship from a focal entity to a target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationKind {
    // Kinship and marriage
    Sibling,
    Parent,
    Child,
    Spouse,
    Ancestor,
    Descendant,
    AdoptiveFamily,
    // Romance
    Lover,
    ExLover,
    UnrequitedLove,
    // Alliance
    Friend,
    Mentor,
    Student,
    Ally,
    Comrade,
    FactionMember,
    Apprentice,
    Creator,
    Creation,
    Host,
    // Hostility
    Enemy,
    Nemesis,
    Betrayed,
    Betrayer,
    Victim,
    Killer,
    Hunts,
    HuntedBy,
    Corrupted,
    CorruptedBy,
    Predator,
    Prey,
    Hunter,
    // Rivalry
    Rival,
    Strained,
    Tense,
    /// Placeholder that expands to every member of the named faction.
    FactionWide,
    /// Generic kind used for API fallback relations.
    Related,
    /// Free-text kind outside the known vocabulary (normalized form).
    Custom(String),
}

impl RelationKind {
    /// Every known (non-custom) kind, in declaration order.
    pub const KNOWN: &'static [RelationKind] = &[
        RelationKind::Sibling,
        RelationKind::Parent,
        RelationKind::Child,
        RelationKind::Spouse,
        RelationKind::Ancestor,
        RelationKind::Descendant,
        RelationKind::AdoptiveFamily,
        RelationKind::Lover,
        RelationKind::ExLover,
        RelationKind::UnrequitedLove,
        RelationKind::Friend,
        RelationKind::Mentor,
        RelationKind::Student,
        RelationKind::Ally,
        RelationKind::Comrade,
        RelationKind::FactionMember,
        RelationKind::Apprentice,
        RelationKind::Creator,
        RelationKind::Creation,
        RelationKind::Host,
        RelationKind::Enemy,
        RelationKind::Nemesis,
        RelationKind::Betrayed,
        RelationKind::Betrayer,
        RelationKind::Victim,
        RelationKind::Killer,
        RelationKind::Hunts,
        RelationKind::HuntedBy,
        RelationKind::Corrupted,
        RelationKind::CorruptedBy,
        RelationKind::Predator,
        RelationKind::Prey,
        RelationKind::Hunter,
        RelationKind::Rival,
        RelationKind::Strained,
        RelationKind::Tense,
        RelationKind::FactionWide,
        RelationKind::Related,
    ];

    /// Canonical kebab-case string for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            RelationKind::Sibling => "sibling",
            RelationKind::Parent => "parent",
            RelationKind::Child => "child",
            RelationKind::Spouse => "spouse",
            RelationKind::Ancestor => "ancestor",
            RelationKind::Descendant => "descendant",
            RelationKind::AdoptiveFamily => "adoptive-family",
            RelationKind::Lover => "lover",
            RelationKind::ExLover => "ex-lover",
            RelationKind::UnrequitedLove => "unrequited-love",
            RelationKind::Friend => "friend",
            RelationKind::Mentor => "mentor",
            RelationKind::Student => "student",
            RelationKind::Ally => "ally",
            RelationKind::Comrade => "comrade",
            RelationKind::FactionMember => "faction-member",
            RelationKind::Apprentice => "apprentice",
            RelationKind::Creator => "creator",
            RelationKind::Creation => "creation",
            RelationKind::Host => "host",
            RelationKind::Enemy => "enemy",
            RelationKind::Nemesis => "nemesis",
            RelationKind::Betrayed => "betrayed",
            RelationKind::Betrayer => "betrayer",
            RelationKind::Victim => "victim",
            RelationKind::Killer => "killer",
            RelationKind::Hunts => "hunts",
            RelationKind::HuntedBy => "hunted-by",
            RelationKind::Corrupted => "corrupted",
            RelationKind::CorruptedBy => "corrupted-by",
            RelationKind::Predator => "predator",
            RelationKind::Prey => "prey",
            RelationKind::Hunter => "hunter",
            RelationKind::Rival => "rival",
            RelationKind::Strained => "strained",
            RelationKind::Tense => "tense",
            RelationKind::FactionWide => "faction-wide",
            RelationKind::Related => "related",
            RelationKind::Custom(s) => s,
        }
    }

    /// Parse a kind string. Never fails: unknown strings become `Custom`.
    ///
    /// Input is trimmed, lower-cased, and `_`/space are folded to `-`.
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize(raw);
        Self::KNOWN
            .iter()
            .find(|k| k.as_str() == normalized)
            .cloned()
            .unwrap_or(RelationKind::Custom(normalized))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, RelationKind::Custom(_))
    }

    pub fn is_faction_wide(&self) -> bool {
        *self == RelationKind::FactionWide
    }
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RelationKind {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for RelationKind {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<RelationKind> for String {
    fn from(kind: RelationKind) -> Self {
        match kind {
            RelationKind::Custom(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kinds_roundtrip_through_str() {
        for kind in RelationKind::KNOWN {
            assert_eq!(&RelationKind::parse(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_parse_normalizes_case_and_separators() {
        assert_eq!(RelationKind::parse("  Hunted_By "), RelationKind::HuntedBy);
        assert_eq!(RelationKind::parse("Faction Wide"), RelationKind::FactionWide);
    }

    #[test]
    fn test_unknown_kind_is_custom() {
        let kind = RelationKind::parse("Sworn-Brother");
        assert_eq!(kind, RelationKind::Custom("sworn-brother".to_string()));
        assert!(kind.is_custom());
        assert_eq!(kind.to_string(), "sworn-brother");
    }

    #[test]
    fn test_serde_uses_plain_strings() {
        let json = serde_json::to_string(&RelationKind::ExLover).unwrap();
        assert_eq!(json, "\"ex-lover\"");
        let kind: RelationKind = serde_json::from_str("\"void-touched\"").unwrap();
        assert_eq!(kind, RelationKind::Custom("void-touched".to_string()));
    }
}
