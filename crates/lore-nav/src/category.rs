//! Relation kind → display category mapping.
//!
//! Known kinds map through a static table. Free-text kinds fall through a
//! priority-ordered substring cascade; the first matching category wins and
//! anything left over lands in [`DisplayCategory::Other`].

use lore_core::kind::RelationKind;
use serde::Serialize;

/// Styling bucket for a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayCategory {
    Family,
    Romance,
    Alliance,
    Hostility,
    Rivalry,
    /// Catch-all for generic and unrecognized kinds.
    Other,
}

/// Icon token used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconToken {
    Family,
    Heart,
    Handshake,
    Swords,
    Bolt,
    Link,
    /// Catch-all kinds with a supernatural flavor (void, darkin, spirits...).
    Mystical,
}

/// Substring cascade for free-text kinds, in priority order.
const CASCADE: &[(DisplayCategory, &[&str])] = &[
    (
        DisplayCategory::Family,
        &[
            "family", "father", "mother", "brother", "sister", "husband", "wife",
        ],
    ),
    (DisplayCategory::Romance, &["love"]),
    (DisplayCategory::Alliance, &["ally"]),
    (
        DisplayCategory::Hostility,
        &["enemy", "conflict", "nemesis", "opposed"],
    ),
    (DisplayCategory::Rivalry, &["rival"]),
];

const MYSTICAL_MARKERS: &[&str] = &[
    "void", "darkin", "spirit", "god", "aspect", "self", "slave", "master",
];

impl DisplayCategory {
    pub const ALL: [DisplayCategory; 6] = [
        DisplayCategory::Family,
        DisplayCategory::Romance,
        DisplayCategory::Alliance,
        DisplayCategory::Hostility,
        DisplayCategory::Rivalry,
        DisplayCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisplayCategory::Family => "Family",
            DisplayCategory::Romance => "Romance",
            DisplayCategory::Alliance => "Alliance",
            DisplayCategory::Hostility => "Hostility",
            DisplayCategory::Rivalry => "Rivalry",
            DisplayCategory::Other => "Other",
        }
    }

    /// Hex color used for badges and graph edges.
    pub fn color_token(self) -> &'static str {
        match self {
            DisplayCategory::Family => "#d4a017",
            DisplayCategory::Romance => "#d6336c",
            DisplayCategory::Alliance => "#2f9e44",
            DisplayCategory::Hostility => "#c92a2a",
            DisplayCategory::Rivalry => "#e8590c",
            DisplayCategory::Other => "#868e96",
        }
    }

    fn icon(self) -> IconToken {
        match self {
            DisplayCategory::Family => IconToken::Family,
            DisplayCategory::Romance => IconToken::Heart,
            DisplayCategory::Alliance => IconToken::Handshake,
            DisplayCategory::Hostility => IconToken::Swords,
            DisplayCategory::Rivalry => IconToken::Bolt,
            DisplayCategory::Other => IconToken::Link,
        }
    }
}

impl IconToken {
    pub fn as_str(self) -> &'static str {
        match self {
            IconToken::Family => "family",
            IconToken::Heart => "heart",
            IconToken::Handshake => "handshake",
            IconToken::Swords => "swords",
            IconToken::Bolt => "bolt",
            IconToken::Link => "link",
            IconToken::Mystical => "mystical",
        }
    }
}

/// Map a relation kind to its display category. Total: never fails.
pub fn categorize(kind: &RelationKind) -> DisplayCategory {
    use RelationKind as K;
    match kind {
        K::Sibling
        | K::Parent
        | K::Child
        | K::Spouse
        | K::Ancestor
        | K::Descendant
        | K::AdoptiveFamily => DisplayCategory::Family,
        K::Lover | K::ExLover | K::UnrequitedLove => DisplayCategory::Romance,
        K::Friend
        | K::Mentor
        | K::Student
        | K::Ally
        | K::Comrade
        | K::FactionMember
        | K::Apprentice
        | K::Creator
        | K::Creation
        | K::Host => DisplayCategory::Alliance,
        K::Enemy
        | K::Nemesis
        | K::Betrayed
        | K::Betrayer
        | K::Victim
        | K::Killer
        | K::Hunts
        | K::HuntedBy
        | K::Corrupted
        | K::CorruptedBy
        | K::Predator
        | K::Prey
        | K::Hunter => DisplayCategory::Hostility,
        K::Rival | K::Strained | K::Tense => DisplayCategory::Rivalry,
        K::FactionWide | K::Related => DisplayCategory::Other,
        K::Custom(text) => categorize_free_text(text),
    }
}

/// Categorize a raw kind string as authored.
pub fn categorize_str(raw: &str) -> DisplayCategory {
    categorize(&RelationKind::parse(raw))
}

fn categorize_free_text(text: &str) -> DisplayCategory {
    let lower = text.to_lowercase();
    CASCADE
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| lower.contains(n)))
        .map_or(DisplayCategory::Other, |(category, _)| *category)
}

/// Icon for a relation kind. Catch-all kinds with a mystical marker get
/// [`IconToken::Mystical`]; everything else uses its category icon.
pub fn icon(kind: &RelationKind) -> IconToken {
    let category = categorize(kind);
    if category == DisplayCategory::Other && is_mystical(kind.as_str()) {
        IconToken::Mystical
    } else {
        category.icon()
    }
}

fn is_mystical(text: &str) -> bool {
    let lower = text.to_lowercase();
    MYSTICAL_MARKERS.iter().any(|m| lower.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kinds_use_table() {
        assert_eq!(categorize(&RelationKind::Sibling), DisplayCategory::Family);
        assert_eq!(categorize(&RelationKind::ExLover), DisplayCategory::Romance);
        assert_eq!(
            categorize(&RelationKind::FactionMember),
            DisplayCategory::Alliance
        );
        assert_eq!(
            categorize(&RelationKind::CorruptedBy),
            DisplayCategory::Hostility
        );
        assert_eq!(categorize(&RelationKind::Tense), DisplayCategory::Rivalry);
        assert_eq!(categorize(&RelationKind::Related), DisplayCategory::Other);
    }

    #[test]
    fn test_free_text_cascade() {
        assert_eq!(categorize_str("step-father"), DisplayCategory::Family);
        assert_eq!(categorize_str("former-love-interest"), DisplayCategory::Romance);
        assert_eq!(categorize_str("reluctant-ally"), DisplayCategory::Alliance);
        assert_eq!(categorize_str("sworn-enemy"), DisplayCategory::Hostility);
        assert_eq!(categorize_str("political-rival"), DisplayCategory::Rivalry);
        assert_eq!(categorize_str("acquaintance"), DisplayCategory::Other);
    }

    #[test]
    fn test_cascade_priority_first_match_wins() {
        // family is checked before hostility and rivalry
        assert_eq!(categorize_str("brother-turned-enemy"), DisplayCategory::Family);
        // alliance is checked before rivalry
        assert_eq!(categorize_str("ally-and-rival"), DisplayCategory::Alliance);
        // romance is checked before hostility
        assert_eq!(categorize_str("love-enemy"), DisplayCategory::Romance);
    }

    #[test]
    fn test_mystical_icon_only_for_catch_all() {
        assert_eq!(icon(&RelationKind::parse("void-bond")), IconToken::Mystical);
        assert_eq!(icon(&RelationKind::parse("darkin-host")), IconToken::Mystical);
        assert_eq!(icon(&RelationKind::Related), IconToken::Link);
        // "master" appears but alliance wins first
        assert_eq!(
            icon(&RelationKind::parse("ally-of-master")),
            IconToken::Handshake
        );
        assert_eq!(icon(&RelationKind::Sibling), IconToken::Family);
    }

    #[test]
    fn test_categorization_is_total_over_fuzz_set() {
        let syllables = [
            "", "a", "void", "ally", "rival", "xq", "-", "love", "Ω", "enemy", "sister", "7",
            " ", "god", "host", "kin",
        ];
        let mut count = 0;
        for a in syllables {
            for b in syllables {
                for c in syllables {
                    let raw = format!("{a}{b}-{c}");
                    let category = categorize_str(&raw);
                    assert!(DisplayCategory::ALL.contains(&category), "{raw}");
                    let _ = icon(&RelationKind::parse(&raw));
                    count += 1;
                }
            }
        }
        assert_eq!(count, syllables.len().pow(3));
        for kind in RelationKind::KNOWN {
            assert!(DisplayCategory::ALL.contains(&categorize(kind)));
        }
    }
}
