//! Content lint: authoring-time checks over a snapshot.
//!
//! The resolver degrades silently (unmatched factions, unknown targets, free-text
//! kinds). Lint is where those cases are surfaced so typos get fixed at the source.

use crate::lookup::EntityLookup;
use lore_core::index::NameIndex;
use lore_core::model::LoreSnapshot;
use serde::Serialize;
use std::collections::HashSet;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A single content issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum LintFinding {
    /// Faction-wide relation whose tag matches no champion other than the focal one.
    UnmatchedFaction { focal: String, faction: String },
    /// Relation kind outside the known vocabulary.
    UnknownKind {
        focal: String,
        target: String,
        kind: String,
    },
    /// Target present in neither universe; renders as a stub.
    DanglingTarget { focal: String, target: String },
    SelfRelation { focal: String },
    DuplicateTarget { focal: String, target: String },
    /// Display name shared by several entities; name joins are ambiguous.
    DuplicateName { name: String, ids: Vec<String> },
    /// Relation table key matching no entity.
    UnknownFocal { focal: String },
}

impl LintFinding {
    pub fn severity(&self) -> Severity {
        match self {
            LintFinding::DuplicateName { .. } => Severity::Error,
            LintFinding::UnmatchedFaction { .. }
            | LintFinding::UnknownKind { .. }
            | LintFinding::SelfRelation { .. }
            | LintFinding::DuplicateTarget { .. } => Severity::Warning,
            LintFinding::DanglingTarget { .. } | LintFinding::UnknownFocal { .. } => {
                Severity::Info
            }
        }
    }

    /// One-line human-readable description.
    pub fn message(&self) -> String {
        match self {
            LintFinding::UnmatchedFaction { focal, faction } => {
                format!("{}: faction '{}' matches no champion", focal, faction)
            }
            LintFinding::UnknownKind {
                focal,
                target,
                kind,
            } => format!(
                "{} -> {}: unrecognized relation kind '{}'",
                focal, target, kind
            ),
            LintFinding::DanglingTarget { focal, target } => {
                format!("{} -> {}: target not found, rendered as stub", focal, target)
            }
            LintFinding::SelfRelation { focal } => format!("{}: relation targets itself", focal),
            LintFinding::DuplicateTarget { focal, target } => {
                format!("{} -> {}: target listed more than once", focal, target)
            }
            LintFinding::DuplicateName { name, ids } => {
                format!("name '{}' is shared by: {}", name, ids.join(", "))
            }
            LintFinding::UnknownFocal { focal } => {
                format!("{}: relation table entry for unknown entity", focal)
            }
        }
    }
}

/// All findings for a snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    pub findings: Vec<LintFinding>,
}

impl LintReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity() == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Run every check over the snapshot.
///
/// Name collisions come first, then per-relation findings in focal-name order.
pub fn lint_snapshot(snapshot: &LoreSnapshot) -> LintReport {
    let mut findings = Vec::new();

    let index = NameIndex::from_snapshot(snapshot);
    for (name, refs) in index.duplicates() {
        findings.push(LintFinding::DuplicateName {
            name: name.to_string(),
            ids: refs.iter().map(|r| r.id.clone()).collect(),
        });
    }

    let lookup = EntityLookup::new(&snapshot.champions, &snapshot.lore_characters);

    for (focal, relations) in &snapshot.relations {
        if !lookup.contains(focal) {
            findings.push(LintFinding::UnknownFocal {
                focal: focal.clone(),
            });
        }

        let mut seen_targets = HashSet::new();
        for relation in relations {
            if relation.kind.is_faction_wide() {
                let tag = relation.target.trim().to_lowercase();
                let has_member = snapshot
                    .champions
                    .iter()
                    .any(|e| e.name != *focal && e.has_faction(&tag));
                if !has_member {
                    tracing::warn!("{}: faction '{}' matches no champion", focal, tag);
                    findings.push(LintFinding::UnmatchedFaction {
                        focal: focal.clone(),
                        faction: tag,
                    });
                }
                continue;
            }

            if relation.target == *focal {
                findings.push(LintFinding::SelfRelation {
                    focal: focal.clone(),
                });
            }
            if !seen_targets.insert(relation.target.as_str()) {
                findings.push(LintFinding::DuplicateTarget {
                    focal: focal.clone(),
                    target: relation.target.clone(),
                });
            }
            if relation.kind.is_custom() {
                findings.push(LintFinding::UnknownKind {
                    focal: focal.clone(),
                    target: relation.target.clone(),
                    kind: relation.kind.to_string(),
                });
            }
            if !lookup.contains(&relation.target) {
                findings.push(LintFinding::DanglingTarget {
                    focal: focal.clone(),
                    target: relation.target.clone(),
                });
            }
        }
    }

    LintReport { findings }
}
