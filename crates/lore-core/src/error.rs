//! Typed errors raised at the data-access boundary.

/// Errors for lookups and validation that callers may want to match on.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LoreError {
    #[error("no entity named '{0}'")]
    UnknownName(String),
    #[error("name '{name}' is shared by {} entities: {}", ids.len(), ids.join(", "))]
    AmbiguousName { name: String, ids: Vec<String> },
    #[error("snapshot version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },
    #[error("unsupported locale '{0}' (expected one of: en, pl)")]
    UnknownLocale(String),
}
