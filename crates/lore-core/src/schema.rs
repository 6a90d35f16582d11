//! JSON schema validation and version handling for snapshot files.

use crate::error::LoreError;
use crate::model::LoreSnapshot;
use anyhow::{Context, Result};

pub const CURRENT_VERSION: &str = "1.0.0";

/// Validate a snapshot's schema version.
pub fn validate_version(snapshot: &LoreSnapshot) -> Result<(), LoreError> {
    if snapshot.version != CURRENT_VERSION {
        return Err(LoreError::VersionMismatch {
            expected: CURRENT_VERSION.to_string(),
            found: snapshot.version.clone(),
        });
    }
    Ok(())
}

/// Serialize a snapshot to a pretty-printed JSON string.
pub fn to_json(snapshot: &LoreSnapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot to JSON")
}

/// Deserialize a snapshot from a JSON string.
///
/// Faction tags are normalized to lower case and metadata is recomputed,
/// so hand-edited files behave the same as generated ones.
pub fn from_json(json: &str) -> Result<LoreSnapshot> {
    let mut snapshot: LoreSnapshot =
        serde_json::from_str(json).context("failed to deserialize snapshot from JSON")?;
    validate_version(&snapshot)?;
    snapshot.normalize();
    snapshot.refresh_metadata();
    Ok(snapshot)
}
