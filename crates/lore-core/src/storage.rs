//! Read/write lore snapshot files from disk.

use crate::model::LoreSnapshot;
use crate::schema;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const LORE_DIR: &str = ".lore";
const SNAPSHOT_FILE: &str = "snapshot.json";

/// Get the path to the lore directory for a given content root.
pub fn lore_dir(root: &Path) -> PathBuf {
    root.join(LORE_DIR)
}

/// Get the path to the snapshot file for a given content root.
pub fn snapshot_file(root: &Path) -> PathBuf {
    lore_dir(root).join(SNAPSHOT_FILE)
}

/// Check if a snapshot exists for the given content root.
pub fn snapshot_exists(root: &Path) -> bool {
    snapshot_file(root).exists()
}

/// Load a snapshot from disk.
pub fn load(root: &Path) -> Result<LoreSnapshot> {
    let path = snapshot_file(root);
    let json = fs::read_to_string(&path)
        .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
    let snapshot = schema::from_json(&json)?;
    tracing::debug!(
        champions = snapshot.metadata.total_champions,
        lore_characters = snapshot.metadata.total_lore_characters,
        "loaded snapshot from {}",
        path.display()
    );
    Ok(snapshot)
}

/// Save a snapshot to disk, creating the .lore directory if needed.
pub fn save(root: &Path, snapshot: &LoreSnapshot) -> Result<()> {
    let dir = lore_dir(root);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create lore directory {}", dir.display()))?;

    let path = snapshot_file(root);
    let json = schema::to_json(snapshot)?;
    fs::write(&path, json)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))?;

    Ok(())
}
