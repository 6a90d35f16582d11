//! Navigation tools over lore snapshots.
//!
//! Provides the relation-panel resolver (source merge, faction expansion,
//! categorization, grouping, target resolution), name search, content lint,
//! and DOT/Mermaid export of resolved panels.

pub mod category;
pub mod expand;
pub mod export;
pub mod group;
pub mod lint;
pub mod lookup;
pub mod merge;
pub mod panel_cache;
pub mod resolver;
pub mod search;
