//! Core types and storage for the lore relation browser.
//!
//! Provides the data model ([`model::LoreSnapshot`]), entity and relation types,
//! the relation-kind vocabulary ([`kind::RelationKind`]), JSON persistence,
//! a validated name index, a key-tag memoization cache, and configuration.

pub mod cache;
pub mod config;
pub mod error;
pub mod index;
pub mod kind;
pub mod model;
pub mod schema;
pub mod storage;
