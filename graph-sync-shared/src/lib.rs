//! # Graph Sync Shared
//!
//! Shared types and data structures for the graph search synchronizer.
//! These types flow between the core synchronization engine and the
//! search index repository.

pub mod types;

pub use types::{
    ActionKey, ActionTable, Document, EntityHandle, IndexAction, IndexSpec, IndexSpecParseError,
    IndexTarget, PropertyValue,
};
