//! # Graph Sync
//!
//! Keeps a full-text search index synchronized with a primary graph store.
//! The host transaction manager hands each committing transaction's
//! change-set to the [`handler::SyncEventHandler`], which translates it into
//! a minimal, deduplicated set of index actions and dispatches them as one
//! bulk write, without blocking or jeopardizing the committed transaction.
//!
//! ## Architecture
//!
//! 1. **Collector**: folds a transaction's change events into one
//!    deduplicated action table
//! 2. **Resolver**: maps a single change event to its per-index actions
//! 3. **Mapper / Identity**: produce the document payload and stable
//!    document id for an entity
//! 4. **Dispatcher**: submits the final action set as one bulk request,
//!    synchronously or in the background
//!
//! ## Modules
//!
//! - [`source`]: the host transaction manager interface (change-set traits)
//! - [`identity`]: stable external document id resolution
//! - [`mapper`]: entity to document payload conversion
//! - [`resolver`]: change event to index action resolution
//! - [`collector`]: per-transaction folding and deduplication
//! - [`dispatcher`]: bulk submission and completion reporting
//! - [`handler`]: commit lifecycle entry points
//! - [`config`]: configuration and dependency initialization

pub mod collector;
pub mod config;
pub mod dispatcher;
pub mod handler;
pub mod identity;
pub mod mapper;
pub mod resolver;
pub mod source;

pub use config::{Dependencies, SyncConfig};
pub use dispatcher::{DispatchMode, Dispatcher};
pub use handler::SyncEventHandler;

use thiserror::Error;

/// Errors that can occur during synchronizer initialization.
///
/// Runtime resolution and dispatch failures never surface here; they are
/// recovered or logged inside the components, per the lifecycle boundary
/// policy.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Search index client error.
    #[error("Search index client error: {0}")]
    Client(#[from] graph_sync_repository::SearchIndexError),
}

impl SyncError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
