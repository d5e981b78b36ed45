//! Bulk index client trait definition.
//!
//! This module defines the abstract interface for bulk index submissions,
//! allowing for different backend implementations (OpenSearch,
//! Elasticsearch, etc.).

use async_trait::async_trait;
use graph_sync_shared::IndexAction;

use crate::errors::SearchIndexError;
use crate::types::BulkSummary;

/// Abstracts the bulk-capable search index backend.
///
/// Implementations are injected into the dispatcher as
/// `Arc<dyn BulkIndexClient>` to enable dependency injection and testing
/// with mock implementations.
///
/// Connection management, request serialization, and connection-level
/// timeouts are implementation concerns; the core never retries a
/// submission.
#[async_trait]
pub trait BulkIndexClient: Send + Sync {
    /// Submit a set of index actions as one bulk network operation.
    ///
    /// # Arguments
    ///
    /// * `actions` - The deduplicated actions for one transaction
    ///
    /// # Returns
    ///
    /// * `Ok(BulkSummary)` - Aggregate and per-item outcomes; individual
    ///   items may still have failed
    /// * `Err(SearchIndexError)` - If the submission failed as a whole
    async fn submit_bulk(&self, actions: &[IndexAction]) -> Result<BulkSummary, SearchIndexError>;
}
