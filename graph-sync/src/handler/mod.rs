//! Commit lifecycle entry points.
//!
//! The host transaction manager invokes the handler at well-defined points
//! around a commit. Neither entry point lets a synchronization failure
//! escape into the host's commit path: collection degrades to skipping
//! single events, and dispatch reports failures through logging only.

use tracing::debug;

use crate::collector;
use crate::dispatcher::Dispatcher;
use crate::source::ChangeSet;
use graph_sync_shared::{ActionTable, IndexSpec};

/// Translates committing transactions into bulk index updates.
///
/// One handler instance serves all transactions; the index spec is an
/// immutable snapshot and the handler holds no per-transaction state, so
/// concurrent transactions can run their passes independently.
pub struct SyncEventHandler {
    spec: IndexSpec,
    dispatcher: Dispatcher,
}

impl SyncEventHandler {
    /// Create a handler over the given spec and dispatcher.
    pub fn new(spec: IndexSpec, dispatcher: Dispatcher) -> Self {
        Self { spec, dispatcher }
    }

    /// The configured index spec.
    pub fn spec(&self) -> &IndexSpec {
        &self.spec
    }

    /// Collect the transaction's change-set into its final action table.
    ///
    /// Runs synchronously on the committing thread. Never fails; events
    /// that cannot be resolved are logged and skipped so the host commit
    /// is never jeopardized.
    pub fn before_commit<C: ChangeSet>(&self, change_set: &C) -> ActionTable {
        let table = collector::collect(change_set, &self.spec);
        debug!(actions = table.len(), "Collected transaction change-set");
        table
    }

    /// Dispatch the previously collected actions after the transaction
    /// committed.
    ///
    /// Infallible from the caller's perspective; dispatch failures are
    /// reported through logging.
    pub async fn after_commit(&self, table: ActionTable) {
        self.dispatcher.dispatch(table).await;
    }

    /// Discard collected actions for a rolled-back transaction.
    pub fn after_rollback(&self, table: ActionTable) {
        if !table.is_empty() {
            debug!(
                actions = table.len(),
                "Transaction rolled back, discarding collected actions"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::DispatchMode;
    use crate::source::memory::{MemoryChangeSet, MemoryEntity};
    use async_trait::async_trait;
    use graph_sync_repository::{BulkIndexClient, BulkSummary, SearchIndexError};
    use graph_sync_shared::IndexAction;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingClient {
        submissions: AtomicUsize,
    }

    #[async_trait]
    impl BulkIndexClient for CountingClient {
        async fn submit_bulk(
            &self,
            actions: &[IndexAction],
        ) -> Result<BulkSummary, SearchIndexError> {
            self.submissions.fetch_add(1, Ordering::SeqCst);
            Ok(BulkSummary {
                total: actions.len(),
                succeeded: actions.len(),
                failed: 0,
                results: Vec::new(),
            })
        }
    }

    fn handler(client: Arc<CountingClient>) -> SyncEventHandler {
        let spec = IndexSpec::new().with_target("Person", "person", Some("sketchID"));
        SyncEventHandler::new(spec, Dispatcher::new(client, DispatchMode::Sync))
    }

    #[tokio::test]
    async fn test_commit_round_trip() {
        let client = Arc::new(CountingClient {
            submissions: AtomicUsize::new(0),
        });
        let handler = handler(client.clone());

        let mut change_set = MemoryChangeSet::new();
        change_set.add_entity(
            MemoryEntity::new(1u64)
                .with_label("Person")
                .with_property("sketchID", 7i64),
        );
        change_set.record_created(1u64);

        let table = handler.before_commit(&change_set);
        assert_eq!(table.len(), 1);

        handler.after_commit(table).await;
        assert_eq!(client.submissions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rollback_dispatches_nothing() {
        let client = Arc::new(CountingClient {
            submissions: AtomicUsize::new(0),
        });
        let handler = handler(client.clone());

        let mut change_set = MemoryChangeSet::new();
        change_set.add_entity(
            MemoryEntity::new(1u64)
                .with_label("Person")
                .with_property("sketchID", 7i64),
        );
        change_set.record_created(1u64);

        let table = handler.before_commit(&change_set);
        handler.after_rollback(table);

        assert_eq!(client.submissions.load(Ordering::SeqCst), 0);
    }
}
