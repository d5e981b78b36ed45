//! Bulk submission of the final action table.
//!
//! The dispatcher owns the boundary between the transaction lifecycle and
//! the downstream index: whatever happens on the wire is reported through
//! logging and never propagates back to the commit path. No retry is
//! attempted; at-most-once delivery per transaction is the accepted
//! tradeoff, deferred to the client's own retry policy if any.

use std::sync::Arc;

use tracing::{debug, error};

use graph_sync_repository::{BulkIndexClient, BulkSummary, SearchIndexError};
use graph_sync_shared::{ActionTable, IndexAction};

/// How the bulk call is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Submit in the background without blocking the caller (default).
    #[default]
    Async,
    /// Block until the bulk response or failure is obtained.
    Sync,
}

/// Submits one transaction's deduplicated actions as a single bulk write.
pub struct Dispatcher {
    client: Arc<dyn BulkIndexClient>,
    mode: DispatchMode,
}

impl Dispatcher {
    /// Create a dispatcher over the given client.
    pub fn new(client: Arc<dyn BulkIndexClient>, mode: DispatchMode) -> Self {
        Self { client, mode }
    }

    /// The configured dispatch mode.
    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Dispatch the table's actions as one bulk request.
    ///
    /// An empty table issues no network call. In async mode the submission
    /// runs on a spawned task and this method returns immediately; the
    /// completion is reported from that task. Failures in either mode are
    /// logged and never returned: the owning transaction has already
    /// committed by the time dispatch runs.
    pub async fn dispatch(&self, table: ActionTable) {
        if table.is_empty() {
            debug!("No index actions to dispatch");
            return;
        }

        let actions = table.into_actions();
        match self.mode {
            DispatchMode::Sync => {
                let outcome = self.client.submit_bulk(&actions).await;
                report(&actions, outcome);
            }
            DispatchMode::Async => {
                let client = Arc::clone(&self.client);
                tokio::spawn(async move {
                    let outcome = client.submit_bulk(&actions).await;
                    report(&actions, outcome);
                });
            }
        }
    }
}

/// Report a bulk submission outcome.
///
/// Success is low severity; total failure and every rejected item are high
/// severity, keyed by (index, document id).
fn report(actions: &[IndexAction], outcome: Result<BulkSummary, SearchIndexError>) {
    match outcome {
        Ok(summary) if summary.all_succeeded() => {
            debug!(count = summary.total, "Bulk index update succeeded");
        }
        Ok(summary) => {
            error!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Bulk index update completed with failures"
            );
            for item in summary.failures() {
                error!(
                    index = %item.index,
                    doc_id = %item.doc_id,
                    error = %item
                        .error
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| "unknown".to_string()),
                    "Bulk item failed"
                );
            }
        }
        Err(e) => {
            error!(
                count = actions.len(),
                error = %e,
                "Bulk index update failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use graph_sync_repository::BulkItemResult;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Mock bulk client recording submissions.
    struct MockBulkClient {
        submissions: AtomicUsize,
        actions_seen: AtomicUsize,
        fail: bool,
        completed: Notify,
    }

    impl MockBulkClient {
        fn new(fail: bool) -> Self {
            Self {
                submissions: AtomicUsize::new(0),
                actions_seen: AtomicUsize::new(0),
                fail,
                completed: Notify::new(),
            }
        }
    }

    #[async_trait]
    impl BulkIndexClient for MockBulkClient {
        async fn submit_bulk(
            &self,
            actions: &[IndexAction],
        ) -> Result<BulkSummary, SearchIndexError> {
            self.submissions.fetch_add(1, Ordering::SeqCst);
            self.actions_seen.fetch_add(actions.len(), Ordering::SeqCst);
            self.completed.notify_one();

            if self.fail {
                return Err(SearchIndexError::bulk_index("simulated outage"));
            }
            Ok(BulkSummary {
                total: actions.len(),
                succeeded: actions.len(),
                failed: 0,
                results: actions
                    .iter()
                    .map(|a| BulkItemResult {
                        index: a.index().to_string(),
                        doc_id: a.doc_id().to_string(),
                        success: true,
                        error: None,
                    })
                    .collect(),
            })
        }
    }

    fn table_with(actions: Vec<IndexAction>) -> ActionTable {
        let mut table = ActionTable::new();
        table.merge(actions);
        table
    }

    #[tokio::test]
    async fn test_empty_table_issues_no_call() {
        let client = Arc::new(MockBulkClient::new(false));
        let dispatcher = Dispatcher::new(client.clone(), DispatchMode::Sync);

        dispatcher.dispatch(ActionTable::new()).await;

        assert_eq!(client.submissions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sync_dispatch_submits_once() {
        let client = Arc::new(MockBulkClient::new(false));
        let dispatcher = Dispatcher::new(client.clone(), DispatchMode::Sync);

        dispatcher
            .dispatch(table_with(vec![
                IndexAction::delete("person", "7"),
                IndexAction::delete("person", "8"),
            ]))
            .await;

        assert_eq!(client.submissions.load(Ordering::SeqCst), 1);
        assert_eq!(client.actions_seen.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_async_dispatch_submits_in_background() {
        let client = Arc::new(MockBulkClient::new(false));
        let dispatcher = Dispatcher::new(client.clone(), DispatchMode::Async);

        dispatcher
            .dispatch(table_with(vec![IndexAction::delete("person", "7")]))
            .await;

        client.completed.notified().await;
        assert_eq!(client.submissions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_downstream_failure_does_not_propagate() {
        let client = Arc::new(MockBulkClient::new(true));
        let dispatcher = Dispatcher::new(client.clone(), DispatchMode::Sync);

        // Must neither panic nor return an error.
        dispatcher
            .dispatch(table_with(vec![IndexAction::delete("person", "7")]))
            .await;

        assert_eq!(client.submissions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_async_failure_does_not_propagate() {
        let client = Arc::new(MockBulkClient::new(true));
        let dispatcher = Dispatcher::new(client.clone(), DispatchMode::Async);

        dispatcher
            .dispatch(table_with(vec![IndexAction::delete("person", "7")]))
            .await;

        client.completed.notified().await;
        assert_eq!(client.submissions.load(Ordering::SeqCst), 1);
    }
}
