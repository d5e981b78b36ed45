//! Configuration and dependency initialization for the synchronizer.

use std::env;
use std::sync::Arc;

use tracing::info;

use crate::dispatcher::{DispatchMode, Dispatcher};
use crate::handler::SyncEventHandler;
use crate::SyncError;
use graph_sync_repository::OpenSearchClient;
use graph_sync_shared::IndexSpec;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Runtime configuration for the synchronizer.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// The OpenSearch server URL.
    pub opensearch_url: String,
    /// The label to index mapping, with indexing options applied.
    pub index_spec: IndexSpec,
    /// Whether bulk dispatch runs in the background.
    pub dispatch_mode: DispatchMode,
}

impl SyncConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GRAPH_SYNC_OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `GRAPH_SYNC_INDEX_SPEC`: required label mapping, e.g. `people:Person(sketchID),users:User`
    /// - `GRAPH_SYNC_ASYNC_DISPATCH`: submit bulk writes in the background (default: true)
    /// - `GRAPH_SYNC_INCLUDE_IDENTITY`: embed the resolved identity in indexed payloads (default: false)
    ///
    /// # Returns
    ///
    /// * `Ok(SyncConfig)` - Parsed configuration
    /// * `Err(SyncError)` - If `GRAPH_SYNC_INDEX_SPEC` is missing or malformed
    pub fn from_env() -> Result<Self, SyncError> {
        let opensearch_url = env::var("GRAPH_SYNC_OPENSEARCH_URL")
            .unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());

        let raw_spec = env::var("GRAPH_SYNC_INDEX_SPEC").map_err(|_| {
            SyncError::config("GRAPH_SYNC_INDEX_SPEC environment variable is required")
        })?;
        let index_spec: IndexSpec = raw_spec
            .parse()
            .map_err(|e| SyncError::config(format!("Invalid GRAPH_SYNC_INDEX_SPEC: {}", e)))?;

        let dispatch_mode = if env_flag("GRAPH_SYNC_ASYNC_DISPATCH", true) {
            DispatchMode::Async
        } else {
            DispatchMode::Sync
        };
        let include_identity = env_flag("GRAPH_SYNC_INCLUDE_IDENTITY", false);

        Ok(Self {
            opensearch_url,
            index_spec: index_spec.with_include_identity(include_identity),
            dispatch_mode,
        })
    }
}

/// Read a boolean environment flag, defaulting when unset or unparsable.
fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().to_lowercase().parse::<bool>().ok())
        .unwrap_or(default)
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured handler ready to be registered with the host.
    pub handler: SyncEventHandler,
}

impl Dependencies {
    /// Wire the OpenSearch client, dispatcher, and handler.
    ///
    /// # Arguments
    ///
    /// * `config` - The validated runtime configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(SyncError)` - If the client cannot be constructed
    pub fn new(config: SyncConfig) -> Result<Self, SyncError> {
        info!(
            opensearch_url = %config.opensearch_url,
            mapped_labels = config.index_spec.len(),
            dispatch_mode = ?config.dispatch_mode,
            "Initializing dependencies"
        );

        let client = OpenSearchClient::new(&config.opensearch_url)?;
        let dispatcher = Dispatcher::new(Arc::new(client), config.dispatch_mode);
        let handler = SyncEventHandler::new(config.index_spec, dispatcher);

        Ok(Self { handler })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_flag_parsing() {
        // Unset falls back to the default.
        env::remove_var("GRAPH_SYNC_TEST_FLAG");
        assert!(env_flag("GRAPH_SYNC_TEST_FLAG", true));
        assert!(!env_flag("GRAPH_SYNC_TEST_FLAG", false));

        env::set_var("GRAPH_SYNC_TEST_FLAG", "false");
        assert!(!env_flag("GRAPH_SYNC_TEST_FLAG", true));

        env::set_var("GRAPH_SYNC_TEST_FLAG", "not-a-bool");
        assert!(env_flag("GRAPH_SYNC_TEST_FLAG", true));

        env::remove_var("GRAPH_SYNC_TEST_FLAG");
    }

    #[test]
    fn test_from_env_reads_prefixed_variables() {
        env::set_var("GRAPH_SYNC_INDEX_SPEC", "people:Person(sketchID)");
        env::set_var("GRAPH_SYNC_ASYNC_DISPATCH", "false");
        env::set_var("GRAPH_SYNC_INCLUDE_IDENTITY", "true");

        let config = SyncConfig::from_env().unwrap();

        assert_eq!(config.opensearch_url, DEFAULT_OPENSEARCH_URL);
        assert_eq!(config.dispatch_mode, DispatchMode::Sync);
        assert!(config.index_spec.include_identity());
        assert_eq!(config.index_spec.target("Person").unwrap().index_name, "people");

        env::remove_var("GRAPH_SYNC_INDEX_SPEC");
        env::remove_var("GRAPH_SYNC_ASYNC_DISPATCH");
        env::remove_var("GRAPH_SYNC_INCLUDE_IDENTITY");
    }
}
