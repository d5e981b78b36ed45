//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `BulkIndexClient`
//! using the OpenSearch Rust client. All actions for one transaction are
//! submitted as a single `_bulk` request.

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    BulkParts, OpenSearch,
};
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use graph_sync_shared::IndexAction;

use crate::errors::SearchIndexError;
use crate::interfaces::BulkIndexClient;
use crate::types::{BulkItemResult, BulkSummary};

/// OpenSearch implementation of the bulk index client.
///
/// # Example
///
/// ```ignore
/// use graph_sync_repository::{BulkIndexClient, OpenSearchClient};
/// use graph_sync_shared::IndexAction;
///
/// let client = OpenSearchClient::new("http://localhost:9200")?;
/// let summary = client.submit_bulk(&[IndexAction::delete("person", "7")]).await?;
/// assert!(summary.all_succeeded());
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If connection setup fails
    pub fn new(url: &str) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch client");

        Ok(Self { client })
    }

    /// Build the NDJSON body lines for a bulk request.
    ///
    /// Each upsert contributes an `index` operation line followed by its
    /// document payload; each delete contributes a single `delete`
    /// operation line.
    fn bulk_body(actions: &[IndexAction]) -> Result<Vec<Value>, SearchIndexError> {
        let mut lines = Vec::with_capacity(actions.len() * 2);
        for action in actions {
            match action {
                IndexAction::Upsert {
                    index,
                    doc_id,
                    document,
                } => {
                    lines.push(json!({ "index": { "_index": index, "_id": doc_id } }));
                    let payload = serde_json::to_value(document)
                        .map_err(|e| SearchIndexError::serialization(e.to_string()))?;
                    lines.push(payload);
                }
                IndexAction::Delete { index, doc_id } => {
                    lines.push(json!({ "delete": { "_index": index, "_id": doc_id } }));
                }
            }
        }
        Ok(lines)
    }

    /// Parse a `_bulk` response body into a summary.
    ///
    /// Each item in the response's `items` array is an object with a single
    /// operation key (`index` or `delete`) whose value carries `_index`,
    /// `_id`, `status`, and an `error` object when the item was rejected.
    /// A `delete` reporting 404 counts as success: the document was already
    /// absent.
    fn parse_bulk_response(body: &Value) -> Result<BulkSummary, SearchIndexError> {
        let items = body["items"]
            .as_array()
            .ok_or_else(|| SearchIndexError::parse("bulk response missing 'items' array"))?;

        let mut results = Vec::with_capacity(items.len());
        let mut succeeded = 0;
        let mut failed = 0;

        for item in items {
            let (operation, detail) = item
                .as_object()
                .and_then(|o| o.iter().next())
                .ok_or_else(|| SearchIndexError::parse("empty bulk response item"))?;

            let index = detail["_index"].as_str().unwrap_or_default().to_string();
            let doc_id = detail["_id"].as_str().unwrap_or_default().to_string();
            let status = detail["status"].as_u64().unwrap_or(0);

            let missing_delete = operation == "delete" && status == 404;
            let success = (200..300).contains(&status) || missing_delete;

            let item_error = if success {
                None
            } else {
                let reason = match detail.get("error") {
                    Some(err) => format!(
                        "{}: {}",
                        err["type"].as_str().unwrap_or("unknown"),
                        err["reason"].as_str().unwrap_or("no reason given")
                    ),
                    None => format!("status {}", status),
                };
                Some(SearchIndexError::bulk_item(reason))
            };

            if success {
                succeeded += 1;
            } else {
                failed += 1;
            }
            results.push(BulkItemResult {
                index,
                doc_id,
                success,
                error: item_error,
            });
        }

        Ok(BulkSummary {
            total: results.len(),
            succeeded,
            failed,
            results,
        })
    }
}

#[async_trait]
impl BulkIndexClient for OpenSearchClient {
    /// Submit all actions as one `_bulk` request.
    ///
    /// # Arguments
    ///
    /// * `actions` - The deduplicated actions for one transaction
    ///
    /// # Returns
    ///
    /// * `Ok(BulkSummary)` - Per-item outcomes parsed from the bulk response
    /// * `Err(SearchIndexError)` - If the request could not be submitted or
    ///   the response could not be parsed
    async fn submit_bulk(&self, actions: &[IndexAction]) -> Result<BulkSummary, SearchIndexError> {
        if actions.is_empty() {
            return Err(SearchIndexError::validation(
                "bulk submission requires at least one action",
            ));
        }

        let body: Vec<JsonBody<Value>> = Self::bulk_body(actions)?
            .into_iter()
            .map(JsonBody::new)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::None)
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let summary = Self::parse_bulk_response(&body)?;
        debug!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk request completed"
        );
        Ok(summary)
    }
}
