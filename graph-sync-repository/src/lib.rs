//! # Graph Sync Repository
//!
//! This crate provides the trait and implementation for submitting bulk
//! index mutations to the downstream search index. It includes definitions
//! for errors, the client interface, and a concrete implementation for
//! OpenSearch.

pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use errors::SearchIndexError;
pub use interfaces::BulkIndexClient;
pub use opensearch::OpenSearchClient;
pub use types::{BulkItemResult, BulkSummary};
