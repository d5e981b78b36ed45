//! OpenSearch backend for the graph search synchronizer.

mod client;

pub use client::OpenSearchClient;
