//! Client interface definitions for the search index repository.

mod bulk_index_client;

pub use bulk_index_client::BulkIndexClient;
