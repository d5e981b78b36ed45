//! Search index error types.
//!
//! This module defines the unified error type for all search index
//! operations surfaced by `BulkIndexClient` implementations.

use thiserror::Error;

/// Unified errors from search index operations.
///
/// Cloneable so per-item failures can be embedded in bulk summaries.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Failed to establish connection to the search index backend.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to serialize an action payload for the backend.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The bulk submission failed as a whole.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// A single item within a bulk submission was rejected.
    #[error("Bulk item error: {0}")]
    BulkItemError(String),

    /// Failed to parse a response from the search index backend.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Validation error (e.g., an empty action set).
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a bulk index error.
    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create a bulk item error.
    pub fn bulk_item(msg: impl Into<String>) -> Self {
        Self::BulkItemError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
