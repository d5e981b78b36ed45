//! Resolved index actions.
//!
//! An `IndexAction` is the net outcome of one or more change events for a
//! single (index, document id) pair within a transaction.

use std::fmt;

use crate::types::Document;

/// The composite key an action is deduplicated by.
///
/// Plain value semantics: two keys are equal exactly when both the index
/// name and the document id match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionKey {
    /// The target index name.
    pub index: String,
    /// The external document id.
    pub doc_id: String,
}

impl ActionKey {
    /// Create a new action key.
    pub fn new(index: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            doc_id: doc_id.into(),
        }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.doc_id)
    }
}

/// A single resolved index mutation, immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexAction {
    /// Index or fully re-index a document with its current payload.
    Upsert {
        /// The target index name.
        index: String,
        /// The external document id.
        doc_id: String,
        /// The full document payload.
        document: Document,
    },
    /// Remove a document from an index.
    Delete {
        /// The target index name.
        index: String,
        /// The external document id.
        doc_id: String,
    },
}

impl IndexAction {
    /// Create an upsert action.
    pub fn upsert(
        index: impl Into<String>,
        doc_id: impl Into<String>,
        document: Document,
    ) -> Self {
        Self::Upsert {
            index: index.into(),
            doc_id: doc_id.into(),
            document,
        }
    }

    /// Create a delete action.
    pub fn delete(index: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self::Delete {
            index: index.into(),
            doc_id: doc_id.into(),
        }
    }

    /// The target index name.
    pub fn index(&self) -> &str {
        match self {
            Self::Upsert { index, .. } | Self::Delete { index, .. } => index,
        }
    }

    /// The external document id.
    pub fn doc_id(&self) -> &str {
        match self {
            Self::Upsert { doc_id, .. } | Self::Delete { doc_id, .. } => doc_id,
        }
    }

    /// The deduplication key for this action.
    pub fn key(&self) -> ActionKey {
        ActionKey::new(self.index(), self.doc_id())
    }

    /// Whether this action removes the document.
    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_has_value_semantics() {
        let delete = IndexAction::delete("person", "7");
        let upsert = IndexAction::upsert("person", "7", Document::new());

        assert_eq!(delete.key(), upsert.key());
        assert_ne!(delete.key(), IndexAction::delete("person", "8").key());
        assert_ne!(delete.key(), IndexAction::delete("user", "7").key());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(ActionKey::new("person", "7").to_string(), "person/7");
    }

    #[test]
    fn test_accessors() {
        let action = IndexAction::delete("person", "7");
        assert_eq!(action.index(), "person");
        assert_eq!(action.doc_id(), "7");
        assert!(action.is_delete());

        let action = IndexAction::upsert("person", "7", Document::new());
        assert!(!action.is_delete());
    }
}
