//! Per-transaction action deduplication table.

use std::collections::HashMap;

use crate::types::{ActionKey, IndexAction};

/// Deduplicated index actions for one transaction.
///
/// Keyed by (index name, document id). Inserting an action for a key that is
/// already present replaces the prior entry, so the table always holds
/// exactly one action per logical document: the last one resolved wins.
/// Built fresh per transaction and consumed by the dispatcher.
#[derive(Debug, Default)]
pub struct ActionTable {
    entries: HashMap<ActionKey, IndexAction>,
}

impl ActionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an action, replacing any prior action for the same key.
    ///
    /// Returns the replaced action if one was present.
    pub fn insert(&mut self, action: IndexAction) -> Option<IndexAction> {
        self.entries.insert(action.key(), action)
    }

    /// Fold a sequence of actions into the table.
    pub fn merge(&mut self, actions: impl IntoIterator<Item = IndexAction>) {
        for action in actions {
            self.insert(action);
        }
    }

    /// Look up the current action for a key.
    pub fn get(&self, key: &ActionKey) -> Option<&IndexAction> {
        self.entries.get(key)
    }

    /// Number of distinct (index, document id) pairs in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no actions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the actions in the table (order unspecified).
    pub fn actions(&self) -> impl Iterator<Item = &IndexAction> {
        self.entries.values()
    }

    /// Consume the table into its final action set.
    pub fn into_actions(self) -> Vec<IndexAction> {
        self.entries.into_values().collect()
    }
}
