//! Host transaction manager interface.
//!
//! The synchronizer never owns graph entities; it reads them through these
//! traits from the change-set the host hands it at commit time. Entity reads
//! are fallible because an entity can become unreadable while its deletion
//! is being processed in the same transaction.

pub mod memory;

use thiserror::Error;

use graph_sync_shared::{Document, EntityHandle, PropertyValue};

/// Errors reading entity state from the host store.
#[derive(Debug, Clone, Error)]
pub enum EntityReadError {
    /// The entity is no longer readable (typically racing with deletion).
    #[error("entity {0} is no longer readable")]
    Gone(EntityHandle),

    /// A host-specific read failure.
    #[error("entity read failed: {0}")]
    Backend(String),
}

/// A node-like record in the primary graph store.
///
/// Implemented by the host's entity representation. All reads reflect the
/// entity's state at the end of the transaction being committed.
pub trait GraphEntity {
    /// The entity's internal stable handle.
    fn handle(&self) -> EntityHandle;

    /// The entity's current labels.
    fn labels(&self) -> Result<Vec<String>, EntityReadError>;

    /// The entity's current property set, in a deterministic order.
    fn properties(&self) -> Result<Document, EntityReadError>;

    /// A single property by key, `None` if absent.
    fn property(&self, key: &str) -> Result<Option<PropertyValue>, EntityReadError>;
}

/// One property assignment or removal observed in a transaction.
pub struct PropertyChange<'a, E> {
    /// The entity the property belongs to.
    pub entity: &'a E,
    /// The property key that changed.
    pub key: String,
    /// The value before the change, if there was one.
    pub old_value: Option<PropertyValue>,
}

/// One label removal observed in a transaction.
pub struct LabelRemoval<'a, E> {
    /// The entity the label was removed from.
    pub entity: &'a E,
    /// The removed label.
    pub label: String,
}

/// Pre-deletion snapshot of a deleted entity.
///
/// Captured by the host before the entity becomes unreadable; delete
/// resolution works entirely from this snapshot.
#[derive(Debug, Clone)]
pub struct DeletedEntity {
    /// The deleted entity's handle.
    pub handle: EntityHandle,
    /// The labels the entity had at time of deletion.
    pub labels: Vec<String>,
    /// The properties the entity had at time of deletion.
    pub properties: Document,
}

/// The full change-set exposed by one committing transaction.
///
/// Consumed exactly once per transaction by the collector; never shared or
/// queued across transactions.
pub trait ChangeSet {
    /// The host's entity representation.
    type Entity: GraphEntity;

    /// Entities created in this transaction.
    fn created_entities(&self) -> Vec<&Self::Entity>;

    /// Property assignments in this transaction.
    fn assigned_properties(&self) -> Vec<PropertyChange<'_, Self::Entity>>;

    /// Property removals in this transaction.
    fn removed_properties(&self) -> Vec<PropertyChange<'_, Self::Entity>>;

    /// Label removals in this transaction.
    fn removed_labels(&self) -> Vec<LabelRemoval<'_, Self::Entity>>;

    /// Entities deleted in this transaction, as pre-deletion snapshots.
    fn deleted_entities(&self) -> Vec<DeletedEntity>;

    /// Whether the given entity is deleted in this transaction.
    fn is_deleted(&self, handle: EntityHandle) -> bool;
}
