//! In-memory change-set implementation.
//!
//! A recording implementation of the [`ChangeSet`] traits, used by the unit
//! and integration tests and usable as a reference when adapting a real
//! host store.

use std::collections::{HashMap, HashSet};

use graph_sync_shared::{Document, EntityHandle, PropertyValue};

use crate::source::{
    ChangeSet, DeletedEntity, EntityReadError, GraphEntity, LabelRemoval, PropertyChange,
};

/// An in-memory graph entity.
#[derive(Debug, Clone)]
pub struct MemoryEntity {
    handle: EntityHandle,
    labels: Vec<String>,
    properties: Document,
    gone: bool,
}

impl MemoryEntity {
    /// Create an entity with no labels or properties.
    pub fn new(handle: impl Into<EntityHandle>) -> Self {
        Self {
            handle: handle.into(),
            labels: Vec::new(),
            properties: Document::new(),
            gone: false,
        }
    }

    /// Add a label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Set a property (builder style).
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.insert(key, value);
        self
    }

    /// Set a property on an existing entity.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key, value);
    }

    /// Remove a property from an existing entity.
    pub fn unset_property(&mut self, key: &str) {
        self.properties.remove(key);
    }

    /// Remove a label from an existing entity.
    pub fn unset_label(&mut self, label: &str) {
        self.labels.retain(|l| l != label);
    }

    /// Make all subsequent reads fail, simulating an entity whose backing
    /// record disappeared mid-transaction.
    pub fn mark_gone(&mut self) {
        self.gone = true;
    }

    fn check_readable(&self) -> Result<(), EntityReadError> {
        if self.gone {
            Err(EntityReadError::Gone(self.handle))
        } else {
            Ok(())
        }
    }
}

impl GraphEntity for MemoryEntity {
    fn handle(&self) -> EntityHandle {
        self.handle
    }

    fn labels(&self) -> Result<Vec<String>, EntityReadError> {
        self.check_readable()?;
        Ok(self.labels.clone())
    }

    fn properties(&self) -> Result<Document, EntityReadError> {
        self.check_readable()?;
        Ok(self.properties.clone())
    }

    fn property(&self, key: &str) -> Result<Option<PropertyValue>, EntityReadError> {
        self.check_readable()?;
        Ok(self.properties.get(key).cloned())
    }
}

/// A recording change-set for one transaction.
///
/// Entities are registered first, then events referencing them are recorded
/// in any order; the collector reads them back grouped by kind.
#[derive(Debug, Default)]
pub struct MemoryChangeSet {
    entities: HashMap<EntityHandle, MemoryEntity>,
    created: Vec<EntityHandle>,
    assigned: Vec<(EntityHandle, String, Option<PropertyValue>)>,
    removed_props: Vec<(EntityHandle, String, Option<PropertyValue>)>,
    removed_labels: Vec<(EntityHandle, String)>,
    deleted: Vec<DeletedEntity>,
    deleted_handles: HashSet<EntityHandle>,
}

impl MemoryChangeSet {
    /// Create an empty change-set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity so events can reference it.
    pub fn add_entity(&mut self, entity: MemoryEntity) {
        self.entities.insert(entity.handle, entity);
    }

    /// Mutable access to a registered entity.
    pub fn entity_mut(&mut self, handle: impl Into<EntityHandle>) -> Option<&mut MemoryEntity> {
        self.entities.get_mut(&handle.into())
    }

    /// Record that an entity was created in this transaction.
    pub fn record_created(&mut self, handle: impl Into<EntityHandle>) {
        self.created.push(handle.into());
    }

    /// Record a property assignment.
    pub fn record_assigned(
        &mut self,
        handle: impl Into<EntityHandle>,
        key: impl Into<String>,
        old_value: Option<PropertyValue>,
    ) {
        self.assigned.push((handle.into(), key.into(), old_value));
    }

    /// Record a property removal.
    pub fn record_property_removed(
        &mut self,
        handle: impl Into<EntityHandle>,
        key: impl Into<String>,
        old_value: PropertyValue,
    ) {
        self.removed_props
            .push((handle.into(), key.into(), Some(old_value)));
    }

    /// Record a label removal.
    pub fn record_label_removed(
        &mut self,
        handle: impl Into<EntityHandle>,
        label: impl Into<String>,
    ) {
        self.removed_labels.push((handle.into(), label.into()));
    }

    /// Record an entity deletion, snapshotting its current labels and
    /// properties before marking it deleted.
    pub fn record_deleted(&mut self, handle: impl Into<EntityHandle>) {
        let handle = handle.into();
        if let Some(entity) = self.entities.get(&handle) {
            self.deleted.push(DeletedEntity {
                handle,
                labels: entity.labels.clone(),
                properties: entity.properties.clone(),
            });
        }
        self.deleted_handles.insert(handle);
    }

    /// Record an entity deletion with an explicit pre-deletion snapshot.
    pub fn record_deleted_snapshot(&mut self, snapshot: DeletedEntity) {
        self.deleted_handles.insert(snapshot.handle);
        self.deleted.push(snapshot);
    }
}

impl ChangeSet for MemoryChangeSet {
    type Entity = MemoryEntity;

    fn created_entities(&self) -> Vec<&Self::Entity> {
        self.created
            .iter()
            .filter_map(|h| self.entities.get(h))
            .collect()
    }

    fn assigned_properties(&self) -> Vec<PropertyChange<'_, Self::Entity>> {
        self.assigned
            .iter()
            .filter_map(|(handle, key, old_value)| {
                self.entities.get(handle).map(|entity| PropertyChange {
                    entity,
                    key: key.clone(),
                    old_value: old_value.clone(),
                })
            })
            .collect()
    }

    fn removed_properties(&self) -> Vec<PropertyChange<'_, Self::Entity>> {
        self.removed_props
            .iter()
            .filter_map(|(handle, key, old_value)| {
                self.entities.get(handle).map(|entity| PropertyChange {
                    entity,
                    key: key.clone(),
                    old_value: old_value.clone(),
                })
            })
            .collect()
    }

    fn removed_labels(&self) -> Vec<LabelRemoval<'_, Self::Entity>> {
        self.removed_labels
            .iter()
            .filter_map(|(handle, label)| {
                self.entities.get(handle).map(|entity| LabelRemoval {
                    entity,
                    label: label.clone(),
                })
            })
            .collect()
    }

    fn deleted_entities(&self) -> Vec<DeletedEntity> {
        self.deleted.clone()
    }

    fn is_deleted(&self, handle: EntityHandle) -> bool {
        self.deleted_handles.contains(&handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_reads() {
        let entity = MemoryEntity::new(7u64)
            .with_label("Person")
            .with_property("name", "Ann");

        assert_eq!(entity.handle(), EntityHandle(7));
        assert_eq!(entity.labels().unwrap(), vec!["Person".to_string()]);
        assert_eq!(
            entity.property("name").unwrap(),
            Some(PropertyValue::String("Ann".to_string()))
        );
        assert_eq!(entity.property("missing").unwrap(), None);
    }

    #[test]
    fn test_gone_entity_fails_reads() {
        let mut entity = MemoryEntity::new(7u64).with_label("Person");
        entity.mark_gone();

        assert!(matches!(entity.labels(), Err(EntityReadError::Gone(_))));
        assert!(matches!(entity.properties(), Err(EntityReadError::Gone(_))));
        assert!(matches!(
            entity.property("name"),
            Err(EntityReadError::Gone(_))
        ));
    }

    #[test]
    fn test_deletion_snapshots_state() {
        let mut change_set = MemoryChangeSet::new();
        change_set.add_entity(
            MemoryEntity::new(7u64)
                .with_label("Person")
                .with_property("sketchID", 7i64),
        );
        change_set.record_deleted(7u64);

        assert!(change_set.is_deleted(EntityHandle(7)));
        let deleted = change_set.deleted_entities();
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0].labels, vec!["Person".to_string()]);
        assert!(deleted[0].properties.contains_key("sketchID"));
    }

    #[test]
    fn test_events_reference_registered_entities() {
        let mut change_set = MemoryChangeSet::new();
        change_set.add_entity(MemoryEntity::new(1u64).with_label("Person"));
        change_set.record_created(1u64);
        change_set.record_assigned(1u64, "name", None);

        assert_eq!(change_set.created_entities().len(), 1);
        let assigned = change_set.assigned_properties();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].key, "name");
        assert!(assigned[0].old_value.is_none());
    }
}
