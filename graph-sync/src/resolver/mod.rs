//! Change event to index action resolution.
//!
//! Maps a single observed change event to the per-index actions it implies
//! under the configured index spec. A resolution either yields actions or
//! is skipped with a structured reason; the collector decides what skipping
//! means for the transaction as a whole.

use crate::identity::{resolve_id, resolve_snapshot_id};
use crate::mapper;
use crate::source::{DeletedEntity, EntityReadError, GraphEntity};
use graph_sync_shared::{EntityHandle, IndexAction, IndexSpec};

/// One change event observed in a committing transaction.
///
/// A closed set of variants, so the resolver's match is exhaustive. Upsert
/// triggers carry only the entity: a property change forces a full
/// re-index with the entity's current state, not a partial patch.
pub enum ChangeEvent<'a, E: GraphEntity> {
    /// The entity was created.
    Created(&'a E),
    /// A property was assigned on the entity.
    PropertyAssigned(&'a E),
    /// A property was removed from the entity.
    PropertyRemoved(&'a E),
    /// A label was removed from the entity (which still exists).
    LabelRemoved {
        /// The entity the label was removed from.
        entity: &'a E,
        /// The removed label.
        label: &'a str,
    },
    /// A label was removed from an entity deleted later in the same
    /// transaction; the snapshot no longer carries the label, so
    /// resolution works from the snapshot's identity.
    SnapshotLabelRemoved {
        /// The deleted entity's pre-deletion snapshot.
        snapshot: &'a DeletedEntity,
        /// The removed label.
        label: &'a str,
    },
    /// The entity was deleted; resolution works from the snapshot.
    Deleted(&'a DeletedEntity),
}

/// Outcome of resolving one change event.
#[derive(Debug)]
pub enum Resolution {
    /// The actions this event implies; may be empty when no label on the
    /// entity has a configured index mapping.
    Actions(Vec<IndexAction>),
    /// The event could not be resolved and contributes nothing.
    Skipped {
        /// The entity whose event was skipped.
        handle: EntityHandle,
        /// Why resolution failed.
        reason: EntityReadError,
    },
}

/// Resolve a change event into its per-index actions.
pub fn resolve<E: GraphEntity>(event: ChangeEvent<'_, E>, spec: &IndexSpec) -> Resolution {
    match event {
        ChangeEvent::Created(entity)
        | ChangeEvent::PropertyAssigned(entity)
        | ChangeEvent::PropertyRemoved(entity) => upsert_actions(entity, spec),
        ChangeEvent::LabelRemoved { entity, label } => label_delete_action(entity, label, spec),
        ChangeEvent::SnapshotLabelRemoved { snapshot, label } => {
            Resolution::Actions(snapshot_label_delete_action(snapshot, label, spec))
        }
        ChangeEvent::Deleted(snapshot) => Resolution::Actions(delete_actions(snapshot, spec)),
    }
}

/// One upsert per mapped label, each carrying the entity's full current
/// document.
fn upsert_actions<E: GraphEntity>(entity: &E, spec: &IndexSpec) -> Resolution {
    let handle = entity.handle();
    let labels = match entity.labels() {
        Ok(labels) => labels,
        Err(reason) => return Resolution::Skipped { handle, reason },
    };
    let document = match mapper::to_document(entity) {
        Ok(document) => document,
        Err(reason) => return Resolution::Skipped { handle, reason },
    };

    let mut actions = Vec::new();
    for label in &labels {
        let Some(target) = spec.target(label) else {
            continue;
        };
        let doc_id = resolve_id(entity, target.identity_property.as_deref());

        let mut payload = document.clone();
        if spec.include_identity() {
            if let Some(key) = target.identity_property.as_deref() {
                if !payload.contains_key(key) {
                    payload.insert(key, doc_id.clone());
                }
            }
        }

        actions.push(IndexAction::upsert(&target.index_name, doc_id, payload));
    }
    Resolution::Actions(actions)
}

/// A delete for the removed label's index/document pair only. The document
/// keeps appearing under the entity's remaining labels' indices.
fn label_delete_action<E: GraphEntity>(entity: &E, label: &str, spec: &IndexSpec) -> Resolution {
    let Some(target) = spec.target(label) else {
        return Resolution::Actions(Vec::new());
    };
    let doc_id = resolve_id(entity, target.identity_property.as_deref());
    Resolution::Actions(vec![IndexAction::delete(&target.index_name, doc_id)])
}

/// A delete for a label removed before the entity's deletion, resolved
/// from the snapshot's identity.
fn snapshot_label_delete_action(
    snapshot: &DeletedEntity,
    label: &str,
    spec: &IndexSpec,
) -> Vec<IndexAction> {
    let Some(target) = spec.target(label) else {
        return Vec::new();
    };
    let doc_id = resolve_snapshot_id(snapshot, target.identity_property.as_deref());
    vec![IndexAction::delete(&target.index_name, doc_id)]
}

/// One delete per mapped label the entity had at time of deletion.
fn delete_actions(snapshot: &DeletedEntity, spec: &IndexSpec) -> Vec<IndexAction> {
    let mut actions = Vec::new();
    for label in &snapshot.labels {
        let Some(target) = spec.target(label) else {
            continue;
        };
        let doc_id = resolve_snapshot_id(snapshot, target.identity_property.as_deref());
        actions.push(IndexAction::delete(&target.index_name, doc_id));
    }
    actions
}
