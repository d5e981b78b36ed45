//! Per-transaction change-set folding.
//!
//! Iterates the full change-set exposed by one committing transaction and
//! folds every event's resolution into a single deduplicated action table.
//! The pass never fails: an event that cannot be resolved is logged and
//! skipped so that one racing entity cannot block the host's commit path.

use tracing::{debug, warn};

use crate::resolver::{self, ChangeEvent, Resolution};
use crate::source::{ChangeSet, GraphEntity};
use graph_sync_shared::{ActionTable, IndexSpec};

/// Fold a transaction's change-set into its final action table.
///
/// Events are processed in a fixed precedence order:
///
/// 1. created entities
/// 2. removed properties (skipping entities deleted in this transaction)
/// 3. deleted entities (resolved from pre-deletion snapshots)
/// 4. assigned properties (skipping deleted entities), last so the final
///    table reflects the latest property state
///
/// Each resolution is inserted keyed by (index, document id) with
/// last-write-wins, producing exactly one action per logical document
/// regardless of how many events touched it.
pub fn collect<C: ChangeSet>(change_set: &C, spec: &IndexSpec) -> ActionTable {
    let mut table = ActionTable::new();
    let deleted_snapshots = change_set.deleted_entities();

    for entity in change_set.created_entities() {
        apply(&mut table, resolver::resolve(ChangeEvent::Created(entity), spec));
    }

    for change in change_set.removed_properties() {
        if change_set.is_deleted(change.entity.handle()) {
            debug!(
                entity = %change.entity.handle(),
                key = %change.key,
                "Entity is deleted in this transaction, ignoring property removal"
            );
            continue;
        }
        apply(
            &mut table,
            resolver::resolve(ChangeEvent::PropertyRemoved(change.entity), spec),
        );
    }

    for removal in change_set.removed_labels() {
        let handle = removal.entity.handle();
        if change_set.is_deleted(handle) {
            // The deletion snapshot no longer carries this label, so the
            // deletion pass alone would leave the label's index stale.
            // Resolve the delete from the snapshot instead of the
            // now-unreadable entity.
            if let Some(snapshot) = deleted_snapshots.iter().find(|s| s.handle == handle) {
                apply(
                    &mut table,
                    resolver::resolve::<C::Entity>(
                        ChangeEvent::SnapshotLabelRemoved {
                            snapshot,
                            label: &removal.label,
                        },
                        spec,
                    ),
                );
            }
            continue;
        }
        apply(
            &mut table,
            resolver::resolve(
                ChangeEvent::LabelRemoved {
                    entity: removal.entity,
                    label: &removal.label,
                },
                spec,
            ),
        );
    }

    for snapshot in &deleted_snapshots {
        apply(
            &mut table,
            resolver::resolve::<C::Entity>(ChangeEvent::Deleted(snapshot), spec),
        );
    }

    for change in change_set.assigned_properties() {
        if change_set.is_deleted(change.entity.handle()) {
            debug!(
                entity = %change.entity.handle(),
                key = %change.key,
                "Entity is deleted in this transaction, ignoring property assignment"
            );
            continue;
        }
        apply(
            &mut table,
            resolver::resolve(ChangeEvent::PropertyAssigned(change.entity), spec),
        );
    }

    table
}

/// Fold one resolution into the table; skips are logged, never fatal.
fn apply(table: &mut ActionTable, resolution: Resolution) {
    match resolution {
        Resolution::Actions(actions) => table.merge(actions),
        Resolution::Skipped { handle, reason } => {
            warn!(
                entity = %handle,
                error = %reason,
                "Skipping change event, entity became unreadable"
            );
        }
    }
}
