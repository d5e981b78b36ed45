//! Stable external document id resolution.
//!
//! The document id is read from a configured identity property when one is
//! set and readable; otherwise it degrades to the entity's internal handle.
//! Resolution never fails: an unresolvable id must not abort the whole
//! transaction's synchronization.

use tracing::debug;

use crate::source::{DeletedEntity, GraphEntity};

/// Resolve the external document id for a live entity.
///
/// # Arguments
///
/// * `entity` - The entity being indexed
/// * `identity_property` - The configured identity property, if any
///
/// # Returns
///
/// The identity property's value rendered as a string, or the decimal
/// handle when the property is absent, array-valued, unreadable, or not
/// configured.
pub fn resolve_id<E: GraphEntity>(entity: &E, identity_property: Option<&str>) -> String {
    if let Some(key) = identity_property {
        match entity.property(key) {
            Ok(Some(value)) => {
                if let Some(id) = value.id_string() {
                    return id;
                }
                debug!(
                    entity = %entity.handle(),
                    property = key,
                    "Identity property is array-valued, falling back to handle"
                );
            }
            Ok(None) => {}
            Err(e) => {
                debug!(
                    entity = %entity.handle(),
                    property = key,
                    error = %e,
                    "Identity property unreadable, falling back to handle"
                );
            }
        }
    }
    entity.handle().to_string()
}

/// Resolve the external document id from a pre-deletion snapshot.
///
/// Same degradation rules as [`resolve_id`], reading from the snapshot's
/// captured property set instead of the (now unreadable) entity.
pub fn resolve_snapshot_id(snapshot: &DeletedEntity, identity_property: Option<&str>) -> String {
    if let Some(key) = identity_property {
        if let Some(id) = snapshot.properties.get(key).and_then(|v| v.id_string()) {
            return id;
        }
    }
    snapshot.handle.to_string()
}
