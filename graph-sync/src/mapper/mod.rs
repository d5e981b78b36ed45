//! Entity to document payload conversion.
//!
//! Copies an entity's current property set verbatim into the flat document
//! written to the index. The mapper adds and removes nothing; embedding the
//! resolved identity is a resolver concern driven by configuration.

use crate::source::{EntityReadError, GraphEntity};
use graph_sync_shared::Document;

/// Map an entity's current property set into a document payload.
///
/// Key order follows the entity's own deterministic property order. Read
/// failures (an entity racing with deletion) propagate to the caller, which
/// handles them at the event level.
pub fn to_document<E: GraphEntity>(entity: &E) -> Result<Document, EntityReadError> {
    entity.properties()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::MemoryEntity;
    use graph_sync_shared::PropertyValue;

    #[test]
    fn test_copies_properties_verbatim() {
        let entity = MemoryEntity::new(1u64)
            .with_property("name", "Ann")
            .with_property("sketchID", 7i64);

        let doc = to_document(&entity).unwrap();

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("name"), Some(&PropertyValue::String("Ann".to_string())));
        assert_eq!(doc.get("sketchID"), Some(&PropertyValue::Integer(7)));
    }

    #[test]
    fn test_order_is_deterministic() {
        let entity = MemoryEntity::new(1u64)
            .with_property("b", 2i64)
            .with_property("a", 1i64);

        let doc = to_document(&entity).unwrap();
        let keys: Vec<&str> = doc.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_read_failure_propagates() {
        let mut entity = MemoryEntity::new(1u64).with_property("name", "Ann");
        entity.mark_gone();

        assert!(to_document(&entity).is_err());
    }
}
