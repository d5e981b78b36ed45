//! Flat document payloads for indexing.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::PropertyValue;

/// The flattened property payload written to a target index for one entity.
///
/// Preserves key insertion order so that mapped documents are deterministic.
/// Inserting an existing key replaces the value in place without changing
/// its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Vec<(String, PropertyValue)>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property, returning the previous value if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut entry.1, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Look up a property by key.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Remove a property by key, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Whether the document contains the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of properties in the document.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl FromIterator<(String, PropertyValue)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        let mut doc = Self::new();
        for (key, value) in iter {
            doc.insert(key, value);
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut doc = Document::new();
        doc.insert("name", "Ann");
        doc.insert("sketchID", 7i64);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("name"), Some(&PropertyValue::String("Ann".to_string())));
        assert_eq!(doc.get("sketchID"), Some(&PropertyValue::Integer(7)));
        assert!(doc.get("missing").is_none());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut doc = Document::new();
        doc.insert("a", 1i64);
        doc.insert("b", 2i64);
        let prior = doc.insert("a", 3i64);

        assert_eq!(prior, Some(PropertyValue::Integer(1)));
        let keys: Vec<&str> = doc.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(doc.get("a"), Some(&PropertyValue::Integer(3)));
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let mut doc = Document::new();
        doc.insert("name", "Ann");
        doc.insert("sketchID", 7i64);

        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"name":"Ann","sketchID":7}"#);
    }
}
