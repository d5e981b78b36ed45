//! Property value types.
//!
//! Graph entities carry string-keyed scalar or array properties. This module
//! defines the closed set of value shapes the synchronizer understands.

use serde::{Deserialize, Serialize};

/// A single property value on a graph entity.
///
/// Serializes untagged, so a `PropertyValue::Integer(7)` becomes the JSON
/// number `7` in the indexed document, matching the host store's own wire
/// representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Integer(i64),
    /// Floating-point scalar.
    Float(f64),
    /// String scalar.
    String(String),
    /// Homogeneous boolean array.
    BoolArray(Vec<bool>),
    /// Homogeneous integer array.
    IntegerArray(Vec<i64>),
    /// Homogeneous float array.
    FloatArray(Vec<f64>),
    /// Homogeneous string array.
    StringArray(Vec<String>),
}

impl PropertyValue {
    /// Render a scalar value as a document id string.
    ///
    /// Returns `None` for array values, which cannot serve as identifiers;
    /// identity resolution then falls back to the entity handle.
    pub fn id_string(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::BoolArray(_)
            | Self::IntegerArray(_)
            | Self::FloatArray(_)
            | Self::StringArray(_) => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_string_scalars() {
        assert_eq!(
            PropertyValue::Integer(1000001).id_string(),
            Some("1000001".to_string())
        );
        assert_eq!(
            PropertyValue::String("abc".to_string()).id_string(),
            Some("abc".to_string())
        );
        assert_eq!(PropertyValue::Bool(true).id_string(), Some("true".to_string()));
    }

    #[test]
    fn test_id_string_arrays_are_rejected() {
        assert!(PropertyValue::IntegerArray(vec![1, 2]).id_string().is_none());
        assert!(PropertyValue::StringArray(vec![]).id_string().is_none());
    }

    #[test]
    fn test_serializes_untagged() {
        let json = serde_json::to_value(PropertyValue::Integer(7)).unwrap();
        assert_eq!(json, serde_json::json!(7));

        let json = serde_json::to_value(PropertyValue::StringArray(vec!["a".to_string()])).unwrap();
        assert_eq!(json, serde_json::json!(["a"]));
    }
}
