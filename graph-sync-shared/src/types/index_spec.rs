//! Static index specification.
//!
//! Maps entity labels to target index names and indexing options. Parsed
//! once at startup from a spec string of the form
//! `indexName:Label(identityProperty)[,...]`; the identity property is
//! optional per entry.

use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;

/// Errors from parsing an index spec string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexSpecParseError {
    /// The spec string contained no entries.
    #[error("index spec must contain at least one entry")]
    Empty,

    /// An entry did not match `indexName:Label` or `indexName:Label(prop)`.
    #[error("malformed index spec entry '{0}'")]
    MalformedEntry(String),

    /// The same label was mapped twice.
    #[error("label '{0}' is mapped more than once")]
    DuplicateLabel(String),
}

/// The target index configuration for one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTarget {
    /// The name of the index documents for this label are written to.
    pub index_name: String,
    /// The property holding the stable external document id, if configured.
    /// When absent the entity's internal handle is used.
    pub identity_property: Option<String>,
}

/// Static mapping from entity label to target index.
///
/// Read-only while a transaction is being collected; reloading takes effect
/// only for subsequent transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexSpec {
    targets: HashMap<String, IndexTarget>,
    include_identity: bool,
}

impl IndexSpec {
    /// Create an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label mapping (builder style).
    pub fn with_target(
        mut self,
        label: impl Into<String>,
        index_name: impl Into<String>,
        identity_property: Option<&str>,
    ) -> Self {
        self.targets.insert(
            label.into(),
            IndexTarget {
                index_name: index_name.into(),
                identity_property: identity_property.map(str::to_string),
            },
        );
        self
    }

    /// Set whether the resolved identity is embedded in indexed payloads.
    pub fn with_include_identity(mut self, include: bool) -> Self {
        self.include_identity = include;
        self
    }

    /// The target for a label, if one is configured.
    pub fn target(&self, label: &str) -> Option<&IndexTarget> {
        self.targets.get(label)
    }

    /// Whether indexed payloads should embed the resolved identity.
    pub fn include_identity(&self) -> bool {
        self.include_identity
    }

    /// Number of configured label mappings.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no labels are mapped.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Iterate the configured labels.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }
}

impl FromStr for IndexSpec {
    type Err = IndexSpecParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut spec = IndexSpec::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (index_name, rest) = entry
                .split_once(':')
                .ok_or_else(|| IndexSpecParseError::MalformedEntry(entry.to_string()))?;

            let (label, identity_property) = match rest.split_once('(') {
                Some((label, props)) => {
                    let props = props
                        .strip_suffix(')')
                        .ok_or_else(|| IndexSpecParseError::MalformedEntry(entry.to_string()))?;
                    (label, Some(props))
                }
                None => (rest, None),
            };

            let index_name = index_name.trim();
            let label = label.trim();
            let identity_property = identity_property.map(str::trim).filter(|p| !p.is_empty());
            if index_name.is_empty() || label.is_empty() {
                return Err(IndexSpecParseError::MalformedEntry(entry.to_string()));
            }
            if spec.targets.contains_key(label) {
                return Err(IndexSpecParseError::DuplicateLabel(label.to_string()));
            }

            spec.targets.insert(
                label.to_string(),
                IndexTarget {
                    index_name: index_name.to_string(),
                    identity_property: identity_property.map(str::to_string),
                },
            );
        }

        if spec.targets.is_empty() {
            return Err(IndexSpecParseError::Empty);
        }
        Ok(spec)
    }
}
