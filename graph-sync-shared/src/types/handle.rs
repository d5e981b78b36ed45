//! Internal entity handle type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The internal stable handle of a graph entity.
///
/// Assigned by the host store at entity creation, immutable, and unique
/// within the store. The decimal rendering of the handle doubles as the
/// fallback document id when no identity property can be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityHandle(pub u64);

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityHandle {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_decimal() {
        assert_eq!(EntityHandle(42).to_string(), "42");
        assert_eq!(EntityHandle(0).to_string(), "0");
    }
}
