use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    /// Identifies a live contraption in the [`ContraptionManager`](crate::manager::ContraptionManager).
    pub struct ContraptionId;
}

/// Stable key of a contraption specification. Used for lookup and by the
/// host for persistence; never changes after load.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecId(pub String);

impl SpecId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpecId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_id_equality() {
        assert_eq!(SpecId::new("generator"), SpecId::from("generator"));
        assert_ne!(SpecId::new("generator"), SpecId::new("factory"));
    }

    #[test]
    fn spec_id_display() {
        assert_eq!(SpecId::new("smelter").to_string(), "smelter");
    }

    #[test]
    fn ids_are_hashable() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(SpecId::new("a"), 1);
        map.insert(SpecId::new("b"), 2);
        assert_eq!(map[&SpecId::new("a")], 1);
    }
}
