use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Stable identity of a clause node.
///
/// Identities are assigned by the corpus and are globally unique. They are
/// non-decreasing with textual order, which makes them a convenient
/// tie-break when sorting, but they say nothing about ancestry: a descendant
/// may carry a smaller identity than its mother.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Wrap a raw corpus identity.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw integer identity.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<NodeId> for u64 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl FromStr for NodeId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| TypeError::InvalidNodeId(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_and_display() {
        let id: NodeId = "427559".parse().unwrap();
        assert_eq!(id.get(), 427559);
        assert_eq!(id.to_string(), "427559");
        assert_eq!(format!("{id:?}"), "NodeId(427559)");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            "abc".parse::<NodeId>(),
            Err(TypeError::InvalidNodeId("abc".into()))
        );
        assert!("-4".parse::<NodeId>().is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&NodeId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: NodeId = serde_json::from_str("7").unwrap();
        assert_eq!(back, NodeId::new(7));
    }

    proptest! {
        #[test]
        fn ordering_follows_raw_value(a in any::<u64>(), b in any::<u64>()) {
            prop_assert_eq!(NodeId::new(a).cmp(&NodeId::new(b)), a.cmp(&b));
        }
    }
}
