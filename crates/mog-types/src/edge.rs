use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// Where an effective edge comes from.
///
/// This is derived at read time from the presence of an overlay entry and is
/// never stored alongside the edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeSource {
    /// No overlay entry: the base-forest mother is in force.
    Original,
    /// A user overlay entry is in force.
    User,
}

impl EdgeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EdgeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an overlay entry points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "mother")]
pub enum OverlayTarget {
    /// The child is reparented under this mother.
    Mother(NodeId),
    /// The child is rootified: it has no mother.
    Root,
}

impl OverlayTarget {
    /// The mother this target resolves to, `None` for a rootified node.
    pub fn mother(self) -> Option<NodeId> {
        match self {
            Self::Mother(id) => Some(id),
            Self::Root => None,
        }
    }

    /// Build a target from an optional mother.
    pub fn from_mother(mother: Option<NodeId>) -> Self {
        match mother {
            Some(id) => Self::Mother(id),
            None => Self::Root,
        }
    }
}

impl fmt::Display for OverlayTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mother(id) => write!(f, "-> {id}"),
            Self::Root => write!(f, "-> (root)"),
        }
    }
}

/// A single effective mother edge, as returned to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// The child node.
    pub from: NodeId,
    /// Its effective mother, `None` for a root.
    pub to: Option<NodeId>,
    pub source: EdgeSource,
}

impl Edge {
    pub fn new(from: NodeId, to: Option<NodeId>, source: EdgeSource) -> Self {
        Self { from, to, source }
    }
}
