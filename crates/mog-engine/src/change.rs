use serde::{Deserialize, Serialize};

use mog_gate::Proposal;
use mog_types::{Edge, NodeId};

/// The single edge a mutation, undo, or redo changed, with the new version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeChange {
    pub edge: Edge,
    pub version: u64,
}

/// One operation of an all-or-nothing batch.
///
/// A missing or null `newMother` rootifies the child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOp {
    pub child: NodeId,
    #[serde(default)]
    pub new_mother: Option<NodeId>,
}

impl BatchOp {
    pub fn reparent(child: NodeId, mother: NodeId) -> Self {
        Self {
            child,
            new_mother: Some(mother),
        }
    }

    pub fn rootify(child: NodeId) -> Self {
        Self {
            child,
            new_mother: None,
        }
    }

    pub(crate) fn proposal(&self) -> Proposal {
        match self.new_mother {
            Some(mother) => Proposal::reparent(self.child, mother),
            None => Proposal::rootify(self.child),
        }
    }
}

/// Size summary of an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub nodes: usize,
    pub books: usize,
    pub containers: usize,
    pub roots: usize,
    pub overlay_entries: usize,
    pub history: usize,
    pub future: usize,
    pub version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_op_wire_shape() {
        let op: BatchOp = serde_json::from_str(r#"{"child": 3, "newMother": 4}"#).unwrap();
        assert_eq!(op, BatchOp::reparent(NodeId::new(3), NodeId::new(4)));
        let op: BatchOp = serde_json::from_str(r#"{"child": 3, "newMother": null}"#).unwrap();
        assert_eq!(op, BatchOp::rootify(NodeId::new(3)));
        let op: BatchOp = serde_json::from_str(r#"{"child": 3}"#).unwrap();
        assert_eq!(op.new_mother, None);
    }
}
