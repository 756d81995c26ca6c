use mog_types::{ClauseNode, ContainerId, NodeId};

use crate::error::{CorpusError, CorpusResult};

/// Read-only view of the base corpus.
///
/// All implementations must satisfy these invariants:
/// - The node set, original mothers, and containers never change after
///   construction.
/// - [`all_nodes`](Self::all_nodes) yields nodes in textual order
///   (`slots_start`, then identity).
/// - Every `original_mother` names a node that is itself in the corpus.
/// - Concurrent reads are always safe.
pub trait CorpusIndex: Send + Sync {
    /// Every node, in textual order.
    fn all_nodes(&self) -> &[ClauseNode];

    /// Look up a single node.
    fn node(&self, id: NodeId) -> Option<&ClauseNode>;

    /// Book names indexed by [`ContainerId::book`].
    fn book_names(&self) -> &[String];

    /// Number of nodes in the corpus.
    fn len(&self) -> usize {
        self.all_nodes().len()
    }

    /// Returns `true` if the corpus holds no nodes.
    fn is_empty(&self) -> bool {
        self.all_nodes().is_empty()
    }

    /// Whether the identity is known.
    fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// The base-forest mother of a node.
    fn original_mother_of(&self, id: NodeId) -> CorpusResult<Option<NodeId>> {
        self.node(id)
            .map(|n| n.original_mother)
            .ok_or(CorpusError::NodeNotFound(id))
    }

    /// The container a node belongs to.
    fn container_of(&self, id: NodeId) -> CorpusResult<ContainerId> {
        self.node(id)
            .map(|n| n.container)
            .ok_or(CorpusError::NodeNotFound(id))
    }

    /// Whether the analyst may move this node. Unknown nodes are not draggable.
    fn is_draggable(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(ClauseNode::is_draggable)
    }

    /// `Book.chapter.verse` label for a container, if the book is known.
    fn container_label(&self, container: ContainerId) -> Option<String> {
        self.book_names()
            .get(usize::from(container.book))
            .map(|name| container.label(name))
    }
}
