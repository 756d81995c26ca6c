//! Error types for effective-forest queries.

use mog_types::NodeId;

/// Errors that can occur while walking the effective forest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DagError {
    /// A referenced node is not in the corpus.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// Following effective mothers from this node never reaches a root.
    #[error("cycle detected involving node {0}")]
    CycleDetected(NodeId),
}

/// Convenience alias for forest results.
pub type DagResult<T> = Result<T, DagError>;
