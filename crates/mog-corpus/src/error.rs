use mog_types::NodeId;

/// Errors from corpus loading and lookup.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// The requested node is not in the corpus.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// Two records share the same identity.
    #[error("duplicate node: {0}")]
    DuplicateNode(NodeId),

    /// A record names a mother that is not in the corpus.
    #[error("dangling mother reference: node {node} references missing mother {mother}")]
    DanglingMother {
        /// The node containing the bad reference.
        node: NodeId,
        /// The missing mother.
        mother: NodeId,
    },

    /// More distinct books than a container ordinal can address.
    #[error("too many books in corpus: {0}")]
    TooManyBooks(usize),

    /// A scope descriptor names a book that does not resolve.
    #[error("unknown book: {0}")]
    UnknownBook(String),

    /// A scope descriptor is malformed.
    #[error("invalid scope: {0}")]
    InvalidScope(String),

    /// Deserialization failure of a corpus export.
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error while reading a corpus export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;
