use thiserror::Error;

use mog_corpus::CorpusError;
use mog_dag::DagError;
use mog_gate::GateError;
use mog_ledger::LedgerError;
use mog_types::{NodeId, RejectReason};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("mutation rejected: {0}")]
    Rejected(RejectReason),

    #[error("batch operation {index} rejected: {reason}")]
    BatchRejected { index: usize, reason: RejectReason },

    #[error("nothing to undo")]
    EmptyHistory,

    #[error("nothing to redo")]
    EmptyFuture,

    #[error("another mutation is in progress")]
    Busy,

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("invalid scope: {0}")]
    InvalidScope(String),

    #[error("engine state lock poisoned")]
    Poisoned,

    #[error("corpus error: {0}")]
    Corpus(CorpusError),

    #[error("forest error: {0}")]
    Forest(DagError),

    #[error("gate error: {0}")]
    Gate(#[from] GateError),

    #[error("ledger error: {0}")]
    Ledger(LedgerError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Stable reason code for the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Rejected(reason) | Self::BatchRejected { reason, .. } => reason.code(),
            Self::EmptyHistory => "EMPTY_HISTORY",
            Self::EmptyFuture => "EMPTY_FUTURE",
            Self::Busy => "BUSY",
            Self::NodeNotFound(_) => "NODE_NOT_FOUND",
            Self::InvalidScope(_) => "INVALID_SCOPE",
            Self::Config(_) => "CONFIG",
            Self::Poisoned
            | Self::Corpus(_)
            | Self::Forest(_)
            | Self::Gate(_)
            | Self::Ledger(_) => "INTERNAL",
        }
    }

    /// The rejection behind this error, if it is one.
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Self::Rejected(reason) | Self::BatchRejected { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

impl From<CorpusError> for EngineError {
    fn from(e: CorpusError) -> Self {
        match e {
            CorpusError::NodeNotFound(id) => Self::NodeNotFound(id),
            CorpusError::InvalidScope(msg) => Self::InvalidScope(msg),
            CorpusError::UnknownBook(book) => {
                Self::InvalidScope(format!("unknown or ambiguous book '{book}'"))
            }
            other => Self::Corpus(other),
        }
    }
}

impl From<DagError> for EngineError {
    fn from(e: DagError) -> Self {
        match e {
            DagError::NodeNotFound(id) => Self::NodeNotFound(id),
            other => Self::Forest(other),
        }
    }
}

impl From<LedgerError> for EngineError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::EmptyHistory => Self::EmptyHistory,
            LedgerError::EmptyFuture => Self::EmptyFuture,
            other => Self::Ledger(other),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
