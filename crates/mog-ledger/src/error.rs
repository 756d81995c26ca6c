/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("nothing to undo")]
    EmptyHistory,

    #[error("nothing to redo")]
    EmptyFuture,

    #[error("checkpoint at seq {seq} is not reachable from the current history")]
    StaleCheckpoint { seq: u64 },
}

/// Convenience result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
