use tracing::{info, warn};

use mog_types::{NodeId, OverlayTarget};

use crate::error::{LedgerError, LedgerResult};
use crate::log::{MutationEntry, MutationLog};
use crate::overlay::OverlayStore;

/// The effect of a write, undo, or redo on a single child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Change {
    pub child: NodeId,
    /// Overlay state now in force; `None` means the original mother applies.
    pub overlay: Option<OverlayTarget>,
    /// Log entry this change came from.
    pub seq: u64,
    /// Store version after the change.
    pub version: u64,
}

/// Position in the log to roll back to.
#[derive(Clone, Debug)]
pub struct Checkpoint {
    history_len: usize,
    future: Vec<MutationEntry>,
}

/// Overlay store and mutation log behind one owner.
///
/// Every method that touches the store also touches the log, so the two
/// cannot drift apart.
#[derive(Clone, Debug, Default)]
pub struct OverlayLedger {
    store: OverlayStore,
    log: MutationLog,
}

impl OverlayLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &OverlayStore {
        &self.store
    }

    pub fn log(&self) -> &MutationLog {
        &self.log
    }

    pub fn version(&self) -> u64 {
        self.store.version()
    }

    pub fn history(&self) -> &[MutationEntry] {
        self.log.history()
    }

    pub fn future(&self) -> &[MutationEntry] {
        self.log.future()
    }

    /// Write an overlay entry for `child` and log it. Clears the redo stack.
    pub fn record(&mut self, child: NodeId, target: OverlayTarget) -> Change {
        let previous = self.store.target(child);
        let edge = self.store.apply(child, target);
        let seq = self.log.record(child, previous, Some(target)).seq;
        info!(child = %child, target = %target, version = edge.version, "overlay recorded");
        Change {
            child,
            overlay: Some(target),
            seq,
            version: edge.version,
        }
    }

    /// Revert the newest mutation.
    pub fn undo(&mut self) -> LedgerResult<Change> {
        let (seq, child, state) = self
            .log
            .step_back()
            .map(|e| (e.seq, e.child, e.previous))
            .ok_or(LedgerError::EmptyHistory)?;
        self.store.restore(child, state);
        info!(child = %child, seq, version = self.store.version(), "mutation undone");
        Ok(Change {
            child,
            overlay: state,
            seq,
            version: self.store.version(),
        })
    }

    /// Reapply the newest undone mutation.
    pub fn redo(&mut self) -> LedgerResult<Change> {
        let (seq, child, state) = self
            .log
            .step_forward()
            .map(|e| (e.seq, e.child, e.next))
            .ok_or(LedgerError::EmptyFuture)?;
        self.store.restore(child, state);
        info!(child = %child, seq, version = self.store.version(), "mutation redone");
        Ok(Change {
            child,
            overlay: state,
            seq,
            version: self.store.version(),
        })
    }

    /// Mark the current position for a later [`rollback`](Self::rollback).
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            history_len: self.log.history().len(),
            future: self.log.future().to_vec(),
        }
    }

    /// Undo everything recorded since `checkpoint` and drop it from the log.
    ///
    /// The redo stack is put back as it was when the checkpoint was taken.
    pub fn rollback(&mut self, checkpoint: Checkpoint) -> LedgerResult<usize> {
        if checkpoint.history_len > self.log.history().len() {
            return Err(LedgerError::StaleCheckpoint {
                seq: checkpoint.history_len as u64,
            });
        }
        let dropped = self.log.truncate_history(checkpoint.history_len);
        for entry in &dropped {
            self.store.restore(entry.child, entry.previous);
        }
        self.log.replace_future(checkpoint.future);
        if !dropped.is_empty() {
            warn!(entries = dropped.len(), version = self.store.version(), "rolled back");
        }
        Ok(dropped.len())
    }

    /// Drop every overlay entry and both stacks.
    pub fn reset(&mut self) -> u64 {
        let cleared = self.store.len();
        self.store.clear();
        self.log.clear();
        info!(cleared, version = self.store.version(), "overlay reset");
        self.store.version()
    }
}
