use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mog_types::{NodeId, OverlayTarget};

/// One accepted mutation: the child and its overlay state before and after.
///
/// `None` on either side means "no overlay entry", i.e. the original mother
/// was in force.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationEntry {
    pub seq: u64,
    pub child: NodeId,
    pub previous: Option<OverlayTarget>,
    pub next: Option<OverlayTarget>,
    pub at: DateTime<Utc>,
}

/// Linear undo/redo history as two stacks.
///
/// Recording a new entry discards the redo stack. Undo moves the top of
/// `history` onto `future`; redo moves it back.
#[derive(Clone, Debug, Default)]
pub struct MutationLog {
    history: Vec<MutationEntry>,
    future: Vec<MutationEntry>,
    next_seq: u64,
}

impl MutationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new entry and clear the redo stack.
    pub(crate) fn record(
        &mut self,
        child: NodeId,
        previous: Option<OverlayTarget>,
        next: Option<OverlayTarget>,
    ) -> &MutationEntry {
        self.next_seq += 1;
        self.future.clear();
        self.history.push(MutationEntry {
            seq: self.next_seq,
            child,
            previous,
            next,
            at: Utc::now(),
        });
        &self.history[self.history.len() - 1]
    }

    /// Move the newest history entry to the redo stack.
    pub(crate) fn step_back(&mut self) -> Option<&MutationEntry> {
        let entry = self.history.pop()?;
        self.future.push(entry);
        self.future.last()
    }

    /// Move the newest redo entry back onto history.
    pub(crate) fn step_forward(&mut self) -> Option<&MutationEntry> {
        let entry = self.future.pop()?;
        self.history.push(entry);
        self.history.last()
    }

    /// Drop history entries above `len`, newest first.
    pub(crate) fn truncate_history(&mut self, len: usize) -> Vec<MutationEntry> {
        if len >= self.history.len() {
            return Vec::new();
        }
        let mut dropped = self.history.split_off(len);
        dropped.reverse();
        dropped
    }

    pub(crate) fn replace_future(&mut self, future: Vec<MutationEntry>) {
        self.future = future;
    }

    pub(crate) fn clear(&mut self) {
        self.history.clear();
        self.future.clear();
    }

    /// Applied entries, oldest first.
    pub fn history(&self) -> &[MutationEntry] {
        &self.history
    }

    /// Undone entries, the next one to redo last.
    pub fn future(&self) -> &[MutationEntry] {
        &self.future
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// The most recent `limit` applied entries, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MutationEntry> {
        self.history.iter().rev().take(limit)
    }
}
