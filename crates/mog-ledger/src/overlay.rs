use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use mog_types::{NodeId, OverlayTarget};

/// A user override of one child's mother.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayEdge {
    pub child: NodeId,
    pub target: OverlayTarget,
    /// Store version at the time of the write.
    pub version: u64,
}

impl OverlayEdge {
    /// The overridden mother, `None` for a rootified child.
    pub fn mother(&self) -> Option<NodeId> {
        self.target.mother()
    }
}

/// Sparse child → target map.
///
/// Holds entries only for children the analyst has touched. A reverse index
/// from mother to overlay children is kept in step with every write so
/// descendant queries never scan the map.
///
/// Writes are crate-private; go through [`OverlayLedger`](crate::OverlayLedger).
#[derive(Clone, Debug, Default)]
pub struct OverlayStore {
    entries: HashMap<NodeId, OverlayEdge>,
    by_mother: HashMap<NodeId, BTreeSet<NodeId>>,
    version: u64,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, child: NodeId) -> Option<&OverlayEdge> {
        self.entries.get(&child)
    }

    pub fn target(&self, child: NodeId) -> Option<OverlayTarget> {
        self.entries.get(&child).map(|e| e.target)
    }

    pub fn contains(&self, child: NodeId) -> bool {
        self.entries.contains_key(&child)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Monotonic write counter. Bumped by every apply, remove, and clear.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverlayEdge> {
        self.entries.values()
    }

    /// Children whose overlay points at `mother`, in identity order.
    pub fn overlay_children(&self, mother: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.by_mother
            .get(&mother)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub(crate) fn apply(&mut self, child: NodeId, target: OverlayTarget) -> OverlayEdge {
        self.version += 1;
        self.unlink(child);
        let edge = OverlayEdge {
            child,
            target,
            version: self.version,
        };
        if let Some(mother) = target.mother() {
            self.by_mother.entry(mother).or_default().insert(child);
        }
        self.entries.insert(child, edge);
        edge
    }

    pub(crate) fn remove(&mut self, child: NodeId) -> Option<OverlayEdge> {
        self.version += 1;
        self.unlink(child);
        self.entries.remove(&child)
    }

    /// Restore `child` to an earlier overlay state; `None` drops the entry.
    pub(crate) fn restore(&mut self, child: NodeId, state: Option<OverlayTarget>) {
        match state {
            Some(target) => {
                self.apply(child, target);
            }
            None => {
                self.remove(child);
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.version += 1;
        self.entries.clear();
        self.by_mother.clear();
    }

    fn unlink(&mut self, child: NodeId) {
        let Some(mother) = self.entries.get(&child).and_then(OverlayEdge::mother) else {
            return;
        };
        if let Some(set) = self.by_mother.get_mut(&mother) {
            set.remove(&child);
            if set.is_empty() {
                self.by_mother.remove(&mother);
            }
        }
    }
}
