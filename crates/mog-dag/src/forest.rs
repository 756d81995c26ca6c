//! The effective mother forest and its traversal queries.
//!
//! [`EffectiveForest`] is a borrowed view over three things: the corpus (node
//! set and original mothers), the [`BaseIndex`] (original mother → children),
//! and the [`OverlayStore`] (user overrides plus their reverse index). The
//! effective mother of a node is its overlay target when one exists and its
//! original mother otherwise.
//!
//! # Invariants
//!
//! - Upward walks are bounded by the corpus size, so a corrupt cyclic
//!   overlay produces [`DagError::CycleDetected`] instead of looping.
//! - Downward walks keep a visited set for the same reason.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use mog_corpus::CorpusIndex;
use mog_ledger::OverlayStore;
use mog_types::{Edge, EdgeSource, NodeId};

use crate::error::{DagError, DagResult};
use crate::index::BaseIndex;

/// Read-only view of the base forest with the overlay applied.
#[derive(Clone, Copy)]
pub struct EffectiveForest<'a> {
    corpus: &'a dyn CorpusIndex,
    base: &'a BaseIndex,
    overlay: &'a OverlayStore,
}

impl<'a> EffectiveForest<'a> {
    pub fn new(corpus: &'a dyn CorpusIndex, base: &'a BaseIndex, overlay: &'a OverlayStore) -> Self {
        Self {
            corpus,
            base,
            overlay,
        }
    }

    // ---------------------------------------------------------------
    // Single-edge lookups
    // ---------------------------------------------------------------

    /// The effective mother of `id`; `None` for a root.
    pub fn resolve(&self, id: NodeId) -> DagResult<Option<NodeId>> {
        let node = self.corpus.node(id).ok_or(DagError::NodeNotFound(id))?;
        Ok(match self.overlay.target(id) {
            Some(target) => target.mother(),
            None => node.original_mother,
        })
    }

    /// `User` iff an overlay entry exists for `id`.
    pub fn source_of(&self, id: NodeId) -> EdgeSource {
        if self.overlay.contains(id) {
            EdgeSource::User
        } else {
            EdgeSource::Original
        }
    }

    /// The effective edge leaving `id`, tagged with its source.
    pub fn edge(&self, id: NodeId) -> DagResult<Edge> {
        Ok(Edge::new(id, self.resolve(id)?, self.source_of(id)))
    }

    /// Effective children of `id` in textual order.
    ///
    /// Base children that carry an overlay entry have moved away (or stayed
    /// by explicit choice) and are picked up from the overlay's reverse index
    /// instead.
    pub fn children(&self, id: NodeId) -> DagResult<Vec<NodeId>> {
        if !self.corpus.contains(id) {
            return Err(DagError::NodeNotFound(id));
        }
        let mut out: Vec<NodeId> = self
            .base
            .children(id)
            .iter()
            .copied()
            .filter(|child| !self.overlay.contains(*child))
            .collect();
        out.extend(self.overlay.overlay_children(id));
        self.sort_textual(&mut out);
        Ok(out)
    }

    // ---------------------------------------------------------------
    // Upward walks
    // ---------------------------------------------------------------

    /// Effective ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> DagResult<Vec<NodeId>> {
        let bound = self.corpus.len();
        let mut out = Vec::new();
        let mut current = self.resolve(id)?;
        while let Some(mother) = current {
            if out.len() >= bound {
                return Err(DagError::CycleDetected(id));
            }
            out.push(mother);
            current = self.resolve(mother)?;
        }
        Ok(out)
    }

    /// Number of effective ancestors; roots sit at depth 0.
    pub fn depth(&self, id: NodeId) -> DagResult<usize> {
        self.ancestors(id).map(|chain| chain.len())
    }

    /// Whether `candidate` is `of` itself or one of its effective ancestors.
    ///
    /// Reparenting `candidate` under `of` would close a cycle exactly when
    /// this holds.
    pub fn is_ancestor_or_self(&self, candidate: NodeId, of: NodeId) -> DagResult<bool> {
        let bound = self.corpus.len();
        let mut current = Some(of);
        let mut steps = 0usize;
        while let Some(id) = current {
            if id == candidate {
                return Ok(true);
            }
            if steps > bound {
                return Err(DagError::CycleDetected(of));
            }
            steps += 1;
            current = self.resolve(id)?;
        }
        Ok(false)
    }

    // ---------------------------------------------------------------
    // Downward walks
    // ---------------------------------------------------------------

    /// Every effective descendant of `id`, in textual order. The node itself
    /// is not included.
    pub fn descendants_of(&self, id: NodeId) -> DagResult<Vec<NodeId>> {
        let mut visited = HashSet::new();
        visited.insert(id);
        let mut result = Vec::new();
        let mut queue = VecDeque::from(self.children(id)?);

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            result.push(current);
            queue.extend(self.children(current)?);
        }

        self.sort_textual(&mut result);
        debug!(node = %id, count = result.len(), "descendants resolved");
        Ok(result)
    }

    /// Nodes `id` may not be reparented under: itself and its descendants.
    pub fn invalid_targets(&self, id: NodeId) -> DagResult<Vec<NodeId>> {
        let mut out = self.descendants_of(id)?;
        out.push(id);
        self.sort_textual(&mut out);
        Ok(out)
    }

    /// Every node with no effective mother, in textual order.
    pub fn roots(&self) -> DagResult<Vec<NodeId>> {
        let mut out = Vec::new();
        for node in self.corpus.all_nodes() {
            if self.resolve(node.id)?.is_none() {
                out.push(node.id);
            }
        }
        Ok(out)
    }

    // ---------------------------------------------------------------
    // Whole-forest verification
    // ---------------------------------------------------------------

    /// Check that following effective mothers from every node terminates.
    ///
    /// Each node is visited once: a walk stops at the first node already
    /// proven to reach a root, and meeting a node on the current walk is a
    /// cycle.
    pub fn verify(&self) -> DagResult<()> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            OnPath,
            Done,
        }

        let mut marks: HashMap<NodeId, Mark> = HashMap::with_capacity(self.corpus.len());
        for node in self.corpus.all_nodes() {
            let mut path = Vec::new();
            let mut current = Some(node.id);
            while let Some(id) = current {
                match marks.get(&id) {
                    Some(Mark::Done) => break,
                    Some(Mark::OnPath) => return Err(DagError::CycleDetected(id)),
                    None => {}
                }
                marks.insert(id, Mark::OnPath);
                path.push(id);
                current = self.resolve(id)?;
            }
            for id in path {
                marks.insert(id, Mark::Done);
            }
        }
        debug!(nodes = marks.len(), overlay = self.overlay.len(), "forest verified");
        Ok(())
    }

    fn sort_textual(&self, ids: &mut [NodeId]) {
        ids.sort_by_key(|id| {
            let start = self.corpus.node(*id).map_or(u64::MAX, |n| n.slots_start);
            (start, *id)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mog_corpus::{CorpusRecord, InMemoryCorpus};
    use mog_ledger::OverlayLedger;
    use mog_types::OverlayTarget;
    use proptest::prelude::*;

    fn n(raw: u64) -> NodeId {
        NodeId::new(raw)
    }

    /// 1 ─┬─ 2 ── 4
    ///    └─ 3
    /// 5   (separate root)
    fn fixture() -> (InMemoryCorpus, BaseIndex) {
        let corpus = InMemoryCorpus::from_records(vec![
            CorpusRecord::clause(1, "Genesis", 1, 1, None),
            CorpusRecord::clause(2, "Genesis", 1, 1, Some(1)),
            CorpusRecord::clause(3, "Genesis", 1, 1, Some(1)),
            CorpusRecord::clause(4, "Genesis", 1, 1, Some(2)),
            CorpusRecord::clause(5, "Genesis", 1, 1, None),
        ])
        .unwrap();
        let base = BaseIndex::build(&corpus);
        (corpus, base)
    }

    // ----------------------------------------------------------
    // Resolution
    // ----------------------------------------------------------

    #[test]
    fn resolve_without_overlay_uses_original() {
        let (corpus, base) = fixture();
        let ledger = OverlayLedger::new();
        let forest = EffectiveForest::new(&corpus, &base, ledger.store());
        assert_eq!(forest.resolve(n(4)).unwrap(), Some(n(2)));
        assert_eq!(forest.resolve(n(1)).unwrap(), None);
        assert_eq!(forest.source_of(n(4)), EdgeSource::Original);
        assert_eq!(forest.resolve(n(99)), Err(DagError::NodeNotFound(n(99))));
    }

    #[test]
    fn overlay_takes_precedence() {
        let (corpus, base) = fixture();
        let mut ledger = OverlayLedger::new();
        ledger.record(n(4), OverlayTarget::Mother(n(3)));
        ledger.record(n(2), OverlayTarget::Root);
        let forest = EffectiveForest::new(&corpus, &base, ledger.store());
        assert_eq!(forest.edge(n(4)).unwrap(), Edge::new(n(4), Some(n(3)), EdgeSource::User));
        assert_eq!(forest.edge(n(2)).unwrap(), Edge::new(n(2), None, EdgeSource::User));
        assert_eq!(forest.roots().unwrap(), vec![n(1), n(2), n(5)]);
    }

    #[test]
    fn children_merge_base_and_overlay() {
        let (corpus, base) = fixture();
        let mut ledger = OverlayLedger::new();
        ledger.record(n(4), OverlayTarget::Mother(n(1)));
        ledger.record(n(3), OverlayTarget::Mother(n(5)));
        let forest = EffectiveForest::new(&corpus, &base, ledger.store());
        assert_eq!(forest.children(n(1)).unwrap(), vec![n(2), n(4)]);
        assert!(forest.children(n(2)).unwrap().is_empty());
        assert_eq!(forest.children(n(5)).unwrap(), vec![n(3)]);
    }

    #[test]
    fn child_overlaid_onto_its_original_mother_stays_once() {
        let (corpus, base) = fixture();
        let mut ledger = OverlayLedger::new();
        ledger.record(n(2), OverlayTarget::Mother(n(1)));
        let forest = EffectiveForest::new(&corpus, &base, ledger.store());
        assert_eq!(forest.children(n(1)).unwrap(), vec![n(2), n(3)]);
    }

    // ----------------------------------------------------------
    // Ancestry
    // ----------------------------------------------------------

    #[test]
    fn ancestors_and_depth() {
        let (corpus, base) = fixture();
        let ledger = OverlayLedger::new();
        let forest = EffectiveForest::new(&corpus, &base, ledger.store());
        assert_eq!(forest.ancestors(n(4)).unwrap(), vec![n(2), n(1)]);
        assert_eq!(forest.depth(n(4)).unwrap(), 2);
        assert_eq!(forest.depth(n(5)).unwrap(), 0);
        assert!(forest.is_ancestor_or_self(n(1), n(4)).unwrap());
        assert!(forest.is_ancestor_or_self(n(4), n(4)).unwrap());
        assert!(!forest.is_ancestor_or_self(n(4), n(1)).unwrap());
        assert!(!forest.is_ancestor_or_self(n(5), n(4)).unwrap());
    }

    #[test]
    fn corrupt_cycle_is_detected_not_looped() {
        let (corpus, base) = fixture();
        let mut ledger = OverlayLedger::new();
        // Bypasses validation on purpose.
        ledger.record(n(1), OverlayTarget::Mother(n(4)));
        let forest = EffectiveForest::new(&corpus, &base, ledger.store());
        assert!(matches!(forest.ancestors(n(4)), Err(DagError::CycleDetected(_))));
        assert!(matches!(forest.verify(), Err(DagError::CycleDetected(_))));
        // The downward walk still terminates.
        assert_eq!(forest.descendants_of(n(1)).unwrap(), vec![n(2), n(3), n(4)]);
    }

    // ----------------------------------------------------------
    // Descendants
    // ----------------------------------------------------------

    #[test]
    fn descendants_follow_effective_edges() {
        let (corpus, base) = fixture();
        let mut ledger = OverlayLedger::new();
        let forest = EffectiveForest::new(&corpus, &base, ledger.store());
        assert_eq!(forest.descendants_of(n(1)).unwrap(), vec![n(2), n(3), n(4)]);
        assert!(forest.descendants_of(n(4)).unwrap().is_empty());

        ledger.record(n(2), OverlayTarget::Mother(n(5)));
        let forest = EffectiveForest::new(&corpus, &base, ledger.store());
        assert_eq!(forest.descendants_of(n(1)).unwrap(), vec![n(3)]);
        assert_eq!(forest.descendants_of(n(5)).unwrap(), vec![n(2), n(4)]);
        assert_eq!(forest.invalid_targets(n(5)).unwrap(), vec![n(2), n(4), n(5)]);
    }

    #[test]
    fn descendants_of_unknown_node_fails() {
        let (corpus, base) = fixture();
        let ledger = OverlayLedger::new();
        let forest = EffectiveForest::new(&corpus, &base, ledger.store());
        assert_eq!(forest.descendants_of(n(42)), Err(DagError::NodeNotFound(n(42))));
    }

    #[test]
    fn base_forest_verifies() {
        let (corpus, base) = fixture();
        let ledger = OverlayLedger::new();
        assert!(EffectiveForest::new(&corpus, &base, ledger.store()).verify().is_ok());
    }

    // ----------------------------------------------------------
    // Forest invariant
    // ----------------------------------------------------------

    fn chain_corpus(size: u64) -> InMemoryCorpus {
        let records = (1..=size)
            .map(|id| CorpusRecord::clause(id, "Genesis", 1, 1, (id > 1).then(|| id - 1)))
            .collect();
        InMemoryCorpus::from_records(records).unwrap()
    }

    proptest! {
        #[test]
        fn guarded_reparents_never_form_cycles(
            ops in proptest::collection::vec((1u64..=12, proptest::option::of(1u64..=12)), 0..60)
        ) {
            let corpus = chain_corpus(12);
            let base = BaseIndex::build(&corpus);
            let mut ledger = OverlayLedger::new();
            for (child, mother) in ops {
                let child = NodeId::new(child);
                let target = match mother {
                    Some(m) => {
                        let m = NodeId::new(m);
                        let forest = EffectiveForest::new(&corpus, &base, ledger.store());
                        if forest.is_ancestor_or_self(child, m).unwrap() {
                            continue;
                        }
                        OverlayTarget::Mother(m)
                    }
                    None => OverlayTarget::Root,
                };
                ledger.record(child, target);
            }
            let forest = EffectiveForest::new(&corpus, &base, ledger.store());
            prop_assert!(forest.verify().is_ok());
            for node in corpus.all_nodes() {
                let below = forest.descendants_of(node.id).unwrap();
                prop_assert!(!below.contains(&node.id));
            }
        }
    }
}
