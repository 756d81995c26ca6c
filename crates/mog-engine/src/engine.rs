use std::path::Path;
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError};

use tracing::{debug, info, warn};

use mog_corpus::{ContainerIndex, CorpusIndex, InMemoryCorpus, ScopeDescriptor, ScopeRange};
use mog_dag::{BaseIndex, EffectiveForest};
use mog_gate::{GateContext, MutationGate, Proposal};
use mog_ledger::{Change, MutationEntry, OverlayLedger};
use mog_types::{Edge, NodeId};

use crate::change::{BatchOp, EdgeChange, EngineStats};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::query::{build_view, expand_context, TreeView};

/// One overlay graph over one corpus.
///
/// A single writer at a time: mutations take a writer mutex with
/// `try_lock` and fail with [`EngineError::Busy`] rather than queue. Reads
/// share a read lock on the ledger and never block each other.
pub struct MotherEngine {
    corpus: Box<dyn CorpusIndex>,
    base: BaseIndex,
    containers: ContainerIndex,
    gate: MutationGate,
    config: EngineConfig,
    state: RwLock<OverlayLedger>,
    writer: Mutex<()>,
}

impl MotherEngine {
    /// Build an engine over a corpus.
    ///
    /// Fails if the configuration is invalid, the default scope does not
    /// parse, or the base forest already contains a cycle.
    pub fn new(corpus: impl CorpusIndex + 'static, config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let corpus: Box<dyn CorpusIndex> = Box::new(corpus);
        let base = BaseIndex::build(corpus.as_ref());
        let containers = ContainerIndex::build(corpus.as_ref());

        if let Some(scope) = &config.scope.default_scope {
            containers
                .resolve_str(scope)
                .map_err(|e| EngineError::Config(format!("default_scope '{scope}': {e}")))?;
        }

        let ledger = OverlayLedger::new();
        EffectiveForest::new(corpus.as_ref(), &base, ledger.store()).verify()?;

        info!(
            nodes = corpus.len(),
            containers = containers.len(),
            roots = base.roots().len(),
            "engine ready"
        );
        Ok(Self {
            corpus,
            base,
            containers,
            gate: MutationGate::with_default_stages(config.gate.clone()),
            config,
            state: RwLock::new(ledger),
            writer: Mutex::new(()),
        })
    }

    /// Load a JSON corpus export and build an engine over it.
    pub fn open(path: impl AsRef<Path>, config: EngineConfig) -> EngineResult<Self> {
        Self::new(InMemoryCorpus::load_json(path)?, config)
    }

    pub fn corpus(&self) -> &dyn CorpusIndex {
        self.corpus.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ---- Mutations ----

    /// Point `child` at a new mother.
    pub fn reparent(&self, child: NodeId, mother: NodeId) -> EngineResult<EdgeChange> {
        self.mutate(Proposal::reparent(child, mother))
    }

    /// Detach `child` from any mother. Succeeds for nodes that are already
    /// roots, recording an explicit user override.
    pub fn rootify(&self, child: NodeId) -> EngineResult<EdgeChange> {
        self.mutate(Proposal::rootify(child))
    }

    /// Apply every operation or none.
    ///
    /// Each operation is validated against the state left by the ones before
    /// it. On the first rejection everything recorded so far is rolled back
    /// and the failing index is reported.
    pub fn reparent_batch(&self, ops: &[BatchOp]) -> EngineResult<u64> {
        let _writer = self.lock_writer()?;
        let mut ledger = self.write_state()?;
        let checkpoint = ledger.checkpoint();

        for (index, op) in ops.iter().enumerate() {
            let proposal = op.proposal();
            match self.admit(&ledger, &proposal) {
                Ok(()) => {
                    ledger.record(proposal.child, proposal.target);
                }
                Err(e) => {
                    ledger.rollback(checkpoint)?;
                    warn!(index, ops = ops.len(), error = %e, "batch rolled back");
                    return Err(match e {
                        EngineError::Rejected(reason) => EngineError::BatchRejected { index, reason },
                        other => other,
                    });
                }
            }
        }

        info!(ops = ops.len(), version = ledger.version(), "batch committed");
        Ok(ledger.version())
    }

    pub fn undo(&self) -> EngineResult<EdgeChange> {
        let _writer = self.lock_writer()?;
        let mut ledger = self.write_state()?;
        let change = ledger.undo()?;
        self.edge_change(&ledger, change)
    }

    pub fn redo(&self) -> EngineResult<EdgeChange> {
        let _writer = self.lock_writer()?;
        let mut ledger = self.write_state()?;
        let change = ledger.redo()?;
        self.edge_change(&ledger, change)
    }

    /// Drop every overlay entry and the undo/redo history.
    pub fn reset(&self) -> EngineResult<u64> {
        let _writer = self.lock_writer()?;
        let mut ledger = self.write_state()?;
        Ok(ledger.reset())
    }

    // ---- Queries ----

    /// Nodes and effective edges of a scope.
    ///
    /// Without a scope the configured default scope is used, or else the
    /// first `default_window` containers of the corpus.
    pub fn get_tree(&self, scope: Option<&str>, context: bool) -> EngineResult<TreeView> {
        let requested = scope.map(str::trim).filter(|s| !s.is_empty());
        let (label, range) = match requested {
            Some(raw) => {
                let descriptor: ScopeDescriptor = raw.parse()?;
                let range = self.containers.resolve(&descriptor)?;
                (Some(descriptor.to_string()), Some(range))
            }
            None => self.default_range()?,
        };

        let ledger = self.read_state()?;
        let Some(range) = range else {
            return Ok(TreeView::empty(label, ledger.version()));
        };

        let in_scope = self.containers.nodes_in(&range);
        let forest = self.forest(&ledger);
        let gathered = if context {
            expand_context(&forest, &in_scope)?
        } else {
            in_scope.clone()
        };
        let view = build_view(
            self.corpus.as_ref(),
            &forest,
            &in_scope,
            &gathered,
            label,
            ledger.version(),
        )?;
        debug!(
            scope = ?view.scope,
            in_scope = in_scope.len(),
            nodes = view.nodes.len(),
            context,
            "tree query"
        );
        Ok(view)
    }

    /// The effective edge leaving `id`.
    pub fn resolve(&self, id: NodeId) -> EngineResult<Edge> {
        let ledger = self.read_state()?;
        Ok(self.forest(&ledger).edge(id)?)
    }

    pub fn descendants_of(&self, id: NodeId) -> EngineResult<Vec<NodeId>> {
        let ledger = self.read_state()?;
        Ok(self.forest(&ledger).descendants_of(id)?)
    }

    /// `id` and its descendants: everything `id` may not be moved under.
    pub fn invalid_targets(&self, id: NodeId) -> EngineResult<Vec<NodeId>> {
        let ledger = self.read_state()?;
        Ok(self.forest(&ledger).invalid_targets(id)?)
    }

    /// The newest `limit` log entries, newest first.
    pub fn history(&self, limit: usize) -> EngineResult<Vec<MutationEntry>> {
        let ledger = self.read_state()?;
        Ok(ledger.log().recent(limit).cloned().collect())
    }

    pub fn version(&self) -> EngineResult<u64> {
        Ok(self.read_state()?.version())
    }

    /// Check the whole effective forest for cycles.
    pub fn verify(&self) -> EngineResult<()> {
        let ledger = self.read_state()?;
        Ok(self.forest(&ledger).verify()?)
    }

    pub fn stats(&self) -> EngineResult<EngineStats> {
        let ledger = self.read_state()?;
        let roots = self.forest(&ledger).roots()?.len();
        Ok(EngineStats {
            nodes: self.corpus.len(),
            books: self.corpus.book_names().len(),
            containers: self.containers.len(),
            roots,
            overlay_entries: ledger.store().len(),
            history: ledger.history().len(),
            future: ledger.future().len(),
            version: ledger.version(),
        })
    }

    // ---- Internals ----

    fn mutate(&self, proposal: Proposal) -> EngineResult<EdgeChange> {
        let _writer = self.lock_writer()?;
        let mut ledger = self.write_state()?;
        self.admit(&ledger, &proposal)?;
        let change = ledger.record(proposal.child, proposal.target);
        self.edge_change(&ledger, change)
    }

    /// Run the gate against the current state.
    fn admit(&self, ledger: &OverlayLedger, proposal: &Proposal) -> EngineResult<()> {
        let context = GateContext {
            corpus: self.corpus.as_ref(),
            forest: self.forest(ledger),
            config: self.gate.config(),
        };
        self.gate
            .evaluate(proposal, &context)?
            .into_result()
            .map_err(EngineError::Rejected)
    }

    fn edge_change(&self, ledger: &OverlayLedger, change: Change) -> EngineResult<EdgeChange> {
        let edge = self.forest(ledger).edge(change.child)?;
        Ok(EdgeChange {
            edge,
            version: change.version,
        })
    }

    fn forest<'a>(&'a self, ledger: &'a OverlayLedger) -> EffectiveForest<'a> {
        EffectiveForest::new(self.corpus.as_ref(), &self.base, ledger.store())
    }

    fn default_range(&self) -> EngineResult<(Option<String>, Option<ScopeRange>)> {
        match &self.config.scope.default_scope {
            Some(scope) => {
                let range = self.containers.resolve_str(scope)?;
                Ok((Some(scope.clone()), Some(range)))
            }
            None => Ok((
                None,
                self.containers.leading_window(self.config.scope.default_window),
            )),
        }
    }

    fn lock_writer(&self) -> EngineResult<MutexGuard<'_, ()>> {
        self.writer.try_lock().map_err(|e| match e {
            TryLockError::WouldBlock => EngineError::Busy,
            TryLockError::Poisoned(_) => EngineError::Poisoned,
        })
    }

    fn read_state(&self) -> EngineResult<RwLockReadGuard<'_, OverlayLedger>> {
        self.state.read().map_err(|_| EngineError::Poisoned)
    }

    fn write_state(&self) -> EngineResult<RwLockWriteGuard<'_, OverlayLedger>> {
        self.state.write().map_err(|_| EngineError::Poisoned)
    }
}
