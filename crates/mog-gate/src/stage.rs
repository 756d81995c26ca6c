use std::fmt;
use std::time::Duration;

use mog_corpus::CorpusIndex;
use mog_dag::EffectiveForest;
use mog_types::{NodeId, OverlayTarget, RejectReason};

use crate::config::GateConfig;
use crate::error::GateResult;

// ---------------------------------------------------------------------------
// Proposal
// ---------------------------------------------------------------------------

/// The two edits an analyst can make.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Reparent,
    Rootify,
}

impl MutationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reparent => "reparent",
            Self::Rootify => "rootify",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed overlay write, evaluated by the gate before it is recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Proposal {
    pub child: NodeId,
    pub target: OverlayTarget,
}

impl Proposal {
    pub fn reparent(child: NodeId, mother: NodeId) -> Self {
        Self {
            child,
            target: OverlayTarget::Mother(mother),
        }
    }

    pub fn rootify(child: NodeId) -> Self {
        Self {
            child,
            target: OverlayTarget::Root,
        }
    }

    pub fn kind(&self) -> MutationKind {
        match self.target {
            OverlayTarget::Mother(_) => MutationKind::Reparent,
            OverlayTarget::Root => MutationKind::Rootify,
        }
    }

    /// The proposed mother; `None` for rootify.
    pub fn mother(&self) -> Option<NodeId> {
        self.target.mother()
    }
}

// ---------------------------------------------------------------------------
// StageDecision / StageResult
// ---------------------------------------------------------------------------

/// The outcome of a single stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageDecision {
    Pass,
    Reject(RejectReason),
}

impl StageDecision {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Recorded result from one evaluated stage.
#[derive(Clone, Debug)]
pub struct StageResult {
    pub stage_name: &'static str,
    pub passed: bool,
    pub reason: Option<RejectReason>,
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// GateContext
// ---------------------------------------------------------------------------

/// What every stage may look at: the corpus, the current effective forest,
/// and the gate configuration.
pub struct GateContext<'a> {
    pub corpus: &'a dyn CorpusIndex,
    pub forest: EffectiveForest<'a>,
    pub config: &'a GateConfig,
}

// ---------------------------------------------------------------------------
// GateStage trait
// ---------------------------------------------------------------------------

/// One check in the validation pipeline.
///
/// Stages run in order and the first rejection wins. A stage that does not
/// concern a mutation kind is skipped entirely and leaves no result.
pub trait GateStage: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this stage runs for the given kind. Defaults to both.
    fn applies_to(&self, _kind: MutationKind) -> bool {
        true
    }

    fn evaluate(&self, proposal: &Proposal, context: &GateContext<'_>) -> GateResult<StageDecision>;
}
