use mog_dag::DagError;
use mog_types::RejectReason;

use crate::error::{GateError, GateResult};
use crate::stage::{GateContext, GateStage, MutationKind, Proposal, StageDecision};

/// The child must not be an ancestor of its new mother.
///
/// Walks effective mothers upward from the proposed mother. A walk that
/// exceeds the corpus size means the overlay is already corrupt; that is
/// rejected as a cycle too.
pub struct CycleStage;

impl GateStage for CycleStage {
    fn name(&self) -> &'static str {
        "cycle"
    }

    fn applies_to(&self, kind: MutationKind) -> bool {
        kind == MutationKind::Reparent
    }

    fn evaluate(&self, proposal: &Proposal, context: &GateContext<'_>) -> GateResult<StageDecision> {
        let Some(mother) = proposal.mother() else {
            return Ok(StageDecision::Pass);
        };
        match context.forest.is_ancestor_or_self(proposal.child, mother) {
            Ok(false) => Ok(StageDecision::Pass),
            Ok(true) | Err(DagError::CycleDetected(_)) => {
                Ok(StageDecision::Reject(RejectReason::CycleDetected))
            }
            Err(e) => Err(GateError::forest(self.name(), e)),
        }
    }
}

/// Optional ceiling on how deep a reparented child may sit.
pub struct DepthStage;

impl GateStage for DepthStage {
    fn name(&self) -> &'static str {
        "depth"
    }

    fn applies_to(&self, kind: MutationKind) -> bool {
        kind == MutationKind::Reparent
    }

    fn evaluate(&self, proposal: &Proposal, context: &GateContext<'_>) -> GateResult<StageDecision> {
        let (Some(max), Some(mother)) = (context.config.max_depth, proposal.mother()) else {
            return Ok(StageDecision::Pass);
        };
        let mother_depth = context
            .forest
            .depth(mother)
            .map_err(|e| GateError::forest(self.name(), e))?;
        if mother_depth + 1 > max {
            Ok(StageDecision::Reject(RejectReason::DepthExceeded))
        } else {
            Ok(StageDecision::Pass)
        }
    }
}
