use mog_types::RejectReason;

use crate::error::GateResult;
use crate::stage::{GateContext, GateStage, MutationKind, Proposal, StageDecision};

/// Child and new mother must share a container unless configured otherwise.
pub struct ContainerStage;

impl GateStage for ContainerStage {
    fn name(&self) -> &'static str {
        "container"
    }

    fn applies_to(&self, kind: MutationKind) -> bool {
        kind == MutationKind::Reparent
    }

    fn evaluate(&self, proposal: &Proposal, context: &GateContext<'_>) -> GateResult<StageDecision> {
        if context.config.allow_cross_container {
            return Ok(StageDecision::Pass);
        }
        let Some(mother) = proposal.mother() else {
            return Ok(StageDecision::Pass);
        };
        let child = context.corpus.node(proposal.child).map(|c| c.container);
        let mother = context.corpus.node(mother).map(|m| m.container);
        match (child, mother) {
            (Some(a), Some(b)) if a == b => Ok(StageDecision::Pass),
            (Some(_), Some(_)) => Ok(StageDecision::Reject(RejectReason::ScopeViolation)),
            _ => Ok(StageDecision::Reject(RejectReason::NotFound)),
        }
    }
}
