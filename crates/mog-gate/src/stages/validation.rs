use mog_types::{NodeKind, RejectReason};

use crate::error::GateResult;
use crate::stage::{GateContext, GateStage, MutationKind, Proposal, StageDecision};

/// A node can never be its own mother.
pub struct SelfParentStage;

impl GateStage for SelfParentStage {
    fn name(&self) -> &'static str {
        "self_parent"
    }

    fn applies_to(&self, kind: MutationKind) -> bool {
        kind == MutationKind::Reparent
    }

    fn evaluate(&self, proposal: &Proposal, _context: &GateContext<'_>) -> GateResult<StageDecision> {
        if proposal.mother() == Some(proposal.child) {
            return Ok(StageDecision::Reject(RejectReason::SelfParent));
        }
        Ok(StageDecision::Pass)
    }
}

/// Child and proposed mother must both be in the corpus.
pub struct ExistenceStage;

impl GateStage for ExistenceStage {
    fn name(&self) -> &'static str {
        "existence"
    }

    fn evaluate(&self, proposal: &Proposal, context: &GateContext<'_>) -> GateResult<StageDecision> {
        let known = context.corpus.contains(proposal.child)
            && proposal.mother().map_or(true, |m| context.corpus.contains(m));
        if known {
            Ok(StageDecision::Pass)
        } else {
            Ok(StageDecision::Reject(RejectReason::NotFound))
        }
    }
}

/// Rootify can be switched off in configuration.
pub struct RootifyEnabledStage;

impl GateStage for RootifyEnabledStage {
    fn name(&self) -> &'static str {
        "rootify_enabled"
    }

    fn applies_to(&self, kind: MutationKind) -> bool {
        kind == MutationKind::Rootify
    }

    fn evaluate(&self, _proposal: &Proposal, context: &GateContext<'_>) -> GateResult<StageDecision> {
        if context.config.allow_rootify {
            Ok(StageDecision::Pass)
        } else {
            Ok(StageDecision::Reject(RejectReason::RootifyDisabled))
        }
    }
}

/// Only clause nodes may be moved.
pub struct DraggableStage;

impl GateStage for DraggableStage {
    fn name(&self) -> &'static str {
        "draggable"
    }

    fn evaluate(&self, proposal: &Proposal, context: &GateContext<'_>) -> GateResult<StageDecision> {
        if context.corpus.is_draggable(proposal.child) {
            Ok(StageDecision::Pass)
        } else {
            Ok(StageDecision::Reject(RejectReason::NotDraggable))
        }
    }
}

/// A clause may only hang under another clause.
pub struct MotherKindStage;

impl GateStage for MotherKindStage {
    fn name(&self) -> &'static str {
        "mother_kind"
    }

    fn applies_to(&self, kind: MutationKind) -> bool {
        kind == MutationKind::Reparent
    }

    fn evaluate(&self, proposal: &Proposal, context: &GateContext<'_>) -> GateResult<StageDecision> {
        let is_clause = proposal
            .mother()
            .and_then(|m| context.corpus.node(m))
            .is_some_and(|node| node.kind == NodeKind::Clause);
        if is_clause {
            Ok(StageDecision::Pass)
        } else {
            Ok(StageDecision::Reject(RejectReason::MotherNotClause))
        }
    }
}
