use std::time::{Duration, Instant};

use tracing::debug;

use mog_types::RejectReason;

use crate::config::GateConfig;
use crate::error::GateResult;
use crate::stage::{GateContext, GateStage, Proposal, StageDecision, StageResult};
use crate::stages::{
    ContainerStage, CycleStage, DepthStage, DraggableStage, ExistenceStage, MotherKindStage,
    RootifyEnabledStage, SelfParentStage,
};

// ---------------------------------------------------------------------------
// GateVerdict
// ---------------------------------------------------------------------------

/// Final pipeline outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject(RejectReason),
}

/// The outcome of running a proposal through the full pipeline.
#[derive(Clone, Debug)]
pub struct GateVerdict {
    pub decision: Decision,
    /// Per-stage results in evaluation order. Skipped stages are absent.
    pub stage_results: Vec<StageResult>,
    pub elapsed: Duration,
}

impl GateVerdict {
    pub fn is_accepted(&self) -> bool {
        self.decision == Decision::Accept
    }

    /// `Err(reason)` for a rejection.
    pub fn into_result(self) -> Result<(), RejectReason> {
        match self.decision {
            Decision::Accept => Ok(()),
            Decision::Reject(reason) => Err(reason),
        }
    }
}

// ---------------------------------------------------------------------------
// MutationGate
// ---------------------------------------------------------------------------

/// Ordered pipeline of stages that every proposal passes through before it
/// is recorded.
pub struct MutationGate {
    stages: Vec<Box<dyn GateStage>>,
    config: GateConfig,
}

impl MutationGate {
    /// A gate with no stages. Use [`Self::add_stage`] to build a pipeline.
    pub fn new(config: GateConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// The standard pipeline:
    /// self-parent -> existence -> rootify-enabled -> draggable ->
    /// mother-kind -> cycle -> container -> depth.
    pub fn with_default_stages(config: GateConfig) -> Self {
        let mut gate = Self::new(config);
        gate.add_stage(Box::new(SelfParentStage));
        gate.add_stage(Box::new(ExistenceStage));
        gate.add_stage(Box::new(RootifyEnabledStage));
        gate.add_stage(Box::new(DraggableStage));
        gate.add_stage(Box::new(MotherKindStage));
        gate.add_stage(Box::new(CycleStage));
        gate.add_stage(Box::new(ContainerStage));
        gate.add_stage(Box::new(DepthStage));
        gate
    }

    pub fn add_stage(&mut self, stage: Box<dyn GateStage>) {
        self.stages.push(stage);
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Run the pipeline. Fail-fast: the first rejecting stage decides.
    ///
    /// `context.config` is ignored in favour of the gate's own configuration.
    pub fn evaluate(&self, proposal: &Proposal, context: &GateContext<'_>) -> GateResult<GateVerdict> {
        let pipeline_start = Instant::now();
        let context = GateContext {
            corpus: context.corpus,
            forest: context.forest,
            config: &self.config,
        };
        let kind = proposal.kind();
        let mut stage_results = Vec::with_capacity(self.stages.len());

        for stage in self.stages.iter().filter(|s| s.applies_to(kind)) {
            let stage_start = Instant::now();
            let decision = stage.evaluate(proposal, &context)?;

            let reason = match decision {
                StageDecision::Pass => None,
                StageDecision::Reject(reason) => Some(reason),
            };
            stage_results.push(StageResult {
                stage_name: stage.name(),
                passed: reason.is_none(),
                reason,
                elapsed: stage_start.elapsed(),
            });

            if let Some(reason) = reason {
                debug!(
                    kind = %kind,
                    child = %proposal.child,
                    mother = ?proposal.mother(),
                    stage = stage.name(),
                    reason = %reason,
                    "proposal rejected"
                );
                return Ok(GateVerdict {
                    decision: Decision::Reject(reason),
                    stage_results,
                    elapsed: pipeline_start.elapsed(),
                });
            }
        }

        Ok(GateVerdict {
            decision: Decision::Accept,
            stage_results,
            elapsed: pipeline_start.elapsed(),
        })
    }
}
