//! Mutation validation pipeline for the Mother Overlay Graph.
//!
//! Every reparent and rootify passes through the gate before it reaches the
//! overlay ledger. The gate runs an ordered pipeline of stages against the
//! current effective forest and stops at the first rejection.
//!
//! Default pipeline:
//!
//! | Stage | Applies to | Rejects with |
//! |---|---|---|
//! | `self_parent` | reparent | `SelfParent` |
//! | `existence` | both | `NotFound` |
//! | `rootify_enabled` | rootify | `RootifyDisabled` |
//! | `draggable` | both | `NotDraggable` |
//! | `mother_kind` | reparent | `MotherNotClause` |
//! | `cycle` | reparent | `CycleDetected` |
//! | `container` | reparent | `ScopeViolation` |
//! | `depth` | reparent | `DepthExceeded` |

pub mod config;
pub mod error;
pub mod gate;
pub mod stage;
pub mod stages;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::GateConfig;
pub use error::{GateError, GateResult};
pub use gate::{Decision, GateVerdict, MutationGate};
pub use stage::{GateContext, GateStage, MutationKind, Proposal, StageDecision, StageResult};
pub use stages::{
    ContainerStage, CycleStage, DepthStage, DraggableStage, ExistenceStage, MotherKindStage,
    RootifyEnabledStage, SelfParentStage,
};
