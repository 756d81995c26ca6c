//! Built-in gate stages, in pipeline order.

pub mod ancestry;
pub mod container;
pub mod validation;

pub use ancestry::{CycleStage, DepthStage};
pub use container::ContainerStage;
pub use validation::{
    DraggableStage, ExistenceStage, MotherKindStage, RootifyEnabledStage, SelfParentStage,
};
