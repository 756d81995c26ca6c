//! Foundation types for the Mother Overlay Graph (MOG).
//!
//! This crate provides the identity and record types shared by every other
//! MOG crate. Nothing here knows about overlays or validation; it only
//! describes the immutable corpus and the shape of an edge.
//!
//! # Key Types
//!
//! - [`NodeId`]: Stable clause identity, non-decreasing with textual order
//! - [`ContainerId`]: Book / chapter / verse grouping used for scoping
//! - [`ClauseNode`]: Immutable clause record with its original mother
//! - [`OverlayTarget`]: What a user override points at (a mother or root)
//! - [`Edge`]: A resolved mother edge tagged with its [`EdgeSource`]
//! - [`RejectReason`]: Why a proposed mutation was refused

pub mod container;
pub mod edge;
pub mod error;
pub mod id;
pub mod node;
pub mod reject;

pub use container::ContainerId;
pub use edge::{Edge, EdgeSource, OverlayTarget};
pub use error::TypeError;
pub use id::NodeId;
pub use node::{ClauseNode, NodeKind, RelatedClause};
pub use reject::RejectReason;
