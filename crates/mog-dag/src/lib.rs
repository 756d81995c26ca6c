//! Effective mother forest for the Mother Overlay Graph.
//!
//! Combines the immutable corpus with the overlay store into one read-only
//! view. Nothing here is cached across writes: a [`EffectiveForest`] borrows
//! the current overlay and answers from it directly. Supports mother
//! resolution, ancestor walks, depth, descendant sets, and whole-forest
//! cycle verification.

pub mod error;
pub mod forest;
pub mod index;

pub use error::{DagError, DagResult};
pub use forest::EffectiveForest;
pub use index::BaseIndex;
