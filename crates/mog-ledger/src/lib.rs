//! Overlay state for the Mother Overlay Graph (MOG).
//!
//! The base forest never changes; every analyst edit lands here instead.
//! This crate provides:
//! - [`OverlayStore`], the child → target map with a reverse mother index
//! - [`MutationLog`], the linear undo/redo history
//! - [`OverlayLedger`], the only writer of both, so a store change and its
//!   log entry always happen together
//!
//! Validation lives elsewhere: the ledger records whatever it is handed.

pub mod error;
pub mod ledger;
pub mod log;
pub mod overlay;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{Change, Checkpoint, OverlayLedger};
pub use log::{MutationEntry, MutationLog};
pub use overlay::{OverlayEdge, OverlayStore};
