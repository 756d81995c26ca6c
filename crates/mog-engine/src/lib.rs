//! The Mother Overlay Graph engine.
//!
//! [`MotherEngine`] owns the corpus, the overlay ledger, and the validation
//! gate, and is the entry point for applications embedding MOG. Every
//! mutation is validated against the current effective forest and recorded
//! together with its undo entry; reads see a consistent snapshot.

pub mod change;
pub mod config;
pub mod engine;
pub mod error;
pub mod query;

pub use change::{BatchOp, EdgeChange, EngineStats};
pub use config::{EngineConfig, ScopeConfig};
pub use engine::MotherEngine;
pub use error::{EngineError, EngineResult};
pub use query::{NodeView, TreeView};

// Re-export key types
pub use mog_corpus::{CorpusIndex, CorpusRecord, InMemoryCorpus};
pub use mog_gate::GateConfig;
pub use mog_ledger::MutationEntry;
pub use mog_types::{Edge, EdgeSource, NodeId, OverlayTarget, RejectReason};
