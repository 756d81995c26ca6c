//! HTTP server for the Mother Overlay Graph.
//!
//! Exposes one [`mog_engine::MotherEngine`] over JSON: scoped tree queries,
//! validated reparent/rootify edits, batches, undo/redo, reset, and the
//! mutation history. Rejections answer `{"ok": false, "reason": CODE}`.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::MogServer;
