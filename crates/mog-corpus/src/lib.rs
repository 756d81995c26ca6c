//! Corpus index for the Mother Overlay Graph.
//!
//! The corpus is the immutable base: every clause node, its original mother,
//! and the container it belongs to. It is loaded once and never changes.
//! This crate provides:
//! - The [`CorpusIndex`] trait boundary the engine consumes
//! - [`InMemoryCorpus`], built from [`CorpusRecord`]s or a JSON export
//! - [`BookTable`] for forgiving book-name resolution
//! - [`ScopeDescriptor`] parsing and the [`ContainerIndex`] that answers
//!   scope lookups without scanning the corpus

pub mod books;
pub mod error;
pub mod memory;
pub mod record;
pub mod scope;
pub mod traits;

pub use books::BookTable;
pub use error::{CorpusError, CorpusResult};
pub use memory::InMemoryCorpus;
pub use record::{load_records, CorpusRecord};
pub use scope::{ContainerIndex, ScopeDescriptor, ScopeRange};
pub use traits::CorpusIndex;
