//! # Canvas Storage
//!
//! Persistence adapters for plain document trees.
//!
//! A [`TreeStore`] maps a key to a stored [`canvas_model::PlainNode`]. Two
//! backends ship with the crate:
//!
//! - [`MemoryStore`]: in-process, for tests and scratch documents
//! - [`JsonFileStore`]: one JSON object file keyed by id
//!
//! Editors hold a [`StoreSet`]: documents keyed by document id, templates
//! keyed by template name, in separate stores.
//!
//! Concurrent writers from other processes are not coordinated; the last
//! write wins.

mod error;
mod json_file;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use store::{StoreSet, TreeStore, DOCUMENTS_FILE, TEMPLATES_FILE};
