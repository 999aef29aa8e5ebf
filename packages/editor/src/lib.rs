//! # Canvas Editor
//!
//! Editing engine for page documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: tree, settings cascade, plain form   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Apply mutations with validation          │
//! │  - Notify listeners of each change          │
//! │  - Element palette and drop targets         │
//! │  - Sessions over document/template stores   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ storage: keyed plain trees                  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tree is source of truth**: views re-read it after a change notice
//! 2. **Validate then apply**: a rejected mutation changes nothing
//! 3. **No-ops are not errors**: dropping into an occupied column is ignored
//!
//! ## Usage
//!
//! ```rust,ignore
//! use canvas_editor::{DropTarget, EditSession};
//! use canvas_storage::StoreSet;
//! use std::path::Path;
//!
//! let mut session = EditSession::open(StoreSet::open(Path::new(".canvas")), "home")?;
//! session.drop_element("1|1", DropTarget::Canvas { index: 0 })?;
//! session.save()?;
//! ```

mod catalog;
mod document;
mod errors;
mod mutations;
mod notify;
mod session;

pub use catalog::{DropTarget, Element, ElementCatalog};
pub use document::Document;
pub use errors::{EditorError, EditorResult};
pub use mutations::{LeafContent, LeafSource, LeafTemplate, Mutation, MutationResult, Outcome};
pub use notify::{ChangeListener, ChangeNotifier, ListenerId, TreeChange};
pub use session::{EditSession, DEFAULT_DOCUMENT_ID};
