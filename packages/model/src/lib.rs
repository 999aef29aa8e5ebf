//! # Canvas Model
//!
//! Content model of a page-builder document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ node: flat id-keyed table, layered variants │
//! │  root → row → column → leaf                 │
//! └─────────────────────────────────────────────┘
//!          ↓                        ↓
//! ┌──────────────────────┐ ┌────────────────────┐
//! │ cascade: defaults +  │ │ plain: parent-free │
//! │ per-leaf overrides   │ │ storage form       │
//! └──────────────────────┘ └────────────────────┘
//! ```
//!
//! Mutation policy (row ordering, column occupancy) lives in the editor
//! crate; this crate only keeps parent/child linkage consistent.

pub mod cascade;
pub mod error;
pub mod id_generator;
pub mod node;
pub mod plain;
pub mod settings;

pub use cascade::{resolve, resolve_field};
pub use error::{TreeError, TreeResult};
pub use id_generator::{document_seed, IdGenerator};
pub use node::{
    ImageLeaf, LeafMut, LeafRef, ListEntry, ListLeaf, Node, NodeId, NodeKind, NodeType, TextLeaf,
    Tree,
};
pub use plain::{from_plain, from_plain_as, to_plain, PlainLocalSettings, PlainNode};
pub use settings::{
    EffectiveSettings, GlobalSettings, LocalSettings, Palette, PaletteField, PaletteOverride,
    SettingKey, Styling, StylingField, StylingOverride,
};
