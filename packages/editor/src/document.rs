//! # Document Handle
//!
//! One live page document and its editing state.
//!
//! The handle owns the tree exclusively. Every change goes through
//! [`Document::apply`], which validates the mutation, bumps the version,
//! marks the document dirty and notifies listeners, in that order.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Rehydrate → Edit → Notify → Serialize → Save
//!   ↓        ↓         ↓       ↓         ↓         ↓
//! Store   Tree    Mutations  Views    PlainNode  Store
//! ```

use canvas_model::{
    from_plain_as, resolve, to_plain, EffectiveSettings, IdGenerator, PlainNode, Tree,
};
use tracing::{debug, warn};

use crate::notify::{ChangeListener, ChangeNotifier, ListenerId, TreeChange};
use crate::{EditorError, Mutation, MutationResult, Outcome};

/// Editable page document
#[derive(Debug)]
pub struct Document {
    /// Current version number (increments on each applied mutation)
    pub version: u64,

    tree: Tree,
    ids: IdGenerator,
    dirty: bool,
    notifier: ChangeNotifier,
}

impl Document {
    /// Empty document with default settings
    pub fn new(document_id: &str) -> Self {
        Self::from_tree(Tree::new(document_id))
    }

    /// Wrap an existing tree; the id generator skips every id already in it
    pub fn from_tree(tree: Tree) -> Self {
        let mut ids = IdGenerator::new(tree.root_id());
        for node in tree.walk() {
            ids.observe(node.id());
        }

        Self {
            version: 0,
            tree,
            ids,
            dirty: false,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Rehydrate a stored tree
    pub fn from_plain(plain: &PlainNode) -> Result<Self, EditorError> {
        Self::from_plain_as(plain, &plain.id)
    }

    /// Rehydrate a stored tree under a different document id
    pub fn from_plain_as(plain: &PlainNode, document_id: &str) -> Result<Self, EditorError> {
        Ok(Self::from_tree(from_plain_as(plain, document_id)?))
    }

    pub fn id(&self) -> &str {
        self.tree.root_id()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Apply a mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        match mutation.apply(&mut self.tree, &mut self.ids) {
            Ok(Outcome::Changed(change)) => {
                self.version += 1;
                self.dirty = true;
                debug!(
                    document = self.tree.root_id(),
                    mutation = mutation.name(),
                    version = self.version,
                    "Applied mutation"
                );
                self.notifier.notify(&change, self.version);
                Ok(MutationResult::Applied {
                    version: self.version,
                    change,
                })
            }
            Ok(Outcome::Noop(reason)) => {
                debug!(mutation = mutation.name(), %reason, "Mutation was a no-op");
                Ok(MutationResult::Noop { reason })
            }
            Err(e) => {
                warn!(mutation = mutation.name(), error = %e, "Rejected mutation");
                Err(e.into())
            }
        }
    }

    /// Swap in another tree wholesale, keeping this document's id
    pub fn replace(&mut self, plain: &PlainNode) -> Result<u64, EditorError> {
        let tree = from_plain_as(plain, self.tree.root_id())?;
        for node in tree.walk() {
            self.ids.observe(node.id());
        }

        let change = TreeChange::Replaced {
            rows: tree.root().children().len(),
        };
        self.tree = tree;
        self.version += 1;
        self.dirty = true;
        self.notifier.notify(&change, self.version);
        Ok(self.version)
    }

    /// Effective settings of a leaf
    pub fn resolve(&self, node_id: &str) -> Option<EffectiveSettings> {
        resolve(&self.tree, node_id)
    }

    pub fn to_plain(&self) -> PlainNode {
        to_plain(&self.tree)
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn subscribe(&mut self, listener: impl ChangeListener + 'static) -> ListenerId {
        self.notifier.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }
}
