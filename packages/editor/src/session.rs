//! # Edit Session Management
//!
//! An EditSession is one editing context: the open document, the current
//! selection, the element palette and the stores documents and templates
//! are persisted in.
//!
//! Documents are keyed by document id, templates by name. A template is a
//! full snapshot of a document; applying it replaces the open document's
//! content while the open document keeps its own id.

use canvas_model::NodeId;
use canvas_storage::StoreSet;
use tracing::{debug, info};

use crate::catalog::{DropTarget, ElementCatalog};
use crate::{Document, EditorError, Mutation, MutationResult};

/// Document opened when no id is given
pub const DEFAULT_DOCUMENT_ID: &str = "root";

#[derive(Debug)]
pub struct EditSession {
    /// Document being edited
    pub document: Document,

    /// Currently selected node
    selected: Option<NodeId>,

    catalog: ElementCatalog,
    stores: StoreSet,
}

impl EditSession {
    /// Session on an empty default document
    pub fn new(stores: StoreSet) -> Self {
        Self {
            document: Document::new(DEFAULT_DOCUMENT_ID),
            selected: None,
            catalog: ElementCatalog::default(),
            stores,
        }
    }

    /// Session on `document_id`, loaded from the store when present
    pub fn open(stores: StoreSet, document_id: &str) -> Result<Self, EditorError> {
        let mut session = Self::new(stores);
        session.open_document(document_id)?;
        Ok(session)
    }

    /// Switch to another document.
    ///
    /// Returns whether the document was found in the store; a missing
    /// document opens as an empty one.
    pub fn open_document(&mut self, document_id: &str) -> Result<bool, EditorError> {
        let (document, found) = match self.stores.documents.load(document_id)? {
            Some(plain) => (Document::from_plain_as(&plain, document_id)?, true),
            None => (Document::new(document_id), false),
        };

        debug!(document = document_id, found, "Opened document");
        self.document = document;
        self.selected = None;
        Ok(found)
    }

    pub fn catalog(&self) -> &ElementCatalog {
        &self.catalog
    }

    /// Apply a mutation to the open document
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self.document.apply(mutation)?;

        let deselect = match (self.selected.as_deref(), result.change()) {
            (Some(selected), Some(change)) => change.removes(selected),
            _ => false,
        };
        if deselect {
            self.selected = None;
        }
        Ok(result)
    }

    /// Drop a palette element by label
    pub fn drop_element(
        &mut self,
        label: &str,
        target: DropTarget,
    ) -> Result<MutationResult, EditorError> {
        let mutation = self.catalog.get(label)?.drop_on(target)?;
        self.apply(mutation)
    }

    /// Select a node, or clear the selection with `None`
    pub fn select(&mut self, node_id: Option<&str>) -> Result<(), EditorError> {
        if let Some(id) = node_id {
            self.document.tree().require(id)?;
        }
        self.selected = node_id.map(str::to_string);
        Ok(())
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Persist the open document under its id
    pub fn save(&mut self) -> Result<(), EditorError> {
        let plain = self.document.to_plain();
        self.stores.documents.save(self.document.id(), &plain)?;
        self.document.mark_saved();
        info!(document = self.document.id(), "Saved document");
        Ok(())
    }

    /// Forget the stored document and start over empty
    pub fn clear(&mut self) -> Result<(), EditorError> {
        let document_id = self.document.id().to_string();
        self.stores.documents.clear(&document_id)?;
        self.document = Document::new(&document_id);
        self.selected = None;
        info!(document = %document_id, "Cleared document");
        Ok(())
    }

    /// Snapshot the open document as a named template
    pub fn save_template(&mut self, name: &str) -> Result<(), EditorError> {
        let plain = self.document.to_plain();
        self.stores.templates.save(name, &plain)?;
        info!(template = name, "Saved template");
        Ok(())
    }

    /// Replace the open document's content with a template.
    ///
    /// Returns `false` when no template has that name.
    pub fn apply_template(&mut self, name: &str) -> Result<bool, EditorError> {
        let Some(plain) = self.stores.templates.load(name)? else {
            debug!(template = name, "Template not found");
            return Ok(false);
        };

        let version = self.document.replace(&plain)?;
        self.selected = None;
        info!(template = name, document = self.document.id(), version, "Applied template");
        Ok(true)
    }

    pub fn delete_template(&mut self, name: &str) -> Result<(), EditorError> {
        self.stores.templates.clear(name)?;
        Ok(())
    }

    pub fn list_templates(&self) -> Result<Vec<String>, EditorError> {
        Ok(self.stores.templates.list()?)
    }

    pub fn list_documents(&self) -> Result<Vec<String>, EditorError> {
        Ok(self.stores.documents.list()?)
    }
}
