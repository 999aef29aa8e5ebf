//! # Tree Mutations
//!
//! Semantic operations on a page document.
//!
//! ## Design Principles
//!
//! 1. **Validated**: every mutation checks its preconditions before touching
//!    the tree, so a rejected mutation leaves no partial change
//! 2. **Intent-preserving**: each mutation is one user gesture (drop a row,
//!    drag a leaf, edit a field)
//! 3. **Serializable**: mutations can be logged or sent over the wire
//!
//! ## Mutation Semantics
//!
//! ### InsertRow
//! - New row with a fixed number of columns, inserted at `index`
//! - `index == rows` appends
//!
//! ### MoveRow
//! - Moving backward lands exactly at `target_index`
//! - Moving forward lands right after the row that sat at `target_index`
//!   (A to 1 in `[A, B, C]` gives `[B, A, C]`), clamped to the last slot
//! - `target_index == rows` moves the row to the end
//!
//! ### PlaceLeaf
//! - Template source creates a new leaf, existing source moves the leaf
//! - An occupied column turns the placement into a no-op, never an error
//!
//! ### RemoveNode
//! - Detaches a row or a leaf and drops its subtree
//! - Columns cannot be removed on their own; a row keeps its width
//! - A node without a parent (root, already removed) is a caller bug

use canvas_model::{
    IdGenerator, ImageLeaf, LeafMut, ListEntry, ListLeaf, LocalSettings, NodeKind, NodeType,
    SettingKey, TextLeaf, Tree, TreeError,
};
use serde::{Deserialize, Serialize};

use crate::notify::TreeChange;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a row of `columns` empty columns at `index`
    InsertRow { columns: usize, index: usize },

    /// Relocate a row within the row sequence
    MoveRow { row_id: String, target_index: usize },

    /// Detach a node from its parent
    RemoveNode { node_id: String },

    /// Create or move a leaf into a column
    PlaceLeaf { source: LeafSource, column_id: String },

    /// Set one field of a leaf's local override
    UpdateLocalSetting {
        node_id: String,
        key: SettingKey,
        value: String,
    },

    /// Drop one field of a leaf's local override
    ClearLocalSetting { node_id: String, key: SettingKey },

    /// Set one field of the document-wide defaults
    UpdateGlobalSetting { key: SettingKey, value: String },

    /// Replace a leaf's primary content
    UpdateLeafContent { node_id: String, content: LeafContent },
}

/// What is being dropped into a column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LeafSource {
    /// A palette template that has no node yet
    Template(LeafTemplate),

    /// A leaf already in the document
    Existing(String),
}

/// Blueprint for a new leaf
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LeafTemplate {
    Text {
        text: String,
    },
    Image {
        text: String,
        #[serde(default)]
        src: Option<String>,
    },
    List {
        text: String,
        #[serde(default)]
        entries: Vec<ListEntry>,
    },
}

impl LeafTemplate {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(text: impl Into<String>) -> Self {
        Self::Image {
            text: text.into(),
            src: None,
        }
    }

    pub fn list(text: impl Into<String>) -> Self {
        Self::List {
            text: text.into(),
            entries: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LeafTemplate::Text { text }
            | LeafTemplate::Image { text, .. }
            | LeafTemplate::List { text, .. } => text,
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            LeafTemplate::Text { .. } => NodeType::Text,
            LeafTemplate::Image { .. } => NodeType::Image,
            LeafTemplate::List { .. } => NodeType::List,
        }
    }

    /// Fresh leaf payload with empty local settings
    fn to_kind(&self) -> NodeKind {
        match self.clone() {
            LeafTemplate::Text { text } => NodeKind::Text(TextLeaf {
                text,
                local: LocalSettings::default(),
            }),
            LeafTemplate::Image { text, src } => NodeKind::Image(ImageLeaf {
                text,
                src,
                local: LocalSettings::default(),
            }),
            LeafTemplate::List { text, entries } => NodeKind::List(ListLeaf {
                text,
                list: (!entries.is_empty()).then_some(entries),
                local: LocalSettings::default(),
            }),
        }
    }
}

/// Primary content of a leaf, one shape per leaf variant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LeafContent {
    Text(String),
    Image { src: String },
    List(Vec<ListEntry>),
}

/// What applying a mutation did to the tree
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Changed(TreeChange),
    Noop(String),
}

/// Result of applying a mutation through a document
#[derive(Debug, Clone, PartialEq)]
pub enum MutationResult {
    /// Tree changed; `version` is the document version after the change
    Applied { version: u64, change: TreeChange },

    /// Nothing to do (occupied column, row already in place)
    Noop { reason: String },
}

impl MutationResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationResult::Applied { .. })
    }

    pub fn change(&self) -> Option<&TreeChange> {
        match self {
            MutationResult::Applied { change, .. } => Some(change),
            MutationResult::Noop { .. } => None,
        }
    }
}

impl Mutation {
    /// Get a debug name for this mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertRow { .. } => "insert_row",
            Mutation::MoveRow { .. } => "move_row",
            Mutation::RemoveNode { .. } => "remove_node",
            Mutation::PlaceLeaf { .. } => "place_leaf",
            Mutation::UpdateLocalSetting { .. } => "update_local_setting",
            Mutation::ClearLocalSetting { .. } => "clear_local_setting",
            Mutation::UpdateGlobalSetting { .. } => "update_global_setting",
            Mutation::UpdateLeafContent { .. } => "update_leaf_content",
        }
    }

    /// Apply mutation to the tree with validation
    pub fn apply(&self, tree: &mut Tree, ids: &mut IdGenerator) -> Result<Outcome, TreeError> {
        self.validate(tree)?;

        match self {
            Mutation::InsertRow { columns, index } => Self::apply_insert_row(tree, ids, *columns, *index),

            Mutation::MoveRow {
                row_id,
                target_index,
            } => Self::apply_move_row(tree, row_id, *target_index),

            Mutation::RemoveNode { node_id } => Self::apply_remove(tree, node_id),

            Mutation::PlaceLeaf { source, column_id } => {
                Self::apply_place_leaf(tree, ids, source, column_id)
            }

            Mutation::UpdateLocalSetting {
                node_id,
                key,
                value,
            } => {
                tree.leaf_mut(node_id)?
                    .local_settings_mut()
                    .set(*key, value.as_str());
                Ok(Outcome::Changed(TreeChange::LocalSettingChanged {
                    node_id: node_id.clone(),
                    key: *key,
                }))
            }

            Mutation::ClearLocalSetting { node_id, key } => {
                if tree.leaf_mut(node_id)?.local_settings_mut().unset(*key) {
                    Ok(Outcome::Changed(TreeChange::LocalSettingChanged {
                        node_id: node_id.clone(),
                        key: *key,
                    }))
                } else {
                    Ok(Outcome::Noop(format!("{} has no override for {}", node_id, key)))
                }
            }

            Mutation::UpdateGlobalSetting { key, value } => {
                tree.global_settings_mut().set(*key, value.as_str());
                Ok(Outcome::Changed(TreeChange::GlobalSettingChanged { key: *key }))
            }

            Mutation::UpdateLeafContent { node_id, content } => {
                Self::apply_update_content(tree, node_id, content)
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, tree: &Tree) -> Result<(), TreeError> {
        match self {
            Mutation::InsertRow { columns, index } => {
                if *columns == 0 {
                    return Err(TreeError::invalid_structure("a row needs at least one column"));
                }
                let len = tree.root().children().len();
                if *index > len {
                    return Err(TreeError::IndexOutOfBounds { index: *index, len });
                }
                Ok(())
            }

            Mutation::MoveRow {
                row_id,
                target_index,
            } => {
                expect_type(tree, row_id, NodeType::Row)?;
                let len = tree.root().children().len();
                if *target_index > len {
                    return Err(TreeError::IndexOutOfBounds {
                        index: *target_index,
                        len,
                    });
                }
                Ok(())
            }

            Mutation::RemoveNode { node_id } => {
                tree.parent_of(node_id)
                    .ok_or_else(|| TreeError::NotAttached(node_id.clone()))?;
                if tree.require(node_id)?.node_type() == NodeType::Column {
                    return Err(TreeError::invalid_structure(format!(
                        "column {} is fixed by its row; remove the row instead",
                        node_id
                    )));
                }
                Ok(())
            }

            Mutation::PlaceLeaf { source, column_id } => {
                expect_type(tree, column_id, NodeType::Column)?;
                if let LeafSource::Existing(leaf_id) = source {
                    let leaf = tree.require(leaf_id)?;
                    if !leaf.node_type().is_leaf() {
                        return Err(TreeError::NotALeaf(leaf_id.clone()));
                    }
                }
                Ok(())
            }

            Mutation::UpdateLocalSetting { node_id, .. }
            | Mutation::ClearLocalSetting { node_id, .. }
            | Mutation::UpdateLeafContent { node_id, .. } => {
                let node = tree.require(node_id)?;
                if node.as_leaf().is_none() {
                    return Err(TreeError::NotALeaf(node_id.clone()));
                }
                Ok(())
            }

            Mutation::UpdateGlobalSetting { .. } => Ok(()),
        }
    }

    fn apply_insert_row(
        tree: &mut Tree,
        ids: &mut IdGenerator,
        columns: usize,
        index: usize,
    ) -> Result<Outcome, TreeError> {
        let root = tree.root_id().to_string();
        let row_id = fresh_id(tree, ids);
        tree.insert(&root, index, row_id.clone(), NodeKind::Row)?;

        let mut column_ids = Vec::with_capacity(columns);
        for position in 0..columns {
            let column_id = fresh_id(tree, ids);
            tree.insert(&row_id, position, column_id.clone(), NodeKind::Column)?;
            column_ids.push(column_id);
        }

        Ok(Outcome::Changed(TreeChange::RowInserted {
            row_id,
            index,
            column_ids,
        }))
    }

    fn apply_move_row(tree: &mut Tree, row_id: &str, target: usize) -> Result<Outcome, TreeError> {
        let root = tree.root_id().to_string();
        let len = tree.root().children().len();
        let current = tree
            .position(row_id)
            .ok_or_else(|| TreeError::NotAttached(row_id.to_string()))?;

        // Forward moves land after the row that held `target`
        let destination = if current < target {
            target.min(len - 1)
        } else {
            target
        };

        if destination == current {
            return Ok(Outcome::Noop(format!("row {} already at {}", row_id, current)));
        }

        tree.reparent(row_id, &root, destination)?;
        Ok(Outcome::Changed(TreeChange::RowMoved {
            row_id: row_id.to_string(),
            from: current,
            to: destination,
        }))
    }

    fn apply_remove(tree: &mut Tree, node_id: &str) -> Result<Outcome, TreeError> {
        let parent_id = tree
            .parent_of(node_id)
            .map(|parent| parent.id().to_string())
            .ok_or_else(|| TreeError::NotAttached(node_id.to_string()))?;
        let removed = tree.remove(node_id)?;

        Ok(Outcome::Changed(TreeChange::NodeRemoved {
            node_id: node_id.to_string(),
            parent_id,
            removed,
        }))
    }

    fn apply_place_leaf(
        tree: &mut Tree,
        ids: &mut IdGenerator,
        source: &LeafSource,
        column_id: &str,
    ) -> Result<Outcome, TreeError> {
        if let Some(occupant) = tree.leaf_of(column_id) {
            return Ok(Outcome::Noop(format!(
                "column {} already holds {}",
                column_id,
                occupant.id()
            )));
        }

        match source {
            LeafSource::Template(template) => {
                let leaf_id = fresh_id(tree, ids);
                tree.insert(column_id, 0, leaf_id.clone(), template.to_kind())?;
                Ok(Outcome::Changed(TreeChange::LeafPlaced {
                    leaf_id,
                    column_id: column_id.to_string(),
                    from: None,
                }))
            }

            LeafSource::Existing(leaf_id) => {
                let from = tree
                    .parent_of(leaf_id)
                    .map(|parent| parent.id().to_string())
                    .ok_or_else(|| TreeError::NotAttached(leaf_id.clone()))?;
                tree.reparent(leaf_id, column_id, 0)?;
                Ok(Outcome::Changed(TreeChange::LeafPlaced {
                    leaf_id: leaf_id.clone(),
                    column_id: column_id.to_string(),
                    from: Some(from),
                }))
            }
        }
    }

    fn apply_update_content(
        tree: &mut Tree,
        node_id: &str,
        content: &LeafContent,
    ) -> Result<Outcome, TreeError> {
        match (tree.leaf_mut(node_id)?, content) {
            (LeafMut::Text(leaf), LeafContent::Text(text)) => leaf.text = text.clone(),
            (LeafMut::Image(leaf), LeafContent::Image { src }) => leaf.src = Some(src.clone()),
            (LeafMut::List(leaf), LeafContent::List(entries)) => leaf.list = Some(entries.clone()),
            (leaf, _) => {
                return Err(TreeError::ContentMismatch {
                    id: node_id.to_string(),
                    node_type: leaf.node_type(),
                })
            }
        }

        Ok(Outcome::Changed(TreeChange::LeafContentChanged {
            node_id: node_id.to_string(),
        }))
    }
}

/// Next generated id not already present in the tree
fn fresh_id(tree: &Tree, ids: &mut IdGenerator) -> String {
    loop {
        let id = ids.new_id();
        if !tree.contains(&id) {
            return id;
        }
    }
}

fn expect_type(tree: &Tree, id: &str, expected: NodeType) -> Result<(), TreeError> {
    let found = tree.require(id)?.node_type();
    if found == expected {
        Ok(())
    } else {
        Err(TreeError::InvalidTarget {
            id: id.to_string(),
            expected,
            found,
        })
    }
}
