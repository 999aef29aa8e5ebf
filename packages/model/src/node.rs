//! # Node model
//!
//! A document is a flat table of nodes keyed by id. Linkage is stored as ids:
//! each node records its parent id and an ordered list of child ids, and the
//! [`Tree`] owns every node.
//!
//! ```text
//! root ─┬─ row ─┬─ column ── leaf (text | image | list)
//!       │       └─ column
//!       └─ row ─── column ── leaf
//! ```
//!
//! Containment is layered: the root holds rows, rows hold columns, columns
//! hold at most one leaf. [`NodeType::accepts`] is the single source of that
//! rule, so a cycle can never be formed.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};
use crate::settings::{GlobalSettings, LocalSettings};

pub type NodeId = String;

/// Closed set of node variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Root,
    Row,
    Column,
    Text,
    Image,
    List,
}

impl NodeType {
    /// Tag used in the persisted form
    pub fn tag(self) -> &'static str {
        match self {
            NodeType::Root => "root-node",
            NodeType::Row => "row-node",
            NodeType::Column => "col-node",
            NodeType::Text => "text-node",
            NodeType::Image => "image-node",
            NodeType::List => "sidebar-node",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "root-node" => Some(NodeType::Root),
            "row-node" => Some(NodeType::Row),
            "col-node" => Some(NodeType::Column),
            "text-node" => Some(NodeType::Text),
            "image-node" => Some(NodeType::Image),
            "sidebar-node" => Some(NodeType::List),
            _ => None,
        }
    }

    pub fn is_leaf(self) -> bool {
        match self {
            NodeType::Text | NodeType::Image | NodeType::List => true,
            NodeType::Root | NodeType::Row | NodeType::Column => false,
        }
    }

    /// Whether a node of this type may hold a child of type `child`
    pub fn accepts(self, child: NodeType) -> bool {
        match self {
            NodeType::Root => child == NodeType::Row,
            NodeType::Row => child == NodeType::Column,
            NodeType::Column => child.is_leaf(),
            NodeType::Text | NodeType::Image | NodeType::List => false,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Root => "root",
            NodeType::Row => "row",
            NodeType::Column => "column",
            NodeType::Text => "text",
            NodeType::Image => "image",
            NodeType::List => "list",
        };
        f.write_str(name)
    }
}

/// Entry of a list leaf (rendered as a link to another document)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub name: String,
    pub id: String,
}

impl ListEntry {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLeaf {
    pub text: String,
    pub local: LocalSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageLeaf {
    pub text: String,
    pub src: Option<String>,
    pub local: LocalSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListLeaf {
    pub text: String,
    pub list: Option<Vec<ListEntry>>,
    pub local: LocalSettings,
}

/// Variant payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root(GlobalSettings),
    Row,
    Column,
    Text(TextLeaf),
    Image(ImageLeaf),
    List(ListLeaf),
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Root(_) => NodeType::Root,
            NodeKind::Row => NodeType::Row,
            NodeKind::Column => NodeType::Column,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::Image(_) => NodeType::Image,
            NodeKind::List(_) => NodeType::List,
        }
    }

    pub fn as_leaf(&self) -> Option<LeafRef<'_>> {
        match self {
            NodeKind::Text(leaf) => Some(LeafRef::Text(leaf)),
            NodeKind::Image(leaf) => Some(LeafRef::Image(leaf)),
            NodeKind::List(leaf) => Some(LeafRef::List(leaf)),
            NodeKind::Root(_) | NodeKind::Row | NodeKind::Column => None,
        }
    }

    fn as_leaf_mut(&mut self) -> Option<LeafMut<'_>> {
        match self {
            NodeKind::Text(leaf) => Some(LeafMut::Text(leaf)),
            NodeKind::Image(leaf) => Some(LeafMut::Image(leaf)),
            NodeKind::List(leaf) => Some(LeafMut::List(leaf)),
            NodeKind::Root(_) | NodeKind::Row | NodeKind::Column => None,
        }
    }
}

/// Shared view of a leaf payload
#[derive(Debug, Clone, Copy)]
pub enum LeafRef<'a> {
    Text(&'a TextLeaf),
    Image(&'a ImageLeaf),
    List(&'a ListLeaf),
}

impl<'a> LeafRef<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            LeafRef::Text(leaf) => &leaf.text,
            LeafRef::Image(leaf) => &leaf.text,
            LeafRef::List(leaf) => &leaf.text,
        }
    }

    pub fn local_settings(&self) -> &'a LocalSettings {
        match self {
            LeafRef::Text(leaf) => &leaf.local,
            LeafRef::Image(leaf) => &leaf.local,
            LeafRef::List(leaf) => &leaf.local,
        }
    }
}

/// Mutable view of a leaf payload. The variant itself cannot be swapped.
#[derive(Debug)]
pub enum LeafMut<'a> {
    Text(&'a mut TextLeaf),
    Image(&'a mut ImageLeaf),
    List(&'a mut ListLeaf),
}

impl LeafMut<'_> {
    pub fn node_type(&self) -> NodeType {
        match self {
            LeafMut::Text(_) => NodeType::Text,
            LeafMut::Image(_) => NodeType::Image,
            LeafMut::List(_) => NodeType::List,
        }
    }

    pub fn local_settings_mut(&mut self) -> &mut LocalSettings {
        match self {
            LeafMut::Text(leaf) => &mut leaf.local,
            LeafMut::Image(leaf) => &mut leaf.local,
            LeafMut::List(leaf) => &mut leaf.local,
        }
    }
}

/// A node entry in the tree table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

impl Node {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn as_leaf(&self) -> Option<LeafRef<'_>> {
        self.kind.as_leaf()
    }
}

/// One document's node table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: NodeId,
    nodes: HashMap<NodeId, Node>,
}

impl Tree {
    /// Empty document with default settings
    pub fn new(document_id: impl Into<String>) -> Self {
        Self::with_settings(document_id, GlobalSettings::default())
    }

    pub fn with_settings(document_id: impl Into<String>, settings: GlobalSettings) -> Self {
        let root = document_id.into();
        let mut nodes = HashMap::new();
        nodes.insert(
            root.clone(),
            Node {
                id: root.clone(),
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Root(settings),
            },
        );
        Self { root, nodes }
    }

    pub fn root_id(&self) -> &str {
        &self.root
    }

    pub fn root(&self) -> &Node {
        &self.nodes[&self.root]
    }

    pub fn global_settings(&self) -> &GlobalSettings {
        match &self.root().kind {
            NodeKind::Root(settings) => settings,
            _ => unreachable!("root entry always holds NodeKind::Root"),
        }
    }

    pub fn global_settings_mut(&mut self) -> &mut GlobalSettings {
        let root = self.root.clone();
        match self.nodes.get_mut(&root).map(|node| &mut node.kind) {
            Some(NodeKind::Root(settings)) => settings,
            _ => unreachable!("root entry always holds NodeKind::Root"),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Like [`Tree::get`] but reports a missing id as an error
    pub fn require(&self, id: &str) -> TreeResult<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root().children.is_empty()
    }

    pub fn parent_of(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)?.parent.as_deref().and_then(|p| self.nodes.get(p))
    }

    pub fn children_of<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |child| self.nodes.get(child))
    }

    /// Rows in document order
    pub fn rows(&self) -> impl Iterator<Item = &Node> + '_ {
        self.children_of(&self.root)
    }

    pub fn row_ids(&self) -> Vec<NodeId> {
        self.root().children.clone()
    }

    /// Position of a node within its parent's children
    pub fn position(&self, id: &str) -> Option<usize> {
        let parent = self.parent_of(id)?;
        parent.children.iter().position(|c| c == id)
    }

    /// The leaf a column currently holds
    pub fn leaf_of(&self, column_id: &str) -> Option<&Node> {
        self.children_of(column_id).next()
    }

    pub fn leaf_mut(&mut self, id: &str) -> TreeResult<LeafMut<'_>> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.to_string()))?;
        node.kind
            .as_leaf_mut()
            .ok_or_else(|| TreeError::NotALeaf(id.to_string()))
    }

    /// Ids of a node and all its descendants, depth-first
    pub fn descendants(&self, id: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children.iter().rev().cloned());
                out.push(current);
            }
        }
        out
    }

    /// Every attached node, depth-first from the root
    pub fn walk(&self) -> Vec<&Node> {
        self.descendants(&self.root)
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .collect()
    }

    /// Attach a new node under `parent_id` at `index`
    pub fn insert(
        &mut self,
        parent_id: &str,
        index: usize,
        id: impl Into<NodeId>,
        kind: NodeKind,
    ) -> TreeResult<()> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(TreeError::DuplicateId(id));
        }

        let parent = self.require(parent_id)?;
        check_accepts(parent, kind.node_type())?;
        let len = parent.children.len();
        if index > len {
            return Err(TreeError::IndexOutOfBounds { index, len });
        }

        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children.insert(index, id.clone());
        }
        self.nodes.insert(
            id.clone(),
            Node {
                id,
                parent: Some(parent_id.to_string()),
                children: Vec::new(),
                kind,
            },
        );
        Ok(())
    }

    /// Move an attached node under `parent_id` at `index`.
    ///
    /// `index` is counted after the node has been taken out of its current
    /// parent, so moving within the same parent ranges over `0..len`.
    pub fn reparent(&mut self, id: &str, parent_id: &str, index: usize) -> TreeResult<()> {
        let node = self.require(id)?;
        let old_parent = node
            .parent
            .clone()
            .ok_or_else(|| TreeError::NotAttached(id.to_string()))?;
        let node_type = node.node_type();

        let new_parent = self.require(parent_id)?;
        check_accepts(new_parent, node_type)?;
        let len = new_parent.children.len() - usize::from(old_parent == parent_id);
        if index > len {
            return Err(TreeError::IndexOutOfBounds { index, len });
        }

        if let Some(parent) = self.nodes.get_mut(&old_parent) {
            parent.children.retain(|c| c != id);
        }
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children.insert(index, id.to_string());
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = Some(parent_id.to_string());
        }
        Ok(())
    }

    /// Detach a node and drop it together with its subtree.
    ///
    /// Returns the removed ids, the node itself first.
    pub fn remove(&mut self, id: &str) -> TreeResult<Vec<NodeId>> {
        let parent_id = self
            .nodes
            .get(id)
            .and_then(|node| node.parent.clone())
            .ok_or_else(|| TreeError::NotAttached(id.to_string()))?;

        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.children.retain(|c| c != id);
        }

        let removed = self.descendants(id);
        for removed_id in &removed {
            self.nodes.remove(removed_id);
        }
        Ok(removed)
    }
}

fn check_accepts(parent: &Node, child: NodeType) -> TreeResult<()> {
    if parent.node_type().accepts(child) {
        Ok(())
    } else {
        Err(TreeError::invalid_structure(format!(
            "{} {} cannot hold a {}",
            parent.node_type(),
            parent.id,
            child
        )))
    }
}
