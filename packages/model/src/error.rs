use thiserror::Error;

use crate::node::NodeType;

pub type TreeResult<T> = Result<T, TreeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Node {0} is not attached to a parent")]
    NotAttached(String),

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Node {0} is not a leaf")]
    NotALeaf(String),

    #[error("Node {id} is a {found}, expected a {expected}")]
    InvalidTarget {
        id: String,
        expected: NodeType,
        found: NodeType,
    },

    #[error("Content does not match {node_type} node {id}")]
    ContentMismatch { id: String, node_type: NodeType },

    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Unexpected node type at {id}: expected {expected}, found {found:?}")]
    UnexpectedTag {
        id: String,
        expected: &'static str,
        found: String,
    },
}

impl TreeError {
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure(message.into())
    }

    pub fn unexpected_tag(id: impl Into<String>, expected: &'static str, found: impl Into<String>) -> Self {
        Self::UnexpectedTag {
            id: id.into(),
            expected,
            found: found.into(),
        }
    }
}
