//! Error types for the editor

use canvas_model::TreeError;
use canvas_storage::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error("Element {element} cannot be dropped on {target}")]
    InvalidDrop { element: String, target: String },
}

pub type EditorResult<T> = Result<T, EditorError>;
