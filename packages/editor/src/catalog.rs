//! Draggable element palette.
//!
//! Layout elements drop onto the canvas and become rows; content elements
//! drop onto a column and become leaves.

use serde::{Deserialize, Serialize};

use crate::{EditorError, LeafSource, LeafTemplate, Mutation};

/// One palette entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Layout { text: String, cols: usize },
    Content(LeafTemplate),
}

/// Where an element was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Row drop zone on the canvas
    Canvas { index: usize },
    /// A column
    Column(String),
}

impl Element {
    pub fn layout(cols: usize) -> Self {
        let text = vec!["1"; cols].join("|");
        Element::Layout { text, cols }
    }

    pub fn label(&self) -> &str {
        match self {
            Element::Layout { text, .. } => text,
            Element::Content(template) => template.label(),
        }
    }

    /// Mutation performed by dropping this element on `target`
    pub fn drop_on(&self, target: DropTarget) -> Result<Mutation, EditorError> {
        match (self, target) {
            (Element::Layout { cols, .. }, DropTarget::Canvas { index }) => Ok(Mutation::InsertRow {
                columns: *cols,
                index,
            }),
            (Element::Content(template), DropTarget::Column(column_id)) => Ok(Mutation::PlaceLeaf {
                source: LeafSource::Template(template.clone()),
                column_id,
            }),
            (element, target) => Err(EditorError::InvalidDrop {
                element: element.label().to_string(),
                target: match target {
                    DropTarget::Canvas { index } => format!("canvas slot {}", index),
                    DropTarget::Column(id) => format!("column {}", id),
                },
            }),
        }
    }
}

/// Registered palette, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct ElementCatalog {
    elements: Vec<Element>,
}

impl Default for ElementCatalog {
    fn default() -> Self {
        Self {
            elements: vec![
                Element::layout(1),
                Element::layout(2),
                Element::layout(3),
                Element::Content(LeafTemplate::text("Text")),
                Element::Content(LeafTemplate::image("Image")),
                Element::Content(LeafTemplate::list("Sidebar")),
            ],
        }
    }
}

impl ElementCatalog {
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn find(&self, label: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.label() == label)
    }

    pub fn get(&self, label: &str) -> Result<&Element, EditorError> {
        self.find(label)
            .ok_or_else(|| EditorError::UnknownElement(label.to_string()))
    }
}
