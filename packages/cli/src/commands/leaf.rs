use super::{report, Context};
use anyhow::{Context as _, Result};
use canvas_editor::{DropTarget, Element, ElementCatalog, LeafSource, Mutation};
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum LeafCommand {
    /// Drop a palette element (Text, Image, Sidebar) into a column
    Place {
        /// Element label
        element: String,

        /// Target column id
        column: String,
    },

    /// Move an existing leaf into another column
    Move {
        /// Leaf id
        leaf: String,

        /// Target column id
        column: String,
    },
}

pub fn leaf(command: LeafCommand, ctx: &Context) -> Result<()> {
    match command {
        LeafCommand::Place { element, column } => {
            let mut session = ctx.open()?;
            let known = palette_labels(session.catalog());
            let result = session
                .drop_element(&element, DropTarget::Column(column))
                .with_context(|| format!("Cannot place {} (palette: {})", element, known))?;

            if result.is_applied() {
                session.save()?;
            }
            report("place_leaf", &result);
        }
        LeafCommand::Move { leaf, column } => {
            ctx.commit(Mutation::PlaceLeaf {
                source: LeafSource::Existing(leaf),
                column_id: column,
            })?;
        }
    }
    Ok(())
}

fn palette_labels(catalog: &ElementCatalog) -> String {
    catalog
        .elements()
        .iter()
        .map(Element::label)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_labels() {
        assert_eq!(
            palette_labels(&ElementCatalog::default()),
            "1, 1|1, 1|1|1, Text, Image, Sidebar"
        );
    }
}
