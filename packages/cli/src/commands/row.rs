use super::Context;
use anyhow::Result;
use canvas_editor::Mutation;
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum RowCommand {
    /// Insert a row of empty columns
    Add {
        /// Number of columns
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        cols: u16,

        /// Row index (defaults to the end)
        #[arg(short, long)]
        at: Option<usize>,
    },

    /// Move a row to another drop zone
    Move {
        /// Row id
        row: String,

        /// Drop zone index, counted before the row is taken out
        to: usize,
    },
}

pub fn row(command: RowCommand, ctx: &Context) -> Result<()> {
    let mut session = ctx.open()?;
    let mutation = match command {
        RowCommand::Add { cols, at } => Mutation::InsertRow {
            columns: usize::from(cols),
            index: at.unwrap_or_else(|| session.document.tree().rows().count()),
        },
        RowCommand::Move { row, to } => Mutation::MoveRow {
            row_id: row,
            target_index: to,
        },
    };

    ctx.apply(&mut session, mutation)?;
    Ok(())
}
