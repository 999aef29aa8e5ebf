pub mod content;
pub mod document;
pub mod init;
pub mod leaf;
pub mod row;
pub mod settings;
pub mod show;
pub mod template;

pub use content::{content, ContentArgs};
pub use document::{clear, export, list, remove, RemoveArgs};
pub use init::{init, InitArgs};
pub use leaf::{leaf, LeafCommand};
pub use row::{row, RowCommand};
pub use settings::{set, unset, SetArgs, UnsetArgs};
pub use show::{show, ShowArgs};
pub use template::{template, TemplateCommand};

use anyhow::{Context as _, Result};
use canvas_editor::{EditSession, Mutation, MutationResult, TreeChange};
use canvas_storage::StoreSet;
use colored::Colorize;
use std::path::PathBuf;

/// Where commands read and write
#[derive(Debug, Clone)]
pub struct Context {
    pub store_dir: PathBuf,
    pub document_id: String,
}

impl Context {
    pub fn open(&self) -> Result<EditSession> {
        EditSession::open(StoreSet::open(&self.store_dir), &self.document_id)
            .with_context(|| format!("Cannot open document {}", self.document_id))
    }

    /// Open, apply one mutation, save when something changed
    pub fn commit(&self, mutation: Mutation) -> Result<MutationResult> {
        let mut session = self.open()?;
        self.apply(&mut session, mutation)
    }

    pub fn apply(&self, session: &mut EditSession, mutation: Mutation) -> Result<MutationResult> {
        let name = mutation.name();
        let result = session
            .apply(mutation)
            .with_context(|| format!("{} failed on {}", name, self.document_id))?;

        if result.is_applied() {
            session.save()?;
        }
        report(name, &result);
        Ok(result)
    }
}

pub fn report(name: &str, result: &MutationResult) {
    match result {
        MutationResult::Applied { version, change } => {
            println!(
                "{} {} {}",
                "✓".green(),
                describe(change),
                format!("({} v{})", name, version).dimmed()
            );
        }
        MutationResult::Noop { reason } => {
            println!("{} No change: {}", "⚠️".yellow(), reason);
        }
    }
}

fn describe(change: &TreeChange) -> String {
    match change {
        TreeChange::RowInserted {
            row_id,
            index,
            column_ids,
        } => format!(
            "Inserted row {} at {} with columns {}",
            row_id.cyan(),
            index,
            column_ids.join(", ")
        ),
        TreeChange::RowMoved { row_id, from, to } => {
            format!("Moved row {} from {} to {}", row_id.cyan(), from, to)
        }
        TreeChange::NodeRemoved { node_id, removed, .. } => {
            format!("Removed {} ({} nodes)", node_id.cyan(), removed.len())
        }
        TreeChange::LeafPlaced {
            leaf_id,
            column_id,
            from: None,
        } => format!("Created {} in {}", leaf_id.cyan(), column_id),
        TreeChange::LeafPlaced {
            leaf_id,
            column_id,
            from: Some(from),
        } => format!("Moved {} from {} to {}", leaf_id.cyan(), from, column_id),
        TreeChange::LocalSettingChanged { node_id, key } => {
            format!("Updated {} on {}", key.to_string().cyan(), node_id)
        }
        TreeChange::GlobalSettingChanged { key } => {
            format!("Updated default {}", key.to_string().cyan())
        }
        TreeChange::LeafContentChanged { node_id } => {
            format!("Updated content of {}", node_id.cyan())
        }
        TreeChange::Replaced { rows } => format!("Replaced document ({} rows)", rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(dir: &tempfile::TempDir) -> Context {
        Context {
            store_dir: dir.path().join(".canvas"),
            document_id: "home".to_string(),
        }
    }

    #[test]
    fn test_commands_persist_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);

        row(RowCommand::Add { cols: 2, at: None }, &ctx).unwrap();
        row(RowCommand::Add { cols: 1, at: None }, &ctx).unwrap();

        let session = ctx.open().unwrap();
        let rows = session.document.tree().row_ids();
        assert_eq!(rows.len(), 2);
        let column = session.document.tree().get(&rows[0]).unwrap().children()[0].clone();

        leaf(
            LeafCommand::Place {
                element: "Text".to_string(),
                column: column.clone(),
            },
            &ctx,
        )
        .unwrap();

        let session = ctx.open().unwrap();
        assert!(session.document.tree().leaf_of(&column).is_some());
    }

    #[test]
    fn test_noop_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        row(RowCommand::Add { cols: 1, at: None }, &ctx).unwrap();
        let row_id = ctx.open().unwrap().document.tree().row_ids()[0].clone();

        let result = ctx
            .commit(Mutation::MoveRow {
                row_id,
                target_index: 0,
            })
            .unwrap();

        assert!(!result.is_applied());
    }

    #[test]
    fn test_rejected_mutation_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);

        let result = ctx.commit(Mutation::RemoveNode {
            node_id: "missing".to_string(),
        });
        assert!(result.is_err());
        assert!(ctx.open().unwrap().list_documents().unwrap().is_empty());
    }
}
