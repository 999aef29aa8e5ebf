use super::Context;
use anyhow::Result;
use canvas_editor::Mutation;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Row or leaf id
    pub node: String,
}

pub fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    ctx.commit(Mutation::RemoveNode { node_id: args.node })?;
    Ok(())
}

/// List stored documents
pub fn list(ctx: &Context) -> Result<()> {
    let session = ctx.open()?;
    let documents = session.list_documents()?;

    if documents.is_empty() {
        println!("{}", "No saved documents".dimmed());
    }
    for id in documents {
        let marker = if id == ctx.document_id { "*" } else { " " };
        println!("{} {}", marker.green(), id);
    }
    Ok(())
}

/// Drop the stored document
pub fn clear(ctx: &Context) -> Result<()> {
    let mut session = ctx.open()?;
    session.clear()?;
    println!("{} Cleared {}", "✓".green(), ctx.document_id.cyan());
    Ok(())
}

/// Print the stored form of the document
pub fn export(ctx: &Context) -> Result<()> {
    let session = ctx.open()?;
    println!("{}", session.document.to_plain().to_json()?);
    Ok(())
}
