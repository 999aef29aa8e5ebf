use super::Context;
use anyhow::{anyhow, Result};
use canvas_editor::Document;
use canvas_model::{LeafRef, Node, SettingKey};
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Print the effective settings of one leaf instead of the outline
    #[arg(short, long)]
    pub node: Option<String>,
}

pub fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open()?;

    match args.node {
        Some(node_id) => print_settings(&session.document, &node_id),
        None => {
            print_outline(&session.document);
            Ok(())
        }
    }
}

fn print_outline(doc: &Document) {
    let tree = doc.tree();
    println!("{} {}", "📄".bright_blue(), doc.id().bold());

    if tree.is_empty() {
        println!("   {}", "(no rows)".dimmed());
        return;
    }

    for (index, row) in tree.rows().enumerate() {
        println!("   {} row {}", format!("{}.", index).dimmed(), row.id().cyan());
        for column in tree.children_of(row.id()) {
            let content = match tree.leaf_of(column.id()) {
                Some(leaf) => describe_leaf(leaf),
                None => "(empty)".dimmed().to_string(),
            };
            println!("      col {}  {}", column.id(), content);
        }
    }
}

fn describe_leaf(node: &Node) -> String {
    let detail = match node.as_leaf() {
        Some(LeafRef::Image(image)) => match &image.src {
            Some(src) => format!(" <{}>", src),
            None => String::new(),
        },
        Some(LeafRef::List(list)) => {
            let count = list.list.as_ref().map_or(0, Vec::len);
            format!(" [{} entries]", count)
        }
        _ => String::new(),
    };
    let text = node.as_leaf().map(|leaf| leaf.text()).unwrap_or_default();

    format!(
        "{} {} {:?}{}",
        node.node_type().tag().green(),
        node.id(),
        text,
        detail
    )
}

fn print_settings(doc: &Document, node_id: &str) -> Result<()> {
    let leaf = doc
        .tree()
        .get(node_id)
        .and_then(Node::as_leaf)
        .ok_or_else(|| anyhow!("{} is not a leaf of {}", node_id, doc.id()))?;
    let effective = doc
        .resolve(node_id)
        .ok_or_else(|| anyhow!("{} has no settings", node_id))?;

    println!("{} {}", "🎨".bright_blue(), node_id.bold());
    for key in SettingKey::all() {
        let source = if leaf.local_settings().get(key).is_some() {
            "local".green()
        } else {
            "default".dimmed()
        };
        println!("   {:<20} {:<12} {}", key.to_string(), effective.get(key), source);
    }
    Ok(())
}
