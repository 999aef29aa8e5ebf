use super::Context;
use anyhow::{anyhow, Result};
use canvas_editor::{LeafContent, Mutation};
use canvas_model::ListEntry;
use clap::{ArgGroup, Args};

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("content").required(true).args(["text", "src", "entries"])))]
pub struct ContentArgs {
    /// Leaf id
    pub node: String,

    /// New text of a text leaf
    #[arg(long)]
    pub text: Option<String>,

    /// New image source of an image leaf
    #[arg(long)]
    pub src: Option<String>,

    /// Sidebar entry as name=document-id (repeatable)
    #[arg(long = "entry", value_parser = parse_entry)]
    pub entries: Vec<ListEntry>,
}

fn parse_entry(raw: &str) -> Result<ListEntry> {
    let (name, id) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected name=id, got {}", raw))?;
    Ok(ListEntry::new(name.trim(), id.trim()))
}

pub fn content(args: ContentArgs, ctx: &Context) -> Result<()> {
    let content = match (args.text, args.src) {
        (Some(text), _) => LeafContent::Text(text),
        (None, Some(src)) => LeafContent::Image { src },
        (None, None) => LeafContent::List(args.entries),
    };

    ctx.commit(Mutation::UpdateLeafContent {
        node_id: args.node,
        content,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry() {
        let entry = parse_entry("About us = about").unwrap();
        assert_eq!(entry, ListEntry::new("About us", "about"));
        assert!(parse_entry("about").is_err());
    }
}
