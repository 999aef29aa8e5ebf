mod commands;
mod config;

use anyhow::{Context as _, Result};
use canvas_editor::DEFAULT_DOCUMENT_ID;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    clear, content, export, init, leaf, list, remove, row, set, show, template, unset,
    ContentArgs, Context, InitArgs, LeafCommand, RemoveArgs, RowCommand, SetArgs, ShowArgs,
    TemplateCommand, UnsetArgs,
};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Canvas CLI - edit page-builder documents from the terminal
#[derive(Parser, Debug)]
#[command(name = "canvas")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ./canvas.config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Document to operate on
    #[arg(long, global = true)]
    doc: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a config file and create the store directory
    Init(InitArgs),

    /// Print the document outline or one leaf's settings
    Show(ShowArgs),

    /// Insert or move rows
    #[command(subcommand)]
    Row(RowCommand),

    /// Place or move leaves
    #[command(subcommand)]
    Leaf(LeafCommand),

    /// Remove a row or a leaf
    Remove(RemoveArgs),

    /// Set a document default or a leaf override
    Set(SetArgs),

    /// Drop a leaf override
    Unset(UnsetArgs),

    /// Replace a leaf's content
    Content(ContentArgs),

    /// Manage templates
    #[command(subcommand)]
    Template(TemplateCommand),

    /// List stored documents
    List,

    /// Delete the stored document
    Clear,

    /// Print the stored JSON form of the document
    Export,
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_deref().unwrap_or("warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Cannot get current directory")?;

    let config = match &cli.command {
        Command::Init(_) => Config::default(),
        _ => Config::load(cli.config.as_deref(), &cwd)?,
    };
    init_logging(&config);

    let ctx = Context {
        store_dir: config.store_dir(&cwd),
        document_id: cli
            .doc
            .or(config.default_document)
            .unwrap_or_else(|| DEFAULT_DOCUMENT_ID.to_string()),
    };
    tracing::debug!(store = %ctx.store_dir.display(), document = %ctx.document_id, "Resolved context");

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Show(args) => show(args, &ctx),
        Command::Row(command) => row(command, &ctx),
        Command::Leaf(command) => leaf(command, &ctx),
        Command::Remove(args) => remove(args, &ctx),
        Command::Set(args) => set(args, &ctx),
        Command::Unset(args) => unset(args, &ctx),
        Command::Content(args) => content(args, &ctx),
        Command::Template(command) => template(command, &ctx),
        Command::List => list(&ctx),
        Command::Clear => clear(&ctx),
        Command::Export => export(&ctx),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
