use super::Context;
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

#[derive(Debug, Subcommand)]
pub enum TemplateCommand {
    /// Snapshot the document as a template
    Save { name: String },

    /// Replace the document's content with a template
    Apply { name: String },

    /// Delete a template
    Delete { name: String },

    /// List templates
    List,
}

pub fn template(command: TemplateCommand, ctx: &Context) -> Result<()> {
    let mut session = ctx.open()?;

    match command {
        TemplateCommand::Save { name } => {
            session.save_template(&name)?;
            println!("{} Saved template {}", "✓".green(), name.cyan());
        }
        TemplateCommand::Apply { name } => {
            if session.apply_template(&name)? {
                session.save()?;
                println!(
                    "{} Applied {} to {}",
                    "✓".green(),
                    name.cyan(),
                    ctx.document_id
                );
            } else {
                println!("{} No template named {}", "⚠️".yellow(), name);
            }
        }
        TemplateCommand::Delete { name } => {
            session.delete_template(&name)?;
            println!("{} Deleted template {}", "✓".green(), name.cyan());
        }
        TemplateCommand::List => {
            let names = session.list_templates()?;
            if names.is_empty() {
                println!("{}", "No templates".dimmed());
            }
            for name in names {
                println!("  {}", name);
            }
        }
    }
    Ok(())
}
