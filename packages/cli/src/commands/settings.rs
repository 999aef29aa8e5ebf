use super::Context;
use anyhow::Result;
use canvas_editor::Mutation;
use canvas_model::SettingKey;
use clap::Args;

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Setting key, e.g. palette.brand or styling.fontSize
    pub key: SettingKey,

    /// New value
    pub value: String,

    /// Override on one leaf instead of the document default
    #[arg(short, long)]
    pub node: Option<String>,
}

#[derive(Debug, Args)]
pub struct UnsetArgs {
    /// Setting key, e.g. palette.brand or styling.fontSize
    pub key: SettingKey,

    /// Leaf whose override is dropped
    #[arg(short, long)]
    pub node: String,
}

pub fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let mutation = match args.node {
        Some(node_id) => Mutation::UpdateLocalSetting {
            node_id,
            key: args.key,
            value: args.value,
        },
        None => Mutation::UpdateGlobalSetting {
            key: args.key,
            value: args.value,
        },
    };

    ctx.commit(mutation)?;
    Ok(())
}

pub fn unset(args: UnsetArgs, ctx: &Context) -> Result<()> {
    ctx.commit(Mutation::ClearLocalSetting {
        node_id: args.node,
        key: args.key,
    })?;
    Ok(())
}
