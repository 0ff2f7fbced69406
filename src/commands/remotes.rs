//! Remote listing command handler

use anyhow::Result;

use crate::commands::CommandContext;
use crate::ui::output;

pub fn cmd_remotes(ctx: &CommandContext) -> Result<()> {
    let config = &ctx.config;

    if ctx.json {
        let remotes: Vec<_> = config
            .remotes
            .iter()
            .map(|(name, remote)| {
                serde_json::json!({
                    "name": name,
                    "host": remote.host,
                    "path": remote.path,
                    "push_allowed": remote.push_allowed,
                    "default": *name == config.default,
                })
            })
            .collect();
        output::emit(serde_json::json!({
            "event": "remotes",
            "remotes": remotes,
        }))?;
        return Ok(());
    }

    print!("{}", output::render_remotes(config, ctx.caps.supports_color));
    Ok(())
}
