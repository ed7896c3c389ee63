use anyhow::Result;
use clap::Args;
use serde_json::json;

use super::{Context, core_result};
use crate::output::{CliError, render, render_error};

#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Confirm clearing every visited and wishlist record.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Execute `sgg reset`: wipe the visit state.
pub fn run_reset(args: &ResetArgs, ctx: &Context) -> Result<()> {
    if !args.yes {
        render_error(
            ctx.output,
            &CliError::with_details(
                "refusing to clear all records without confirmation",
                "re-run with `sgg reset --yes`",
                "confirmation_required",
            ),
        )?;
        anyhow::bail!("reset not confirmed");
    }

    let mut store = ctx.open_store()?;
    core_result(ctx.output, store.reset())?;
    tracing::info!("visit state cleared");

    render(ctx.output, &json!({ "ok": true }), |_, w| {
        writeln!(w, "✓ All records cleared.")
    })
}
