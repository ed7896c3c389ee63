use anyhow::Result;
use clap::Args;

use super::{Context, DistrictCard, core_result};
use crate::output::render;

/// Arguments for `sgg show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// District display name, code, or unique short name.
    pub district: String,
}

/// Execute `sgg show`: membership, card status, and province conquest.
pub fn run_show(args: &ShowArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let atlas = ctx.load_atlas()?;
    let district = core_result(ctx.output, atlas.find(&args.district))?;

    let card = DistrictCard::build(&atlas, store.store(), district);
    let pretty = ctx.output.is_pretty();
    render(ctx.output, &card, |card, w| card.render_human(w, pretty))
}
