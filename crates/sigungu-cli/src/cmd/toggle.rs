//! `sgg toggle`: flip a district in the visited set or the wishlist.

use anyhow::Result;
use clap::{Args, ValueEnum};

use super::{Context, DistrictCard, core_result};
use crate::output::render;

/// Which set a toggle targets (the map-mode switch).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ToggleMode {
    #[default]
    Visited,
    Wishlist,
}

#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// District display name, code, or unique short name.
    pub district: String,

    /// Set to toggle.
    #[arg(long, value_enum, default_value_t = ToggleMode::Visited)]
    pub mode: ToggleMode,
}

/// Execute `sgg toggle`.
pub fn run_toggle(args: &ToggleArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let atlas = ctx.load_atlas()?;
    let district = core_result(ctx.output, atlas.find(&args.district))?;

    let result = match args.mode {
        ToggleMode::Visited => store.toggle_visited(&district.display_name),
        ToggleMode::Wishlist => store.toggle_wishlist(&district.display_name),
    };
    let membership = core_result(ctx.output, result)?;
    tracing::info!(district = %district.display_name, %membership, "toggled");

    let card = DistrictCard::build(&atlas, store.store(), district);
    let pretty = ctx.output.is_pretty();
    render(ctx.output, &card, |card, w| card.render_human(w, pretty))
}
