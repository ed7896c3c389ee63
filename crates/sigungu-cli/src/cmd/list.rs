use std::io::Write;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use super::Context;
use crate::output::{pretty_section, render_mode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListFilter {
    Visited,
    Wishlist,
}

/// Arguments for `sgg list`.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only list one set.
    #[arg(long, value_enum)]
    pub membership: Option<ListFilter>,
}

#[derive(Debug, Serialize)]
struct ListReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    visited: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wishlist: Option<Vec<String>>,
}

/// Execute `sgg list`. Names are listed as stored, including names the
/// current dataset no longer contains.
pub fn run_list(args: &ListArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let snapshot = store.snapshot();

    let report = ListReport {
        visited: (args.membership != Some(ListFilter::Wishlist)).then_some(snapshot.visited),
        wishlist: (args.membership != Some(ListFilter::Visited)).then_some(snapshot.wishlist),
    };
    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn render_text(report: &ListReport, w: &mut dyn Write) -> std::io::Result<()> {
    let rows = [("visited", &report.visited), ("wishlist", &report.wishlist)];
    for (membership, names) in rows {
        for name in names.iter().flatten() {
            writeln!(w, "{membership}\t{name}")?;
        }
    }
    Ok(())
}

fn render_pretty(report: &ListReport, w: &mut dyn Write) -> std::io::Result<()> {
    if let Some(visited) = &report.visited {
        pretty_section(w, &format!("Visited ({})", visited.len()))?;
        for name in visited {
            writeln!(w, "  ✅ {name}")?;
        }
        writeln!(w)?;
    }
    if let Some(wishlist) = &report.wishlist {
        pretty_section(w, &format!("Wishlist ({})", wishlist.len()))?;
        for name in wishlist {
            writeln!(w, "  💙 {name}")?;
        }
    }
    Ok(())
}
