//! `sgg stats`: visited / wishlist counts and progress.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use sigungu_core::Stats;

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `sgg stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

/// Execute `sgg stats`.
pub fn run_stats(_args: &StatsArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let atlas = ctx.load_atlas()?;
    let stats = store.stats(atlas.len());

    render_mode(ctx.output, &stats, render_stats_text, render_stats_pretty)
}

fn render_stats_text(stats: &Stats, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "visited={} wishlist={} total={} percent={}",
        stats.visited_count, stats.wishlist_count, stats.total_districts, stats.percent
    )
}

fn render_stats_pretty(stats: &Stats, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Travel progress")?;
    pretty_kv(w, "visited", stats.visited_count.to_string())?;
    pretty_kv(w, "wishlist", stats.wishlist_count.to_string())?;
    pretty_kv(w, "districts", stats.total_districts.to_string())?;
    pretty_kv(w, "progress", format!("{}%", stats.percent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigungu_core::VisitStateStore;

    #[test]
    fn text_line_is_grep_friendly() {
        let mut store = VisitStateStore::new();
        for name in ["a", "b", "c"] {
            store.toggle_visited(name);
        }
        let mut buf = Vec::new();
        render_stats_text(&store.stats(10), &mut buf).expect("render");
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "visited=3 wishlist=0 total=10 percent=30.0\n"
        );
    }

    #[test]
    fn pretty_shows_percent_sign() {
        let mut buf = Vec::new();
        render_stats_pretty(&VisitStateStore::new().stats(250), &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("0.0%"));
        assert!(text.contains("250"));
    }
}
