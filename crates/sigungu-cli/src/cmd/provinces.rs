//! `sgg provinces`: per-province progress toward conquest.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use sigungu_core::{Percent, ProvinceProgress};

use super::Context;
use crate::output::{pretty_section, render_mode};

/// Arguments for `sgg provinces`.
#[derive(Args, Debug, Default)]
pub struct ProvincesArgs {
    /// Only show fully conquered provinces.
    #[arg(long)]
    pub conquered: bool,
}

#[derive(Debug, Serialize)]
struct ProvincesReport {
    provinces: Vec<ProvinceProgress>,
    conquered: usize,
}

/// Execute `sgg provinces`.
pub fn run_provinces(args: &ProvincesArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let atlas = ctx.load_atlas()?;

    let mut provinces = atlas.province_progress(store.store());
    let conquered = provinces.iter().filter(|p| p.conquered).count();
    if args.conquered {
        provinces.retain(|p| p.conquered);
    }

    let report = ProvincesReport {
        provinces,
        conquered,
    };
    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn render_text(report: &ProvincesReport, w: &mut dyn Write) -> std::io::Result<()> {
    for p in &report.provinces {
        writeln!(
            w,
            "{}\t{}\t{}/{}\t{}",
            p.province.code(),
            p.name,
            p.visited,
            p.total,
            if p.conquered { "conquered" } else { "-" }
        )?;
    }
    Ok(())
}

fn render_pretty(report: &ProvincesReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Provinces")?;
    for p in &report.provinces {
        writeln!(
            w,
            "{:<10} {:>3}/{:<3} {:>5}%{}",
            p.name,
            p.visited,
            p.total,
            Percent::of(p.visited, p.total).to_string(),
            if p.conquered { "  🎊" } else { "" }
        )?;
    }
    writeln!(w)?;
    writeln!(w, "Conquered: {}", report.conquered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigungu_core::{Atlas, DistrictFeature, FeatureCollection, VisitStateStore};

    #[test]
    fn text_rows_are_tab_separated() {
        let atlas = Atlas::new(FeatureCollection::from(vec![
            DistrictFeature::new("39010", "제주시"),
            DistrictFeature::new("39020", "서귀포시"),
        ]));
        let mut store = VisitStateStore::new();
        store.toggle_visited("제주특별자치도 제주시");
        store.toggle_visited("제주특별자치도 서귀포시");

        let report = ProvincesReport {
            provinces: atlas.province_progress(&store),
            conquered: 1,
        };
        let mut buf = Vec::new();
        render_text(&report, &mut buf).expect("render");
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "39\t제주특별자치도\t2/2\tconquered\n"
        );
    }
}
