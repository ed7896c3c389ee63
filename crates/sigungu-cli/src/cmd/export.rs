use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use sigungu_core::Snapshot;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use super::Context;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output JSON path (defaults to stdout).
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ExportRecord {
    exported_at: DateTime<Utc>,
    #[serde(flatten)]
    snapshot: Snapshot,
}

/// Write the current visit state as a snapshot document.
///
/// The document is accepted by `sgg import`.
pub fn run_export(args: &ExportArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let record = ExportRecord {
        exported_at: Utc::now(),
        snapshot: store.snapshot(),
    };

    let mut out: Box<dyn Write> = match args.output.as_ref() {
        Some(path) => {
            let path = ctx.project_root.join(path);
            let file = File::create(&path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    };

    serde_json::to_writer_pretty(&mut out, &record)?;
    writeln!(out)?;
    out.flush()?;

    tracing::info!(
        visited = record.snapshot.visited.len(),
        wishlist = record.snapshot.wishlist.len(),
        "exported snapshot"
    );
    Ok(())
}
