use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use sigungu_core::Snapshot;
use sigungu_core::storage::decode_names;
use std::path::PathBuf;

use super::{Context, core_result};
use crate::output::render;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Snapshot JSON written by `sgg export`.
    #[arg(value_name = "PATH")]
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct ImportReport {
    visited: usize,
    wishlist: usize,
}

/// Replace the visit state with the snapshot in `file`.
///
/// A list that is missing or is not an array of strings imports as empty.
pub fn run_import(args: &ImportArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    let path = ctx.project_root.join(&args.file);
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), error = %err, "snapshot is not JSON, importing empty state");
        Value::Null
    });

    let snapshot = snapshot_from_value(&value);
    core_result(ctx.output, store.restore(snapshot))?;

    let restored = store.snapshot();
    let report = ImportReport {
        visited: restored.visited.len(),
        wishlist: restored.wishlist.len(),
    };
    render(ctx.output, &report, |r, w| {
        writeln!(w, "✓ Imported {} visited, {} wishlist", r.visited, r.wishlist)
    })
}

fn snapshot_from_value(value: &Value) -> Snapshot {
    Snapshot {
        visited: decode_names("visited", value.get("visited").cloned()),
        wishlist: decode_names("wishlist", value.get("wishlist").cloned()),
    }
}
