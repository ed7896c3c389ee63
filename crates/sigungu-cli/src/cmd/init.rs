use anyhow::{Context as _, Result};
use clap::Args;
use sigungu_core::config::{PROJECT_DIR, project_config_path};
use std::path::Path;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Rewrite the default config even if `.sigungu/` already exists.
    #[arg(long)]
    pub force: bool,
}

const CONFIG_TOML: &str = "[data]\n\
    districts = \"sigungu.json\"\n\
    \n\
    [storage]\n\
    state_file = \"state.json\"\n\
    lock_timeout_ms = 1000\n";

const GITIGNORE: &str = "state.json\nstate.lock\nstate.tmp\n";

/// Execute `sgg init`. Creates the project skeleton:
///
/// ```text
/// .sigungu/
///   config.toml   (default project config)
///   .gitignore    (state.json, state.lock, state.tmp)
/// ```
///
/// The visit state file is created on the first toggle.
///
/// # Errors
///
/// Returns an error if `.sigungu/` already exists and `--force` is not set,
/// or if any filesystem operation fails.
pub fn run_init(args: &InitArgs, project_root: &Path) -> Result<()> {
    let project_dir = project_root.join(PROJECT_DIR);

    if project_dir.exists() && !args.force {
        anyhow::bail!(".sigungu/ already exists. Use `sgg init --force` to reinitialize.");
    }

    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("Failed to create {}", project_dir.display()))?;

    let config_path = project_config_path(project_root);
    std::fs::write(&config_path, CONFIG_TOML)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

    let gitignore_path = project_dir.join(".gitignore");
    std::fs::write(&gitignore_path, GITIGNORE)
        .with_context(|| format!("Failed to write .gitignore: {}", gitignore_path.display()))?;

    tracing::info!(path = %project_dir.display(), "initialized project");

    println!("✓ Initialized .sigungu/ project structure.");
    println!();
    println!("  Config:  {}", super::relative_to(project_root, &config_path));
    println!("  Dataset: sigungu.json (set data.districts to change)");
    println!();
    println!("Next steps:");
    println!("  sgg toggle \"대구광역시 군위군\"            # mark visited");
    println!("  sgg toggle 종로구 --mode wishlist       # add to wishlist");
    println!("  sgg stats");

    Ok(())
}
