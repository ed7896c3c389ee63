#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use sigungu_core::config::resolve_config;
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "sgg: track the Korean districts you have visited",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// District boundary file to use instead of the configured one.
    #[arg(long, global = true, value_name = "PATH")]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Lifecycle",
        about = "Initialize a sigungu project",
        long_about = "Create .sigungu/ with a default config in the current directory.",
        after_help = "EXAMPLES:\n    # Initialize a project in the current directory\n    sgg init\n\n    # Rewrite the config with defaults\n    sgg init --force"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Tracking",
        about = "Toggle a district as visited or wishlisted",
        long_about = "Flip a district in or out of the visited (default) or wishlist set.\nAdding to one set removes it from the other.",
        after_help = "EXAMPLES:\n    # Mark a district as visited\n    sgg toggle \"대구광역시 군위군\"\n\n    # Add to the wishlist\n    sgg toggle 제주시 --mode wishlist\n\n    # Look up by district code\n    sgg toggle 11010 --json"
    )]
    Toggle(cmd::toggle::ToggleArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one district",
        long_about = "Show membership, status label and province progress for a district.",
        after_help = "EXAMPLES:\n    # Show a district\n    sgg show 군위군\n\n    # Emit machine-readable output\n    sgg show 37310 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show visit statistics",
        long_about = "Show visited and wishlist counts with the visited share of all districts.",
        after_help = "EXAMPLES:\n    # Show progress\n    sgg stats\n\n    # Emit machine-readable output\n    sgg stats --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show progress per province",
        long_about = "Show how many districts of each province have been visited.",
        after_help = "EXAMPLES:\n    # All provinces\n    sgg provinces\n\n    # Only fully conquered provinces\n    sgg provinces --conquered"
    )]
    Provinces(cmd::provinces::ProvincesArgs),

    #[command(
        next_help_heading = "Read",
        about = "List recorded districts",
        long_about = "List the visited and wishlist sets as stored.",
        after_help = "EXAMPLES:\n    # Both sets\n    sgg list\n\n    # Only the wishlist\n    sgg list --membership wishlist"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Backup",
        about = "Export the visit state",
        long_about = "Write the visited and wishlist sets as a JSON snapshot.",
        after_help = "EXAMPLES:\n    # Export to stdout\n    sgg export\n\n    # Export to a file\n    sgg export --output backup.json"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Backup",
        about = "Import a visit state snapshot",
        long_about = "Replace the visit state with a snapshot written by `sgg export`.",
        after_help = "EXAMPLES:\n    # Restore a backup\n    sgg import backup.json"
    )]
    Import(cmd::import::ImportArgs),

    #[command(
        next_help_heading = "Backup",
        about = "Clear all records",
        long_about = "Forget every visited and wishlist district.",
        after_help = "EXAMPLES:\n    # Clear everything\n    sgg reset --yes"
    )]
    Reset(cmd::reset::ResetArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    sgg completions bash\n\n    # Generate zsh completions\n    sgg completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

/// Default filter directive when `SIGUNGU_LOG` is unset.
fn default_filter(verbose: bool, quiet: bool) -> &'static str {
    if verbose || env::var("DEBUG").is_ok() {
        "sgg=debug,sigungu=debug,info"
    } else if quiet {
        "error"
    } else {
        "sgg=info,sigungu=info,warn"
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("SIGUNGU_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    let format = env::var("SIGUNGU_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let project_root = env::current_dir()?;
    let config = resolve_config(&project_root, cli.json)?;
    debug!(output = %config.resolved_output, root = %project_root.display(), "resolved config");

    let ctx = cmd::Context {
        output: OutputMode::from_resolved(&config.resolved_output),
        project_root,
        config,
        dataset_override: cli.dataset,
    };

    match cli.command {
        Commands::Init(args) => cmd::init::run_init(&args, &ctx.project_root),
        Commands::Toggle(args) => cmd::toggle::run_toggle(&args, &ctx),
        Commands::Show(args) => cmd::show::run_show(&args, &ctx),
        Commands::Stats(args) => cmd::stats::run_stats(&args, &ctx),
        Commands::Provinces(args) => cmd::provinces::run_provinces(&args, &ctx),
        Commands::List(args) => cmd::list::run_list(&args, &ctx),
        Commands::Export(args) => cmd::export::run_export(&args, &ctx),
        Commands::Import(args) => cmd::import::run_import(&args, &ctx),
        Commands::Reset(args) => cmd::reset::run_reset(&args, &ctx),
        Commands::Completions(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["sgg", "stats", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn json_flag_before_subcommand() {
        let cli = Cli::parse_from(["sgg", "--json", "stats"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Stats(_)));
    }

    #[test]
    fn quiet_and_verbose_flags_parsed() {
        let cli = Cli::parse_from(["sgg", "-q", "list"]);
        assert!(cli.quiet);
        let cli = Cli::parse_from(["sgg", "list", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn dataset_override_parsed() {
        let cli = Cli::parse_from(["sgg", "--dataset", "other.json", "stats"]);
        assert_eq!(cli.dataset, Some(PathBuf::from("other.json")));
    }

    #[test]
    fn toggle_defaults_to_visited() {
        let cli = Cli::parse_from(["sgg", "toggle", "군위군"]);
        match cli.command {
            Commands::Toggle(args) => {
                assert_eq!(args.district, "군위군");
                assert_eq!(args.mode, cmd::toggle::ToggleMode::Visited);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn toggle_wishlist_mode_parses() {
        let cli = Cli::parse_from(["sgg", "toggle", "제주시", "--mode", "wishlist"]);
        assert!(matches!(
            cli.command,
            Commands::Toggle(cmd::toggle::ToggleArgs {
                mode: cmd::toggle::ToggleMode::Wishlist,
                ..
            })
        ));
    }

    #[test]
    fn list_membership_filter_parses() {
        let cli = Cli::parse_from(["sgg", "list", "--membership", "visited"]);
        assert!(matches!(
            cli.command,
            Commands::List(cmd::list::ListArgs {
                membership: Some(cmd::list::ListFilter::Visited)
            })
        ));
    }

    #[test]
    fn reset_requires_flag_for_confirmation() {
        let cli = Cli::parse_from(["sgg", "reset"]);
        assert!(matches!(cli.command, Commands::Reset(cmd::reset::ResetArgs { yes: false })));
        let cli = Cli::parse_from(["sgg", "reset", "-y"]);
        assert!(matches!(cli.command, Commands::Reset(cmd::reset::ResetArgs { yes: true })));
    }

    #[test]
    fn import_takes_path() {
        let cli = Cli::parse_from(["sgg", "import", "backup.json"]);
        assert!(matches!(cli.command, Commands::Import(_)));
    }

    #[test]
    fn default_filter_levels() {
        assert_eq!(default_filter(false, true), "error");
        assert!(default_filter(true, false).contains("debug"));
        for directive in [default_filter(true, false), default_filter(false, false)] {
            assert!(directive.starts_with("sgg="), "{directive}");
            EnvFilter::try_new(directive).expect("valid directive");
        }
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
