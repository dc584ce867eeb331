//! Command-line interface definitions (clap derive).
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "idepot",
    about = "Manage installed software versions through a symlink depot",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Show progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Show detailed information
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// Console log level selected by `--verbose` / `--debug`.
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::DEBUG
        } else if self.verbose {
            LevelFilter::INFO
        } else {
            LevelFilter::WARN
        }
    }
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Base directory with bin, lib subdirectories etc.
    #[arg(short, long = "basedir", global = true, default_value = "/usr/local")]
    pub basedir: PathBuf,

    /// Settings file (default: <BASEDIR>/DEPOT/idepot.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Commit a version
    Commit(CommitOpts),
    /// Show active and installed versions
    Status(StatusOpts),
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Short name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Commit(_) => "commit",
            Self::Status(_) => "status",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `commit` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CommitOpts {
    /// Show commands without executing them
    #[arg(short = 'n', long, visible_alias = "dryrun")]
    pub dry_run: bool,

    /// Product name
    pub product: String,

    /// Version
    pub version: String,
}

/// Options for the `status` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct StatusOpts {
    /// Product name (default: every product in the depot)
    pub product: Option<String>,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_commit() {
        let cli = Cli::parse_from(["idepot", "commit", "python", "3.12"]);
        assert!(
            matches!(&cli.command, Command::Commit(_)),
            "Expected Commit command"
        );
        if let Command::Commit(opts) = cli.command {
            assert_eq!(opts.product, "python");
            assert_eq!(opts.version, "3.12");
            assert!(!opts.dry_run);
        }
    }

    #[test]
    fn parse_commit_dry_run_short() {
        let cli = Cli::parse_from(["idepot", "commit", "-n", "python", "3.12"]);
        assert!(matches!(cli.command, Command::Commit(CommitOpts { dry_run: true, .. })));
    }

    #[test]
    fn parse_commit_dryrun_alias() {
        let cli = Cli::parse_from(["idepot", "commit", "--dryrun", "python", "3.12"]);
        assert!(matches!(cli.command, Command::Commit(CommitOpts { dry_run: true, .. })));
    }

    #[test]
    fn commit_requires_product_and_version() {
        assert!(Cli::try_parse_from(["idepot", "commit", "python"]).is_err());
    }

    #[test]
    fn basedir_defaults_to_usr_local() {
        let cli = Cli::parse_from(["idepot", "status"]);
        assert_eq!(cli.global.basedir, PathBuf::from("/usr/local"));
        assert_eq!(cli.global.config, None);
    }

    #[test]
    fn parse_basedir_short() {
        let cli = Cli::parse_from(["idepot", "-b", "/opt", "commit", "p", "1"]);
        assert_eq!(cli.global.basedir, PathBuf::from("/opt"));
    }

    #[test]
    fn parse_config_after_subcommand() {
        let cli = Cli::parse_from(["idepot", "status", "--config", "/etc/idepot.toml"]);
        assert_eq!(cli.global.config, Some(PathBuf::from("/etc/idepot.toml")));
    }

    #[test]
    fn log_level_defaults_to_warn() {
        let cli = Cli::parse_from(["idepot", "status"]);
        assert_eq!(cli.log_level(), LevelFilter::WARN);
    }

    #[test]
    fn verbose_and_debug_raise_log_level() {
        let cli = Cli::parse_from(["idepot", "-v", "status"]);
        assert_eq!(cli.log_level(), LevelFilter::INFO);
        let cli = Cli::parse_from(["idepot", "-d", "status"]);
        assert_eq!(cli.log_level(), LevelFilter::DEBUG);
        let cli = Cli::parse_from(["idepot", "-v", "-d", "status"]);
        assert_eq!(cli.log_level(), LevelFilter::DEBUG);
    }

    #[test]
    fn parse_status_with_product() {
        let cli = Cli::parse_from(["idepot", "status", "python"]);
        assert!(matches!(
            cli.command,
            Command::Status(StatusOpts { product: Some(ref p) }) if p == "python"
        ));
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["idepot", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Command::Completions(CompletionsOpts {
                shell: clap_complete::Shell::Bash
            })
        ));
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["idepot", "version"]);
        assert!(matches!(cli.command, Command::Version));
        assert_eq!(cli.command.name(), "version");
    }
}
