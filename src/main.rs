//! `idepot` command-line entry point.
use anyhow::Result;
use clap::Parser;

use idepot::cli::{Cli, Command};
use idepot::commands;
use idepot::logging::{self, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let name = args.command.name();
    logging::init_subscriber(args.log_level(), name);
    let log = Logger::new(name);
    if let Some(path) = log.log_path() {
        log.debug(&format!("log file: {}", path.display()));
    }

    match &args.command {
        Command::Commit(opts) => commands::commit::run(&args.global, opts, &log),
        Command::Status(opts) => commands::status::run(&args.global, opts, &log),
        Command::Completions(opts) => commands::completions::run(opts),
        Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
