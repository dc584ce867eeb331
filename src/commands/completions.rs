//! Command: generate shell completion scripts.
//!
//! ```bash
//! idepot completions bash > ~/.local/share/bash-completion/completions/idepot
//! idepot completions zsh > ~/.zfunc/_idepot
//! ```
use std::io::{self, Write};

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, CompletionsOpts};

/// Write the completion script for the requested shell to `out`.
///
/// # Errors
///
/// Returns an error if the script cannot be flushed to `out`.
pub fn execute(opts: &CompletionsOpts, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    generate(opts.shell, &mut cmd, "idepot", out);
    out.flush()?;
    Ok(())
}

/// Write the completion script to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run(opts: &CompletionsOpts) -> Result<()> {
    execute(opts, &mut io::stdout().lock())
}
