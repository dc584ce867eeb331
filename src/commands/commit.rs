//! Command: make a version the active version of a product.
use std::io::{self, Write};

use anyhow::Result;

use crate::cli::{CommitOpts, GlobalOpts};
use crate::logging::Log;
use crate::reconcile::{CommitOutcome, CommitReport, Reconciler};

/// Commit `opts.version` of `opts.product`, writing the dry-run transcript
/// (if any) to `out`.
///
/// # Errors
///
/// Returns an error if the depot cannot be opened, the product or version is
/// unknown, or a link cannot be created or removed.
pub fn execute(
    global: &GlobalOpts,
    opts: &CommitOpts,
    log: &dyn Log,
    out: &mut dyn Write,
) -> Result<CommitReport> {
    let depot = super::open_depot(global, log)?;
    log.stage(&format!("Committing {} {}", opts.product, opts.version));

    let report =
        Reconciler::new(&depot, log).commit(&opts.product, &opts.version, opts.dry_run)?;

    if report.dry_run {
        for mutation in &report.mutations {
            writeln!(out, "{mutation}")?;
        }
        out.flush()?;
    }

    if let CommitOutcome::Committed {
        added,
        removed,
        unchanged,
        ..
    } = &report.outcome
    {
        let summary = format!(
            "{} {}: {added} added, {removed} removed, {unchanged} unchanged",
            opts.product, opts.version
        );
        if report.dry_run {
            log.dry_run(&summary);
        } else {
            log.info(&summary);
        }
    }
    Ok(report)
}

/// Run `idepot commit`, printing the dry-run transcript to stdout.
///
/// # Errors
///
/// See [`execute`].
pub fn run(global: &GlobalOpts, opts: &CommitOpts, log: &dyn Log) -> Result<()> {
    execute(global, opts, log, &mut io::stdout().lock()).map(|_| ())
}
