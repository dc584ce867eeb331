//! Command: show the active and installed versions of products.
use std::fmt::Write as _;
use std::io::{self, Write};

use anyhow::Result;

use crate::cli::{GlobalOpts, StatusOpts};
use crate::depot::Depot;
use crate::error::DepotError;
use crate::logging::Log;

/// Render one line per product: name, active version, installed versions and
/// the number of entries the active version publishes.
///
/// An active version whose directory is gone is flagged `(missing)`; a
/// product that was never committed shows `none`.
///
/// # Errors
///
/// Returns [`NotFoundError::Product`](crate::error::NotFoundError::Product)
/// if `product` is given but not installed, or an I/O error if the depot
/// cannot be read.
pub fn render(depot: &Depot, product: Option<&str>) -> Result<String, DepotError> {
    let products = match product {
        Some(name) => {
            depot.require_product_exists(name)?;
            vec![name.to_string()]
        }
        None => depot.products()?,
    };

    let mut text = String::new();
    for name in &products {
        let installed = depot.installed_versions(name)?;
        let installed_list = installed.join(", ");
        let _ = match depot.current_version(name)? {
            Some(v) if installed.contains(&v) => {
                let published = depot.published_entries(name, &v)?.len();
                writeln!(text, "{name} {v} [{installed_list}] {published} published")
            }
            Some(v) => writeln!(text, "{name} {v} (missing) [{installed_list}]"),
            None => writeln!(text, "{name} none [{installed_list}]"),
        };
    }
    Ok(text)
}

/// Run `idepot status`, printing to stdout.
///
/// # Errors
///
/// Returns an error if the depot cannot be opened or read, or if the named
/// product does not exist.
pub fn run(global: &GlobalOpts, opts: &StatusOpts, log: &dyn Log) -> Result<()> {
    let depot = super::open_depot(global, log)?;
    let text = render(&depot, opts.product.as_deref())?;
    if text.is_empty() {
        log.warn("No products installed");
    }
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}
