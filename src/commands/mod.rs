//! Subcommand orchestration.
pub mod commit;
pub mod completions;
pub mod status;
pub mod version;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config;
use crate::depot::Depot;
use crate::logging::Log;

/// Load settings for `--basedir` / `--config` and open the depot.
///
/// # Errors
///
/// Returns an error if the settings file cannot be read or is invalid, or if
/// the base directory has no `DEPOT` directory.
pub fn open_depot(global: &GlobalOpts, log: &dyn Log) -> Result<Depot> {
    let settings = config::load(global.config.as_deref(), &global.basedir)?;
    log.debug(&format!("static dirs: {}", settings.static_dirs.join(" ")));
    let depot = Depot::open(global.basedir.clone(), settings)?;
    log.debug(&format!("depot: {}", depot.depot_dir().display()));
    Ok(depot)
}
