//! File-system resource helpers.
use std::path::Path;

use crate::error::LinkError;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), LinkError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| LinkError::io("create parent", parent, e))?;
    }
    Ok(())
}

/// Remove an existing file or symlink at `path`, including broken symlinks.
///
/// Does nothing if `path` does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_existing(path: &Path) -> Result<(), LinkError> {
    if path.symlink_metadata().is_ok() {
        std::fs::remove_file(path).map_err(|e| LinkError::io("remove existing", path, e))?;
    }
    Ok(())
}
