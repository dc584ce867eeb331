//! Published entries and their top-level link geometry.
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{ACTIVE, DEPOT_DIR};

/// One file or directory found directly inside `<version>/<dir>/`.
///
/// Ordering is lexicographic on `(dir, item)`, which fixes the order in which
/// links are created and removed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublishedEntry {
    /// Static directory the item was found in (e.g. `man/man1`).
    pub dir: String,
    /// Name of the item inside that directory.
    pub item: OsString,
}

impl PublishedEntry {
    /// Create an entry for `item` under the static directory `dir`.
    pub fn new(dir: impl Into<String>, item: impl Into<OsString>) -> Self {
        Self {
            dir: dir.into(),
            item: item.into(),
        }
    }

    /// Location of the top-level link: `<base>/<dir>/<item>`.
    #[must_use]
    pub fn link_path(&self, base: &Path) -> PathBuf {
        base.join(&self.dir).join(&self.item)
    }

    /// Relative link target routed through the product's ACTIVE pointer.
    ///
    /// One `..` per segment of `dir` climbs from the link's directory back to
    /// the base, so `man/man1/ls.1` of `coreutils` becomes
    /// `../../DEPOT/coreutils/ACTIVE/man/man1/ls.1`.
    #[must_use]
    pub fn link_target(&self, product: &str) -> PathBuf {
        let mut target: PathBuf = self.dir.split('/').map(|_| "..").collect();
        target.push(DEPOT_DIR);
        target.push(product);
        target.push(ACTIVE);
        target.push(&self.dir);
        target.push(&self.item);
        target
    }

    /// Path of the entry inside a version directory.
    #[must_use]
    pub fn source_in(&self, version_dir: &Path) -> PathBuf {
        version_dir.join(&self.dir).join(&self.item)
    }
}

impl std::fmt::Display for PublishedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.dir, self.item.to_string_lossy())
    }
}
