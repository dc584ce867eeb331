//! Read-only view of the on-disk depot layout.
//!
//! ```text
//! <base>/
//! ├── bin/python3 -> ../DEPOT/python/ACTIVE/bin/python3
//! └── DEPOT/
//!     ├── idepot.toml            (optional settings)
//!     └── python/
//!         ├── ACTIVE -> 3.12
//!         ├── 3.11/bin/python3
//!         └── 3.12/bin/python3
//! ```
mod entry;

pub use entry::PublishedEntry;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{ConfigError, DepotError, NotFoundError};

/// Name of the depot directory inside the base directory.
pub const DEPOT_DIR: &str = "DEPOT";

/// Name of the per-product pointer to the committed version.
pub const ACTIVE: &str = "ACTIVE";

/// Name of the optional settings file inside the depot directory.
pub const CONFIG_FILE: &str = "idepot.toml";

/// A base directory with a `DEPOT` tree beneath it.
#[derive(Debug, Clone)]
pub struct Depot {
    base: PathBuf,
    depot: PathBuf,
    static_dirs: Vec<String>,
}

impl Depot {
    /// Open the depot under `base`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDepot`] if `<base>/DEPOT` does not exist.
    pub fn open(base: impl Into<PathBuf>, settings: Settings) -> Result<Self, DepotError> {
        let base = base.into();
        let depot = base.join(DEPOT_DIR);
        if !depot.exists() {
            return Err(ConfigError::MissingDepot { base }.into());
        }
        Ok(Self {
            base,
            depot,
            static_dirs: settings.static_dirs,
        })
    }

    /// Base directory holding the top-level link farm.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// The `<base>/DEPOT` directory.
    #[must_use]
    pub fn depot_dir(&self) -> &Path {
        &self.depot
    }

    /// Static directories scanned for published entries, in configured order.
    #[must_use]
    pub fn static_dirs(&self) -> &[String] {
        &self.static_dirs
    }

    /// `<base>/DEPOT/<product>`.
    #[must_use]
    pub fn product_dir(&self, product: &str) -> PathBuf {
        self.depot.join(product)
    }

    /// `<base>/DEPOT/<product>/<version>`.
    #[must_use]
    pub fn version_dir(&self, product: &str, version: &str) -> PathBuf {
        self.product_dir(product).join(version)
    }

    /// `<base>/DEPOT/<product>/ACTIVE`.
    #[must_use]
    pub fn active_pointer(&self, product: &str) -> PathBuf {
        self.product_dir(product).join(ACTIVE)
    }

    /// # Errors
    ///
    /// Returns [`NotFoundError::Product`] if the product directory is absent.
    pub fn require_product_exists(&self, product: &str) -> Result<(), DepotError> {
        if is_plain_name(product) && self.product_dir(product).is_dir() {
            Ok(())
        } else {
            Err(NotFoundError::Product {
                product: product.to_string(),
            }
            .into())
        }
    }

    /// # Errors
    ///
    /// Returns [`NotFoundError::Version`] if the version directory is absent.
    pub fn require_version_exists(&self, product: &str, version: &str) -> Result<(), DepotError> {
        if is_plain_name(version) && version != ACTIVE && self.version_dir(product, version).is_dir()
        {
            Ok(())
        } else {
            Err(NotFoundError::Version {
                product: product.to_string(),
                version: version.to_string(),
            }
            .into())
        }
    }

    /// The version the ACTIVE pointer names, or `None` when there is no
    /// pointer.  A dangling pointer still reports its target.
    ///
    /// # Errors
    ///
    /// Returns an error if ACTIVE exists but is not a readable symlink.
    pub fn current_version(&self, product: &str) -> Result<Option<String>, DepotError> {
        let pointer = self.active_pointer(product);
        if pointer.symlink_metadata().is_err() {
            return Ok(None);
        }
        let target = std::fs::read_link(&pointer).map_err(|e| DepotError::io(&pointer, e))?;
        Ok(Some(target.to_string_lossy().into_owned()))
    }

    /// Every item found directly inside `<version>/<static dir>/` for each
    /// configured static directory.  Absent static directories contribute
    /// nothing.
    ///
    /// An item that is itself a configured static directory (or an ancestor
    /// of one), such as `python` under `lib` when `lib/python` is configured,
    /// is a container for other entries and is not published.
    ///
    /// # Errors
    ///
    /// Returns an error if a static directory exists but cannot be listed.
    pub fn published_entries(
        &self,
        product: &str,
        version: &str,
    ) -> Result<BTreeSet<PublishedEntry>, DepotError> {
        let version_dir = self.version_dir(product, version);
        let mut entries = BTreeSet::new();
        for dir in &self.static_dirs {
            let sub = version_dir.join(dir);
            if !sub.is_dir() {
                continue;
            }
            for entry in std::fs::read_dir(&sub).map_err(|e| DepotError::io(&sub, e))? {
                let entry = entry.map_err(|e| DepotError::io(&sub, e))?;
                let item = entry.file_name();
                if self.is_static_container(dir, &item.to_string_lossy()) {
                    continue;
                }
                entries.insert(PublishedEntry::new(dir.as_str(), item));
            }
        }
        Ok(entries)
    }

    fn is_static_container(&self, dir: &str, item: &str) -> bool {
        let nested = format!("{dir}/{item}");
        self.static_dirs.iter().any(|s| {
            s.strip_prefix(nested.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }

    /// Names of all product directories, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the depot directory cannot be listed.
    pub fn products(&self) -> Result<Vec<String>, DepotError> {
        list_subdirs(&self.depot)
    }

    /// Names of all installed versions of `product`, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Product`] for an unknown product, or an I/O
    /// error if its directory cannot be listed.
    pub fn installed_versions(&self, product: &str) -> Result<Vec<String>, DepotError> {
        self.require_product_exists(product)?;
        let mut versions = list_subdirs(&self.product_dir(product))?;
        versions.retain(|v| v != ACTIVE);
        Ok(versions)
    }
}

/// A single non-hidden path component, safe to join under the depot.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains('/')
}

/// Sorted names of the real (non-symlink) visible subdirectories of `dir`.
fn list_subdirs(dir: &Path) -> Result<Vec<String>, DepotError> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| DepotError::io(dir, e))? {
        let entry = entry.map_err(|e| DepotError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| DepotError::io(entry.path(), e))?;
        if !file_type.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_plain_name(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
