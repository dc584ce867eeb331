//! Domain-specific error types for the depot engine.
//!
//! The depot store and the reconciler return [`DepotError`]; command handlers
//! at the CLI boundary convert it to [`anyhow::Error`] via the standard `?`
//! operator.
//!
//! # Error hierarchy
//!
//! ```text
//! DepotError
//! ├── Config(ConfigError)    : missing depot root, bad static dirs
//! ├── NotFound(NotFoundError): unknown product or version
//! ├── Link(LinkError)        : a link mutation could not be applied
//! └── Io                     : the depot could not be read
//! ```
//!
//! A request for the version that is already active is not an error; see
//! [`CommitOutcome::AlreadyActive`](crate::reconcile::CommitOutcome::AlreadyActive).

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for depot operations.
#[derive(Error, Debug)]
pub enum DepotError {
    /// The depot or its configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The requested product or version is not installed.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A filesystem mutation could not be applied as expected.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// The depot tree could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl DepotError {
    /// Wrap an I/O error raised while reading `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors in the depot root or the static directory configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `<base>/DEPOT` does not exist.
    #[error("No depot in {}", .base.display())]
    MissingDepot {
        /// Base directory that was searched.
        base: PathBuf,
    },

    /// A configured static directory name cannot be used as a link location.
    #[error("invalid static directory '{dir}': {reason}")]
    InvalidStaticDir {
        /// The offending entry.
        dir: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The settings file could not be read.
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for [`Settings`](crate::config::Settings).
    #[error("invalid config file {}: {message}", .path.display())]
    Parse {
        /// Path of the settings file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
}

/// A product or version directory is absent from the depot.
#[derive(Error, Debug)]
pub enum NotFoundError {
    /// `<depot>/<product>` is not a directory.
    #[error("No such product {product}")]
    Product {
        /// Requested product name.
        product: String,
    },

    /// `<depot>/<product>/<version>` is not a directory.
    #[error("Version {version} of {product} not installed")]
    Version {
        /// Product the version was requested for.
        product: String,
        /// Requested version name.
        version: String,
    },
}

/// A link mutation found the filesystem in an unexpected state.
#[derive(Error, Debug)]
pub enum LinkError {
    /// Something other than the expected link occupies the link location.
    #[error("cannot create link {}: {reason}", .path.display())]
    Conflict {
        /// Link location.
        path: PathBuf,
        /// What was found there instead.
        reason: String,
    },

    /// The link to remove does not exist.
    #[error("cannot remove link {}: no such file", .path.display())]
    Missing {
        /// Link location.
        path: PathBuf,
    },

    /// The entry to remove exists but is not a symlink.
    #[error("cannot remove {}: not a symlink", .path.display())]
    NotALink {
        /// Entry location.
        path: PathBuf,
    },

    /// The entry to remove is a symlink, but not one this depot created.
    #[error("cannot remove {}: points to {}, not into the depot", .path.display(), .current.display())]
    Foreign {
        /// Entry location.
        path: PathBuf,
        /// What the symlink points to.
        current: PathBuf,
    },

    /// The mutating system call failed.
    #[error("{action} {}: {source}", .path.display())]
    Io {
        /// Short description of the attempted mutation.
        action: &'static str,
        /// Path being mutated.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl LinkError {
    /// Wrap an I/O error raised while performing `action` on `path`.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // ConfigError
    // -----------------------------------------------------------------------

    #[test]
    fn missing_depot_names_base() {
        let e = ConfigError::MissingDepot {
            base: PathBuf::from("/usr/local"),
        };
        assert_eq!(e.to_string(), "No depot in /usr/local");
    }

    #[test]
    fn invalid_static_dir_display() {
        let e = ConfigError::InvalidStaticDir {
            dir: "../bin".to_string(),
            reason: "must not contain '..'".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid static directory '../bin': must not contain '..'"
        );
    }

    #[test]
    fn read_error_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Read {
            path: PathBuf::from("/etc/idepot.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("/etc/idepot.toml"));
        assert!(e.source().is_some());
    }

    // -----------------------------------------------------------------------
    // NotFoundError
    // -----------------------------------------------------------------------

    #[test]
    fn product_not_found_display() {
        let e = NotFoundError::Product {
            product: "ghost-product".to_string(),
        };
        assert_eq!(e.to_string(), "No such product ghost-product");
    }

    #[test]
    fn version_not_found_display() {
        let e = NotFoundError::Version {
            product: "python".to_string(),
            version: "9.9.9".to_string(),
        };
        assert_eq!(e.to_string(), "Version 9.9.9 of python not installed");
    }

    // -----------------------------------------------------------------------
    // LinkError
    // -----------------------------------------------------------------------

    #[test]
    fn conflict_display() {
        let e = LinkError::Conflict {
            path: PathBuf::from("/usr/local/bin/python"),
            reason: "regular file in the way".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "cannot create link /usr/local/bin/python: regular file in the way"
        );
    }

    #[test]
    fn not_a_link_display() {
        let e = LinkError::NotALink {
            path: PathBuf::from("/usr/local/bin/python"),
        };
        assert_eq!(
            e.to_string(),
            "cannot remove /usr/local/bin/python: not a symlink"
        );
    }

    #[test]
    fn foreign_display_names_both_ends() {
        let e = LinkError::Foreign {
            path: PathBuf::from("/usr/local/bin/tool"),
            current: PathBuf::from("/opt/other/bin/tool"),
        };
        assert_eq!(
            e.to_string(),
            "cannot remove /usr/local/bin/tool: points to /opt/other/bin/tool, not into the depot"
        );
    }

    #[test]
    fn io_display_names_action() {
        let e = LinkError::io(
            "create link",
            "/usr/local/bin/python",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert!(e.to_string().starts_with("create link /usr/local/bin/python"));
    }

    // -----------------------------------------------------------------------
    // DepotError conversions
    // -----------------------------------------------------------------------

    #[test]
    fn depot_error_is_transparent_for_not_found() {
        let e: DepotError = NotFoundError::Product {
            product: "x".to_string(),
        }
        .into();
        assert_eq!(e.to_string(), "No such product x");
        assert!(matches!(e, DepotError::NotFound(_)));
    }

    #[test]
    fn depot_error_from_link_error() {
        let e: DepotError = LinkError::Missing {
            path: PathBuf::from("/b/bin/x"),
        }
        .into();
        assert!(matches!(e, DepotError::Link(LinkError::Missing { .. })));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<DepotError>();
        assert_send_sync::<ConfigError>();
        assert_send_sync::<NotFoundError>();
        assert_send_sync::<LinkError>();
    }

    #[test]
    fn depot_error_converts_to_anyhow() {
        let e: DepotError = ConfigError::MissingDepot {
            base: PathBuf::from("/nowhere"),
        }
        .into();
        let anyhow_err: anyhow::Error = e.into();
        assert_eq!(anyhow_err.to_string(), "No depot in /nowhere");
    }
}
