//! Depot settings: which static directories publish top-level links.
pub mod toml_loader;

use serde::Deserialize;
use std::path::Path;

use crate::depot::{CONFIG_FILE, DEPOT_DIR};
use crate::error::ConfigError;

/// Static directories scanned when no settings file overrides them.
pub const DEFAULT_STATIC_DIRS: &[&str] = &["bin", "lib", "lib/python", "etc", "man/man1", "man/man3"];

/// Settings consumed by the depot store.
///
/// # Examples
///
/// ```
/// use idepot::config::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.static_dirs.first().map(String::as_str), Some("bin"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Relative subpaths of a version directory whose children are published.
    pub static_dirs: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            static_dirs: DEFAULT_STATIC_DIRS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Settings {
    /// Build settings from an explicit list of static directory names.
    #[must_use]
    pub fn with_static_dirs<I, S>(dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            static_dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Check every static directory name and drop duplicates, keeping the
    /// first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStaticDir`] for an empty name, an
    /// absolute path, or a name with `.` or `..` segments.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        for dir in &self.static_dirs {
            check_static_dir(dir)?;
        }
        let mut seen = std::collections::HashSet::new();
        self.static_dirs.retain(|d| seen.insert(d.clone()));
        Ok(self)
    }
}

fn check_static_dir(dir: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidStaticDir {
        dir: dir.to_string(),
        reason: reason.to_string(),
    };
    if dir.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if Path::new(dir).is_absolute() {
        return Err(invalid("must be relative"));
    }
    for segment in dir.split('/') {
        match segment {
            "" => return Err(invalid("must not have empty segments")),
            "." | ".." => return Err(invalid("must not contain '.' or '..'")),
            _ => {}
        }
    }
    Ok(())
}

/// Load and validate settings.
///
/// An `explicit` path must exist.  Without one, `<base>/DEPOT/idepot.toml` is
/// used when present; otherwise the defaults apply.
///
/// # Errors
///
/// Returns an error if the settings file cannot be read or parsed, or if it
/// names an invalid static directory.
pub fn load(explicit: Option<&Path>, base: &Path) -> Result<Settings, ConfigError> {
    let settings: Settings = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            toml_loader::load_config(path)?
        }
        None => toml_loader::load_config(&base.join(DEPOT_DIR).join(CONFIG_FILE))?,
    };
    settings.validate()
}
