//! Top-level link resource.
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::LinkError;

/// A symlink at `link` whose literal content must be `target`.
///
/// `target` is usually relative to the link's directory, so it is compared
/// as written rather than resolved.
#[derive(Debug, Clone)]
pub struct LinkResource {
    /// Where the symlink lives.
    pub link: PathBuf,
    /// What the symlink must contain.
    pub target: PathBuf,
}

impl LinkResource {
    /// Create a new link resource.
    #[must_use]
    pub const fn new(link: PathBuf, target: PathBuf) -> Self {
        Self { link, target }
    }
}

impl Applicable for LinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.link.display(), self.target.display())
    }

    fn apply(&self) -> Result<ResourceChange, LinkError> {
        match self.current_state()? {
            ResourceState::Correct => Ok(ResourceChange::AlreadyCorrect),
            ResourceState::Missing => {
                super::helpers::fs::ensure_parent_dir(&self.link)?;
                create_symlink(&self.target, &self.link)
                    .map_err(|e| LinkError::io("create link", &self.link, e))?;
                Ok(ResourceChange::Applied)
            }
            ResourceState::Incorrect { current } => Err(LinkError::Conflict {
                path: self.link.clone(),
                reason: format!("existing symlink {current}"),
            }),
            ResourceState::Invalid { reason } => Err(LinkError::Conflict {
                path: self.link.clone(),
                reason,
            }),
        }
    }

    fn remove(&self) -> Result<ResourceChange, LinkError> {
        let meta = match std::fs::symlink_metadata(&self.link) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LinkError::Missing {
                    path: self.link.clone(),
                });
            }
            Err(e) => return Err(LinkError::io("inspect", &self.link, e)),
        };
        if !meta.is_symlink() {
            return Err(LinkError::NotALink {
                path: self.link.clone(),
            });
        }
        let existing =
            std::fs::read_link(&self.link).map_err(|e| LinkError::io("read link", &self.link, e))?;
        if existing != self.target {
            return Err(LinkError::Foreign {
                path: self.link.clone(),
                current: existing,
            });
        }
        remove_symlink(&self.link, &meta).map_err(|e| LinkError::io("remove link", &self.link, e))?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for LinkResource {
    fn current_state(&self) -> Result<ResourceState, LinkError> {
        let meta = match std::fs::symlink_metadata(&self.link) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ResourceState::Missing),
            Err(e) => return Err(LinkError::io("inspect", &self.link, e)),
        };

        if !meta.is_symlink() {
            let kind = if meta.is_dir() { "directory" } else { "file" };
            return Ok(ResourceState::Invalid {
                reason: format!("a {kind} is in the way"),
            });
        }

        let existing =
            std::fs::read_link(&self.link).map_err(|e| LinkError::io("read link", &self.link, e))?;
        if existing == self.target {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: format!("points to {}", existing.display()),
            })
        }
    }
}

/// Create a symlink at `link` containing `target`.
pub(crate) fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        // Relative targets resolve against the link's directory.
        let resolved = link.parent().map_or_else(|| target.to_path_buf(), |p| p.join(target));
        if resolved.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        }
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = (target, link);
        Err(std::io::Error::from(ErrorKind::Unsupported))
    }
}

/// Remove a symlink, handling platform differences.
///
/// On Windows, directory symlinks must be removed with `remove_dir`; the raw
/// `FILE_ATTRIBUTE_DIRECTORY` flag tells them apart since
/// `symlink_metadata().is_dir()` is `false` for any symlink.
fn remove_symlink(path: &Path, meta: &std::fs::Metadata) -> std::io::Result<()> {
    if is_dir_like(meta) {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    }
}

/// Check if metadata represents a directory-like entry.
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}
