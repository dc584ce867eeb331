//! ACTIVE pointer resource.
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::symlink::create_symlink;
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::LinkError;

/// Sibling name used to stage the new pointer before it is renamed into place.
const STAGING_NAME: &str = ".ACTIVE.new";

/// A product's `ACTIVE` symlink, which must contain the bare version name.
#[derive(Debug, Clone)]
pub struct PointerResource {
    /// Location of the pointer (`<depot>/<product>/ACTIVE`).
    pub pointer: PathBuf,
    /// Version directory name the pointer must name.
    pub version: String,
}

impl PointerResource {
    /// Create a new pointer resource.
    #[must_use]
    pub const fn new(pointer: PathBuf, version: String) -> Self {
        Self { pointer, version }
    }

    fn staging_path(&self) -> PathBuf {
        self.pointer.with_file_name(STAGING_NAME)
    }
}

impl Applicable for PointerResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.pointer.display(), self.version)
    }

    /// Stage the new symlink under a temporary name, then rename it over the
    /// old pointer so readers never observe a missing `ACTIVE`.
    fn apply(&self) -> Result<ResourceChange, LinkError> {
        match self.current_state()? {
            ResourceState::Correct => return Ok(ResourceChange::AlreadyCorrect),
            ResourceState::Invalid { reason } => {
                return Err(LinkError::Conflict {
                    path: self.pointer.clone(),
                    reason,
                });
            }
            ResourceState::Missing | ResourceState::Incorrect { .. } => {}
        }

        let staging = self.staging_path();
        super::helpers::fs::remove_existing(&staging)?;
        create_symlink(Path::new(&self.version), &staging)
            .map_err(|e| LinkError::io("create pointer", &staging, e))?;
        if let Err(e) = std::fs::rename(&staging, &self.pointer) {
            let _ = std::fs::remove_file(&staging);
            return Err(LinkError::io("switch pointer", &self.pointer, e));
        }
        Ok(ResourceChange::Applied)
    }
}

impl Resource for PointerResource {
    fn current_state(&self) -> Result<ResourceState, LinkError> {
        let meta = match std::fs::symlink_metadata(&self.pointer) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ResourceState::Missing),
            Err(e) => return Err(LinkError::io("inspect", &self.pointer, e)),
        };
        if !meta.is_symlink() {
            return Ok(ResourceState::Invalid {
                reason: "pointer is not a symlink".to_string(),
            });
        }
        let existing = std::fs::read_link(&self.pointer)
            .map_err(|e| LinkError::io("read pointer", &self.pointer, e))?;
        if existing == Path::new(&self.version) {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: existing.to_string_lossy().into_owned(),
            })
        }
    }
}

#[cfg(test)]
#[cfg(unix)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn pointer_in(dir: &Path, version: &str) -> PointerResource {
        PointerResource::new(dir.join("ACTIVE"), version.to_string())
    }

    #[test]
    fn apply_creates_missing_pointer() {
        let tmp = tempfile::tempdir().unwrap();
        let pointer = pointer_in(tmp.path(), "1.0");
        assert_eq!(pointer.current_state().unwrap(), ResourceState::Missing);
        assert_eq!(pointer.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(std::fs::read_link(&pointer.pointer).unwrap(), PathBuf::from("1.0"));
    }

    #[test]
    fn apply_switches_existing_pointer_and_leaves_no_staging_link() {
        let tmp = tempfile::tempdir().unwrap();
        pointer_in(tmp.path(), "1.0").apply().unwrap();

        let pointer = pointer_in(tmp.path(), "2.0");
        assert_eq!(
            pointer.current_state().unwrap(),
            ResourceState::Incorrect {
                current: "1.0".to_string()
            }
        );
        pointer.apply().unwrap();
        assert_eq!(std::fs::read_link(&pointer.pointer).unwrap(), PathBuf::from("2.0"));
        assert!(tmp.path().join(STAGING_NAME).symlink_metadata().is_err());
    }

    #[test]
    fn apply_replaces_stale_staging_link() {
        let tmp = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink("0.9", tmp.path().join(STAGING_NAME)).unwrap();
        let pointer = pointer_in(tmp.path(), "1.0");
        pointer.apply().unwrap();
        assert_eq!(std::fs::read_link(&pointer.pointer).unwrap(), PathBuf::from("1.0"));
    }

    #[test]
    fn apply_is_noop_when_correct() {
        let tmp = tempfile::tempdir().unwrap();
        let pointer = pointer_in(tmp.path(), "1.0");
        pointer.apply().unwrap();
        assert_eq!(pointer.apply().unwrap(), ResourceChange::AlreadyCorrect);
    }

    #[test]
    fn apply_refuses_real_directory() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("ACTIVE")).unwrap();
        let err = pointer_in(tmp.path(), "1.0").apply().unwrap_err();
        assert!(matches!(err, LinkError::Conflict { .. }));
    }
}
