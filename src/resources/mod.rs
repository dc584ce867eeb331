//! Idempotent filesystem primitives (check + apply pattern).
pub mod helpers;
pub mod pointer;
pub mod symlink;

use crate::error::LinkError;

/// Minimal interface for resources that can be described, applied, and removed.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Bring the resource into its desired state.
    ///
    /// # Errors
    ///
    /// Returns a [`LinkError`] if something unexpected occupies the resource's
    /// location or the underlying system call fails.
    fn apply(&self) -> Result<ResourceChange, LinkError>;

    /// Remove the resource, undoing a previous `apply()`.
    ///
    /// Default implementation returns an error; override in resources that
    /// support removal.
    ///
    /// # Errors
    ///
    /// Returns a [`LinkError`] if the resource cannot be removed.
    fn remove(&self) -> Result<ResourceChange, LinkError> {
        Err(LinkError::Conflict {
            path: std::path::PathBuf::from(self.description()),
            reason: "removal is not supported".to_string(),
        })
    }
}

/// State of a filesystem resource.
///
/// # Examples
///
/// ```
/// use idepot::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let wrong = ResourceState::Incorrect { current: "points to ../elsewhere".into() };
///
/// assert_ne!(missing, ResourceState::Correct);
/// assert_ne!(wrong, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing exists at the resource's location.
    Missing,
    /// The resource exists and matches the desired state.
    Correct,
    /// A symlink exists but points somewhere else.
    Incorrect {
        /// Where the existing symlink points.
        current: String,
    },
    /// Something that is not a symlink occupies the location.
    Invalid {
        /// What was found instead.
        reason: String,
    },
}

/// Result of applying a resource change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created, replaced, or removed.
    Applied,
    /// Resource was already in the desired state.
    AlreadyCorrect,
}

/// Resources that can determine their own current state.
pub trait Resource: Applicable {
    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined.
    fn current_state(&self) -> Result<ResourceState, LinkError>;

    /// Determine if the resource needs to be changed.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`current_state`](Self::current_state).
    fn needs_change(&self) -> Result<bool, LinkError> {
        Ok(!matches!(self.current_state()?, ResourceState::Correct))
    }
}
