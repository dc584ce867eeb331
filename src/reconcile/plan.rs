//! The delta between two versions and the mutations that apply it.
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::depot::{Depot, PublishedEntry};
use crate::error::LinkError;
use crate::resources::pointer::PointerResource;
use crate::resources::symlink::LinkResource;
use crate::resources::{Applicable, ResourceChange};

/// One filesystem mutation of a commit.
///
/// `Display` renders the equivalent shell command, which is what a dry run
/// prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Create a top-level link.
    CreateLink {
        /// Link location under the base directory.
        link: PathBuf,
        /// Relative target routed through ACTIVE.
        target: PathBuf,
    },
    /// Point the product's ACTIVE symlink at a version.
    SetActive {
        /// Location of the ACTIVE symlink.
        pointer: PathBuf,
        /// Version name written into the pointer.
        version: String,
    },
    /// Remove a top-level link.
    RemoveLink {
        /// Link location under the base directory.
        link: PathBuf,
        /// Target the link was created with.
        target: PathBuf,
    },
}

impl Mutation {
    /// Perform the mutation on the filesystem.
    ///
    /// # Errors
    ///
    /// Returns a [`LinkError`] if the filesystem is not in the state the
    /// mutation expects, or the system call fails.
    pub fn apply(&self) -> Result<ResourceChange, LinkError> {
        match self {
            Self::CreateLink { link, target } => {
                LinkResource::new(link.clone(), target.clone()).apply()
            }
            Self::SetActive { pointer, version } => {
                PointerResource::new(pointer.clone(), version.clone()).apply()
            }
            Self::RemoveLink { link, target } => {
                LinkResource::new(link.clone(), target.clone()).remove()
            }
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateLink { link, target } => {
                write!(f, "ln -s {} {}", target.display(), link.display())
            }
            Self::SetActive { pointer, version } => {
                write!(f, "ln -sf {version} {}", pointer.display())
            }
            Self::RemoveLink { link, .. } => write!(f, "rm {}", link.display()),
        }
    }
}

/// Links to add and remove when moving a product between versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPlan {
    /// Product being committed.
    pub product: String,
    /// Version being made active.
    pub version: String,
    /// Version active before the commit, if any.
    pub previous: Option<String>,
    /// Entries published only by the new version, sorted.
    pub to_add: Vec<PublishedEntry>,
    /// Entries published only by the previous version, sorted.
    pub to_remove: Vec<PublishedEntry>,
    /// Number of entries published by both versions; their links stay as they are.
    pub unchanged: usize,
}

impl CommitPlan {
    /// Diff the entry sets of the previous and the new version.
    #[must_use]
    pub fn new(
        product: &str,
        version: &str,
        previous: Option<String>,
        old_entries: &BTreeSet<PublishedEntry>,
        new_entries: &BTreeSet<PublishedEntry>,
    ) -> Self {
        Self {
            product: product.to_string(),
            version: version.to_string(),
            previous,
            to_add: new_entries.difference(old_entries).cloned().collect(),
            to_remove: old_entries.difference(new_entries).cloned().collect(),
            unchanged: new_entries.intersection(old_entries).count(),
        }
    }

    /// Mutations in application order: link additions, the pointer switch,
    /// then link removals.
    #[must_use]
    pub fn mutations(&self, depot: &Depot) -> Vec<Mutation> {
        let base = depot.base();
        let adds = self.to_add.iter().map(|entry| Mutation::CreateLink {
            link: entry.link_path(base),
            target: entry.link_target(&self.product),
        });
        let switch = std::iter::once(Mutation::SetActive {
            pointer: depot.active_pointer(&self.product),
            version: self.version.clone(),
        });
        let removes = self.to_remove.iter().map(|entry| Mutation::RemoveLink {
            link: entry.link_path(base),
            target: entry.link_target(&self.product),
        });
        adds.chain(switch).chain(removes).collect()
    }
}
