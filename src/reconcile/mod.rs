//! The commit algorithm: move a product's link farm to another version.
//!
//! Validation (product, version, current pointer) happens before any
//! mutation.  Mutations are applied in order (links added, ACTIVE switched,
//! links removed) and stop at the first failure without rolling back, so a
//! failed commit can be inspected and retried.
mod plan;

pub use plan::{CommitPlan, Mutation};

use std::collections::BTreeSet;

use crate::depot::Depot;
use crate::error::DepotError;
use crate::logging::Log;
use crate::resources::ResourceChange;

/// What a commit would do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// The requested version is already active; nothing to do.
    AlreadyActive {
        /// The active version.
        version: String,
    },
    /// The product must be switched to a different version.
    Switch(CommitPlan),
}

/// How a commit ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The requested version was already active; the filesystem was not touched.
    AlreadyActive {
        /// The active version.
        version: String,
    },
    /// The product was switched (or, in a dry run, would be).
    Committed {
        /// Version active before the commit, if any.
        previous: Option<String>,
        /// Number of links created.
        added: usize,
        /// Number of links removed.
        removed: usize,
        /// Number of links shared by both versions and left untouched.
        unchanged: usize,
    },
}

/// Result of [`Reconciler::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    /// How the commit ended.
    pub outcome: CommitOutcome,
    /// Mutations performed, or that would be performed in a dry run.
    pub mutations: Vec<Mutation>,
    /// Whether the mutations were only planned.
    pub dry_run: bool,
}

impl CommitReport {
    /// The shell-command transcript of the mutations, one per line.
    #[must_use]
    pub fn transcript(&self) -> String {
        self.mutations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Computes and applies commits against one depot.
pub struct Reconciler<'a> {
    depot: &'a Depot,
    log: &'a dyn Log,
}

impl std::fmt::Debug for Reconciler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("depot", &self.depot)
            .field("log", &"<dyn Log>")
            .finish()
    }
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler over `depot`, reporting progress to `log`.
    #[must_use]
    pub fn new(depot: &'a Depot, log: &'a dyn Log) -> Self {
        Self { depot, log }
    }

    /// Work out what committing `version` of `product` would change.
    ///
    /// Reads only; never touches the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`](crate::error::NotFoundError) if the product
    /// or version is not installed, or an I/O error if the depot cannot be
    /// read.
    pub fn plan(&self, product: &str, version: &str) -> Result<Plan, DepotError> {
        self.depot.require_product_exists(product)?;
        self.depot.require_version_exists(product, version)?;

        let previous = self.depot.current_version(product)?;
        let old_entries = match previous.as_deref() {
            Some(old) if old == version => {
                return Ok(Plan::AlreadyActive {
                    version: version.to_string(),
                });
            }
            Some(old) => {
                self.log.info(&format!("Replacing version {old}"));
                self.depot.published_entries(product, old)?
            }
            None => {
                self.log.info("No previous version");
                BTreeSet::new()
            }
        };
        let new_entries = self.depot.published_entries(product, version)?;

        Ok(Plan::Switch(CommitPlan::new(
            product,
            version,
            previous,
            &old_entries,
            &new_entries,
        )))
    }

    /// Make `version` the active version of `product`.
    ///
    /// With `dry_run` the mutations are computed and returned but not
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`plan`](Self::plan) before anything is changed,
    /// or a [`LinkError`](crate::error::LinkError) from the first mutation
    /// that cannot be applied.  Mutations applied before the failure stay in
    /// place.
    pub fn commit(
        &self,
        product: &str,
        version: &str,
        dry_run: bool,
    ) -> Result<CommitReport, DepotError> {
        let plan = match self.plan(product, version)? {
            Plan::AlreadyActive { version } => {
                self.log.warn(&format!("Already at version {version}"));
                return Ok(CommitReport {
                    outcome: CommitOutcome::AlreadyActive { version },
                    mutations: Vec::new(),
                    dry_run,
                });
            }
            Plan::Switch(plan) => plan,
        };

        let mutations = plan.mutations(self.depot);
        for (done, mutation) in mutations.iter().enumerate() {
            if let Mutation::CreateLink { link, target } = mutation {
                self.log
                    .debug(&format!("{} -> {}", link.display(), target.display()));
            }
            if dry_run {
                continue;
            }
            let change = mutation.apply().inspect_err(|_| {
                self.log.error(&format!(
                    "Stopped at `{mutation}` after {done} of {} changes; applied changes were kept",
                    mutations.len()
                ));
            })?;
            if change == ResourceChange::AlreadyCorrect {
                self.log.debug(&format!("already in place: {mutation}"));
            }
        }

        Ok(CommitReport {
            outcome: CommitOutcome::Committed {
                previous: plan.previous,
                added: plan.to_add.len(),
                removed: plan.to_remove.len(),
                unchanged: plan.unchanged,
            },
            mutations,
            dry_run,
        })
    }
}
