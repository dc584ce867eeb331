//! Shared helpers for integration tests.
//!
//! Provides a temporary base directory with an empty `DEPOT` and a small
//! builder for installing product versions into it, so each test starts from
//! an isolated, well-formed depot.
//!
//! Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use idepot::cli::GlobalOpts;
use idepot::config::Settings;
use idepot::depot::{DEPOT_DIR, Depot};
use idepot::error::DepotError;
use idepot::logging::Logger;
use idepot::reconcile::{CommitReport, Reconciler};

/// Placeholder substituted for the temporary base directory in golden output.
pub const BASE_PLACEHOLDER: &str = "[BASE]";

/// An isolated base directory backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct DepotFixture {
    /// Temporary base directory; `DEPOT` lives directly beneath it.
    pub root: tempfile::TempDir,
    /// Depot opened over `root`.
    pub depot: Depot,
}

impl DepotFixture {
    /// Create a base directory with an empty depot and the default static
    /// directories.
    pub fn new() -> Self {
        Self::with_static_dirs(idepot::config::DEFAULT_STATIC_DIRS)
    }

    /// Create a base directory with an empty depot and the given static
    /// directories.
    pub fn with_static_dirs(static_dirs: &[&str]) -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join(DEPOT_DIR)).expect("create DEPOT");
        let depot = Depot::open(
            root.path(),
            Settings::with_static_dirs(static_dirs.iter().copied()),
        )
        .expect("open depot");
        Self { root, depot }
    }

    /// Path to the base directory.
    pub fn base(&self) -> &Path {
        self.root.path()
    }

    /// Global CLI options pointing at this base directory.
    pub fn global(&self) -> GlobalOpts {
        GlobalOpts {
            basedir: self.base().to_path_buf(),
            config: None,
        }
    }

    /// Install `version` of `product` containing the given files, each path
    /// relative to the version directory (e.g. `bin/foo`).
    pub fn install(&self, product: &str, version: &str, files: &[&str]) -> &Self {
        let vdir = self.depot.version_dir(product, version);
        std::fs::create_dir_all(&vdir).expect("create version dir");
        for file in files {
            let path = vdir.join(file);
            std::fs::create_dir_all(path.parent().expect("file has a parent"))
                .expect("create parent dir");
            std::fs::write(&path, format!("{product} {version} {file}\n")).expect("write file");
        }
        self
    }

    /// Run a commit through the library API.
    pub fn commit(
        &self,
        product: &str,
        version: &str,
        dry_run: bool,
    ) -> Result<CommitReport, DepotError> {
        let log = Logger::new("test");
        Reconciler::new(&self.depot, &log).commit(product, version, dry_run)
    }

    /// Path of `rel` under the base directory.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.base().join(rel)
    }

    /// Every symlink under the base directory outside `DEPOT`, as sorted
    /// `/`-separated paths relative to the base.
    pub fn top_level_links(&self) -> BTreeSet<String> {
        let mut links = BTreeSet::new();
        collect_links(self.base(), "", &mut links);
        links
    }

    /// Literal content of the symlink at `rel`.
    pub fn read_link(&self, rel: &str) -> PathBuf {
        std::fs::read_link(self.path(rel)).expect("read link")
    }

    /// Inode of the symlink itself (not its target) at `rel`.
    #[cfg(unix)]
    pub fn link_inode(&self, rel: &str) -> u64 {
        use std::os::unix::fs::MetadataExt;
        self.path(rel).symlink_metadata().expect("stat link").ino()
    }

    /// Replace the temporary base directory with [`BASE_PLACEHOLDER`].
    pub fn redact(&self, text: &str) -> String {
        text.replace(&self.base().display().to_string(), BASE_PLACEHOLDER)
    }
}

fn collect_links(dir: &Path, prefix: &str, links: &mut BTreeSet<String>) {
    for entry in std::fs::read_dir(dir).expect("read dir") {
        let entry = entry.expect("dir entry");
        let name = entry.file_name().to_string_lossy().into_owned();
        if prefix.is_empty() && name == DEPOT_DIR {
            continue;
        }
        let rel = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };
        let file_type = entry.file_type().expect("file type");
        if file_type.is_symlink() {
            links.insert(rel);
        } else if file_type.is_dir() {
            collect_links(&entry.path(), &rel, links);
        }
    }
}
