//! Version management for software installed under a shared prefix.
//!
//! Every version of a product lives in its own tree under
//! `<base>/DEPOT/<product>/<version>/`.  Committing a version makes the
//! product's `ACTIVE` symlink point at it and keeps a farm of top-level links
//! (`<base>/bin/foo`, `<base>/man/man1/foo.1`, ...) routed through `ACTIVE`,
//! so switching versions only adds and removes the links whose set changed.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: static directory settings, loaded from TOML
//! - **[`depot`]**: read-only view of the depot layout
//! - **[`resources`]**: idempotent `check + apply` primitives for links and the pointer
//! - **[`reconcile`]**: the commit algorithm (plan, then apply in order)
//! - **[`commands`]**: top-level subcommand orchestration (`commit`, `status`, ...)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod depot;
pub mod error;
pub mod logging;
pub mod reconcile;
pub mod resources;
