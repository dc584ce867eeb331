#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the `status` command.
//!
//! These tests render the status table for depots in various states:
//! empty, partially committed, and with an ACTIVE pointer whose version
//! directory has been deleted.

mod common;

use common::DepotFixture;
use idepot::commands::status;
use idepot::error::{DepotError, NotFoundError};

#[test]
fn empty_depot_renders_nothing() {
    let fx = DepotFixture::new();
    assert_eq!(status::render(&fx.depot, None).unwrap(), "");
}

#[test]
fn lists_products_with_active_and_installed_versions() {
    let fx = DepotFixture::new();
    fx.install("tool", "1.0", &["bin/tool"])
        .install("tool", "2.0", &["bin/tool"])
        .install("other", "0.1", &["bin/other"]);
    fx.commit("tool", "2.0", false).unwrap();

    insta::assert_snapshot!(status::render(&fx.depot, None).unwrap().trim_end(), @r"
    other none [0.1]
    tool 2.0 [1.0, 2.0] 1 published
    ");
}

#[test]
fn single_product_filter() {
    let fx = DepotFixture::new();
    fx.install("tool", "1.0", &["bin/tool"])
        .install("other", "0.1", &["bin/other"]);
    fx.commit("tool", "1.0", false).unwrap();

    assert_eq!(
        status::render(&fx.depot, Some("tool")).unwrap(),
        "tool 1.0 [1.0] 1 published\n"
    );
}

#[test]
fn deleted_active_version_is_flagged() {
    let fx = DepotFixture::new();
    fx.install("tool", "1.0", &["bin/tool"])
        .install("tool", "2.0", &["bin/tool"]);
    fx.commit("tool", "1.0", false).unwrap();
    std::fs::remove_dir_all(fx.depot.version_dir("tool", "1.0")).unwrap();

    assert_eq!(
        status::render(&fx.depot, Some("tool")).unwrap(),
        "tool 1.0 (missing) [2.0]\n"
    );
}

#[test]
fn settings_file_is_not_a_product() {
    let fx = DepotFixture::new();
    fx.install("tool", "1.0", &["bin/tool"]);
    std::fs::write(fx.path("DEPOT/idepot.toml"), "static_dirs = [\"bin\"]\n").unwrap();

    assert_eq!(
        status::render(&fx.depot, None).unwrap(),
        "tool none [1.0]\n"
    );
}

#[test]
fn unknown_product_is_rejected() {
    let fx = DepotFixture::new();
    let err = status::render(&fx.depot, Some("ghost")).unwrap_err();
    assert!(matches!(
        err,
        DepotError::NotFound(NotFoundError::Product { .. })
    ));
}
