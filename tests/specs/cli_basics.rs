//! Surface-level specs: help, version, and argument-parsing contracts.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

#[test]
fn bare_invocation_shows_help() {
    doccache_cmd().assert().success().stdout(predicates::str::contains("Usage:"));
}

#[test]
fn help_flag_exits_successfully() {
    doccache_cmd().arg("--help").assert().success().stdout(predicates::str::contains("doccache"));
}

#[test]
fn version_flag_exits_successfully() {
    doccache_cmd().arg("--version").assert().success().stdout(predicates::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_subcommand_fails_with_usage_error() {
    doccache_cmd().arg("bogus-command").assert().code(2);
}

#[test]
fn unknown_flag_fails_with_usage_error() {
    doccache_cmd().arg("--bogus-flag").assert().code(2);
}

#[test]
fn sync_help_lists_jobs_and_offline_flags() {
    doccache_cmd()
        .args(["sync", "--help"])
        .assert()
        .success()
        .stdout(predicates::str::contains("--jobs").and(predicates::str::contains("--offline")));
}
