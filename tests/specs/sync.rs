//! Specs for `sync`, `status`, and `verify`: the commands that read or
//! write the lock and cache. These avoid real network access by only
//! exercising paths that resolve purely from local config/lock/cache
//! state — see DESIGN.md for why the ref-update and rules-update
//! scenarios live at the coordinator unit-test level instead.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

#[test]
fn sync_with_fail_on_miss_aborts_before_any_network_access_when_required_source_has_no_lock_entry() {
    let dir = tempfile::tempdir().unwrap();
    doccache_cmd().arg("init").current_dir(dir.path()).assert().success();
    doccache_cmd()
        .args(["add", "docs", "https://h.example/docs.git", "--required"])
        .current_dir(dir.path())
        .assert()
        .success();

    // No lock entry and nothing materialized under .docs/docs, so the
    // required-source check fails before the planner ever resolves a ref.
    doccache_cmd().args(["sync", "--fail-on-miss"]).current_dir(dir.path()).assert().failure().code(1);

    assert!(!dir.path().join(".docs").exists());
}

#[test]
fn status_reports_not_synced_for_a_configured_source_with_no_lock_entry() {
    let dir = tempfile::tempdir().unwrap();
    doccache_cmd().arg("init").current_dir(dir.path()).assert().success();
    doccache_cmd()
        .args(["add", "docs", "https://h.example/docs.git"])
        .current_dir(dir.path())
        .assert()
        .success();

    doccache_cmd()
        .arg("status")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("docs: not synced"));
}

#[test]
fn status_filters_by_id_and_ignores_unconfigured_sources() {
    let dir = tempfile::tempdir().unwrap();
    doccache_cmd().arg("init").current_dir(dir.path()).assert().success();
    doccache_cmd().args(["add", "a", "https://h.example/a.git"]).current_dir(dir.path()).assert().success();
    doccache_cmd().args(["add", "b", "https://h.example/b.git"]).current_dir(dir.path()).assert().success();

    doccache_cmd()
        .args(["status", "a"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("a: not synced").and(predicates::str::contains("b: not synced").not()));
}

#[test]
fn verify_reports_ok_when_a_source_has_no_materialized_cache_entry() {
    let dir = tempfile::tempdir().unwrap();
    doccache_cmd().arg("init").current_dir(dir.path()).assert().success();
    doccache_cmd()
        .args(["add", "docs", "https://h.example/docs.git"])
        .current_dir(dir.path())
        .assert()
        .success();

    // No `.docs/docs` directory exists yet; verifying an unmaterialized
    // source reports no issues rather than erroring.
    doccache_cmd()
        .arg("verify")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("docs: ok"));
}

#[test]
fn verify_flags_a_manifest_entry_whose_file_was_deleted_after_materialization() {
    let dir = tempfile::tempdir().unwrap();
    doccache_cmd().arg("init").current_dir(dir.path()).assert().success();
    doccache_cmd()
        .args(["add", "docs", "https://h.example/docs.git"])
        .current_dir(dir.path())
        .assert()
        .success();

    let source_dir = dir.path().join(".docs/docs");
    std::fs::create_dir_all(&source_dir).unwrap();
    std::fs::write(source_dir.join(".manifest.jsonl"), "{\"path\":\"README.md\",\"size\":5}\n").unwrap();

    doccache_cmd().arg("verify").current_dir(dir.path()).assert().failure().code(1);
}
