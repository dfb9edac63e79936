//! Specs for `prune` and `clean`: cache-root maintenance outside the engine.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

fn write_config(dir: &std::path::Path, cache_dir: &str, sources: &str) {
    let config = format!("{{\"cacheDir\":{cache_dir:?},\"sources\":[{sources}]}}");
    std::fs::write(dir.join("docs.json"), config).unwrap();
}

fn write_lock(dir: &std::path::Path, entries: &str) {
    let lock = format!(
        "{{\"version\":1,\"generatedAt\":\"2026-01-01T00:00:00Z\",\"toolVersion\":\"0.1.0\",\"sources\":{{{entries}}}}}"
    );
    std::fs::write(dir.join("docs.lock"), lock).unwrap();
}

fn lock_entry(repo: &str) -> String {
    format!(
        "{{\"repo\":{repo:?},\"ref\":\"main\",\"resolvedCommit\":\"c1\",\"bytes\":1,\"fileCount\":1,\
         \"manifestSha256\":\"x\",\"rulesSha256\":\"y\",\"updatedAt\":\"2026-01-01T00:00:00Z\"}}"
    )
}

#[test]
fn prune_dry_run_reports_without_removing() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), ".docs", "");
    std::fs::create_dir_all(dir.path().join(".docs/.tmp-a-xyz12345")).unwrap();

    doccache_cmd()
        .args(["prune", "--dry-run"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("would remove"));

    assert!(dir.path().join(".docs/.tmp-a-xyz12345").exists());
}

#[test]
fn prune_removes_staging_directories() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), ".docs", "");
    std::fs::create_dir_all(dir.path().join(".docs/.tmp-a-xyz12345")).unwrap();
    std::fs::create_dir_all(dir.path().join(".docs/a")).unwrap();

    doccache_cmd().arg("prune").current_dir(dir.path()).assert().success();

    assert!(!dir.path().join(".docs/.tmp-a-xyz12345").exists());
    assert!(dir.path().join(".docs/a").exists());
}

#[test]
fn clean_one_source_drops_its_directory_and_lock_entry() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("docs.json"),
        r#"{"cacheDir":".docs","sources":[{"id":"a","repo":"https://h.example/r.git","ref":"main"}]}"#,
    )
    .unwrap();
    write_lock(dir.path(), &format!("\"a\":{}", lock_entry("https://h.example/r.git")));
    std::fs::create_dir_all(dir.path().join(".docs/a")).unwrap();

    doccache_cmd().args(["clean", "a"]).current_dir(dir.path()).assert().success();

    assert!(!dir.path().join(".docs/a").exists());
    let lock = std::fs::read_to_string(dir.path().join("docs.lock")).unwrap();
    assert!(!lock.contains("\"a\":"));
}
