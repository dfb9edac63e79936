//! Specs for `init`, `add`, and `remove`: the config-mutating commands.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

#[test]
fn init_writes_a_starter_config() {
    let dir = tempfile::tempdir().unwrap();

    doccache_cmd().arg("init").current_dir(dir.path()).assert().success();

    let config = std::fs::read_to_string(dir.path().join("docs.json")).unwrap();
    assert!(config.contains("\"sources\""));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("docs.json"), "{\"sources\":[]}").unwrap();

    doccache_cmd().arg("init").current_dir(dir.path()).assert().failure().code(1);

    doccache_cmd().args(["init", "--force"]).current_dir(dir.path()).assert().success();
}

#[test]
fn add_then_remove_round_trips_the_config() {
    let dir = tempfile::tempdir().unwrap();
    doccache_cmd().arg("init").current_dir(dir.path()).assert().success();

    doccache_cmd()
        .args(["add", "docs", "https://h.example/docs.git", "--ref", "main"])
        .current_dir(dir.path())
        .assert()
        .success();

    let config = std::fs::read_to_string(dir.path().join("docs.json")).unwrap();
    assert!(config.contains("\"docs\""));
    assert!(config.contains("h.example/docs.git"));

    doccache_cmd().args(["remove", "docs"]).current_dir(dir.path()).assert().success();

    let config = std::fs::read_to_string(dir.path().join("docs.json")).unwrap();
    assert!(!config.contains("\"docs\""));
}

#[test]
fn add_rejects_a_second_source_with_the_same_id() {
    let dir = tempfile::tempdir().unwrap();
    doccache_cmd().arg("init").current_dir(dir.path()).assert().success();
    doccache_cmd()
        .args(["add", "docs", "https://h.example/docs.git"])
        .current_dir(dir.path())
        .assert()
        .success();

    doccache_cmd()
        .args(["add", "docs", "https://h.example/other.git"])
        .current_dir(dir.path())
        .assert()
        .failure();
}

#[test]
fn add_rejects_an_unsafe_repo_url() {
    let dir = tempfile::tempdir().unwrap();
    doccache_cmd().arg("init").current_dir(dir.path()).assert().success();

    doccache_cmd()
        .args(["add", "docs", "https://h.example/r.git;rm -rf /"])
        .current_dir(dir.path())
        .assert()
        .failure();
}

#[test]
fn remove_of_unknown_id_fails() {
    let dir = tempfile::tempdir().unwrap();
    doccache_cmd().arg("init").current_dir(dir.path()).assert().success();

    doccache_cmd().args(["remove", "nope"]).current_dir(dir.path()).assert().failure().code(9);
}
