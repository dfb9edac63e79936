// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn entry(commit: &str) -> LockEntry {
    LockEntry {
        repo: "https://h.example/r.git".into(),
        git_ref: "main".into(),
        resolved_commit: commit.into(),
        bytes: 10,
        file_count: 1,
        manifest_sha256: "deadbeef".into(),
        rules_sha256: "feedface".into(),
        updated_at: Utc::now(),
    }
}

#[test]
fn load_returns_empty_lock_when_file_absent() {
    let dir = tempfile::tempdir().unwrap();
    let lock = load(&dir.path().join("docs.lock")).unwrap();
    assert!(lock.sources.is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docs.lock");
    let mut lock = Lock::new(Utc::now());
    lock.sources.insert("a".into(), entry("c1"));
    save(&path, &lock).unwrap();

    let reloaded = load(&path).unwrap();
    assert_eq!(reloaded.sources.len(), 1);
    assert_eq!(reloaded.sources["a"].resolved_commit, "c1");
}

#[test]
fn merge_preserves_untouched_sources() {
    let mut prior = Lock::new(Utc::now());
    prior.sources.insert("a".into(), entry("c1"));
    prior.sources.insert("b".into(), entry("c2"));

    let merged = merge(&prior, [("a".to_string(), entry("c1-new"))], Utc::now());
    assert_eq!(merged.sources["a"].resolved_commit, "c1-new");
    assert_eq!(merged.sources["b"].resolved_commit, "c2");
}

#[test]
fn without_removes_only_the_named_source() {
    let mut prior = Lock::new(Utc::now());
    prior.sources.insert("a".into(), entry("c1"));
    prior.sources.insert("b".into(), entry("c2"));

    let updated = without(&prior, "a");
    assert!(!updated.sources.contains_key("a"));
    assert!(updated.sources.contains_key("b"));
}
