// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn prune_removes_staging_and_backup_directories_only() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join(".tmp-a-xyz12345")).unwrap();
    std::fs::create_dir_all(dir.path().join("a.bak-abcd1234")).unwrap();
    std::fs::create_dir_all(dir.path().join("a")).unwrap();

    let report = prune(dir.path(), false).unwrap();

    assert_eq!(report.removed.len(), 2);
    assert!(!dir.path().join(".tmp-a-xyz12345").exists());
    assert!(!dir.path().join("a.bak-abcd1234").exists());
    assert!(dir.path().join("a").exists());
}

#[test]
fn prune_dry_run_reports_without_removing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join(".tmp-a-xyz12345")).unwrap();

    let report = prune(dir.path(), true).unwrap();

    assert_eq!(report.removed.len(), 1);
    assert!(dir.path().join(".tmp-a-xyz12345").exists());
}

#[test]
fn prune_on_missing_cache_root_reports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let report = prune(&dir.path().join("absent"), false).unwrap();
    assert!(report.removed.is_empty());
}

#[test]
fn clean_one_source_removes_its_dir_and_lock_entry() {
    let dir = tempfile::tempdir().unwrap();
    let layout = CacheLayout::new(dir.path().to_path_buf());
    std::fs::create_dir_all(layout.source_dir("a")).unwrap();
    std::fs::create_dir_all(layout.source_dir("b")).unwrap();

    let mut lock = Lock::new(chrono::Utc::now());
    lock.sources.insert("a".into(), sample_entry());
    lock.sources.insert("b".into(), sample_entry());

    let updated = clean(&layout, &lock, Some("a")).unwrap();

    assert!(!layout.source_dir("a").exists());
    assert!(layout.source_dir("b").exists());
    assert!(!updated.sources.contains_key("a"));
    assert!(updated.sources.contains_key("b"));
}

#[test]
fn clean_all_removes_every_source() {
    let dir = tempfile::tempdir().unwrap();
    let layout = CacheLayout::new(dir.path().to_path_buf());
    std::fs::create_dir_all(layout.source_dir("a")).unwrap();

    let mut lock = Lock::new(chrono::Utc::now());
    lock.sources.insert("a".into(), sample_entry());

    let updated = clean(&layout, &lock, None).unwrap();

    assert!(!layout.source_dir("a").exists());
    assert!(updated.sources.is_empty());
}

fn sample_entry() -> crate::model::LockEntry {
    crate::model::LockEntry {
        repo: "https://h.example/r.git".into(),
        git_ref: "main".into(),
        resolved_commit: "c1".into(),
        bytes: 1,
        file_count: 1,
        manifest_sha256: "x".into(),
        rules_sha256: "y".into(),
        updated_at: chrono::Utc::now(),
    }
}
