// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use super::*;
use crate::config::TargetMode;

fn write_file(root: &Path, rel: &str, contents: &[u8]) {
    let full = root.join(rel);
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(full, contents).unwrap();
}

fn source(include: Vec<&str>, exclude: Vec<&str>, max_bytes: u64, max_files: u64, unwrap: bool) -> ResolvedSource {
    ResolvedSource {
        id: "a".into(),
        repo: "https://h.example/r.git".into(),
        git_ref: "main".into(),
        include: include.into_iter().map(String::from).collect(),
        exclude: exclude.into_iter().map(String::from).collect(),
        max_bytes,
        max_files,
        ignore_hidden: true,
        unwrap_single_root_dir: unwrap,
        target_dir: None,
        target_mode: TargetMode::Symlink,
        required: false,
    }
}

#[test]
fn materializes_matching_files_and_writes_manifest() {
    let working = tempfile::tempdir().unwrap();
    write_file(working.path(), "README.md", b"hello");
    write_file(working.path(), "docs/guide.md", b"world");

    let cache = tempfile::tempdir().unwrap();
    let layout = CacheLayout::new(cache.path().to_path_buf());
    let src = source(vec!["**/*"], vec![], 1_000, 100, false);

    let outcome = materialize("a", working.path(), &src, &layout, Duration::from_secs(1)).unwrap();
    assert_eq!(outcome.bytes, 10);
    assert_eq!(outcome.file_count, 2);

    let manifest_path = layout.manifest_path("a");
    let manifest = Manifest::parse(&std::fs::read(manifest_path).unwrap()).unwrap();
    assert_eq!(manifest.entries().len(), 2);
}

#[test]
fn cap_exceeded_leaves_prior_target_untouched() {
    let working = tempfile::tempdir().unwrap();
    write_file(working.path(), "a.md", b"12345");
    write_file(working.path(), "b.md", b"12345");

    let cache = tempfile::tempdir().unwrap();
    let layout = CacheLayout::new(cache.path().to_path_buf());
    std::fs::create_dir_all(layout.source_dir("a")).unwrap();
    std::fs::write(layout.source_dir("a").join("prior.md"), b"prior").unwrap();

    let src = source(vec!["**/*"], vec![], 1_000, 1, false);
    let err = materialize("a", working.path(), &src, &layout, Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, Error::CapExceeded { .. }));
    assert!(layout.source_dir("a").join("prior.md").exists());
}

#[test]
fn unwrap_single_root_dir_rebases_paths() {
    let working = tempfile::tempdir().unwrap();
    write_file(working.path(), "pkg/README.md", b"hi");
    write_file(working.path(), "pkg/docs/guide.md", b"there");

    let cache = tempfile::tempdir().unwrap();
    let layout = CacheLayout::new(cache.path().to_path_buf());
    let src = source(vec!["**/*"], vec![], 1_000, 100, true);

    materialize("a", working.path(), &src, &layout, Duration::from_secs(1)).unwrap();

    assert!(layout.source_dir("a").join("README.md").exists());
    assert!(layout.source_dir("a").join("docs/guide.md").exists());
    assert!(!layout.source_dir("a").join("pkg").exists());
}

#[test]
fn unwrap_is_noop_with_two_top_level_directories() {
    let working = tempfile::tempdir().unwrap();
    write_file(working.path(), "a/one.md", b"1");
    write_file(working.path(), "b/two.md", b"2");

    let cache = tempfile::tempdir().unwrap();
    let layout = CacheLayout::new(cache.path().to_path_buf());
    let src = source(vec!["**/*"], vec![], 1_000, 100, true);

    materialize("a", working.path(), &src, &layout, Duration::from_secs(1)).unwrap();

    assert!(layout.source_dir("a").join("a/one.md").exists());
    assert!(layout.source_dir("a").join("b/two.md").exists());
}

#[test]
fn exclude_pattern_removes_matching_files() {
    let working = tempfile::tempdir().unwrap();
    write_file(working.path(), "README.md", b"hello");
    write_file(working.path(), "docs/internal.md", b"secret");

    let cache = tempfile::tempdir().unwrap();
    let layout = CacheLayout::new(cache.path().to_path_buf());
    let src = source(vec!["**/*"], vec!["docs/**"], 1_000, 100, false);

    let outcome = materialize("a", working.path(), &src, &layout, Duration::from_secs(1)).unwrap();
    assert_eq!(outcome.file_count, 1);
    assert!(layout.source_dir("a").join("README.md").exists());
    assert!(!layout.source_dir("a").join("docs").exists());
}
