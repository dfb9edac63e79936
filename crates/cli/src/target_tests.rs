// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn copy_mode_projects_a_full_tree() {
    let source = tempfile::tempdir().unwrap();
    std::fs::write(source.path().join("a.md"), b"hi").unwrap();
    std::fs::create_dir_all(source.path().join("docs")).unwrap();
    std::fs::write(source.path().join("docs/b.md"), b"there").unwrap();

    let parent = tempfile::tempdir().unwrap();
    let target = parent.path().join("link");

    project("a", source.path(), &target, TargetMode::Copy).unwrap();

    assert_eq!(std::fs::read(target.join("a.md")).unwrap(), b"hi");
    assert_eq!(std::fs::read(target.join("docs/b.md")).unwrap(), b"there");
}

#[test]
fn symlink_mode_creates_a_link_to_the_source() {
    let source = tempfile::tempdir().unwrap();
    std::fs::write(source.path().join("a.md"), b"hi").unwrap();

    let parent = tempfile::tempdir().unwrap();
    let target = parent.path().join("link");

    project("a", source.path(), &target, TargetMode::Symlink).unwrap();

    assert!(std::fs::symlink_metadata(&target).unwrap().file_type().is_symlink());
    assert_eq!(std::fs::read(target.join("a.md")).unwrap(), b"hi");
}

#[test]
fn project_removes_prior_target_directory() {
    let source = tempfile::tempdir().unwrap();
    std::fs::write(source.path().join("new.md"), b"new").unwrap();

    let parent = tempfile::tempdir().unwrap();
    let target = parent.path().join("link");
    std::fs::create_dir_all(&target).unwrap();
    std::fs::write(target.join("old.md"), b"old").unwrap();

    project("a", source.path(), &target, TargetMode::Copy).unwrap();

    assert!(!target.join("old.md").exists());
    assert!(target.join("new.md").exists());
}

#[test]
fn projection_root_unwraps_single_non_metadata_subdirectory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("pkg")).unwrap();
    std::fs::write(dir.path().join(".manifest.jsonl"), b"").unwrap();
    std::fs::write(dir.path().join("TOC.md"), b"").unwrap();

    let root = projection_root(dir.path(), true).unwrap();
    assert_eq!(root, dir.path().join("pkg"));
}

#[test]
fn projection_root_is_noop_with_multiple_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("a")).unwrap();
    std::fs::create_dir_all(dir.path().join("b")).unwrap();

    let root = projection_root(dir.path(), true).unwrap();
    assert_eq!(root, dir.path());
}

#[test]
fn projection_root_is_noop_when_flag_unset() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("pkg")).unwrap();
    let root = projection_root(dir.path(), false).unwrap();
    assert_eq!(root, dir.path());
}
