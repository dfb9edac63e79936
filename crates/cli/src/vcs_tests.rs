// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(unsafe_code)]

use super::*;

#[test]
fn ls_remote_short_circuits_on_full_commit_hash_without_invoking_git() {
    let vcs = GitVcs::new("definitely-not-a-real-git-binary".to_string());
    let hash = "a".repeat(40);
    let resolved = vcs.ls_remote("a", "https://h.example/r.git", &hash).unwrap();
    assert_eq!(resolved, hash);
}

#[test]
fn ls_remote_lowercases_commit_hash_input() {
    let vcs = GitVcs::new("definitely-not-a-real-git-binary".to_string());
    let hash = "A".repeat(40);
    let resolved = vcs.ls_remote("a", "https://h.example/r.git", &hash).unwrap();
    assert_eq!(resolved, hash.to_lowercase());
}

#[test]
fn is_full_commit_hash_rejects_short_or_non_hex() {
    assert!(!is_full_commit_hash("main"));
    assert!(!is_full_commit_hash(&"a".repeat(39)));
    assert!(!is_full_commit_hash(&"z".repeat(40)));
    assert!(is_full_commit_hash(&"0".repeat(40)));
}

#[test]
fn object_cache_path_is_stable_for_same_repo_url() {
    unsafe {
        std::env::set_var("XDG_CACHE_HOME", "/tmp/doccache-test-cache");
    }
    let a = object_cache_path("https://h.example/r.git");
    let b = object_cache_path("https://h.example/r.git");
    assert_eq!(a, b);
    let c = object_cache_path("https://h.example/other.git");
    assert_ne!(a, c);
    unsafe {
        std::env::remove_var("XDG_CACHE_HOME");
    }
}
