// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Working-tree walk: enumerate candidate files, apply include/exclude and
//! hidden-segment filtering, and never follow or materialize symlinks.

use std::path::Path;

use crossbeam_channel::{Receiver, bounded};
use ignore::{WalkBuilder, WalkState};

use crate::pattern::RuleSet;

/// One file surviving the walk's filters, with a repo-relative,
/// forward-slash-normalized path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedEntry {
    pub rel_path: String,
    pub size: u64,
}

/// Handle to a background walk; dropping the receiver before it's drained
/// signals the walker to stop early (used when a cap is exceeded).
pub struct WalkHandle {
    thread: std::thread::JoinHandle<()>,
}

impl WalkHandle {
    pub fn join(self) {
        let _ = self.thread.join();
    }
}

/// Stream [`WalkedEntry`] values for files under `root` matching `rules`.
///
/// `.git` is always pruned. When `ignore_hidden` is set, any path segment
/// beginning with `.` prunes its subtree (the `ignore` crate's `hidden`
/// filter naturally cascades since pruned directories are never entered).
/// Symlinks are never followed and never yielded: each candidate is
/// re-checked with `symlink_metadata`, and anything but a regular file is
/// skipped.
pub fn walk(root: &Path, rules: RuleSet, ignore_hidden: bool) -> (Receiver<WalkedEntry>, WalkHandle) {
    let (tx, rx) = bounded(256);
    let root = root.to_path_buf();

    let thread = std::thread::spawn(move || {
        let mut builder = WalkBuilder::new(&root);
        builder
            .hidden(ignore_hidden)
            .git_ignore(false)
            .git_exclude(false)
            .git_global(false)
            .parents(false)
            .follow_links(false);
        builder.filter_entry(|entry| entry.file_name() != ".git");

        let walker = builder.build_parallel();
        walker.run(|| {
            let tx = tx.clone();
            let root = root.clone();
            let rules = &rules;
            Box::new(move |entry| {
                let Ok(entry) = entry else {
                    return WalkState::Continue;
                };
                let Ok(file_type) = entry.metadata().map(|m| m.file_type()) else {
                    return WalkState::Continue;
                };
                if !file_type.is_file() {
                    return WalkState::Continue;
                }
                let Ok(meta) = std::fs::symlink_metadata(entry.path()) else {
                    return WalkState::Continue;
                };
                if !meta.file_type().is_file() {
                    return WalkState::Continue;
                }
                let Ok(rel) = entry.path().strip_prefix(&root) else {
                    return WalkState::Continue;
                };
                let rel_path = normalize_to_forward_slash(rel);
                if !rules.matches(&rel_path) {
                    return WalkState::Continue;
                }
                let entry = WalkedEntry { rel_path, size: meta.len() };
                if tx.send(entry).is_err() { WalkState::Quit } else { WalkState::Continue }
            })
        });
    });

    (rx, WalkHandle { thread })
}

fn normalize_to_forward_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
