// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only cache verification: every manifest entry must exist on disk
//! with the recorded size.

use crate::model::{CacheLayout, Manifest};

/// One verification problem for a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ManifestUnreadable { cause: String },
    EntryMissing { path: String },
    SizeMismatch { path: String, expected: u64, found: u64 },
}

/// Verify one source's materialized directory against its manifest.
/// Read-only: never writes, renames, or removes anything.
pub fn verify(layout: &CacheLayout, id: &str) -> Vec<Issue> {
    let manifest_path = layout.manifest_path(id);
    let bytes = match std::fs::read(&manifest_path) {
        Ok(bytes) => bytes,
        Err(e) => return vec![Issue::ManifestUnreadable { cause: e.to_string() }],
    };
    let manifest = match Manifest::parse(&bytes) {
        Ok(m) => m,
        Err(e) => return vec![Issue::ManifestUnreadable { cause: e.to_string() }],
    };

    let source_dir = layout.source_dir(id);
    let mut issues = Vec::new();
    for entry in manifest.entries() {
        let path = source_dir.join(&entry.path);
        match std::fs::metadata(&path) {
            Ok(meta) if meta.len() == entry.size => {}
            Ok(meta) => issues.push(Issue::SizeMismatch {
                path: entry.path.clone(),
                expected: entry.size,
                found: meta.len(),
            }),
            Err(_) => issues.push(Issue::EntryMissing { path: entry.path.clone() }),
        }
    }
    issues
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
