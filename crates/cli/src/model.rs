// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core data model: manifests, lock entries, and the on-disk cache layout.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in a [`Manifest`]: a relative, forward-slash path and its size.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: String,
    pub size: u64,
}

/// The sorted list of `(path, size)` pairs describing a materialization.
///
/// Entries are always kept sorted by path in lexicographic byte order;
/// [`Manifest::push`] and [`Manifest::finish`] maintain that invariant so
/// that serialization is deterministic and order-insensitive to insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Call [`Manifest::finish`] before reading or hashing.
    pub fn push(&mut self, path: String, size: u64) {
        self.entries.push(ManifestEntry { path, size });
    }

    /// Sort entries and make the manifest ready for serialization/hashing.
    pub fn finish(&mut self) {
        self.entries.sort();
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn file_count(&self) -> u64 {
        self.entries.len() as u64
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Canonical serialization: one JSON object per line, UTF-8, LF
    /// terminators, trailing newline. This exact byte sequence is both
    /// what gets written to `.manifest.jsonl` and what gets hashed for
    /// the [`crate::hash::manifest_hash`].
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for entry in &self.entries {
            // Entries are simple {path, size} pairs with no embedded
            // newlines or control characters once path validation has
            // run, so line-oriented JSON is safe and stable to reparse.
            let line = serde_json::to_string(entry).unwrap_or_default();
            out.extend_from_slice(line.as_bytes());
            out.push(b'\n');
        }
        out
    }

    /// Parse a manifest from its canonical JSONL serialization.
    pub fn parse(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let text = String::from_utf8_lossy(bytes);
        let mut entries = Vec::new();
        for line in text.lines() {
            if line.is_empty() {
                continue;
            }
            entries.push(serde_json::from_str::<ManifestEntry>(line)?);
        }
        entries.sort();
        Ok(Self { entries })
    }
}

/// The remote tip commit for a `(repo, ref)` pair, as resolved by the
/// planner (online) or recalled from the lock (offline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResolution {
    pub repo: String,
    pub git_ref: String,
    pub resolved_commit: String,
}

/// Sentinel `resolvedCommit` used in offline mode when the lock has no
/// prior entry to recall a commit from.
pub const OFFLINE_SENTINEL: &str = "offline";

/// Per-source status emitted by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Lock entry exists and both `resolvedCommit` and `rulesHash` match.
    UpToDate,
    /// Lock entry exists but `resolvedCommit` and/or `rulesHash` differ.
    Changed,
    /// No lock entry exists for this source.
    Missing,
}

/// One source's entry in the lock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEntry {
    pub repo: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(rename = "resolvedCommit")]
    pub resolved_commit: String,
    pub bytes: u64,
    #[serde(rename = "fileCount")]
    pub file_count: u64,
    #[serde(rename = "manifestSha256")]
    pub manifest_sha256: String,
    #[serde(rename = "rulesSha256")]
    pub rules_sha256: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Config file version this binary understands; bumped on breaking
/// lock-shape changes only.
pub const LOCK_VERSION: u32 = 1;

/// The lock file: `{ version, generatedAt, toolVersion, sources }`.
///
/// A `BTreeMap` keeps `sources` serialized in a deterministic key order so
/// that two runs with identical content produce byte-comparable JSON
/// modulo the timestamp fields (the idempotence law in the spec's
/// testable properties).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lock {
    pub version: u32,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "toolVersion")]
    pub tool_version: String,
    pub sources: BTreeMap<String, LockEntry>,
}

impl Lock {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            version: LOCK_VERSION,
            generated_at,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            sources: BTreeMap::new(),
        }
    }
}

/// On-disk layout of one project's cache root.
///
/// `<cacheRoot>/<id>/` holds the materialized source and its manifest.
/// `.tmp-<id>-<random>/` staging directories and `<id>.bak-<random>`
/// backups are transient and must never be observed by a cooperative
/// reader once a run returns.
#[derive(Debug, Clone)]
pub struct CacheLayout {
    root: PathBuf,
}

impl CacheLayout {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<cacheRoot>/<id>/` — the visible materialized directory.
    pub fn source_dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    /// `<cacheRoot>/<id>/.manifest.jsonl`
    pub fn manifest_path(&self, id: &str) -> PathBuf {
        self.source_dir(id).join(".manifest.jsonl")
    }

    /// `<cacheRoot>/<id>/TOC.md`
    pub fn toc_path(&self, id: &str) -> PathBuf {
        self.source_dir(id).join("TOC.md")
    }

    /// `<cacheRoot>/<id>.lock` — the swap-protocol exclusive lock file.
    pub fn swap_lock_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.lock"))
    }

    /// A fresh `<cacheRoot>/.tmp-<id>-<random>/` staging directory path.
    /// Does not create it — callers create it via [`std::fs::create_dir_all`].
    pub fn staging_dir(&self, id: &str) -> PathBuf {
        self.root.join(format!(".tmp-{id}-{}", crate::randsuffix::random_suffix()))
    }

    /// A fresh `<cacheRoot>/<id>.bak-<random>` backup path.
    pub fn backup_dir(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.bak-{}", crate::randsuffix::random_suffix()))
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
