// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Walk-and-hash-only pass that certifies an existing materialization is
//! already correct, without touching any file on disk.

use std::path::Path;

use crate::config::ResolvedSource;
use crate::error::Result;
use crate::hash::manifest_hash;
use crate::materializer::{rebase_manifest, single_root_prefix};
use crate::model::Manifest;
use crate::pattern::RuleSet;
use crate::walker;

/// Recomputed fingerprint of what a full materialization *would* produce.
pub struct ProbeResult {
    pub bytes: u64,
    pub file_count: u64,
    pub manifest_sha256: String,
}

/// Run the walk and hash a candidate working tree without copying files.
///
/// Applies the same `unwrapSingleRootDir` rebase the Materializer would
/// apply before hashing, so the result is comparable to a LockEntry's
/// `manifestSha256` for sources that unwrap.
pub fn probe(working_dir: &Path, source: &ResolvedSource) -> Result<ProbeResult> {
    let rules = RuleSet::compile(&source.include, &source.exclude)?;
    let (rx, handle) = walker::walk(working_dir, rules, source.ignore_hidden);

    let mut manifest = Manifest::new();
    let mut roots: Vec<String> = Vec::new();
    let mut had_top_level_file = false;
    for entry in rx.iter() {
        match entry.rel_path.split_once('/') {
            Some((top, _)) => roots.push(top.to_string()),
            None => had_top_level_file = true,
        }
        manifest.push(entry.rel_path, entry.size);
    }
    handle.join();
    manifest.finish();

    let manifest = if source.unwrap_single_root_dir {
        match single_root_prefix(&roots, had_top_level_file) {
            Some(prefix) => rebase_manifest(&manifest, &prefix),
            None => manifest,
        }
    } else {
        manifest
    };

    Ok(ProbeResult {
        bytes: manifest.total_bytes(),
        file_count: manifest.file_count(),
        manifest_sha256: manifest_hash(&manifest),
    })
}

/// Whether the Reuse Probe should even be attempted: an existing manifest
/// must be present and the rules must not have changed.
pub fn preconditions_met(manifest_path: &Path, lock_rules_sha256: &str, current_rules_sha256: &str) -> bool {
    manifest_path.is_file() && lock_rules_sha256 == current_rules_sha256
}

#[cfg(test)]
#[path = "reuse_probe_tests.rs"]
mod tests;
