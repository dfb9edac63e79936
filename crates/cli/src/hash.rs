// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Content-addressed digests used for reuse detection and change tracking.

use sha2::{Digest, Sha256};

use crate::config::ResolvedSource;
use crate::model::Manifest;

/// `manifestSha256`: a 256-bit digest over a [`Manifest`]'s canonical bytes.
///
/// Two materializations with identical file sets and sizes hash identically
/// regardless of fetch order, which is what lets the reuse probe short
/// circuit a ref update that didn't actually touch any tracked file.
pub fn manifest_hash(manifest: &Manifest) -> String {
    let mut hasher = Sha256::new();
    hasher.update(manifest.canonical_bytes());
    hex(hasher.finalize().as_slice())
}

/// Fields of a [`ResolvedSource`] that participate in `rulesHash`.
///
/// `id`, `repo`, `ref`, `targetDir`, `targetMode`, and `required` are
/// deliberately excluded: they identify or route a source but don't shape
/// *what content* gets materialized, so changing them alone must not look
/// like a rules change to the planner.
#[derive(serde::Serialize)]
struct RulesFingerprint<'a> {
    /// Reserved tag for the content-shaping rule set's format; fixed today
    /// but keeps the hash forward-compatible with a future second mode.
    mode: &'static str,
    include: &'a [String],
    exclude: &'a [String],
    #[serde(rename = "maxBytes")]
    max_bytes: u64,
    #[serde(rename = "maxFiles")]
    max_files: u64,
    #[serde(rename = "ignoreHidden")]
    ignore_hidden: bool,
    #[serde(rename = "unwrapSingleRootDir")]
    unwrap_single_root_dir: bool,
}

/// `rulesHash`: a 256-bit digest over the content-shaping subset of a
/// resolved source's configuration.
pub fn rules_hash(source: &ResolvedSource) -> String {
    let fingerprint = RulesFingerprint {
        mode: "content",
        include: &source.include,
        exclude: &source.exclude,
        max_bytes: source.max_bytes,
        max_files: source.max_files,
        ignore_hidden: source.ignore_hidden,
        unwrap_single_root_dir: source.unwrap_single_root_dir,
    };
    // Field order above is fixed by struct declaration, which with
    // serde_json's default (non-map) struct serialization gives a
    // stable byte sequence independent of config file key order.
    let bytes = serde_json::to_vec(&fingerprint).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex(hasher.finalize().as_slice())
}

fn hex(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

#[cfg(test)]
#[path = "hash_tests.rs"]
mod tests;
