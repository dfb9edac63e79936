// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Walk a working tree into a staged copy, enforce caps, and swap it into
//! the cache atomically.

use std::path::Path;
use std::time::Duration;

use crate::config::ResolvedSource;
use crate::error::{Error, Result};
use crate::hash::manifest_hash;
use crate::model::{CacheLayout, Manifest};
use crate::pattern::RuleSet;
use crate::swap;
use crate::walker;

/// Outcome of a successful materialization.
#[derive(Debug)]
pub struct MaterializeOutcome {
    pub bytes: u64,
    pub file_count: u64,
    pub manifest_sha256: String,
}

/// Walk `working_dir`, copy matching files into a fresh staging directory
/// under `layout`, and atomically swap it into place as `<id>/`.
///
/// The visible `<id>/` directory either ends up containing the new
/// materialization in full, or is left exactly as it was: a cap overrun
/// aborts before any swap is attempted.
pub fn materialize(
    id: &str,
    working_dir: &Path,
    source: &ResolvedSource,
    layout: &CacheLayout,
    lock_timeout: Duration,
) -> Result<MaterializeOutcome> {
    let rules = RuleSet::compile(&source.include, &source.exclude)?;
    let (rx, handle) = walker::walk(working_dir, rules, source.ignore_hidden);

    let mut manifest = Manifest::new();
    let mut bytes_total = 0u64;
    let mut roots: Vec<String> = Vec::new();
    let mut had_top_level_file = false;
    let mut cap_error = None;

    let staging = layout.staging_dir(id);
    std::fs::create_dir_all(&staging).map_err(|source| Error::Io { path: staging.clone(), source })?;

    for entry in rx.iter() {
        bytes_total += entry.size;
        manifest.push(entry.rel_path.clone(), entry.size);

        if manifest.file_count() > source.max_files {
            cap_error = Some(Error::CapExceeded {
                id: id.to_string(),
                which: "maxFiles",
                actual: manifest.file_count(),
                cap: source.max_files,
            });
            break;
        }
        if bytes_total > source.max_bytes {
            cap_error = Some(Error::CapExceeded {
                id: id.to_string(),
                which: "maxBytes",
                actual: bytes_total,
                cap: source.max_bytes,
            });
            break;
        }

        match entry.rel_path.split_once('/') {
            Some((top, _)) => roots.push(top.to_string()),
            None => had_top_level_file = true,
        }

        let dest = staging.join(&entry.rel_path);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|source| Error::Io { path: parent.to_path_buf(), source })?;
        }
        std::fs::copy(working_dir.join(&entry.rel_path), &dest)
            .map_err(|source| Error::Io { path: dest.clone(), source })?;
    }
    drop(rx);
    handle.join();

    if let Some(err) = cap_error {
        let _ = std::fs::remove_dir_all(&staging);
        return Err(err);
    }

    manifest.finish();

    let (staged_root, manifest) = if source.unwrap_single_root_dir {
        match unwrap_single_root(&staging, &roots, had_top_level_file)? {
            Some((rebased, prefix)) => (rebased, rebase_manifest(&manifest, &prefix)),
            None => (staging.clone(), manifest),
        }
    } else {
        (staging.clone(), manifest)
    };

    let manifest_path = staged_root.join(".manifest.jsonl");
    crate::atomic::write_atomic(&manifest_path, &manifest.canonical_bytes())
        .map_err(|source| Error::Io { path: manifest_path.clone(), source })?;

    let manifest_sha256 = manifest_hash(&manifest);

    swap::swap(layout, id, &staged_root, lock_timeout)?;

    // If unwrapping moved the staged root, the original (now-empty
    // wrapper) staging directory is orphaned; clean it up best-effort.
    if staged_root != staging {
        let _ = std::fs::remove_dir_all(&staging);
    }

    Ok(MaterializeOutcome {
        bytes: manifest.total_bytes(),
        file_count: manifest.file_count(),
        manifest_sha256,
    })
}

/// If the materialized set has exactly one top-level directory and no
/// top-level regular files, move that directory out and return its new
/// path plus the prefix (`"<dir>/"`) to strip from manifest entries.
/// Returns `None` when unwrapping doesn't apply (no-op per spec).
fn unwrap_single_root(
    staging: &Path,
    roots: &[String],
    had_top_level_file: bool,
) -> Result<Option<(std::path::PathBuf, String)>> {
    let Some(prefix) = single_root_prefix(roots, had_top_level_file) else {
        return Ok(None);
    };
    let only = prefix.trim_end_matches('/');
    let inner = staging.join(only);
    let rebased = staging.with_extension("unwrapped");
    std::fs::rename(&inner, &rebased).map_err(|source| Error::Io { path: inner.clone(), source })?;
    Ok(Some((rebased, prefix)))
}

/// The prefix (`"<dir>/"`) a single-root unwrap would strip, or `None`
/// when the candidate set doesn't have exactly one top-level directory
/// and no top-level regular files. Pure: touches no filesystem state, so
/// the Reuse Probe can apply the same rebase without materializing.
pub(crate) fn single_root_prefix(roots: &[String], had_top_level_file: bool) -> Option<String> {
    if had_top_level_file {
        return None;
    }
    let mut unique: Vec<&String> = roots.iter().collect();
    unique.sort();
    unique.dedup();
    match unique.as_slice() {
        [only] => Some(format!("{only}/")),
        _ => None,
    }
}

/// Strip `prefix` from every manifest entry's path, re-sorting the result.
pub(crate) fn rebase_manifest(manifest: &Manifest, prefix: &str) -> Manifest {
    let mut rebased = Manifest::new();
    for entry in manifest.entries() {
        let stripped = entry.path.strip_prefix(prefix).unwrap_or(&entry.path);
        rebased.push(stripped.to_string(), entry.size);
    }
    rebased.finish();
    rebased
}

#[cfg(test)]
#[path = "materializer_tests.rs"]
mod tests;
