// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cache-root housekeeping: reaping leftover staging/backup directories
//! and deleting a source's cache outright. Neither operation is part of
//! the sync engine itself.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{CacheLayout, Lock};

/// What a prune pass found or removed.
pub struct PruneReport {
    pub removed: Vec<PathBuf>,
}

/// Sweep `cache_root` for `.tmp-*` staging directories and `*.bak-*`
/// backups. With `dry_run`, only reports what would be removed.
pub fn prune(cache_root: &Path, dry_run: bool) -> Result<PruneReport> {
    let mut removed = Vec::new();
    let entries = match std::fs::read_dir(cache_root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(PruneReport { removed }),
        Err(source) => return Err(Error::Io { path: cache_root.to_path_buf(), source }),
    };
    for entry in entries {
        let entry = entry.map_err(|source| Error::Io { path: cache_root.to_path_buf(), source })?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !is_stale(&name) {
            continue;
        }
        let path = entry.path();
        if !dry_run {
            std::fs::remove_dir_all(&path).map_err(|source| Error::Io { path: path.clone(), source })?;
        }
        removed.push(path);
    }
    Ok(PruneReport { removed })
}

fn is_stale(name: &str) -> bool {
    name.starts_with(".tmp-") || name.contains(".bak-")
}

/// Remove a source's materialized directory and lock entry, or every
/// source's when `id` is `None`.
pub fn clean(layout: &CacheLayout, lock: &Lock, id: Option<&str>) -> Result<Lock> {
    let mut updated = lock.clone();
    match id {
        Some(id) => {
            remove_source_dir(layout, id)?;
            updated.sources.remove(id);
        }
        None => {
            for existing_id in lock.sources.keys().cloned().collect::<Vec<_>>() {
                remove_source_dir(layout, &existing_id)?;
            }
            updated.sources.clear();
        }
    }
    Ok(updated)
}

fn remove_source_dir(layout: &CacheLayout, id: &str) -> Result<()> {
    let dir = layout.source_dir(id);
    match std::fs::remove_dir_all(&dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Error::Io { path: dir, source }),
    }
}

#[cfg(test)]
#[path = "housekeeping_tests.rs"]
mod tests;
