// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Target Projector: expose a materialized source at an external path.

use std::path::{Path, PathBuf};

use crate::config::TargetMode;
use crate::error::{Error, Result};

/// Project `source_dir` at `target`, replacing any prior target.
///
/// `symlink` falls back to `copy` (with a warning) when the platform
/// denies symlink creation for a reason unrelated to a real conflict:
/// permission denied, not supported, or an invalid argument.
pub fn project(id: &str, source_dir: &Path, target: &Path, mode: TargetMode) -> Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|source| Error::Io { path: parent.to_path_buf(), source })?;
    }
    remove_existing_target(target)?;

    match mode {
        TargetMode::Symlink => match make_symlink(source_dir, target) {
            Ok(()) => Ok(()),
            Err(e) if is_symlink_fallback_error(&e) => {
                tracing::warn!(id, target = %target.display(), error = %e, "symlink denied, falling back to copy");
                copy_tree(source_dir, target)
            }
            Err(e) => Err(Error::Io { path: target.to_path_buf(), source: e }),
        },
        TargetMode::Copy => copy_tree(source_dir, target),
    }
}

/// The effective projection root: `source_dir` itself, or its single
/// non-metadata subdirectory when `unwrap_single_root_dir` is in force.
pub fn projection_root(source_dir: &Path, unwrap_single_root_dir: bool) -> Result<PathBuf> {
    if !unwrap_single_root_dir {
        return Ok(source_dir.to_path_buf());
    }
    let mut subdirs = Vec::new();
    let mut has_top_level_file = false;
    let entries = std::fs::read_dir(source_dir).map_err(|source| Error::Io { path: source_dir.to_path_buf(), source })?;
    for entry in entries {
        let entry = entry.map_err(|source| Error::Io { path: source_dir.to_path_buf(), source })?;
        let name = entry.file_name();
        if is_metadata_entry(&name) {
            continue;
        }
        let file_type = entry.file_type().map_err(|source| Error::Io { path: entry.path(), source })?;
        if file_type.is_dir() {
            subdirs.push(entry.path());
        } else {
            has_top_level_file = true;
        }
    }
    if !has_top_level_file && subdirs.len() == 1 {
        Ok(subdirs.remove(0))
    } else {
        Ok(source_dir.to_path_buf())
    }
}

fn is_metadata_entry(name: &std::ffi::OsStr) -> bool {
    name == ".manifest.jsonl" || name == "TOC.md"
}

fn remove_existing_target(target: &Path) -> Result<()> {
    match std::fs::symlink_metadata(target) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(target),
        Ok(_) => std::fs::remove_file(target),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
    .map_err(|source| Error::Io { path: target.to_path_buf(), source })
}

#[cfg(unix)]
fn make_symlink(source_dir: &Path, target: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source_dir, target)
}

#[cfg(windows)]
fn make_symlink(source_dir: &Path, target: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(source_dir, target)
}

fn is_symlink_fallback_error(e: &std::io::Error) -> bool {
    use std::io::ErrorKind;
    matches!(e.kind(), ErrorKind::PermissionDenied | ErrorKind::Unsupported | ErrorKind::InvalidInput)
}

#[allow(clippy::expect_used)]
fn copy_tree(source_dir: &Path, target: &Path) -> Result<()> {
    std::fs::create_dir_all(target).map_err(|source| Error::Io { path: target.to_path_buf(), source })?;
    for entry in walkdir_flat(source_dir)? {
        let rel = entry.strip_prefix(source_dir).expect("entry is under source_dir");
        let dest = target.join(rel);
        if entry.is_dir() {
            std::fs::create_dir_all(&dest).map_err(|source| Error::Io { path: dest.clone(), source })?;
        } else {
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent).map_err(|source| Error::Io { path: parent.to_path_buf(), source })?;
            }
            std::fs::copy(&entry, &dest).map_err(|source| Error::Io { path: dest.clone(), source })?;
        }
    }
    Ok(())
}

/// A plain recursive listing (no include/exclude, no symlink-following) of
/// every path under `root`, used only for copy-mode target projection.
fn walkdir_flat(root: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|source| Error::Io { path: dir.clone(), source })?;
        for entry in entries {
            let entry = entry.map_err(|source| Error::Io { path: dir.clone(), source })?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|source| Error::Io { path: path.clone(), source })?;
            if file_type.is_dir() {
                stack.push(path.clone());
            }
            out.push(path);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
