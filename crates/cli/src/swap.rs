// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The atomic cache-replacement protocol (spec for a rename-based swap).

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::{Duration, Instant};

use fs4::fs_std::FileExt;

use crate::error::{Error, Result};
use crate::model::CacheLayout;

const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// Move staging directory `staging` into place at `<cacheRoot>/<id>/`,
/// replacing any prior contents.
///
/// 1. Acquire an exclusive lock on `<id>.lock` (bounded retry).
/// 2. If the target exists, rename it to a randomly-suffixed backup.
/// 3. Rename staging over the target; on failure, restore the backup.
/// 4. Best-effort remove the backup.
/// 5. Release the lock.
///
/// On any failure before step 3 completes, `<cacheRoot>/<id>/` is left
/// byte-identical to its pre-swap state.
pub fn swap(layout: &CacheLayout, id: &str, staging: &Path, lock_timeout: Duration) -> Result<()> {
    let lock_path = layout.swap_lock_path(id);
    let lock_file = acquire_lock(id, &lock_path, lock_timeout)?;

    let target = layout.source_dir(id);
    let backup = target.exists().then(|| layout.backup_dir(id));

    if let Some(backup) = &backup {
        std::fs::rename(&target, backup).map_err(|source| Error::Io {
            path: target.clone(),
            source,
        })?;
    }

    if let Err(rename_err) = std::fs::rename(staging, &target) {
        if let Some(backup) = &backup {
            // Best-effort restoration; if this also fails the target is
            // left absent rather than silently wrong, and both errors
            // are surfaced via the SwapFailed cause.
            if let Err(restore_err) = std::fs::rename(backup, &target) {
                let _ = FileExt::unlock(&lock_file);
                return Err(Error::SwapFailed {
                    id: id.to_string(),
                    cause: format!("rename failed ({rename_err}); restore also failed ({restore_err})"),
                });
            }
        }
        let _ = FileExt::unlock(&lock_file);
        return Err(Error::SwapFailed {
            id: id.to_string(),
            cause: rename_err.to_string(),
        });
    }

    if let Some(backup) = &backup
        && let Err(e) = std::fs::remove_dir_all(backup)
    {
        tracing::warn!(id, backup = %backup.display(), error = %e, "best-effort backup cleanup failed");
    }

    let _ = FileExt::unlock(&lock_file);
    tracing::debug!(id, target = %target.display(), "swap completed");
    Ok(())
}

fn acquire_lock(id: &str, lock_path: &Path, timeout: Duration) -> Result<File> {
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| Error::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(lock_path)
        .map_err(|source| Error::Io {
            path: lock_path.to_path_buf(),
            source,
        })?;

    let deadline = Instant::now() + timeout;
    loop {
        match FileExt::try_lock_exclusive(&file) {
            Ok(()) => return Ok(file),
            Err(e) if e.kind() == fs4::lock_contended_error().kind() => {}
            Err(e) => {
                return Err(Error::Io {
                    path: lock_path.to_path_buf(),
                    source: e,
                });
            }
        }
        if Instant::now() >= deadline {
            return Err(Error::LockTimeout {
                id: id.to_string(),
                path: lock_path.to_path_buf(),
            });
        }
        std::thread::sleep(LOCK_RETRY_INTERVAL);
    }
}

#[cfg(test)]
#[path = "swap_tests.rs"]
mod tests;
