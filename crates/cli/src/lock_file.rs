// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lock file I/O: single atomic write, merging prior entries with this run.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::model::{Lock, LockEntry};

/// Lock file name, sibling of the config file.
pub const LOCK_FILE_NAME: &str = "docs.lock";

/// Load the lock file, or an empty one (current version, no sources) if
/// the file doesn't exist yet.
pub fn load(path: &Path) -> Result<Lock> {
    match std::fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).map_err(|e| Error::Config {
            message: format!("invalid lock file: {e}"),
            path: Some(path.to_path_buf()),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Lock::new(epoch_zero())),
        Err(source) => Err(Error::Io { path: path.to_path_buf(), source }),
    }
}

/// `generatedAt` used for a freshly-initialized, never-written lock.
/// Never observed in a saved file: [`save`] always stamps the real time.
fn epoch_zero() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

/// Merge `updates` (this run's results, by source id) into `prior`,
/// producing a new lock stamped with `generated_at`. Sources not present
/// in `updates` keep their prior entry untouched — required for filtered
/// runs (`sync --id <id>`) to not erase unrelated entries.
pub fn merge(prior: &Lock, updates: impl IntoIterator<Item = (String, LockEntry)>, generated_at: DateTime<Utc>) -> Lock {
    let mut merged = prior.clone();
    merged.generated_at = generated_at;
    merged.tool_version = env!("CARGO_PKG_VERSION").to_string();
    for (id, entry) in updates {
        merged.sources.insert(id, entry);
    }
    merged
}

/// Remove a source's entry (used by the `remove` command).
pub fn without(prior: &Lock, id: &str) -> Lock {
    let mut updated = prior.clone();
    updated.sources.remove(id);
    updated
}

/// Write the lock as a single atomic file write.
pub fn save(path: &Path, lock: &Lock) -> Result<()> {
    let text = serde_json::to_string_pretty(lock).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;
    crate::atomic::write_atomic(path, text.as_bytes()).map_err(|source| Error::Io { path: path.to_path_buf(), source })
}

#[cfg(test)]
#[path = "lock_file_tests.rs"]
mod tests;
