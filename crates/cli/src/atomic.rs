// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single-file atomic writes: write to a sibling temp file, then rename.

use std::io;
use std::path::Path;

/// Write `bytes` to `path` atomically. Creates parent directories if
/// missing. The temp file's name embeds a random suffix so concurrent
/// writers to the same path never collide on the staging name.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let temp_name = match path.file_name() {
        Some(name) => format!(".{}.tmp-{}", name.to_string_lossy(), crate::randsuffix::random_suffix()),
        None => format!(".tmp-{}", crate::randsuffix::random_suffix()),
    };
    let temp_path = path.with_file_name(temp_name);
    std::fs::write(&temp_path, bytes)?;
    std::fs::rename(&temp_path, path)
}

#[cfg(test)]
#[path = "atomic_tests.rs"]
mod tests;
