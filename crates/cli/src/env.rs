// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variable names and platform default directory resolution.

use std::path::PathBuf;

/// Generated env var name constants (see `build.rs`).
pub mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

/// The user's home directory, if known.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os(names::HOME).map(PathBuf::from)
}

/// The platform default cache directory (`XDG_CACHE_HOME` or `~/.cache`).
///
/// Used as the base for the persistent cross-project VCS object cache;
/// overridable via [`names::GIT_CACHE_DIR`].
pub fn platform_cache_dir() -> Option<PathBuf> {
    std::env::var_os(names::XDG_CACHE_HOME)
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|h| h.join(".cache")))
}

/// Resolve the persistent VCS object cache root.
///
/// `docs-cache-git/` lives under the platform cache directory unless
/// overridden by [`names::GIT_CACHE_DIR`].
pub fn git_cache_root() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(names::GIT_CACHE_DIR) {
        return Some(PathBuf::from(dir));
    }
    platform_cache_dir().map(|d| d.join("docs-cache-git"))
}

/// Path to the `git` executable, honoring [`names::GIT_BIN`].
pub fn git_binary() -> String {
    std::env::var(names::GIT_BIN).unwrap_or_else(|_| "git".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
