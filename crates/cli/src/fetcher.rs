// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Working-tree acquisition: persistent object cache + archive/clone strategies.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::Result;
use crate::model::RemoteResolution;
use crate::pattern;
use crate::vcs::GitVcs;

/// A working tree handle. Dropping it removes the staging directory
/// unconditionally, satisfying the "cleanup on success and failure" rule.
pub struct FetchedTree {
    dir: TempDir,
}

impl FetchedTree {
    pub fn working_dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Construct a [`FetchedTree`] from an already-populated directory.
/// Exposed for [`crate::testutil::FakeFetcher`]; not part of the public API.
#[cfg(test)]
pub(crate) fn fetched_tree_for_test(dir: TempDir) -> FetchedTree {
    FetchedTree { dir }
}

/// Resolves a `(repo, ref)` pair to a [`RemoteResolution`]. Swappable so
/// tests can simulate a remote without invoking a real VCS.
pub trait RemoteResolver: Send + Sync {
    fn resolve(&self, id: &str, repo: &str, git_ref: &str) -> Result<RemoteResolution>;
}

/// Produces a working tree for a resolved commit. Swappable for the same
/// reason as [`RemoteResolver`].
pub trait WorkingTreeFetcher: Send + Sync {
    fn fetch(&self, id: &str, repo: &str, resolved_commit: &str, include: &[String]) -> Result<FetchedTree>;
}

/// The real git-backed implementation of both fetcher interfaces.
pub struct GitFetcher {
    vcs: GitVcs,
    cache_override: Option<PathBuf>,
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self { vcs: GitVcs::default(), cache_override: None }
    }
}

impl GitFetcher {
    /// Override the persistent object cache root, for tests.
    pub fn with_cache_root(mut self, root: PathBuf) -> Self {
        self.cache_override = Some(root);
        self
    }

    fn cache_path(&self, repo: &str) -> Result<PathBuf> {
        if let Some(root) = &self.cache_override {
            return Ok(root.join(cache_key(repo)));
        }
        crate::vcs::object_cache_path(repo).ok_or_else(|| crate::error::Error::Internal(
            "could not determine a persistent cache directory".to_string(),
        ))
    }
}

fn cache_key(repo: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(repo.as_bytes());
    hasher.finalize().iter().map(|b| format!("{b:02x}")).collect()
}

impl RemoteResolver for GitFetcher {
    fn resolve(&self, id: &str, repo: &str, git_ref: &str) -> Result<RemoteResolution> {
        let resolved_commit = self.vcs.ls_remote(id, repo, git_ref)?;
        Ok(RemoteResolution {
            repo: repo.to_string(),
            git_ref: git_ref.to_string(),
            resolved_commit,
        })
    }
}

impl WorkingTreeFetcher for GitFetcher {
    fn fetch(&self, id: &str, repo: &str, resolved_commit: &str, include: &[String]) -> Result<FetchedTree> {
        let cache_path = self.cache_path(repo)?;
        self.vcs.ensure_object_cache(id, &cache_path, repo, resolved_commit)?;

        let staging = TempDir::new().map_err(|source| crate::error::Error::Io {
            path: std::env::temp_dir(),
            source,
        })?;

        // Archive path first; any failure (unsupported or otherwise) falls
        // back to clone-and-checkout rather than failing the source.
        if self.vcs.archive(id, &cache_path, resolved_commit, staging.path()).is_ok() {
            tracing::debug!(id, strategy = "archive", "fetch strategy chosen");
            return Ok(FetchedTree { dir: staging });
        }

        let sparse = pattern::classify(include);
        tracing::debug!(id, strategy = "clone", ?sparse, "fetch strategy chosen");
        self.vcs.clone_and_checkout(id, &cache_path, resolved_commit, staging.path(), &sparse)?;
        Ok(FetchedTree { dir: staging })
    }
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
