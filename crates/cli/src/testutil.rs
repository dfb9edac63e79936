// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fakes for exercising the engine without a real VCS. Test-only.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::fetcher::{FetchedTree, RemoteResolver, WorkingTreeFetcher};
use crate::model::RemoteResolution;

/// A scripted remote: maps `(repo, ref)` to a fixed resolved commit.
#[derive(Default)]
pub struct FakeResolver {
    resolutions: HashMap<(String, String), String>,
}

impl FakeResolver {
    pub fn with(mut self, repo: &str, git_ref: &str, commit: &str) -> Self {
        self.resolutions.insert((repo.to_string(), git_ref.to_string()), commit.to_string());
        self
    }
}

impl RemoteResolver for FakeResolver {
    fn resolve(&self, id: &str, repo: &str, git_ref: &str) -> Result<RemoteResolution> {
        match self.resolutions.get(&(repo.to_string(), git_ref.to_string())) {
            Some(commit) => Ok(RemoteResolution {
                repo: repo.to_string(),
                git_ref: git_ref.to_string(),
                resolved_commit: commit.clone(),
            }),
            None => Err(Error::UnresolvableRef {
                id: id.to_string(),
                git_ref: git_ref.to_string(),
            }),
        }
    }
}

/// A scripted fetcher: each `resolved_commit` maps to a directory of
/// `(relative_path, contents)` pairs materialized into a fresh tempdir.
#[derive(Default)]
pub struct FakeFetcher {
    trees: Mutex<HashMap<String, Vec<(String, Vec<u8>)>>>,
}

impl FakeFetcher {
    pub fn with_tree(self, commit: &str, files: Vec<(&str, &[u8])>) -> Self {
        self.trees.lock().unwrap().insert(
            commit.to_string(),
            files.into_iter().map(|(p, c)| (p.to_string(), c.to_vec())).collect(),
        );
        self
    }
}

impl WorkingTreeFetcher for FakeFetcher {
    fn fetch(&self, id: &str, _repo: &str, resolved_commit: &str, _include: &[String]) -> Result<FetchedTree> {
        let trees = self.trees.lock().unwrap();
        let files = trees.get(resolved_commit).ok_or_else(|| Error::RemoteToolFailed {
            id: id.to_string(),
            tool: "fake-fetcher".to_string(),
            code: None,
            cause: format!("no scripted tree for commit {resolved_commit}"),
        })?;

        let dir = TempDir::new().map_err(|source| Error::Io { path: std::env::temp_dir(), source })?;
        for (path, contents) in files {
            let full = dir.path().join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).map_err(|source| Error::Io { path: parent.to_path_buf(), source })?;
            }
            std::fs::write(&full, contents).map_err(|source| Error::Io { path: full.clone(), source })?;
        }
        Ok(into_fetched_tree(dir))
    }
}

fn into_fetched_tree(dir: TempDir) -> FetchedTree {
    // FetchedTree's field is private to `fetcher`; constructed via the
    // crate-visible helper so fakes stay outside that module.
    crate::fetcher::fetched_tree_for_test(dir)
}

pub fn temp_project() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let project_root = dir.path().to_path_buf();
    let cache_root = project_root.join(".docs");
    (dir, project_root, cache_root)
}
