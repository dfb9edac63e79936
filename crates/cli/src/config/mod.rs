// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file shape, defaults merging, and source-level validation.

mod defaults;
mod source;
mod validate;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use defaults::Defaults;
pub use source::{Source, TargetMode};
pub use validate::{repo_host, validate_resolved};

use crate::error::{Error, Result};

/// The project config file: `{ cacheDir?, hostAllowList?, defaults?, sources }`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(rename = "cacheDir")]
    pub cache_dir: Option<String>,
    /// Remote hosts permitted for any network-contacting source. Absent
    /// means unrestricted — a project opts into the allow-list by setting
    /// it, rather than every project needing to enumerate one.
    #[serde(rename = "hostAllowList", default)]
    pub host_allow_list: Option<Vec<String>>,
    #[serde(default)]
    pub defaults: Option<Defaults>,
    pub sources: Vec<Source>,
}

pub const DEFAULT_CACHE_DIR: &str = ".docs";

/// Default config file name, resolved relative to the project root.
pub const DEFAULT_CONFIG_NAME: &str = "docs.json";

impl Config {
    /// Load and parse a config file. Does not validate sources; call
    /// [`Config::resolve`] per-source for that.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| Error::Config {
            message: e.to_string(),
            path: Some(path.to_path_buf()),
        })
    }

    /// Write a config back to disk with stable two-space indentation.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).map_err(|e| Error::Config {
            message: e.to_string(),
            path: Some(path.to_path_buf()),
        })?;
        crate::atomic::write_atomic(path, text.as_bytes()).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The configured cache directory, resolved relative to `base` (the
    /// config file's parent directory) when it is a relative path.
    ///
    /// `DOCCACHE_CACHE_DIR` overrides the config's `cacheDir` field, the
    /// same override-wins-over-config precedence [`crate::env::git_cache_root`]
    /// uses for the persistent object cache.
    pub fn cache_dir(&self, base: &Path) -> PathBuf {
        let raw = std::env::var(crate::env::names::CACHE_DIR).ok().or_else(|| self.cache_dir.clone());
        let candidate = PathBuf::from(raw.unwrap_or_else(|| DEFAULT_CACHE_DIR.to_string()));
        if candidate.is_absolute() {
            candidate
        } else {
            base.join(candidate)
        }
    }

    /// Merge a [`Source`] with [`Defaults`] and engine defaults, then
    /// validate the result. `project_root` and `cache_root` bound the
    /// allowed `targetDir` range.
    pub fn resolve(
        &self,
        source: &Source,
        project_root: &Path,
        cache_root: &Path,
    ) -> Result<ResolvedSource> {
        let defaults = self.defaults.clone().unwrap_or_default();
        let resolved = ResolvedSource {
            id: source.id.clone(),
            repo: source.repo.clone(),
            git_ref: source.git_ref.clone(),
            include: dedup_sorted(
                source
                    .include
                    .clone()
                    .or_else(|| defaults.include.clone())
                    .unwrap_or_else(|| vec!["**/*".to_string()]),
            ),
            exclude: dedup_sorted(
                source
                    .exclude
                    .clone()
                    .or_else(|| defaults.exclude.clone())
                    .unwrap_or_default(),
            ),
            max_bytes: source.max_bytes.or(defaults.max_bytes).unwrap_or(50_000_000),
            max_files: source.max_files.or(defaults.max_files).unwrap_or(20_000),
            ignore_hidden: source.ignore_hidden.or(defaults.ignore_hidden).unwrap_or(true),
            unwrap_single_root_dir: source
                .unwrap_single_root_dir
                .or(defaults.unwrap_single_root_dir)
                .unwrap_or(false),
            target_dir: source.target_dir.clone(),
            target_mode: source.target_mode.or(defaults.target_mode).unwrap_or(TargetMode::Symlink),
            required: source.required.or(defaults.required).unwrap_or(false),
        };
        validate_resolved(&resolved, project_root, cache_root)?;
        Ok(resolved)
    }

    /// Check `host` against [`Config::host_allow_list`]; `None` allows all.
    pub fn host_allowed(&self, host: &str) -> bool {
        match &self.host_allow_list {
            None => true,
            Some(list) => list.iter().any(|h| h.eq_ignore_ascii_case(host)),
        }
    }
}

fn dedup_sorted(mut patterns: Vec<String>) -> Vec<String> {
    patterns.sort();
    patterns.dedup();
    patterns
}

/// A [`Source`] merged with defaults; every content-shaping field is definite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub id: String,
    pub repo: String,
    pub git_ref: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub max_bytes: u64,
    pub max_files: u64,
    pub ignore_hidden: bool,
    pub unwrap_single_root_dir: bool,
    pub target_dir: Option<PathBuf>,
    pub target_mode: TargetMode,
    pub required: bool,
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
