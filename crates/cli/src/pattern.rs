// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Include/exclude glob compilation and sparse-checkout prefix classification.

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Error, Result};

/// Compiled include/exclude rules for one source.
pub struct RuleSet {
    include: GlobSet,
    exclude: GlobSet,
}

impl RuleSet {
    pub fn compile(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: build_set(include)?,
            exclude: build_set(exclude)?,
        })
    }

    /// `path` is a forward-slash-normalized, repo-relative path.
    pub fn matches(&self, path: &str) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}

fn build_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| Error::Config {
            message: format!("invalid glob {pattern:?}: {e}"),
            path: None,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| Error::Config {
        message: format!("failed to compile glob set: {e}"),
        path: None,
    })
}

/// How the fetcher should restrict a sparse checkout to the include set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SparsePolicy {
    /// Every include pattern resolves to a fixed directory prefix:
    /// checkout those directories (cone mode).
    Cone(Vec<String>),
    /// At least one pattern has a wildcard above the filename: checkout
    /// using the raw patterns (no-cone mode).
    NoCone(Vec<String>),
    /// Patterns can't be reduced to a prefix or filename-only wildcard
    /// shape; fetch the full tree.
    Full,
}

/// Classify `include` patterns into a [`SparsePolicy`].
pub fn classify(include: &[String]) -> SparsePolicy {
    if include.is_empty() || include.iter().any(|p| p == "**/*" || p == "**") {
        return SparsePolicy::Full;
    }

    let mut prefixes = Vec::new();
    let mut all_fixed_prefix = true;
    for pattern in include {
        match fixed_prefix(pattern) {
            Some(prefix) => prefixes.push(prefix),
            None => {
                all_fixed_prefix = false;
                break;
            }
        }
    }
    if all_fixed_prefix {
        prefixes.sort();
        prefixes.dedup();
        return SparsePolicy::Cone(prefixes);
    }

    SparsePolicy::NoCone(include.to_vec())
}

/// A pattern has a "fixed directory prefix" if no `*`, `?`, or `[` appears
/// before its last `/`. Returns the directory portion, or `None` if a
/// wildcard appears above the filename segment.
fn fixed_prefix(pattern: &str) -> Option<String> {
    let last_slash = pattern.rfind('/');
    let dir_part = match last_slash {
        Some(idx) => &pattern[..idx],
        None => return Some(String::new()),
    };
    if dir_part.contains(['*', '?', '[']) {
        None
    } else {
        Some(dir_part.to_string())
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
