// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Safety validation for a merged [`super::ResolvedSource`].

use std::path::Path;

use super::ResolvedSource;
use crate::error::{Error, Result};

/// Characters that make a URL unsafe to ever pass to a shell or process
/// argument list unescaped.
const FORBIDDEN_URL_CHARS: &[char] = &[';', '&', '|', '`', '$', '(', ')', '{', '}', '[', ']', '<', '>'];

pub fn validate_resolved(source: &ResolvedSource, project_root: &Path, cache_root: &Path) -> Result<()> {
    validate_id(&source.id)?;
    validate_repo_url(&source.id, &source.repo)?;
    if source.max_bytes == 0 {
        return Err(Error::Config {
            message: format!("source {:?}: maxBytes must be > 0", source.id),
            path: None,
        });
    }
    if let Some(target_dir) = &source.target_dir {
        validate_target_dir(&source.id, target_dir, project_root, cache_root)?;
    }
    Ok(())
}

/// `id` must be a simple name: alphanumeric, `-`, `_` only.
pub fn validate_id(id: &str) -> Result<()> {
    let safe = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if safe {
        Ok(())
    } else {
        Err(Error::UnsafeId { id: id.to_string() })
    }
}

/// `repo` must use `https://`, `ssh://`, or scp-like `user@host:path`, and
/// must not contain shell-significant punctuation.
pub fn validate_repo_url(id: &str, repo: &str) -> Result<()> {
    if repo.contains(FORBIDDEN_URL_CHARS) {
        return Err(Error::UnsafeRepoUrl {
            id: id.to_string(),
            repo: repo.to_string(),
        });
    }
    let scheme_ok = repo.starts_with("https://")
        || repo.starts_with("ssh://")
        || is_scp_like(repo);
    if scheme_ok {
        Ok(())
    } else {
        Err(Error::UnsafeRepoUrl {
            id: id.to_string(),
            repo: repo.to_string(),
        })
    }
}

fn is_scp_like(repo: &str) -> bool {
    let Some((userhost, path)) = repo.split_once(':') else {
        return false;
    };
    if path.is_empty() || path.starts_with('/') {
        // `scheme:` with no userinfo, or an absolute local path, not scp syntax.
        return false;
    }
    let Some((_user, host)) = userhost.split_once('@') else {
        return false;
    };
    !host.is_empty() && !host.contains('/')
}

/// Extract the URL's host for allow-list checks. Returns `None` for
/// shapes this never needs to match against an allow-list.
pub fn repo_host(repo: &str) -> Option<&str> {
    for scheme in ["https://", "ssh://"] {
        if let Some(rest) = repo.strip_prefix(scheme) {
            let rest = rest.split_once('@').map(|(_, h)| h).unwrap_or(rest);
            let host = rest.split(['/', ':']).next()?;
            return (!host.is_empty()).then_some(host);
        }
    }
    if let Some((userhost, _path)) = repo.split_once(':') {
        if let Some((_, host)) = userhost.split_once('@') {
            return (!host.is_empty()).then_some(host);
        }
    }
    None
}

/// `targetDir` must resolve inside `project_root` and outside `cache_root`.
fn validate_target_dir(id: &str, target_dir: &Path, project_root: &Path, cache_root: &Path) -> Result<()> {
    let candidate = if target_dir.is_absolute() {
        target_dir.to_path_buf()
    } else {
        project_root.join(target_dir)
    };
    let normalized = normalize(&candidate);
    let project_root = normalize(project_root);
    let cache_root = normalize(cache_root);

    if !normalized.starts_with(&project_root) || normalized.starts_with(&cache_root) {
        return Err(Error::UnsafeTargetPath {
            id: id.to_string(),
            path: target_dir.to_path_buf(),
        });
    }
    Ok(())
}

/// Lexical normalization (no filesystem access): collapses `.` and
/// resolves `..` components without following symlinks.
fn normalize(path: &Path) -> std::path::PathBuf {
    let mut out = std::path::PathBuf::new();
    for component in path.components() {
        use std::path::Component;
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
