// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External git process wrapper.
//!
//! Every invocation disables hooks, submodule recursion, and terminal
//! prompts, and runs with a minimized environment. The local file
//! transport is only ever pointed at the persistent object cache, never
//! at an arbitrary path supplied by a source.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};

/// A resolved commit for `(repo, ref)`, with no working tree attached.
pub struct GitVcs {
    binary: String,
}

impl Default for GitVcs {
    fn default() -> Self {
        Self { binary: env::git_binary() }
    }
}

impl GitVcs {
    pub fn new(binary: String) -> Self {
        Self { binary }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.env_clear();
        // A minimal PATH is required for git to shell out to its own
        // helpers (e.g. git-remote-https); HOME is needed for .gitconfig
        // lookups some transports still consult.
        if let Ok(path) = std::env::var("PATH") {
            cmd.env("PATH", path);
        }
        if let Some(home) = env::home_dir() {
            cmd.env("HOME", home);
        }
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd.env("GIT_ASKPASS", "true");
        cmd.env("GIT_SSH_COMMAND", "ssh -o BatchMode=yes -o StrictHostKeyChecking=accept-new");
        cmd.arg("-c").arg("core.hooksPath=/dev/null");
        cmd.arg("-c").arg("protocol.file.allow=never");
        cmd
    }

    /// Run a git subcommand, returning trimmed stdout on success.
    fn run(&self, id: &str, args: &[&str], cwd: Option<&Path>, allow_local: bool) -> Result<String> {
        let mut cmd = self.command();
        if allow_local {
            // Only the persistent object cache triggers a local-transport
            // invocation; override the blanket deny for this call.
            cmd.arg("-c").arg("protocol.file.allow=always");
        }
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        let output = cmd.output().map_err(|e| Error::RemoteToolFailed {
            id: id.to_string(),
            tool: self.binary.clone(),
            code: None,
            cause: e.to_string(),
        })?;
        if !output.status.success() {
            return Err(Error::RemoteToolFailed {
                id: id.to_string(),
                tool: self.binary.clone(),
                code: output.status.code(),
                cause: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Resolve `ref` against `repo` to a full 40-hex commit hash.
    pub fn ls_remote(&self, id: &str, repo: &str, git_ref: &str) -> Result<String> {
        if is_full_commit_hash(git_ref) {
            return Ok(git_ref.to_lowercase());
        }
        let out = self.run(id, &["ls-remote", repo, git_ref], None, false)?;
        let hash = out.lines().next().and_then(|l| l.split_whitespace().next());
        match hash {
            Some(h) if is_full_commit_hash(h) => Ok(h.to_lowercase()),
            _ => Err(Error::UnresolvableRef {
                id: id.to_string(),
                git_ref: git_ref.to_string(),
            }),
        }
    }

    /// Ensure the persistent bare-repo object cache at `cache_path` exists
    /// and contains `commit`, cloning or incrementally fetching as needed.
    pub fn ensure_object_cache(&self, id: &str, cache_path: &Path, repo: &str, commit: &str) -> Result<()> {
        if !cache_path.join("HEAD").exists() {
            std::fs::create_dir_all(cache_path.parent().unwrap_or(cache_path)).map_err(|source| Error::Io {
                path: cache_path.to_path_buf(),
                source,
            })?;
            self.run(
                id,
                &["clone", "--bare", "--filter=blob:none", repo, &cache_path.to_string_lossy()],
                None,
                false,
            )?;
            return Ok(());
        }
        if self.run(id, &["cat-file", "-e", commit], Some(cache_path), true).is_err() {
            self.run(id, &["fetch", "--filter=blob:none", "origin", commit], Some(cache_path), false)?;
        }
        Ok(())
    }

    /// `git archive --format=tar <commit>` against the object cache, piped
    /// directly into a tar extractor by the caller.
    pub fn archive(&self, id: &str, cache_path: &Path, commit: &str, dest: &Path) -> Result<()> {
        let mut cmd = self.command();
        cmd.arg("-c").arg("protocol.file.allow=always");
        cmd.args(["archive", "--format=tar", commit]);
        cmd.current_dir(cache_path);
        cmd.stdout(std::process::Stdio::piped());
        let mut child = cmd.spawn().map_err(|e| Error::RemoteToolFailed {
            id: id.to_string(),
            tool: self.binary.clone(),
            code: None,
            cause: e.to_string(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| Error::Internal("git archive produced no stdout".into()))?;
        std::fs::create_dir_all(dest).map_err(|source| Error::Io { path: dest.to_path_buf(), source })?;
        tar::Archive::new(stdout).unpack(dest).map_err(|source| Error::Io { path: dest.to_path_buf(), source })?;
        let status = child.wait().map_err(|e| Error::RemoteToolFailed {
            id: id.to_string(),
            tool: self.binary.clone(),
            code: None,
            cause: e.to_string(),
        })?;
        if !status.success() {
            return Err(Error::RemoteToolFailed {
                id: id.to_string(),
                tool: self.binary.clone(),
                code: status.code(),
                cause: "git archive exited non-zero".to_string(),
            });
        }
        Ok(())
    }

    /// Clone the object cache into `dest` (blobless, single-branch,
    /// depth-limited, no tags), apply a sparse-checkout policy, and check
    /// out `commit`.
    pub fn clone_and_checkout(
        &self,
        id: &str,
        cache_path: &Path,
        commit: &str,
        dest: &Path,
        sparse: &crate::pattern::SparsePolicy,
    ) -> Result<()> {
        self.run(
            id,
            &[
                "clone",
                "--filter=blob:none",
                "--single-branch",
                "--depth",
                "1",
                "--no-tags",
                "--no-checkout",
                &cache_path.to_string_lossy(),
                &dest.to_string_lossy(),
            ],
            None,
            true,
        )?;

        match sparse {
            crate::pattern::SparsePolicy::Cone(prefixes) => {
                self.run(id, &["sparse-checkout", "init", "--cone"], Some(dest), false)?;
                let mut args = vec!["sparse-checkout", "set"];
                args.extend(prefixes.iter().map(String::as_str));
                self.run(id, &args, Some(dest), false)?;
            }
            crate::pattern::SparsePolicy::NoCone(patterns) => {
                self.run(id, &["sparse-checkout", "init", "--no-cone"], Some(dest), false)?;
                let mut args = vec!["sparse-checkout", "set"];
                args.extend(patterns.iter().map(String::as_str));
                self.run(id, &args, Some(dest), false)?;
            }
            crate::pattern::SparsePolicy::Full => {}
        }

        self.run(id, &["checkout", commit], Some(dest), false)?;
        Ok(())
    }
}

/// Default per-source network operation timeout, overridable by the
/// Coordinator via the Planner/Fetcher inputs.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

fn is_full_commit_hash(s: &str) -> bool {
    s.len() == 40 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// `<platform-cache>/docs-cache-git/<sha256(repo-url)>/`
pub fn object_cache_path(repo: &str) -> Option<PathBuf> {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(repo.as_bytes());
    let digest = hasher.finalize();
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    env::git_cache_root().map(|root| root.join(hex))
}

#[cfg(test)]
#[path = "vcs_tests.rs"]
mod tests;
