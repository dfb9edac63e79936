// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! doccache error taxonomy.
//!
//! Variants follow the kind taxonomy from the error handling design:
//! config, network, filesystem, integrity, policy. Every variant renders
//! a concise one-line, credential-redacted message — no stack traces,
//! no source-language exception names.

use std::path::PathBuf;

use crate::redact::redact_url;

/// doccache error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // --- config ---
    /// Config file unreadable or structurally invalid.
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// A source `id` fails the safe-identifier rule.
    #[error("source {id:?}: unsafe id (must be alphanumeric/-/_ only)")]
    UnsafeId { id: String },

    /// A `targetDir` resolves outside the project tree or inside the cache.
    #[error("source {id:?}: unsafe target path {path}")]
    UnsafeTargetPath { id: String, path: PathBuf },

    /// A `repo` URL contains shell-significant punctuation or an unsupported scheme.
    #[error("source {id:?}: unsafe repo url: {}", redact_url(.repo))]
    UnsafeRepoUrl { id: String, repo: String },

    // --- network ---
    /// `repo`'s host is not on the configured allow-list.
    #[error("source {id:?}: host not allowed: {host}")]
    HostNotAllowed { id: String, host: String },

    /// `ref` could not be resolved to a commit.
    #[error("source {id:?}: unresolvable ref {git_ref:?}")]
    UnresolvableRef { id: String, git_ref: String },

    /// A per-source network operation exceeded its timeout.
    #[error("source {id:?}: network timeout after {secs}s")]
    Timeout { id: String, secs: u64 },

    /// The external VCS process exited non-zero.
    #[error("source {id:?}: {tool} exited with {code:?}: {cause}")]
    RemoteToolFailed {
        id: String,
        tool: String,
        code: Option<i32>,
        cause: String,
    },

    // --- filesystem ---
    /// `maxBytes` or `maxFiles` was exceeded during materialization.
    #[error("source {id:?}: {which} cap exceeded ({actual} > {cap})")]
    CapExceeded {
        id: String,
        which: &'static str,
        actual: u64,
        cap: u64,
    },

    /// The per-id swap lock could not be acquired before timing out.
    #[error("source {id:?}: lock acquisition timed out on {path}")]
    LockTimeout { id: String, path: PathBuf },

    /// Atomic swap could not complete and rollback also failed.
    #[error("source {id:?}: swap collision: {cause}")]
    SwapFailed { id: String, cause: String },

    /// A generic, path-carrying I/O error.
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- integrity ---
    /// The manifest file for a materialized source could not be read.
    #[error("source {id:?}: manifest missing or unreadable: {cause}")]
    ManifestMissing { id: String, cause: String },

    // --- policy ---
    /// A `required` source is `missing` under fail-on-miss mode.
    #[error("source {id:?}: required but missing (fail-on-miss)")]
    RequiredMissing { id: String },

    /// Invalid command-line arguments.
    #[error("argument error: {0}")]
    Argument(String),

    /// Internal invariant violation (a bug, not a user-facing condition).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes per the CLI surface contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Run completed with no source left in a failed state.
    Success = 0,
    /// At least one source ended in a failed state.
    RunFailed = 1,
    /// Invalid command-line arguments.
    InvalidArgs = 9,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Argument(_) => ExitCode::InvalidArgs,
            _ => ExitCode::RunFailed,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
