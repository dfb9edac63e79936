// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build script that generates env var name constants for `env.rs`.

// Build scripts should panic on failure — there is no meaningful recovery.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let dest = Path::new(&out_dir).join("env_names.rs");

    let contents = r#"
/// Overrides the path to the `config` (docs.json) file.
pub const CONFIG: &str = "DOCCACHE_CONFIG";
/// Overrides the per-project cache root (default: `.docs`).
pub const CACHE_DIR: &str = "DOCCACHE_CACHE_DIR";
/// Overrides the persistent cross-project VCS object cache directory.
pub const GIT_CACHE_DIR: &str = "DOCCACHE_GIT_CACHE_DIR";
/// Overrides the path to the `git` executable invoked for remote operations.
pub const GIT_BIN: &str = "DOCCACHE_GIT_BIN";
/// Configures the tracing log filter (e.g. `debug`, `doccache=trace`).
pub const LOG: &str = "DOCCACHE_LOG";
/// Disables color output (any value).
pub const NO_COLOR: &str = "NO_COLOR";
/// Forces color output (any value).
pub const COLOR: &str = "COLOR";
/// User home directory.
pub const HOME: &str = "HOME";
/// XDG cache home directory.
pub const XDG_CACHE_HOME: &str = "XDG_CACHE_HOME";
"#;

    fs::write(dest, contents).expect("failed to write env_names.rs");
}
