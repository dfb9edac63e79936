// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How a materialized source is exposed at its `targetDir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetMode {
    Symlink,
    Copy,
}

/// One source as written in the config file. Fields beyond `id`/`repo`/`ref`
/// are optional and fall back to [`super::Defaults`] then engine defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Source {
    pub id: String,
    pub repo: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(rename = "maxBytes", default)]
    pub max_bytes: Option<u64>,
    #[serde(rename = "maxFiles", default)]
    pub max_files: Option<u64>,
    #[serde(rename = "ignoreHidden", default)]
    pub ignore_hidden: Option<bool>,
    #[serde(rename = "unwrapSingleRootDir", default)]
    pub unwrap_single_root_dir: Option<bool>,
    #[serde(rename = "targetDir", default)]
    pub target_dir: Option<PathBuf>,
    #[serde(rename = "targetMode", default)]
    pub target_mode: Option<TargetMode>,
    #[serde(default)]
    pub required: Option<bool>,
}
