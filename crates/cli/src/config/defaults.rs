// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

use super::TargetMode;

/// Project-wide fallback values for optional [`super::Source`] fields.
/// `id`, `repo`, `ref`, and `targetDir` have no project-wide default and
/// are not present here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Defaults {
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
    #[serde(rename = "targetMode", default)]
    pub target_mode: Option<TargetMode>,
    #[serde(default)]
    pub required: Option<bool>,
}
