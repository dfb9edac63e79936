// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::TargetMode;
use crate::toc::TocFormat;

/// A deterministic local cache for external documentation trees
#[derive(Parser)]
#[command(name = "doccache")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use a specific config file
    #[arg(short = 'C', long = "config", global = true, env = "DOCCACHE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch, materialize, and lock every configured source
    Sync(SyncArgs),
    /// Check materialized sources against their manifests
    Verify(SourceFilterArgs),
    /// Print each source's lock status
    Status(SourceFilterArgs),
    /// Add a source to the config
    Add(AddArgs),
    /// Remove a source from the config
    Remove(RemoveArgs),
    /// Delete a source's cache directory and lock entry
    Clean(SourceFilterArgs),
    /// Reap stale staging and backup directories
    Prune(PruneArgs),
    /// Write a starter config file
    Init(InitArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(clap::Args)]
pub struct SyncArgs {
    /// Sync only these source ids (default: all)
    #[arg(value_name = "ID")]
    pub id: Vec<String>,

    /// Don't contact the network; reuse the lock's recorded commits
    #[arg(long)]
    pub offline: bool,

    /// Fail the run before any I/O if a required source is missing
    #[arg(long)]
    pub fail_on_miss: bool,

    /// Number of sources to process concurrently
    #[arg(long, default_value_t = 4, value_name = "N")]
    pub jobs: usize,

    /// Per-source network timeout in seconds
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    pub timeout: u64,

    /// TOC.md rendering style
    #[arg(long, value_enum, default_value = "tree")]
    pub toc_format: TocFormat,
}

#[derive(clap::Args, Default)]
pub struct SourceFilterArgs {
    /// Limit to these source ids (default: all)
    #[arg(value_name = "ID")]
    pub id: Vec<String>,
}

#[derive(clap::Args)]
pub struct AddArgs {
    /// Unique source id
    pub id: String,
    /// Remote repository URL
    pub repo: String,
    /// Ref to track (branch, tag, or commit)
    #[arg(long = "ref", default_value = "main")]
    pub git_ref: String,
    /// Include glob (repeatable)
    #[arg(long = "include")]
    pub include: Vec<String>,
    /// Exclude glob (repeatable)
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,
    /// Directory to project the materialized source at
    #[arg(long)]
    pub target_dir: Option<PathBuf>,
    /// How to project the target
    #[arg(long, value_enum)]
    pub target_mode: Option<TargetMode>,
    /// Fail the run if this source can't be synced
    #[arg(long)]
    pub required: bool,
}

#[derive(clap::Args)]
pub struct RemoveArgs {
    /// Source id to remove from the config
    pub id: String,
}

#[derive(clap::Args)]
pub struct PruneArgs {
    /// List what would be removed without removing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct CompletionsArgs {
    pub shell: clap_complete::Shell,
}

impl clap::ValueEnum for TargetMode {
    fn value_variants<'a>() -> &'a [Self] {
        &[TargetMode::Symlink, TargetMode::Copy]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            TargetMode::Symlink => clap::builder::PossibleValue::new("symlink"),
            TargetMode::Copy => clap::builder::PossibleValue::new("copy"),
        })
    }
}

impl clap::ValueEnum for TocFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[TocFormat::Tree, TocFormat::Compressed]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            TocFormat::Tree => clap::builder::PossibleValue::new("tree"),
            TocFormat::Compressed => clap::builder::PossibleValue::new("compressed"),
        })
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
