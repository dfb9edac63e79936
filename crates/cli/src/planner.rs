// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Load config, resolve defaults, resolve remote tips, and diff against
//! the lock to produce a per-source status.

use std::path::Path;

use crate::concurrency;
use crate::config::{Config, ResolvedSource};
use crate::error::{Error, Result};
use crate::fetcher::RemoteResolver;
use crate::hash::rules_hash;
use crate::model::{CacheLayout, Lock, RemoteResolution, Status, OFFLINE_SENTINEL};

/// Default bound on the number of sources resolved concurrently.
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// One source's full planning result.
#[derive(Debug)]
pub struct PlannedSource {
    pub resolved: ResolvedSource,
    pub rules_sha256: String,
    pub status: Status,
    pub remote: RemoteResolution,
}

/// Options controlling one planning pass.
pub struct PlanOptions<'a> {
    pub project_root: &'a Path,
    pub cache_root: &'a Path,
    pub id_filter: Option<&'a [String]>,
    pub offline: bool,
    pub fail_on_miss: bool,
    pub worker_count: usize,
}

/// Result of a planning pass: the per-source plans plus non-fatal
/// warnings (e.g. an id filter entry that matched no configured source)
/// and per-source resolution failures (network errors are isolated to
/// the source that triggered them, not fatal to the whole run).
#[derive(Debug)]
pub struct PlanOutput {
    pub sources: Vec<PlannedSource>,
    pub failures: Vec<(String, Error)>,
    pub warnings: Vec<String>,
}

pub fn plan(
    config: &Config,
    lock: &Lock,
    resolver: &dyn RemoteResolver,
    options: &PlanOptions,
) -> Result<PlanOutput> {
    let mut warnings = Vec::new();
    let selected = select_sources(config, options.id_filter, &mut warnings);

    let mut resolved_sources = Vec::with_capacity(selected.len());
    for source in &selected {
        resolved_sources.push(config.resolve(source, options.project_root, options.cache_root)?);
    }

    if options.fail_on_miss {
        check_required_not_missing(&resolved_sources, lock, options)?;
    }

    let results = concurrency::map_bounded(&resolved_sources, options.worker_count.max(1), |resolved| {
        plan_one(config, resolved, lock, resolver, options.offline, options.cache_root)
    });

    let mut sources = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (resolved, result) in resolved_sources.iter().zip(results) {
        match result {
            Ok(planned) => sources.push(planned),
            Err(err) => failures.push((resolved.id.clone(), err)),
        }
    }

    Ok(PlanOutput { sources, failures, warnings })
}

fn select_sources<'a>(
    config: &'a Config,
    id_filter: Option<&[String]>,
    warnings: &mut Vec<String>,
) -> Vec<&'a crate::config::Source> {
    let Some(filter) = id_filter else {
        return config.sources.iter().collect();
    };
    for id in filter {
        if !config.sources.iter().any(|s| &s.id == id) {
            warnings.push(format!("no configured source with id {id:?}"));
        }
    }
    config.sources.iter().filter(|s| filter.contains(&s.id)).collect()
}

fn check_required_not_missing(sources: &[ResolvedSource], lock: &Lock, options: &PlanOptions) -> Result<()> {
    for source in sources {
        if !source.required {
            continue;
        }
        let has_lock_entry = lock.sources.contains_key(&source.id);
        let materialized = options.cache_root.join(&source.id).join(".manifest.jsonl").is_file();
        let missing = if options.offline {
            !has_lock_entry
        } else {
            !has_lock_entry && !materialized
        };
        if missing {
            return Err(Error::RequiredMissing { id: source.id.clone() });
        }
    }
    Ok(())
}

fn plan_one(
    config: &Config,
    resolved: &ResolvedSource,
    lock: &Lock,
    resolver: &dyn RemoteResolver,
    offline: bool,
    cache_root: &Path,
) -> Result<PlannedSource> {
    let rules_sha256 = rules_hash(resolved);
    let prior = lock.sources.get(&resolved.id);

    if offline {
        let remote = RemoteResolution {
            repo: resolved.repo.clone(),
            git_ref: resolved.git_ref.clone(),
            resolved_commit: prior.map(|e| e.resolved_commit.clone()).unwrap_or_else(|| OFFLINE_SENTINEL.to_string()),
        };
        let layout = CacheLayout::new(cache_root.to_path_buf());
        let status = match prior {
            Some(_) if layout.manifest_path(&resolved.id).is_file() => Status::UpToDate,
            _ => Status::Missing,
        };
        return Ok(PlannedSource { resolved: resolved.clone(), rules_sha256, status, remote });
    }

    if let Some(host) = crate::config::repo_host(&resolved.repo)
        && !config.host_allowed(host)
    {
        return Err(Error::HostNotAllowed { id: resolved.id.clone(), host: host.to_string() });
    }

    let remote = resolver.resolve(&resolved.id, &resolved.repo, &resolved.git_ref)?;
    let status = match prior {
        None => Status::Missing,
        Some(entry) if entry.resolved_commit == remote.resolved_commit && entry.rules_sha256 == rules_sha256 => {
            Status::UpToDate
        }
        Some(_) => Status::Changed,
    };

    Ok(PlannedSource { resolved: resolved.clone(), rules_sha256, status, remote })
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
