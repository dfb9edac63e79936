// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrates the Planner, Fetcher, Reuse Probe, Materializer, and
//! Target Projector into one sync run, then verifies and writes the lock.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;

use crate::concurrency;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetcher::{RemoteResolver, WorkingTreeFetcher};
use crate::model::{CacheLayout, Lock, LockEntry, Status};
use crate::planner::{self, PlanOptions, PlannedSource};
use crate::target;
use crate::toc::{self, TocFormat};
use crate::verify::{self, Issue};

/// Options controlling one sync run.
pub struct SyncOptions<'a> {
    pub project_root: &'a Path,
    pub cache_root: &'a Path,
    pub id_filter: Option<&'a [String]>,
    pub offline: bool,
    pub fail_on_miss: bool,
    pub worker_count: usize,
    pub lock_timeout: Duration,
    pub toc_format: TocFormat,
}

/// One source's terminal state for the run.
pub struct SourceResult {
    pub id: String,
    pub status: Status,
    pub error: Option<Error>,
}

/// Everything a caller needs to report the run.
pub struct SyncReport {
    pub results: Vec<SourceResult>,
    pub warnings: Vec<String>,
}

impl SyncReport {
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.error.is_some())
    }
}

/// Run one full sync: plan, execute jobs, project targets, verify and
/// repair, then write the lock. Returns the updated lock to save and a
/// report of per-source outcomes.
pub fn sync(
    config: &Config,
    resolver: &dyn RemoteResolver,
    fetcher: &dyn WorkingTreeFetcher,
    lock: &Lock,
    options: &SyncOptions,
) -> Result<(Lock, SyncReport)> {
    let layout = CacheLayout::new(options.cache_root.to_path_buf());

    let plan_output = planner::plan(
        config,
        lock,
        resolver,
        &PlanOptions {
            project_root: options.project_root,
            cache_root: options.cache_root,
            id_filter: options.id_filter,
            offline: options.offline,
            fail_on_miss: options.fail_on_miss,
            worker_count: options.worker_count,
        },
    )?;

    let mut warnings = plan_output.warnings;
    let worker_count = options.worker_count.max(1);

    let jobs: Vec<&PlannedSource> = plan_output
        .sources
        .iter()
        .filter(|s| s.status != Status::UpToDate || !layout.manifest_path(&s.resolved.id).is_file())
        .collect();

    let job_results = concurrency::map_bounded(&jobs, worker_count, |planned| {
        run_job(*planned, lock, fetcher, &layout, options.lock_timeout, false)
    });

    let mut entries: Vec<(String, std::result::Result<LockEntry, Error>)> = Vec::new();
    for (planned, result) in jobs.iter().zip(job_results) {
        entries.push((planned.resolved.id.clone(), result));
    }

    for planned in &plan_output.sources {
        if jobs.iter().any(|j| j.resolved.id == planned.resolved.id) {
            continue;
        }
        if let Some(prior) = lock.sources.get(&planned.resolved.id) {
            entries.push((planned.resolved.id.clone(), Ok(prior.clone())));
        }
    }

    // Sources that failed to resolve keep their prior lock entry (if any)
    // and are reported as failed; they never reach the job pipeline.
    let plan_failures = plan_output.failures;
    for (id, _) in &plan_failures {
        if let Some(prior) = lock.sources.get(id) {
            entries.push((id.clone(), Ok(prior.clone())));
        }
    }

    project_targets(&plan_output.sources, &layout, options.project_root, &mut warnings);

    retry_failed_verifications(&plan_output.sources, lock, fetcher, &layout, options, &mut entries, &mut warnings);

    let mut results = Vec::with_capacity(entries.len() + plan_failures.len());
    let mut updates = Vec::with_capacity(entries.len());
    for (id, outcome) in entries {
        let status = plan_output
            .sources
            .iter()
            .find(|s| s.resolved.id == id)
            .map(|s| s.status)
            .unwrap_or(Status::UpToDate);
        match outcome {
            Ok(entry) => {
                updates.push((id.clone(), entry));
                results.push(SourceResult { id, status, error: None });
            }
            Err(err) => results.push(SourceResult { id, status, error: Some(err) }),
        }
    }
    for (id, err) in plan_failures {
        results.push(SourceResult { id, status: Status::Missing, error: Some(err) });
    }

    let merged = crate::lock_file::merge(lock, updates, Utc::now());

    for planned in &plan_output.sources {
        if let Err(e) = write_toc(&planned.resolved.id, &layout, options.toc_format) {
            warnings.push(format!("source {:?}: TOC not written: {e}", planned.resolved.id));
        }
    }

    Ok((merged, SyncReport { results, warnings }))
}

fn run_job(
    planned: &PlannedSource,
    lock: &Lock,
    fetcher: &dyn WorkingTreeFetcher,
    layout: &CacheLayout,
    lock_timeout: Duration,
    force: bool,
) -> Result<LockEntry> {
    let resolved = &planned.resolved;
    let tree = fetcher.fetch(
        &resolved.id,
        &resolved.repo,
        &planned.remote.resolved_commit,
        &resolved.include,
    )?;

    let prior = lock.sources.get(&resolved.id);
    let manifest_path = layout.manifest_path(&resolved.id);

    let reuse_eligible = !force
        && prior.is_some_and(|p| crate::reuse_probe::preconditions_met(&manifest_path, &p.rules_sha256, &planned.rules_sha256));

    if reuse_eligible {
        let probe = crate::reuse_probe::probe(tree.working_dir(), resolved)?;
        if let Some(prior) = prior {
            if probe.manifest_sha256 == prior.manifest_sha256 {
                return Ok(LockEntry {
                    repo: resolved.repo.clone(),
                    git_ref: resolved.git_ref.clone(),
                    resolved_commit: planned.remote.resolved_commit.clone(),
                    bytes: probe.bytes,
                    file_count: probe.file_count,
                    manifest_sha256: probe.manifest_sha256,
                    rules_sha256: planned.rules_sha256.clone(),
                    updated_at: Utc::now(),
                });
            }
        }
    }

    let outcome = crate::materializer::materialize(&resolved.id, tree.working_dir(), resolved, layout, lock_timeout)?;
    Ok(LockEntry {
        repo: resolved.repo.clone(),
        git_ref: resolved.git_ref.clone(),
        resolved_commit: planned.remote.resolved_commit.clone(),
        bytes: outcome.bytes,
        file_count: outcome.file_count,
        manifest_sha256: outcome.manifest_sha256,
        rules_sha256: planned.rules_sha256.clone(),
        updated_at: Utc::now(),
    })
}

fn project_targets(sources: &[PlannedSource], layout: &CacheLayout, project_root: &Path, warnings: &mut Vec<String>) {
    for planned in sources {
        let Some(target_dir) = &planned.resolved.target_dir else { continue };
        let target_abs = if target_dir.is_absolute() {
            target_dir.clone()
        } else {
            project_root.join(target_dir)
        };
        let source_dir = layout.source_dir(&planned.resolved.id);
        if !source_dir.is_dir() {
            continue;
        }
        let projection_root = match target::projection_root(&source_dir, planned.resolved.unwrap_single_root_dir) {
            Ok(root) => root,
            Err(e) => {
                warnings.push(format!("source {:?}: target not projected: {e}", planned.resolved.id));
                continue;
            }
        };
        if let Err(e) = target::project(&planned.resolved.id, &projection_root, &target_abs, planned.resolved.target_mode) {
            warnings.push(format!("source {:?}: target not projected: {e}", planned.resolved.id));
        }
    }
}

type EntryList = Vec<(String, std::result::Result<LockEntry, Error>)>;

fn retry_failed_verifications(
    sources: &[PlannedSource],
    lock: &Lock,
    fetcher: &dyn WorkingTreeFetcher,
    layout: &CacheLayout,
    options: &SyncOptions,
    entries: &mut EntryList,
    warnings: &mut Vec<String>,
) {
    let failing = sources_with_issues(sources, layout, entries);
    for planned in failing {
        let result = run_job(planned, lock, fetcher, layout, options.lock_timeout, true);
        if let Some(slot) = entries.iter_mut().find(|(id, _)| id == &planned.resolved.id) {
            slot.1 = result;
        } else {
            entries.push((planned.resolved.id.clone(), result));
        }
    }

    for planned in sources_with_issues(sources, layout, entries) {
        let message = format!("source {:?}: verification failed after repair attempt", planned.resolved.id);
        tracing::warn!(id = %planned.resolved.id, "verification failed after repair attempt");
        warnings.push(message);
    }
}

fn sources_with_issues<'a>(
    sources: &'a [PlannedSource],
    layout: &CacheLayout,
    entries: &EntryList,
) -> Vec<&'a PlannedSource> {
    sources
        .iter()
        .filter(|planned| {
            let succeeded = entries.iter().any(|(id, outcome)| id == &planned.resolved.id && outcome.is_ok());
            succeeded && !verify::verify(layout, &planned.resolved.id).is_empty()
        })
        .collect()
}

fn write_toc(id: &str, layout: &CacheLayout, format: TocFormat) -> Result<()> {
    let manifest_path = layout.manifest_path(id);
    if !manifest_path.is_file() {
        return Ok(());
    }
    let bytes = std::fs::read(&manifest_path).map_err(|source| Error::Io { path: manifest_path.clone(), source })?;
    let manifest = crate::model::Manifest::parse(&bytes)
        .map_err(|e| Error::ManifestMissing { id: id.to_string(), cause: e.to_string() })?;
    let rendered = toc::render(id, &manifest, format);
    let toc_path = layout.toc_path(id);
    crate::atomic::write_atomic(&toc_path, rendered.as_bytes()).map_err(|source| Error::Io { path: toc_path, source })
}

/// All issues currently reported by [`verify::verify`] across every
/// configured source, regardless of last sync outcome.
pub fn verify_all(config: &Config, cache_root: &Path, id_filter: Option<&[String]>) -> Vec<(String, Vec<Issue>)> {
    let layout = CacheLayout::new(cache_root.to_path_buf());
    config
        .sources
        .iter()
        .filter(|s| id_filter.is_none_or(|f| f.contains(&s.id)))
        .map(|s| (s.id.clone(), verify::verify(&layout, &s.id)))
        .collect()
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
