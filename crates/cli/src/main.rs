// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! doccache CLI entry point.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use doccache::cli::{AddArgs, Cli, Command, CompletionsArgs, InitArgs, PruneArgs, RemoveArgs, SourceFilterArgs, SyncArgs};
use doccache::config::{Config, DEFAULT_CONFIG_NAME, Source};
use doccache::coordinator::{self, SyncOptions};
use doccache::error::{Error, ExitCode, Result};
use doccache::fetcher::GitFetcher;
use doccache::housekeeping;
use doccache::lock_file;
use doccache::model::CacheLayout;

fn init_logging() {
    let filter = EnvFilter::try_from_env("DOCCACHE_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("doccache: {e}");
            ExitCode::from(&e)
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            Cli::command().print_help().map_err(|e| Error::Argument(e.to_string()))?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Sync(args)) => run_sync(&cli, args),
        Some(Command::Verify(args)) => run_verify(&cli, args),
        Some(Command::Status(args)) => run_status(&cli, args),
        Some(Command::Add(args)) => run_add(&cli, args),
        Some(Command::Remove(args)) => run_remove(&cli, args),
        Some(Command::Clean(args)) => run_clean(&cli, args),
        Some(Command::Prune(args)) => run_prune(&cli, args),
        Some(Command::Init(args)) => run_init(&cli, args),
        Some(Command::Completions(args)) => run_completions(args),
    }
}

fn config_path(cli: &Cli, project_root: &Path) -> PathBuf {
    cli.config.clone().unwrap_or_else(|| project_root.join(DEFAULT_CONFIG_NAME))
}

fn lock_path(config_path: &Path) -> PathBuf {
    config_path.with_file_name(lock_file::LOCK_FILE_NAME)
}

fn project_root() -> Result<PathBuf> {
    std::env::current_dir().map_err(|source| Error::Io { path: PathBuf::from("."), source })
}

fn run_sync(cli: &Cli, args: &SyncArgs) -> Result<ExitCode> {
    let project_root = project_root()?;
    let config_path = config_path(cli, &project_root);
    let config = Config::load(&config_path)?;
    let cache_root = config.cache_dir(&project_root);
    let lock_path = lock_path(&config_path);
    let lock = lock_file::load(&lock_path)?;

    let fetcher = GitFetcher::default();
    let id_filter = (!args.id.is_empty()).then_some(args.id.as_slice());
    let options = SyncOptions {
        project_root: &project_root,
        cache_root: &cache_root,
        id_filter,
        offline: args.offline,
        fail_on_miss: args.fail_on_miss,
        worker_count: args.jobs,
        lock_timeout: Duration::from_secs(args.timeout),
        toc_format: args.toc_format,
    };

    let (new_lock, report) = coordinator::sync(&config, &fetcher, &fetcher, &lock, &options)?;
    lock_file::save(&lock_path, &new_lock)?;

    for result in &report.results {
        match &result.error {
            None => println!("{}: {:?}", result.id, result.status),
            Some(e) => println!("{}: failed ({e})", result.id),
        }
    }
    for warning in &report.warnings {
        println!("warning: {warning}");
    }

    Ok(if report.has_failures() { ExitCode::RunFailed } else { ExitCode::Success })
}

fn run_verify(cli: &Cli, args: &SourceFilterArgs) -> Result<ExitCode> {
    let project_root = project_root()?;
    let config_path = config_path(cli, &project_root);
    let config = Config::load(&config_path)?;
    let cache_root = config.cache_dir(&project_root);
    let id_filter = (!args.id.is_empty()).then_some(args.id.as_slice());

    let mut any_issues = false;
    for (id, issues) in coordinator::verify_all(&config, &cache_root, id_filter) {
        if issues.is_empty() {
            println!("{id}: ok");
        } else {
            any_issues = true;
            for issue in issues {
                println!("{id}: {issue:?}");
            }
        }
    }

    Ok(if any_issues { ExitCode::RunFailed } else { ExitCode::Success })
}

fn run_status(cli: &Cli, args: &SourceFilterArgs) -> Result<ExitCode> {
    let project_root = project_root()?;
    let config_path = config_path(cli, &project_root);
    let config = Config::load(&config_path)?;
    let lock_path = lock_path(&config_path);
    let lock = lock_file::load(&lock_path)?;

    for source in &config.sources {
        if !args.id.is_empty() && !args.id.contains(&source.id) {
            continue;
        }
        match lock.sources.get(&source.id) {
            Some(entry) => println!(
                "{}: {} ({} files, {} bytes, updated {})",
                source.id, entry.resolved_commit, entry.file_count, entry.bytes, entry.updated_at
            ),
            None => println!("{}: not synced", source.id),
        }
    }
    Ok(ExitCode::Success)
}

fn run_add(cli: &Cli, args: &AddArgs) -> Result<ExitCode> {
    let project_root = project_root()?;
    let config_path = config_path(cli, &project_root);
    let mut config = Config::load(&config_path).unwrap_or(Config {
        cache_dir: None,
        host_allow_list: None,
        defaults: None,
        sources: Vec::new(),
    });

    if config.sources.iter().any(|s| s.id == args.id) {
        return Err(Error::Config { message: format!("source {:?} already exists", args.id), path: Some(config_path) });
    }

    let source = Source {
        id: args.id.clone(),
        repo: args.repo.clone(),
        git_ref: args.git_ref.clone(),
        include: (!args.include.is_empty()).then(|| args.include.clone()),
        exclude: (!args.exclude.is_empty()).then(|| args.exclude.clone()),
        max_bytes: None,
        max_files: None,
        ignore_hidden: None,
        unwrap_single_root_dir: None,
        target_dir: args.target_dir.clone(),
        target_mode: args.target_mode,
        required: args.required.then_some(true),
    };

    let cache_root = config.cache_dir(&project_root);
    config.resolve(&source, &project_root, &cache_root)?;
    config.sources.push(source);
    config.save(&config_path)?;
    Ok(ExitCode::Success)
}

fn run_remove(cli: &Cli, args: &RemoveArgs) -> Result<ExitCode> {
    let project_root = project_root()?;
    let config_path = config_path(cli, &project_root);
    let mut config = Config::load(&config_path)?;
    let before = config.sources.len();
    config.sources.retain(|s| s.id != args.id);
    if config.sources.len() == before {
        return Err(Error::Argument(format!("no configured source with id {:?}", args.id)));
    }
    config.save(&config_path)?;

    let lock_path = lock_path(&config_path);
    let lock = lock_file::load(&lock_path)?;
    lock_file::save(&lock_path, &lock_file::without(&lock, &args.id))?;
    Ok(ExitCode::Success)
}

fn run_clean(cli: &Cli, args: &SourceFilterArgs) -> Result<ExitCode> {
    let project_root = project_root()?;
    let config_path = config_path(cli, &project_root);
    let config = Config::load(&config_path)?;
    let cache_root = config.cache_dir(&project_root);
    let layout = CacheLayout::new(cache_root);
    let lock_path = lock_path(&config_path);
    let lock = lock_file::load(&lock_path)?;

    let updated = match args.id.as_slice() {
        [] => housekeeping::clean(&layout, &lock, None)?,
        ids => {
            let mut current = lock;
            for id in ids {
                current = housekeeping::clean(&layout, &current, Some(id.as_str()))?;
            }
            current
        }
    };
    lock_file::save(&lock_path, &updated)?;
    Ok(ExitCode::Success)
}

fn run_prune(cli: &Cli, args: &PruneArgs) -> Result<ExitCode> {
    let project_root = project_root()?;
    let config_path = config_path(cli, &project_root);
    let config = Config::load(&config_path)?;
    let cache_root = config.cache_dir(&project_root);

    let report = housekeeping::prune(&cache_root, args.dry_run)?;
    let verb = if args.dry_run { "would remove" } else { "removed" };
    for path in &report.removed {
        println!("{verb}: {}", path.display());
    }
    Ok(ExitCode::Success)
}

fn run_init(cli: &Cli, args: &InitArgs) -> Result<ExitCode> {
    let project_root = project_root()?;
    let config_path = config_path(cli, &project_root);
    if config_path.is_file() && !args.force {
        return Err(Error::Config {
            message: "config already exists (use --force to overwrite)".to_string(),
            path: Some(config_path),
        });
    }
    let config = Config { cache_dir: None, host_allow_list: None, defaults: None, sources: Vec::new() };
    config.save(&config_path)?;
    println!("wrote {}", config_path.display());
    Ok(ExitCode::Success)
}

fn run_completions(args: &CompletionsArgs) -> Result<ExitCode> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, name, &mut std::io::stdout());
    Ok(ExitCode::Success)
}
