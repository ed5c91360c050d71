// src/lib.rs

pub mod cli;
pub mod config;
pub mod convert;
pub mod dispatch;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod tasks;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::{ConfigFile, load_or_default};
use crate::convert::{convert, plan_writes, to_wire};
use crate::dispatch::{CodexWorker, DispatchOptions, Dispatcher};
use crate::fs::{FileSystem, RealFileSystem};
use crate::tasks::{Task, parse_task_file, ready_tasks, update_status, validate_tasks};

/// High-level entry point used by `main.rs`.
///
/// Loads config, then runs the selected subcommand. All command output goes
/// to stdout; logs go to stderr.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref())?;
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    match args.command {
        Command::Convert { file, wire, plan } => run_convert(fs.as_ref(), &cfg, &file, wire, plan),
        Command::Tasks { file, ready } => run_tasks(fs.as_ref(), &cfg, &file, ready),
        Command::SetStatus { file, id, status } => {
            if !update_status(fs.as_ref(), &file, &id, &status)? {
                bail!("task '{}' not found in {:?}", id, file);
            }
            println!("{id}: {}", tasks::status_cell(&status));
            Ok(())
        }
        Command::Validate { file } => {
            let table = parse_task_file(fs.as_ref(), &file, &cfg.tasks)?;
            validate_tasks(table.tasks())?;
            println!("{} tasks, dependency graph ok", table.len());
            Ok(())
        }
        Command::Dispatch {
            file,
            once,
            dry_run,
            max_tasks,
        } => {
            let options = DispatchOptions {
                once,
                dry_run,
                max_tasks,
            };
            let worker = CodexWorker::new(cfg.worker.clone());
            let mut dispatcher = Dispatcher::new(fs, file, cfg.tasks.clone(), worker, options);
            let summary = dispatcher.run().await?;

            if dry_run {
                println!("ready tasks ({}):", summary.planned.len());
                for id in &summary.planned {
                    println!("  - {id}");
                }
            } else {
                info!(
                    completed = summary.completed.len(),
                    failed = summary.failed.len(),
                    "dispatch finished"
                );
                println!(
                    "completed: {:?}\nfailed: {:?}",
                    summary.completed, summary.failed
                );
            }
            Ok(())
        }
    }
}

fn run_convert(
    fs: &dyn FileSystem,
    cfg: &ConfigFile,
    file: &Path,
    wire: bool,
    plan: bool,
) -> Result<()> {
    let markdown = fs.read_to_string(file)?;
    let blocks = convert(&markdown);
    info!(blocks = blocks.len(), file = ?file, "converted markdown");

    let json = if plan {
        let steps = plan_writes(&blocks, cfg.convert.max_batch_size)?;
        debug!(steps = steps.len(), "write plan built");
        serde_json::to_string_pretty(&steps)?
    } else if wire {
        let payloads: Vec<_> = blocks.iter().map(to_wire).collect();
        serde_json::to_string_pretty(&payloads)?
    } else {
        serde_json::to_string_pretty(&blocks)?
    };

    println!("{json}");
    Ok(())
}

fn run_tasks(fs: &dyn FileSystem, cfg: &ConfigFile, file: &Path, ready: bool) -> Result<()> {
    let table = parse_task_file(fs, file, &cfg.tasks)?;

    let listed: Vec<&Task> = if ready {
        ready_tasks(table.tasks())
    } else {
        table.tasks().iter().collect()
    };

    println!("tasks ({}):", listed.len());
    for task in listed {
        print_task(task);
    }
    Ok(())
}

fn print_task(task: &Task) {
    println!("  - {} [{}] {}", task.id, task.status, task.name);
    println!("      line: {}", task.source_line);
    if !task.dependencies.is_empty() {
        println!("      after: {:?}", task.dependencies);
    }
    if !task.description.is_empty() {
        println!("      description: {}", task.description);
    }
}
