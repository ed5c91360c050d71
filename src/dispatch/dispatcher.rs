// src/dispatch/dispatcher.rs

//! Sequential task dispatch loop.
//!
//! Each iteration re-parses the task file, so status changes made by the
//! dispatcher (or by hand) are always read back from disk. Tasks run one at
//! a time; this also serialises every write to the task file.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::dispatch::worker::Worker;
use crate::errors::{MdbridgeError, Result};
use crate::fs::FileSystem;
use crate::tasks::{
    TableMarkers, Task, TaskStatus, parse_task_file, ready_tasks, update_task_status, validate_tasks,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchOptions {
    /// Run at most one task.
    pub once: bool,
    /// Report ready tasks without running anything.
    pub dry_run: bool,
    /// Upper bound on tasks started in this invocation.
    pub max_tasks: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub completed: Vec<String>,
    pub failed: Vec<String>,
    /// Ready task ids reported by a dry run.
    pub planned: Vec<String>,
}

pub struct Dispatcher<W: Worker> {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    markers: TableMarkers,
    worker: W,
    options: DispatchOptions,
}

impl<W: Worker> Dispatcher<W> {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        path: impl Into<PathBuf>,
        markers: TableMarkers,
        worker: W,
        options: DispatchOptions,
    ) -> Self {
        Self {
            fs,
            path: path.into(),
            markers,
            worker,
            options,
        }
    }

    pub async fn run(&mut self) -> Result<DispatchSummary> {
        let mut summary = DispatchSummary::default();
        let mut started = 0usize;

        loop {
            if self.options.max_tasks.is_some_and(|max| started >= max) {
                info!(started, "task limit reached");
                break;
            }

            let table = parse_task_file(self.fs.as_ref(), &self.path, &self.markers)?;
            validate_tasks(table.tasks())?;

            let ready = ready_tasks(table.tasks());

            if self.options.dry_run {
                summary.planned = ready.iter().map(|t| t.id.clone()).collect();
                info!(ready = summary.planned.len(), "dry run; no tasks started");
                break;
            }

            let Some(task) = ready.first().map(|t| (*t).clone()) else {
                info!(
                    total = table.len(),
                    done = table.count_by_status(TaskStatus::Done),
                    "no ready tasks left"
                );
                break;
            };

            started += 1;
            if self.run_one(task, &mut summary).await? == TaskStatus::Failed {
                warn!("task failed; dependents stay pending");
            }

            if self.options.once {
                break;
            }
        }

        Ok(summary)
    }

    async fn run_one(&mut self, task: Task, summary: &mut DispatchSummary) -> Result<TaskStatus> {
        info!(task = %task.id, name = %task.name, "dispatching task");
        self.set_status(&task.id, TaskStatus::InProgress)?;

        let final_status = match self.worker.run(task.clone()).await {
            Ok(result) if result.success => TaskStatus::Done,
            Ok(result) => {
                warn!(
                    task = %task.id,
                    exit_code = result.exit_code,
                    error = result.error_message.as_deref().unwrap_or(""),
                    "worker reported failure"
                );
                TaskStatus::Failed
            }
            Err(e) => {
                error!(task = %task.id, error = %e, "worker error");
                TaskStatus::Failed
            }
        };

        self.set_status(&task.id, final_status)?;
        match final_status {
            TaskStatus::Done => summary.completed.push(task.id),
            _ => summary.failed.push(task.id),
        }
        Ok(final_status)
    }

    /// Status writes are scoped to the task section, so the row the loop
    /// re-reads is the row that changes.
    fn set_status(&self, task_id: &str, status: TaskStatus) -> Result<()> {
        let updated = update_task_status(
            self.fs.as_ref(),
            &self.path,
            &self.markers,
            task_id,
            status.as_str(),
        )?;
        if updated {
            Ok(())
        } else {
            Err(MdbridgeError::TaskNotFound(task_id.to_string()))
        }
    }
}
