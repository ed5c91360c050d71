// src/dispatch/worker.rs

//! Pluggable worker backend.
//!
//! The dispatcher talks to a `Worker` instead of spawning processes itself,
//! so tests can swap in a fake that records tasks and returns scripted
//! outcomes.

use std::future::Future;
use std::pin::Pin;

use crate::config::WorkerSection;
use crate::dispatch::runner::{WorkerResult, run_agent};
use crate::errors::Result;
use crate::tasks::Task;

/// Trait abstracting how a single task is executed.
pub trait Worker: Send {
    fn run(&mut self, task: Task) -> Pin<Box<dyn Future<Output = Result<WorkerResult>> + Send + '_>>;
}

/// Production worker: shells out to the configured coding-agent CLI.
#[derive(Debug, Clone)]
pub struct CodexWorker {
    settings: WorkerSection,
}

impl CodexWorker {
    pub fn new(settings: WorkerSection) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &WorkerSection {
        &self.settings
    }
}

impl Worker for CodexWorker {
    fn run(&mut self, task: Task) -> Pin<Box<dyn Future<Output = Result<WorkerResult>> + Send + '_>> {
        Box::pin(async move { Ok(run_agent(&self.settings, &task).await) })
    }
}
