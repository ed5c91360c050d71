// src/dispatch/mod.rs

//! Task dispatch through an external coding-agent CLI.
//!
//! - [`runner`] spawns one agent process and collects its JSONL events.
//! - [`worker`] defines the [`Worker`] backend trait and the real backend.
//! - [`dispatcher`] picks ready tasks and records status transitions.

pub mod dispatcher;
pub mod runner;
pub mod worker;

pub use dispatcher::{DispatchOptions, DispatchSummary, Dispatcher};
pub use runner::{TIMEOUT_MESSAGE, WorkerResult, run_agent};
pub use worker::{CodexWorker, Worker};
