// src/tasks/mod.rs

//! Markdown task table engine.
//!
//! - [`model`] holds [`Task`], [`TaskStatus`] and status classification.
//! - [`parser`] extracts tasks from the task section of a markdown file.
//! - [`update`] rewrites one row's status cell in place, anywhere in the file
//!   or scoped to the task section.
//! - [`validate`] checks the dependency graph and finds ready tasks.

pub mod model;
pub mod parser;
pub mod update;
pub mod validate;

pub use model::{TableMarkers, Task, TaskStatus, TaskTable, classify, status_cell, status_icon};
pub use parser::{parse_dependencies, parse_task_file, parse_tasks};
pub use update::{rewrite_status, rewrite_status_at, update_status, update_task_status};
pub use validate::{ready_tasks, validate_tasks};
