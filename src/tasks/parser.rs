// src/tasks/parser.rs

//! Task table extraction.
//!
//! Expected layout inside the task section:
//!
//! ```text
//! ## 2. 任务拆解
//!
//! | ID | 任务 | 状态 | 描述 | 预估 | 依赖 |
//! |----|------|------|------|------|------|
//! | T-001 | Setup | ⏳ PENDING | Init repo | 1h | - |
//! | T-002 | Build | ⏳ PENDING | Wire it up | 2h | T-001 |
//!
//! ---
//! ```

use std::path::Path;

use tracing::{debug, trace};

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::tasks::model::{TableMarkers, Task, TaskTable, classify};

/// Minimum number of `|`-split parts for a data row: a leading empty part,
/// id, name, status, description, estimate, dependencies.
pub const MIN_ROW_PARTS: usize = 7;

pub const COL_ID: usize = 1;
pub const COL_NAME: usize = 2;
pub const COL_STATUS: usize = 3;
pub const COL_DESCRIPTION: usize = 4;
pub const COL_DEPENDENCIES: usize = 6;

/// Split a table line on `|` and trim every part. The boundary pipes produce
/// empty first/last parts, so cell `n` of the row is at index `n`.
pub fn split_row(line: &str) -> Vec<&str> {
    line.split('|').map(str::trim).collect()
}

/// Parse a dependency cell: `"T-001, T-002"`, `"T-001"`, `"-"` or empty.
pub fn parse_dependencies(cell: &str) -> Vec<String> {
    let cell = cell.trim();
    if cell.is_empty() || cell == "-" {
        return Vec::new();
    }
    cell.split(',')
        .map(str::trim)
        .filter(|dep| !dep.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract tasks from the text of a task file.
///
/// Lines before the section marker are ignored. A file without the marker
/// yields an empty list.
pub fn parse_tasks(text: &str, markers: &TableMarkers) -> Vec<Task> {
    let mut tasks = Vec::new();
    let mut in_section = false;
    let mut header_found = false;

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();

        if line.contains(&markers.section_marker) {
            in_section = true;
            continue;
        }

        if !in_section {
            continue;
        }

        if header_found && trimmed.starts_with("---") {
            debug!(line = idx + 1, "end of task section");
            break;
        }

        if !trimmed.starts_with('|') {
            continue;
        }

        if line.contains(&markers.id_header) && line.contains(&markers.status_header) {
            header_found = true;
            continue;
        }

        if trimmed.contains("---") {
            continue;
        }

        if let Some(task) = parse_row(line, idx + 1, markers) {
            tasks.push(task);
        }
    }

    debug!(tasks = tasks.len(), "task table parsed");
    tasks
}

fn parse_row(line: &str, source_line: usize, markers: &TableMarkers) -> Option<Task> {
    let parts = split_row(line);
    if parts.len() < MIN_ROW_PARTS {
        trace!(line = source_line, parts = parts.len(), "row too short; skipped");
        return None;
    }

    let id = parts[COL_ID];
    if !id.starts_with(&markers.id_prefix) {
        trace!(line = source_line, id, "row id lacks task prefix; skipped");
        return None;
    }

    let raw_status = parts[COL_STATUS];

    Some(Task {
        id: id.to_string(),
        name: parts[COL_NAME].to_string(),
        status: classify(raw_status),
        description: parts[COL_DESCRIPTION].to_string(),
        dependencies: parse_dependencies(parts[COL_DEPENDENCIES]),
        source_line,
        raw_status: raw_status.to_string(),
    })
}

/// Read and parse a task file.
pub fn parse_task_file(
    fs: &dyn FileSystem,
    path: &Path,
    markers: &TableMarkers,
) -> Result<TaskTable> {
    let text = fs.read_to_string(path)?;
    Ok(TaskTable::new(parse_tasks(&text, markers)))
}
