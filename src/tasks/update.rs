// src/tasks/update.rs

//! In-place status rewrite for a single task row.
//!
//! The whole file is read, one line is rewritten in memory, and the whole
//! file is written back. Nothing is written when no row matches. There is no
//! locking: concurrent writers to one file must be serialised by the caller.

use std::path::Path;

use tracing::{debug, info};

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::tasks::model::{TableMarkers, status_cell};
use crate::tasks::parser::{COL_ID, COL_STATUS, MIN_ROW_PARTS, parse_tasks, split_row};

/// Rewrite the status cell of the first structurally valid row whose id cell
/// equals `task_id`.
///
/// Returns the new text, or `None` if no such row exists. The rewritten row
/// has its cells re-joined with `" | "`; every other line, and every line
/// terminator, is reproduced exactly.
pub fn rewrite_status(text: &str, task_id: &str, new_status: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len() + 16);
    let mut found = false;

    for line in text.split_inclusive('\n') {
        if !found {
            if let Some(rewritten) = rewrite_row(line, task_id, new_status) {
                out.push_str(&rewritten);
                found = true;
                continue;
            }
        }
        out.push_str(line);
    }

    found.then_some(out)
}

/// Like [`rewrite_status`], but only the row on 1-based line `line_no` is
/// considered. Returns `None` unless that line is a valid row for `task_id`.
pub fn rewrite_status_at(
    text: &str,
    line_no: usize,
    task_id: &str,
    new_status: &str,
) -> Option<String> {
    let mut out = String::with_capacity(text.len() + 16);
    let mut found = false;

    for (idx, line) in text.split_inclusive('\n').enumerate() {
        if idx + 1 == line_no {
            if let Some(rewritten) = rewrite_row(line, task_id, new_status) {
                out.push_str(&rewritten);
                found = true;
                continue;
            }
        }
        out.push_str(line);
    }

    found.then_some(out)
}

fn rewrite_row(line: &str, task_id: &str, new_status: &str) -> Option<String> {
    let (body, terminator) = split_terminator(line);

    if !body.trim().starts_with('|') || !body.contains(task_id) {
        return None;
    }

    let mut parts: Vec<String> = split_row(body).into_iter().map(str::to_string).collect();
    if parts.len() < MIN_ROW_PARTS || parts[COL_ID] != task_id {
        return None;
    }

    parts[COL_STATUS] = status_cell(new_status);
    let row = parts.join(" | ");

    Some(format!("{}{}", row.trim(), terminator))
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Set the status of `task_id` in the task file at `path`.
///
/// Returns `Ok(false)` (and leaves the file untouched) when the row is not
/// found.
pub fn update_status(
    fs: &dyn FileSystem,
    path: &Path,
    task_id: &str,
    new_status: &str,
) -> Result<bool> {
    let text = fs.read_to_string(path)?;

    match rewrite_status(&text, task_id, new_status) {
        Some(updated) => {
            fs.write(path, updated.as_bytes())?;
            info!(task = %task_id, status = %new_status, path = ?path, "task status updated");
            Ok(true)
        }
        None => {
            debug!(task = %task_id, path = ?path, "no matching task row; file left untouched");
            Ok(false)
        }
    }
}

/// Set the status of `task_id` on its row inside the task section.
///
/// Rows with the same id elsewhere in the file (summary tables, notes) are
/// left alone. Returns `Ok(false)` when the section has no such row.
pub fn update_task_status(
    fs: &dyn FileSystem,
    path: &Path,
    markers: &TableMarkers,
    task_id: &str,
    new_status: &str,
) -> Result<bool> {
    let text = fs.read_to_string(path)?;

    let tasks = parse_tasks(&text, markers);
    let Some(line_no) = tasks.iter().find(|t| t.id == task_id).map(|t| t.source_line) else {
        debug!(task = %task_id, path = ?path, "task not in task section; file left untouched");
        return Ok(false);
    };

    match rewrite_status_at(&text, line_no, task_id, new_status) {
        Some(updated) => {
            fs.write(path, updated.as_bytes())?;
            info!(task = %task_id, status = %new_status, line = line_no, "task status updated");
            Ok(true)
        }
        None => Ok(false),
    }
}
