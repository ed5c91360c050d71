// src/tasks/model.rs

//! Task records and status handling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Task status as understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Done,
    Blocked,
    Failed,
    Skipped,
}

/// Classification order. A status string containing several keywords
/// resolves to the first one listed here (so "PENDING -> DONE" is `Done`).
/// Kept as-is for compatibility with existing task files.
const CLASSIFY_ORDER: [TaskStatus; 6] = [
    TaskStatus::Done,
    TaskStatus::Pending,
    TaskStatus::InProgress,
    TaskStatus::Blocked,
    TaskStatus::Failed,
    TaskStatus::Skipped,
];

/// Icons prefixed to a status cell when it is rewritten. `FAILED` has no
/// icon; `RETRY` is not a status but still gets one.
const ICON_ORDER: [(&str, &str); 6] = [
    ("DONE", "✅"),
    ("PENDING", "⏳"),
    ("IN_PROGRESS", "🔄"),
    ("BLOCKED", "🚫"),
    ("SKIPPED", "⏭️"),
    ("RETRY", "🔁"),
];

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
            TaskStatus::Blocked => "BLOCKED",
            TaskStatus::Failed => "FAILED",
            TaskStatus::Skipped => "SKIPPED",
        }
    }

    /// Status cell text as written back to a task file, e.g. `"✅ DONE"`.
    pub fn cell_text(self) -> String {
        status_cell(self.as_str())
    }

    /// Whether dependents may start once this status is reached.
    pub fn satisfies_dependents(self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Skipped)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalise free-form status text (`"⏳ pending"`, `"✅ DONE"`) into a
/// [`TaskStatus`] by case-insensitive substring match. Unknown text is
/// `Pending`.
pub fn classify(raw: &str) -> TaskStatus {
    let upper = raw.trim().to_uppercase();
    CLASSIFY_ORDER
        .into_iter()
        .find(|status| upper.contains(status.as_str()))
        .unwrap_or(TaskStatus::Pending)
}

/// Icon for new status text, by the same ordered substring rule as
/// [`classify`].
pub fn status_icon(text: &str) -> Option<&'static str> {
    let upper = text.to_uppercase();
    ICON_ORDER
        .iter()
        .find(|(keyword, _)| upper.contains(keyword))
        .map(|(_, icon)| *icon)
}

/// Compose the status cell for `new_status`: icon (if any), a space, then the
/// text verbatim.
pub fn status_cell(new_status: &str) -> String {
    match status_icon(new_status) {
        Some(icon) => format!("{icon} {new_status}"),
        None => new_status.to_string(),
    }
}

/// One row of the task table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub status: TaskStatus,
    pub description: String,
    pub dependencies: Vec<String>,
    /// 1-based line number of the row in the source file.
    pub source_line: usize,
    /// Status cell exactly as written (icon included).
    pub raw_status: String,
}

/// Literal markers locating the task table inside a markdown file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableMarkers {
    /// Text fragment of the heading that opens the task section.
    pub section_marker: String,
    /// Header-row text for the ID column.
    pub id_header: String,
    /// Header-row text for the status column.
    pub status_header: String,
    /// Prefix every task id starts with.
    pub id_prefix: String,
}

pub const DEFAULT_SECTION_MARKER: &str = "## 2. 任务拆解";
pub const DEFAULT_ID_HEADER: &str = "ID";
pub const DEFAULT_STATUS_HEADER: &str = "状态";
pub const DEFAULT_ID_PREFIX: &str = "T-";

impl Default for TableMarkers {
    fn default() -> Self {
        Self {
            section_marker: DEFAULT_SECTION_MARKER.to_string(),
            id_header: DEFAULT_ID_HEADER.to_string(),
            status_header: DEFAULT_STATUS_HEADER.to_string(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }
}

/// Parsed tasks in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskTable {
    tasks: Vec<Task>,
}

impl TaskTable {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a task by id. Ids are not checked for uniqueness at parse
    /// time; the last row with the id wins.
    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().rev().find(|t| t.id == id)
    }

    pub fn count_by_status(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }
}
