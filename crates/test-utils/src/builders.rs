#![allow(dead_code)]

use mdbridge::tasks::model::{DEFAULT_ID_HEADER, DEFAULT_SECTION_MARKER, DEFAULT_STATUS_HEADER};

/// Builder for a markdown task file with a task section and table.
pub struct TaskFileBuilder {
    preamble: Vec<String>,
    rows: Vec<TaskRow>,
    trailer: Vec<String>,
    section_marker: String,
}

impl TaskFileBuilder {
    pub fn new() -> Self {
        Self {
            preamble: vec!["# Project PRD".to_string(), String::new()],
            rows: Vec::new(),
            trailer: vec![
                String::new(),
                "---".to_string(),
                String::new(),
                "## 3. Notes".to_string(),
            ],
            section_marker: DEFAULT_SECTION_MARKER.to_string(),
        }
    }

    pub fn with_section_marker(mut self, marker: &str) -> Self {
        self.section_marker = marker.to_string();
        self
    }

    pub fn with_preamble_line(mut self, line: &str) -> Self {
        self.preamble.push(line.to_string());
        self
    }

    pub fn with_row(mut self, row: TaskRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn with_trailer_line(mut self, line: &str) -> Self {
        self.trailer.push(line.to_string());
        self
    }

    pub fn build(self) -> String {
        let mut lines = self.preamble;
        lines.push(self.section_marker);
        lines.push(String::new());
        lines.push(format!(
            "| {} | 任务 | {} | 描述 | 预估 | 依赖 |",
            DEFAULT_ID_HEADER, DEFAULT_STATUS_HEADER
        ));
        lines.push("|----|------|------|------|------|------|".to_string());
        for row in self.rows {
            lines.push(row.render());
        }
        lines.extend(self.trailer);
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

impl Default for TaskFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One row of the task table.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub id: String,
    pub name: String,
    pub status: String,
    pub description: String,
    pub estimate: String,
    pub deps: Vec<String>,
}

impl TaskRow {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status: "⏳ PENDING".to_string(),
            description: format!("Do {name}"),
            estimate: "1h".to_string(),
            deps: Vec::new(),
        }
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.deps.push(dep.to_string());
        self
    }

    pub fn render(&self) -> String {
        let deps = if self.deps.is_empty() {
            "-".to_string()
        } else {
            self.deps.join(", ")
        };
        format!(
            "| {} | {} | {} | {} | {} | {} |",
            self.id, self.name, self.status, self.description, self.estimate, deps
        )
    }
}
