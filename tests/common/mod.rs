#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub use mdbridge_test_utils::builders::{TaskFileBuilder, TaskRow};
pub use mdbridge_test_utils::fake_worker::FakeWorker;
pub use mdbridge_test_utils::init_tracing;

/// Write `contents` to a fresh temp file; the file lives as long as the handle.
pub fn temp_file_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// Three-task chain used by several tests: T-001 <- T-002 <- T-003.
pub fn chain_task_file() -> String {
    TaskFileBuilder::new()
        .with_row(TaskRow::new("T-001", "Setup"))
        .with_row(TaskRow::new("T-002", "Build").after("T-001"))
        .with_row(TaskRow::new("T-003", "Ship").after("T-002"))
        .build()
}
