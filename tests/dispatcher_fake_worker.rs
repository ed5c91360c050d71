// tests/dispatcher_fake_worker.rs

mod common;
use crate::common::{FakeWorker, TaskFileBuilder, TaskRow, chain_task_file, init_tracing};

use std::path::Path;
use std::sync::{Arc, Mutex};

use mdbridge::dispatch::{DispatchOptions, Dispatcher};
use mdbridge::errors::MdbridgeError;
use mdbridge::fs::FileSystem;
use mdbridge::fs::mock::MockFileSystem;
use mdbridge::tasks::{TableMarkers, TaskStatus, parse_tasks};
use mdbridge_test_utils::with_timeout;

const PRD: &str = "/project/PRD.md";

fn setup(text: String) -> (MockFileSystem, Arc<dyn FileSystem>) {
    init_tracing();
    let mock = MockFileSystem::new();
    mock.add_file(PRD, text);
    let fs: Arc<dyn FileSystem> = Arc::new(mock.clone());
    (mock, fs)
}

fn statuses(mock: &MockFileSystem) -> Vec<(String, TaskStatus)> {
    let text = mock.contents(Path::new(PRD)).expect("task file");
    parse_tasks(&text, &TableMarkers::default())
        .into_iter()
        .map(|t| (t.id, t.status))
        .collect()
}

#[tokio::test]
async fn runs_chain_in_dependency_order() {
    let (mock, fs) = setup(chain_task_file());
    let executed = Arc::new(Mutex::new(Vec::new()));

    let mut dispatcher = Dispatcher::new(
        fs,
        PRD,
        TableMarkers::default(),
        FakeWorker::new(executed.clone()),
        DispatchOptions::default(),
    );
    let summary = with_timeout(dispatcher.run()).await.expect("dispatch");

    assert_eq!(*executed.lock().unwrap(), vec!["T-001", "T-002", "T-003"]);
    assert_eq!(summary.completed, vec!["T-001", "T-002", "T-003"]);
    assert!(summary.failed.is_empty());
    assert!(
        statuses(&mock)
            .iter()
            .all(|(_, status)| *status == TaskStatus::Done)
    );
    // IN_PROGRESS then DONE for each task.
    assert_eq!(mock.write_count(), 6);
}

#[tokio::test]
async fn failure_keeps_dependents_pending() {
    let text = TaskFileBuilder::new()
        .with_row(TaskRow::new("T-001", "Setup"))
        .with_row(TaskRow::new("T-002", "Build").after("T-001"))
        .with_row(TaskRow::new("T-003", "Docs"))
        .build();
    let (mock, fs) = setup(text);
    let executed = Arc::new(Mutex::new(Vec::new()));

    let mut dispatcher = Dispatcher::new(
        fs,
        PRD,
        TableMarkers::default(),
        FakeWorker::new(executed.clone()).failing("T-001"),
        DispatchOptions::default(),
    );
    let summary = with_timeout(dispatcher.run()).await.expect("dispatch");

    assert_eq!(*executed.lock().unwrap(), vec!["T-001", "T-003"]);
    assert_eq!(summary.failed, vec!["T-001"]);
    assert_eq!(summary.completed, vec!["T-003"]);
    assert_eq!(
        statuses(&mock),
        vec![
            ("T-001".to_string(), TaskStatus::Failed),
            ("T-002".to_string(), TaskStatus::Pending),
            ("T-003".to_string(), TaskStatus::Done),
        ]
    );
}

#[tokio::test]
async fn once_runs_a_single_task() {
    let (mock, fs) = setup(chain_task_file());
    let executed = Arc::new(Mutex::new(Vec::new()));

    let mut dispatcher = Dispatcher::new(
        fs,
        PRD,
        TableMarkers::default(),
        FakeWorker::new(executed.clone()),
        DispatchOptions {
            once: true,
            ..DispatchOptions::default()
        },
    );
    let summary = with_timeout(dispatcher.run()).await.expect("dispatch");

    assert_eq!(summary.completed, vec!["T-001"]);
    assert_eq!(*executed.lock().unwrap(), vec!["T-001"]);
    assert_eq!(statuses(&mock)[1].1, TaskStatus::Pending);
}

#[tokio::test]
async fn max_tasks_caps_started_tasks() {
    let (_mock, fs) = setup(chain_task_file());
    let executed = Arc::new(Mutex::new(Vec::new()));

    let mut dispatcher = Dispatcher::new(
        fs,
        PRD,
        TableMarkers::default(),
        FakeWorker::new(executed.clone()),
        DispatchOptions {
            max_tasks: Some(2),
            ..DispatchOptions::default()
        },
    );
    let summary = with_timeout(dispatcher.run()).await.expect("dispatch");

    assert_eq!(summary.completed, vec!["T-001", "T-002"]);
}

#[tokio::test]
async fn dry_run_reports_ready_without_writing() {
    let text = TaskFileBuilder::new()
        .with_row(TaskRow::new("T-001", "Setup"))
        .with_row(TaskRow::new("T-002", "Build").after("T-001"))
        .with_row(TaskRow::new("T-003", "Docs"))
        .build();
    let (mock, fs) = setup(text);
    let executed = Arc::new(Mutex::new(Vec::new()));

    let mut dispatcher = Dispatcher::new(
        fs,
        PRD,
        TableMarkers::default(),
        FakeWorker::new(executed.clone()),
        DispatchOptions {
            dry_run: true,
            ..DispatchOptions::default()
        },
    );
    let summary = with_timeout(dispatcher.run()).await.expect("dispatch");

    assert_eq!(summary.planned, vec!["T-001", "T-003"]);
    assert!(executed.lock().unwrap().is_empty());
    assert_eq!(mock.write_count(), 0);
}

#[tokio::test]
async fn cyclic_table_is_refused_before_running() {
    let text = TaskFileBuilder::new()
        .with_row(TaskRow::new("T-001", "A").after("T-002"))
        .with_row(TaskRow::new("T-002", "B").after("T-001"))
        .build();
    let (mock, fs) = setup(text);
    let executed = Arc::new(Mutex::new(Vec::new()));

    let mut dispatcher = Dispatcher::new(
        fs,
        PRD,
        TableMarkers::default(),
        FakeWorker::new(executed.clone()),
        DispatchOptions::default(),
    );
    let err = with_timeout(dispatcher.run()).await.expect_err("cycle must fail");

    assert!(matches!(err, MdbridgeError::DependencyCycle(_)));
    assert!(executed.lock().unwrap().is_empty());
    assert_eq!(mock.write_count(), 0);
}

#[tokio::test]
async fn nothing_to_do_when_all_done() {
    let text = TaskFileBuilder::new()
        .with_row(TaskRow::new("T-001", "Setup").status("✅ DONE"))
        .build();
    let (_mock, fs) = setup(text);
    let executed = Arc::new(Mutex::new(Vec::new()));

    let mut dispatcher = Dispatcher::new(
        fs,
        PRD,
        TableMarkers::default(),
        FakeWorker::new(executed.clone()),
        DispatchOptions::default(),
    );
    let summary = with_timeout(dispatcher.run()).await.expect("dispatch");

    assert!(summary.completed.is_empty());
    assert!(executed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn worker_error_marks_task_failed() {
    let text = TaskFileBuilder::new()
        .with_row(TaskRow::new("T-001", "Setup"))
        .with_row(TaskRow::new("T-002", "Docs"))
        .build();
    let (mock, fs) = setup(text);
    let executed = Arc::new(Mutex::new(Vec::new()));

    let mut dispatcher = Dispatcher::new(
        fs,
        PRD,
        TableMarkers::default(),
        FakeWorker::new(executed.clone()).erroring("T-001"),
        DispatchOptions::default(),
    );
    let summary = with_timeout(dispatcher.run()).await.expect("dispatch");

    assert_eq!(summary.failed, vec!["T-001"]);
    assert_eq!(summary.completed, vec!["T-002"]);
    assert_eq!(statuses(&mock)[0].1, TaskStatus::Failed);
}

#[tokio::test]
async fn status_writes_stay_inside_task_section() {
    let summary_row = "| T-001 | Setup | ⏳ PENDING | Overview copy | 1h | - |";
    let text = TaskFileBuilder::new()
        .with_preamble_line("| ID | 任务 | 状态 | 描述 | 预估 | 依赖 |")
        .with_preamble_line("|----|------|------|------|------|------|")
        .with_preamble_line(summary_row)
        .with_preamble_line("")
        .with_row(TaskRow::new("T-001", "Setup"))
        .build();
    let (mock, fs) = setup(text);
    let executed = Arc::new(Mutex::new(Vec::new()));

    let mut dispatcher = Dispatcher::new(
        fs,
        PRD,
        TableMarkers::default(),
        FakeWorker::new(executed.clone()),
        DispatchOptions {
            max_tasks: Some(4),
            ..DispatchOptions::default()
        },
    );
    let summary = with_timeout(dispatcher.run()).await.expect("dispatch");

    assert_eq!(*executed.lock().unwrap(), vec!["T-001"]);
    assert_eq!(summary.completed, vec!["T-001"]);
    assert_eq!(statuses(&mock), vec![("T-001".to_string(), TaskStatus::Done)]);

    let contents = mock.contents(Path::new(PRD)).expect("task file");
    assert!(contents.contains(summary_row));
}
