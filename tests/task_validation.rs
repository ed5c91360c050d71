// tests/task_validation.rs

use mdbridge::errors::MdbridgeError;
use mdbridge::tasks::{Task, TaskStatus, ready_tasks, validate_tasks};

fn task(id: &str, status: TaskStatus, deps: &[&str]) -> Task {
    Task {
        id: id.to_string(),
        name: format!("Task {id}"),
        status,
        description: String::new(),
        dependencies: deps.iter().map(|d| d.to_string()).collect(),
        source_line: 0,
        raw_status: status.as_str().to_string(),
    }
}

#[test]
fn valid_graph_passes() {
    let tasks = vec![
        task("T-001", TaskStatus::Done, &[]),
        task("T-002", TaskStatus::Pending, &["T-001"]),
        task("T-003", TaskStatus::Pending, &["T-001", "T-002"]),
    ];
    validate_tasks(&tasks).expect("graph should be valid");
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut first = task("T-001", TaskStatus::Pending, &[]);
    first.source_line = 5;
    let mut second = task("T-001", TaskStatus::Pending, &[]);
    second.source_line = 9;

    let err = validate_tasks(&[first, second]).expect_err("duplicate must fail");
    match err {
        MdbridgeError::TaskTable(msg) => {
            assert!(msg.contains("T-001"), "msg: {msg}");
            assert!(msg.contains('5') && msg.contains('9'), "msg: {msg}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unknown_dependency_is_rejected() {
    let tasks = vec![task("T-001", TaskStatus::Pending, &["T-404"])];

    let err = validate_tasks(&tasks).expect_err("unknown dep must fail");
    assert!(matches!(err, MdbridgeError::TaskTable(ref m) if m.contains("T-404")));
}

#[test]
fn self_dependency_is_rejected() {
    let tasks = vec![task("T-001", TaskStatus::Pending, &["T-001"])];

    let err = validate_tasks(&tasks).expect_err("self dep must fail");
    assert!(matches!(err, MdbridgeError::TaskTable(ref m) if m.contains("itself")));
}

#[test]
fn cycle_is_rejected() {
    let tasks = vec![
        task("T-001", TaskStatus::Pending, &["T-003"]),
        task("T-002", TaskStatus::Pending, &["T-001"]),
        task("T-003", TaskStatus::Pending, &["T-002"]),
    ];

    let err = validate_tasks(&tasks).expect_err("cycle must fail");
    assert!(matches!(err, MdbridgeError::DependencyCycle(_)), "got {err:?}");
}

#[test]
fn ready_tasks_need_satisfied_dependencies() {
    let tasks = vec![
        task("T-001", TaskStatus::Done, &[]),
        task("T-002", TaskStatus::Skipped, &[]),
        task("T-003", TaskStatus::Pending, &["T-001", "T-002"]),
        task("T-004", TaskStatus::Pending, &["T-005"]),
        task("T-005", TaskStatus::Failed, &[]),
        task("T-006", TaskStatus::Pending, &[]),
        task("T-007", TaskStatus::InProgress, &[]),
        task("T-008", TaskStatus::Pending, &["T-007"]),
        task("T-009", TaskStatus::Pending, &["T-missing"]),
    ];

    let ready: Vec<&str> = ready_tasks(&tasks).iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ready, vec!["T-003", "T-006"]);
}

#[test]
fn no_tasks_means_nothing_ready() {
    assert!(ready_tasks(&[]).is_empty());
    validate_tasks(&[]).expect("empty list is valid");
}
