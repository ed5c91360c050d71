// tests/config_loading.rs

mod common;
use crate::common::temp_file_with;

use std::path::PathBuf;

use mdbridge::config::{ConfigFile, RawConfigFile, load_and_validate, load_from_path, load_or_default};
use mdbridge::errors::MdbridgeError;

#[test]
fn full_config_is_loaded() {
    let file = temp_file_with(
        r###"
[tasks]
section_marker = "## Tasks"
id_header = "Id"
status_header = "Status"
id_prefix = "JOB-"

[convert]
max_batch_size = 20

[worker]
program = "my-agent"
args = ["run"]
timeout_secs = 60
work_dir = "/tmp/work"
"###,
    );

    let cfg = load_and_validate(file.path()).expect("valid config");

    assert_eq!(cfg.tasks.section_marker, "## Tasks");
    assert_eq!(cfg.tasks.id_header, "Id");
    assert_eq!(cfg.tasks.status_header, "Status");
    assert_eq!(cfg.tasks.id_prefix, "JOB-");
    assert_eq!(cfg.convert.max_batch_size, 20);
    assert_eq!(cfg.worker.program, "my-agent");
    assert_eq!(cfg.worker.args, vec!["run"]);
    assert_eq!(cfg.worker.timeout_secs, 60);
    assert_eq!(cfg.worker.work_dir, Some(PathBuf::from("/tmp/work")));
}

#[test]
fn empty_file_uses_defaults() {
    let file = temp_file_with("");

    let cfg = load_and_validate(file.path()).expect("valid config");

    assert_eq!(cfg.tasks.section_marker, "## 2. 任务拆解");
    assert_eq!(cfg.tasks.id_header, "ID");
    assert_eq!(cfg.tasks.status_header, "状态");
    assert_eq!(cfg.tasks.id_prefix, "T-");
    assert_eq!(cfg.convert.max_batch_size, 50);
    assert_eq!(cfg.worker.program, "codex");
    assert_eq!(cfg.worker.args, vec!["exec", "--json", "--full-auto"]);
    assert_eq!(cfg.worker.timeout_secs, 900);
    assert_eq!(cfg.worker.work_dir, None);
}

#[test]
fn partial_section_keeps_other_defaults() {
    let file = temp_file_with("[tasks]\nid_prefix = \"TASK-\"\n");

    let cfg = load_and_validate(file.path()).expect("valid config");

    assert_eq!(cfg.tasks.id_prefix, "TASK-");
    assert_eq!(cfg.tasks.section_marker, "## 2. 任务拆解");
}

#[test]
fn zero_batch_size_is_rejected() {
    let file = temp_file_with("[convert]\nmax_batch_size = 0\n");

    let err = load_and_validate(file.path()).expect_err("must fail");
    match err {
        MdbridgeError::ConfigError(msg) => assert!(msg.contains("max_batch_size"), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_marker_is_rejected() {
    let file = temp_file_with("[tasks]\nid_header = \"  \"\n");

    let err = load_and_validate(file.path()).expect_err("must fail");
    assert!(matches!(err, MdbridgeError::ConfigError(ref m) if m.contains("[tasks].id_header")));
}

#[test]
fn zero_timeout_is_rejected() {
    let mut raw = RawConfigFile::default();
    raw.worker.timeout_secs = 0;

    let err = ConfigFile::try_from(raw).expect_err("must fail");
    assert!(matches!(err, MdbridgeError::ConfigError(ref m) if m.contains("timeout_secs")));
}

#[test]
fn invalid_toml_is_a_toml_error() {
    let file = temp_file_with("[convert\nmax_batch_size = ");

    let err = load_from_path(file.path()).expect_err("must fail");
    assert!(matches!(err, MdbridgeError::TomlError(_)));
}

#[test]
fn explicit_missing_path_is_an_io_error() {
    let err = load_or_default(Some("/definitely/not/here/Mdbridge.toml".as_ref()))
        .expect_err("must fail");
    assert!(matches!(err, MdbridgeError::IoError(_)));
}
