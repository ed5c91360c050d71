// tests/cli_and_logging.rs

use std::path::PathBuf;

use clap::Parser;
use mdbridge::cli::{CliArgs, Command, LogLevel};
use mdbridge::logging::resolve_level;

#[test]
fn cli_flag_beats_env() {
    assert_eq!(resolve_level(Some(LogLevel::Trace), Some("error")), tracing::Level::TRACE);
}

#[test]
fn env_value_is_used_without_flag() {
    assert_eq!(resolve_level(None, Some("debug")), tracing::Level::DEBUG);
    assert_eq!(resolve_level(None, Some(" Warning ")), tracing::Level::WARN);
}

#[test]
fn unknown_or_missing_env_falls_back_to_info() {
    assert_eq!(resolve_level(None, Some("loud")), tracing::Level::INFO);
    assert_eq!(resolve_level(None, None), tracing::Level::INFO);
}

#[test]
fn parses_convert_with_plan_and_global_flags() {
    let args = CliArgs::try_parse_from([
        "mdbridge",
        "convert",
        "doc.md",
        "--plan",
        "--config",
        "alt.toml",
        "--log-level",
        "debug",
    ])
    .expect("valid args");

    assert_eq!(args.config, Some(PathBuf::from("alt.toml")));
    assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    match args.command {
        Command::Convert { file, wire, plan } => {
            assert_eq!(file, PathBuf::from("doc.md"));
            assert!(!wire);
            assert!(plan);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn wire_and_plan_conflict() {
    let result = CliArgs::try_parse_from(["mdbridge", "convert", "doc.md", "--wire", "--plan"]);
    assert!(result.is_err());
}

#[test]
fn parses_set_status_and_dispatch() {
    let args = CliArgs::try_parse_from(["mdbridge", "set-status", "PRD.md", "T-003", "RETRY 2"])
        .expect("valid args");
    match args.command {
        Command::SetStatus { file, id, status } => {
            assert_eq!(file, PathBuf::from("PRD.md"));
            assert_eq!(id, "T-003");
            assert_eq!(status, "RETRY 2");
        }
        other => panic!("unexpected command: {other:?}"),
    }

    let args = CliArgs::try_parse_from([
        "mdbridge",
        "dispatch",
        "PRD.md",
        "--dry-run",
        "--max-tasks",
        "3",
    ])
    .expect("valid args");
    match args.command {
        Command::Dispatch {
            once,
            dry_run,
            max_tasks,
            ..
        } => {
            assert!(!once);
            assert!(dry_run);
            assert_eq!(max_tasks, Some(3));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
