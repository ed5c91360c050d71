// src/dispatch/runner.rs

//! Coding-agent process runner.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::WorkerSection;
use crate::tasks::Task;

/// Outcome of one worker run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerResult {
    pub success: bool,
    /// Stdout lines (trimmed), joined with newlines.
    pub output: String,
    pub error_message: Option<String>,
    /// Process exit code; `-1` for timeouts, spawn failures and signals.
    pub exit_code: i32,
    /// Stdout lines that parsed as JSON, in order.
    pub events: Vec<Value>,
}

impl WorkerResult {
    pub fn failure(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            exit_code,
            ..Self::default()
        }
    }
}

pub const TIMEOUT_MESSAGE: &str = "Timeout exceeded";

/// Run the configured agent command for `task`, with the task description as
/// the last argument.
///
/// Never returns an error: spawn failures, timeouts and non-zero exits are
/// all reported through [`WorkerResult`].
pub async fn run_agent(settings: &WorkerSection, task: &Task) -> WorkerResult {
    info!(
        task = %task.id,
        program = %settings.program,
        "starting worker process"
    );

    let mut cmd = Command::new(&settings.program);
    cmd.args(&settings.args)
        .arg(&task.description)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = &settings.work_dir {
        cmd.current_dir(dir);
    }

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return WorkerResult::failure(
                format!(
                    "Command '{}' not found. Please ensure it is installed.",
                    settings.program
                ),
                -1,
            );
        }
        Err(e) => {
            return WorkerResult::failure(
                format!("spawning worker for task '{}': {e}", task.id),
                -1,
            );
        }
    };

    // Drain stderr in the background so the pipe never fills.
    let stderr_handle = child.stderr.take().map(|mut stderr| {
        tokio::spawn(async move {
            let mut buf = String::new();
            let _ = stderr.read_to_string(&mut buf).await;
            buf
        })
    });

    let stdout = child.stdout.take();
    let mut output: Vec<String> = Vec::new();
    let mut events: Vec<Value> = Vec::new();
    let mut read_error: Option<String> = None;

    let run = async {
        if let Some(stdout) = stdout {
            // Raw segments so a non-UTF-8 line does not stop the drain.
            let mut segments = BufReader::new(stdout).split(b'\n');
            loop {
                match segments.next_segment().await {
                    Ok(Some(bytes)) => {
                        let line = String::from_utf8_lossy(&bytes);
                        record_line(&task.id, &line, &mut output, &mut events);
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!(task = %task.id, error = %e, "reading worker stdout failed");
                        read_error = Some(format!("reading worker output: {e}"));
                        break;
                    }
                }
            }
        }
        child.wait().await
    };

    let waited = tokio::time::timeout(Duration::from_secs(settings.timeout_secs), run).await;

    let mut result = match waited {
        Err(_elapsed) => {
            warn!(
                task = %task.id,
                timeout_secs = settings.timeout_secs,
                "worker timed out; killing process"
            );
            if let Err(e) = child.kill().await {
                warn!(task = %task.id, error = %e, "failed to kill timed-out worker");
            }
            WorkerResult::failure(TIMEOUT_MESSAGE, -1)
        }
        Ok(Err(e)) => WorkerResult::failure(format!("waiting for worker process: {e}"), -1),
        Ok(Ok(status)) => {
            let code = status.code().unwrap_or(-1);
            info!(
                task = %task.id,
                exit_code = code,
                success = status.success(),
                "worker process exited"
            );
            if status.success() {
                WorkerResult {
                    success: true,
                    exit_code: code,
                    ..WorkerResult::default()
                }
            } else {
                let stderr = match stderr_handle {
                    Some(handle) => handle.await.unwrap_or_default(),
                    None => String::new(),
                };
                let stderr = stderr.trim();
                WorkerResult {
                    success: false,
                    exit_code: code,
                    error_message: (!stderr.is_empty()).then(|| stderr.to_string()),
                    ..WorkerResult::default()
                }
            }
        }
    };

    if result.error_message.is_none() {
        result.error_message = read_error;
    }
    result.output = output.join("\n");
    result.events = events;
    result
}

/// Keep one trimmed stdout line; lines that parse as JSON are also events.
fn record_line(task_id: &str, raw: &str, output: &mut Vec<String>, events: &mut Vec<Value>) {
    let line = raw.trim();
    if line.is_empty() {
        return;
    }
    match serde_json::from_str::<Value>(line) {
        Ok(event) => {
            let event_type = event
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("?")
                .to_string();
            debug!(task = %task_id, event_type = %event_type, "worker event");
            events.push(event);
        }
        Err(_) => debug!(task = %task_id, "non-JSON worker output: {}", line),
    }
    output.push(line.to_string());
}
