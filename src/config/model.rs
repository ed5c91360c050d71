// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::convert::DEFAULT_MAX_BATCH;
use crate::tasks::TableMarkers;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [tasks]
/// section_marker = "## 2. 任务拆解"
/// id_header = "ID"
/// status_header = "状态"
/// id_prefix = "T-"
///
/// [convert]
/// max_batch_size = 50
///
/// [worker]
/// program = "codex"
/// args = ["exec", "--json", "--full-auto"]
/// timeout_secs = 900
/// ```
///
/// All sections are optional and have reasonable defaults. This is the
/// unvalidated form; see [`ConfigFile`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Task table markers from `[tasks]`.
    #[serde(default)]
    pub tasks: TableMarkers,

    /// Block conversion settings from `[convert]`.
    #[serde(default)]
    pub convert: ConvertSection,

    /// External coding-agent command from `[worker]`.
    #[serde(default)]
    pub worker: WorkerSection,
}

/// `[convert]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertSection {
    /// Maximum blocks per backend create call.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

fn default_max_batch_size() -> usize {
    DEFAULT_MAX_BATCH
}

impl Default for ConvertSection {
    fn default() -> Self {
        Self {
            max_batch_size: default_max_batch_size(),
        }
    }
}

/// `[worker]` section.
///
/// The task description is appended as the final argument, so the default
/// runs `codex exec --json --full-auto "<description>"`.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerSection {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Per-task wall-clock limit.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Working directory for the worker; `None` means the current directory.
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
}

fn default_program() -> String {
    "codex".to_string()
}

fn default_args() -> Vec<String> {
    vec!["exec".into(), "--json".into(), "--full-auto".into()]
}

fn default_timeout_secs() -> u64 {
    900
}

impl Default for WorkerSection {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            timeout_secs: default_timeout_secs(),
            work_dir: None,
        }
    }
}

/// Validated configuration. Obtain one via `ConfigFile::try_from(raw)` or
/// [`crate::config::load_and_validate`].
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub tasks: TableMarkers,
    pub convert: ConvertSection,
    pub worker: WorkerSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        tasks: TableMarkers,
        convert: ConvertSection,
        worker: WorkerSection,
    ) -> Self {
        Self {
            tasks,
            convert,
            worker,
        }
    }
}
