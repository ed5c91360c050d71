// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `mdbridge`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mdbridge",
    version,
    about = "Convert markdown into document blocks and dispatch markdown task tables.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Mdbridge.toml` in the current working directory, if present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MDBRIDGE_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Convert a markdown file into document blocks (JSON on stdout).
    Convert {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output backend wire payloads instead of typed blocks.
        #[arg(long, conflicts_with = "plan")]
        wire: bool,

        /// Output the batched backend write plan.
        #[arg(long)]
        plan: bool,
    },

    /// List tasks parsed from a task file.
    Tasks {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only list tasks whose dependencies are satisfied.
        #[arg(long)]
        ready: bool,
    },

    /// Rewrite the status cell of one task row in place.
    SetStatus {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(value_name = "ID")]
        id: String,

        /// New status text, e.g. DONE or "RETRY 2".
        #[arg(value_name = "STATUS")]
        status: String,
    },

    /// Check task ids and the dependency graph.
    Validate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Run ready tasks through the configured coding-agent worker.
    Dispatch {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Run at most one task.
        #[arg(long)]
        once: bool,

        /// List ready tasks without running them.
        #[arg(long)]
        dry_run: bool,

        /// Stop after starting this many tasks.
        #[arg(long, value_name = "N")]
        max_tasks: Option<usize>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
