// src/convert/mod.rs

//! Markdown → document block conversion.
//!
//! - [`converter`] runs the line-oriented parse into [`Block`]s.
//! - [`spans`] splits inline text into bold / link [`Run`]s.
//! - [`emoji`] strips pictographic symbols from prose lines.
//! - [`wire`] encodes blocks as backend JSON payloads.
//! - [`plan`] groups payloads into backend write steps.

pub mod block;
pub mod converter;
pub mod emoji;
pub mod plan;
pub mod spans;
pub mod wire;

pub use block::{Block, Run, Table};
pub use converter::{Converter, convert};
pub use plan::{CellFill, DEFAULT_MAX_BATCH, WriteStep, plan_writes};
pub use spans::parse_spans;
pub use wire::to_wire;
