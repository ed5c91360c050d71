// src/convert/plan.rs

//! Write plan: how converted blocks are sent to the document backend.
//!
//! Ordinary blocks go out in batches of at most `max_batch` payloads. Tables
//! need two phases on the backend (create the empty grid, then fill each cell
//! by the id the create call returns), so every table closes the pending
//! batch and becomes its own step.

use serde::Serialize;
use serde_json::Value;

use crate::convert::block::{Block, Run};
use crate::convert::spans::parse_spans;
use crate::convert::wire::{table_block, to_wire};
use crate::errors::{MdbridgeError, Result};

/// Backend limit on children per create call.
pub const DEFAULT_MAX_BATCH: usize = 50;

/// Content for one table cell, addressed by its row-major index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellFill {
    pub index: usize,
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum WriteStep {
    Batch { children: Vec<Value> },
    Table { create: Value, fills: Vec<CellFill> },
}

/// Group `blocks` into backend write steps, preserving document order.
pub fn plan_writes(blocks: &[Block], max_batch: usize) -> Result<Vec<WriteStep>> {
    if max_batch == 0 {
        return Err(MdbridgeError::ConfigError(
            "max batch size must be >= 1 (got 0)".to_string(),
        ));
    }

    let mut steps = Vec::new();
    let mut pending: Vec<Value> = Vec::new();

    for block in blocks {
        match block {
            Block::Table(table) => {
                flush(&mut pending, &mut steps);

                let fills = table
                    .cells()
                    .iter()
                    .enumerate()
                    .filter(|(_, text)| !text.is_empty())
                    .map(|(index, text)| CellFill {
                        index,
                        runs: parse_spans(text),
                    })
                    .collect();

                steps.push(WriteStep::Table {
                    create: table_block(table, false),
                    fills,
                });
            }
            other => {
                pending.push(to_wire(other));
                if pending.len() >= max_batch {
                    flush(&mut pending, &mut steps);
                }
            }
        }
    }
    flush(&mut pending, &mut steps);

    Ok(steps)
}

fn flush(pending: &mut Vec<Value>, steps: &mut Vec<WriteStep>) {
    if !pending.is_empty() {
        steps.push(WriteStep::Batch {
            children: std::mem::take(pending),
        });
    }
}
