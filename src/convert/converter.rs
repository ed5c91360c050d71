// src/convert/converter.rs

//! Line-oriented markdown → [`Block`] converter.
//!
//! The converter is a single forward pass with three states:
//!
//! - `Normal`: prose lines are classified one at a time.
//! - `InCodeBlock`: every line is kept verbatim until the closing fence.
//! - `InTable`: pipe rows are accumulated until a prose line, a fence or EOF.
//!
//! It never fails; malformed input just produces less structured output.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::convert::block::{Block, Table};
use crate::convert::emoji::strip_emojis;
use crate::convert::spans::parse_spans;

/// Highest heading level emitted as a heading; deeper runs of `#` become text.
pub const MAX_HEADING_LEVEL: usize = 9;

const FENCE: &str = "```";

fn heading_regex() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| Regex::new(r"^(#+)\s+(.*)").expect("invalid heading regex"))
}

fn ordered_regex() -> &'static Regex {
    static ORDERED: OnceLock<Regex> = OnceLock::new();
    ORDERED.get_or_init(|| Regex::new(r"^\d+\.\s").expect("invalid ordered-list regex"))
}

fn separator_regex() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"^\|[\s-]+\|.*\|$").expect("invalid separator regex"))
}

#[derive(Debug)]
enum State {
    Normal,
    InCodeBlock { language: String, lines: Vec<String> },
    InTable { rows: Vec<Vec<String>> },
}

/// Convert markdown text into an ordered sequence of blocks.
pub fn convert(markdown: &str) -> Vec<Block> {
    let mut converter = Converter::new();
    for line in markdown.split('\n') {
        converter.feed_line(line);
    }
    let blocks = converter.finish();
    debug!(blocks = blocks.len(), "markdown converted");
    blocks
}

/// Incremental converter; feed lines in order, then call [`Converter::finish`].
#[derive(Debug)]
pub struct Converter {
    state: State,
    blocks: Vec<Block>,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    pub fn new() -> Self {
        Self {
            state: State::Normal,
            blocks: Vec::new(),
        }
    }

    pub fn feed_line(&mut self, line: &str) {
        let trimmed = line.trim();

        if trimmed.starts_with(FENCE) {
            self.toggle_fence(trimmed);
            return;
        }

        if let State::InCodeBlock { lines, .. } = &mut self.state {
            lines.push(line.to_string());
            return;
        }

        if is_table_row(trimmed) {
            self.push_table_row(trimmed);
            return;
        }

        // Blank lines are skipped and leave an open table open.
        if trimmed.is_empty() {
            return;
        }

        self.close_table();
        self.push_prose(trimmed);
    }

    /// Flush any open table and return the blocks.
    ///
    /// An unterminated code fence is dropped.
    pub fn finish(mut self) -> Vec<Block> {
        match std::mem::replace(&mut self.state, State::Normal) {
            State::InTable { rows } => self.emit_table(rows),
            State::InCodeBlock { language, lines } => {
                warn!(
                    language = %language,
                    lines = lines.len(),
                    "unterminated code fence at end of input; content dropped"
                );
            }
            State::Normal => {}
        }
        self.blocks
    }

    fn toggle_fence(&mut self, trimmed: &str) {
        match std::mem::replace(&mut self.state, State::Normal) {
            State::InCodeBlock { language, lines } => {
                self.blocks.push(Block::CodeBlock {
                    language,
                    code: lines.join("\n"),
                });
            }
            previous => {
                if let State::InTable { rows } = previous {
                    self.emit_table(rows);
                }
                self.state = State::InCodeBlock {
                    language: trimmed.replace(FENCE, "").trim().to_string(),
                    lines: Vec::new(),
                };
            }
        }
    }

    fn push_table_row(&mut self, trimmed: &str) {
        if !matches!(self.state, State::InTable { .. }) {
            self.state = State::InTable { rows: Vec::new() };
        }

        if is_separator_row(trimmed) {
            return;
        }

        if let State::InTable { rows } = &mut self.state {
            rows.push(split_cells(trimmed));
        }
    }

    fn close_table(&mut self) {
        match std::mem::replace(&mut self.state, State::Normal) {
            State::InTable { rows } => self.emit_table(rows),
            other => self.state = other,
        }
    }

    fn emit_table(&mut self, rows: Vec<Vec<String>>) {
        match Table::from_rows(rows) {
            Some(table) => {
                if table.is_ragged() {
                    debug!(
                        rows = table.row_count(),
                        columns = table.column_count(),
                        "table has ragged rows"
                    );
                }
                self.blocks.push(Block::Table(table));
            }
            None => debug!("table contained only separator rows; skipped"),
        }
    }

    fn push_prose(&mut self, trimmed: &str) {
        let cleaned = strip_emojis(trimmed);
        let text = cleaned.trim();
        if text.is_empty() {
            return;
        }

        let block = if let Some(caps) = heading_regex().captures(text) {
            let level = caps.get(1).map_or(0, |m| m.as_str().len());
            let content = caps.get(2).map_or("", |m| m.as_str());
            if level <= MAX_HEADING_LEVEL {
                Block::Heading {
                    level: level as u8,
                    runs: parse_spans(content),
                }
            } else {
                Block::Paragraph {
                    runs: parse_spans(content),
                }
            }
        } else if let Some(rest) = text.strip_prefix("- ") {
            Block::BulletItem {
                runs: parse_spans(rest),
            }
        } else if let Some(m) = ordered_regex().find(text) {
            Block::OrderedItem {
                runs: parse_spans(&text[m.end()..]),
            }
        } else if let Some(rest) = text.strip_prefix("> ") {
            Block::Callout {
                runs: parse_spans(rest),
            }
        } else {
            Block::Paragraph {
                runs: parse_spans(text),
            }
        };

        self.blocks.push(block);
    }
}

fn is_table_row(trimmed: &str) -> bool {
    trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// Markdown header separators like `|---|:---:|`.
fn is_separator_row(trimmed: &str) -> bool {
    separator_regex().is_match(trimmed) || trimmed.contains("---")
}

fn split_cells(trimmed: &str) -> Vec<String> {
    trimmed
        .trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}
