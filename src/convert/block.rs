// src/convert/block.rs

//! Typed document blocks produced by the converter.

use serde::Serialize;

/// One contiguous span of inline text sharing the same style and link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub content: String,
    pub bold: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

impl Run {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            bold: false,
            link_url: None,
        }
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            bold: true,
            link_url: None,
        }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: label.into(),
            bold: false,
            link_url: Some(url.into()),
        }
    }
}

/// A pipe table as accumulated by the converter.
///
/// Rows are kept exactly as parsed, so a ragged row keeps its own cell count.
/// [`Table::cells`] gives the flat row-major grid sized by the first row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from accumulated rows. Returns `None` when there are no
    /// rows, since an empty table is never emitted.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Option<Self> {
        if rows.is_empty() {
            None
        } else {
            Some(Self { rows })
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Flat row-major cell text, always `row_count * column_count` long.
    ///
    /// Short rows are padded with empty cells and long rows are truncated to
    /// the first row's width.
    pub fn cells(&self) -> Vec<String> {
        let columns = self.column_count();
        let mut cells = Vec::with_capacity(self.row_count() * columns);
        for row in &self.rows {
            for col in 0..columns {
                cells.push(row.get(col).cloned().unwrap_or_default());
            }
        }
        cells
    }

    /// True if any row's width differs from the first row's.
    pub fn is_ragged(&self) -> bool {
        let columns = self.column_count();
        self.rows.iter().any(|row| row.len() != columns)
    }
}

/// One structural unit of output document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { level: u8, runs: Vec<Run> },
    Paragraph { runs: Vec<Run> },
    BulletItem { runs: Vec<Run> },
    OrderedItem { runs: Vec<Run> },
    Callout { runs: Vec<Run> },
    CodeBlock { language: String, code: String },
    Table(Table),
}

impl Block {
    /// Inline runs for text-bearing blocks; empty for code and tables.
    pub fn runs(&self) -> &[Run] {
        match self {
            Block::Heading { runs, .. }
            | Block::Paragraph { runs }
            | Block::BulletItem { runs }
            | Block::OrderedItem { runs }
            | Block::Callout { runs } => runs,
            Block::CodeBlock { .. } | Block::Table(_) => &[],
        }
    }

    /// Concatenated run content, ignoring styles.
    pub fn plain_text(&self) -> String {
        self.runs().iter().map(|r| r.content.as_str()).collect()
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }
}
