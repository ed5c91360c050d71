// src/convert/wire.rs

//! Docx block payloads for the document backend.
//!
//! Each [`Block`] maps to one JSON object shaped like the backend's
//! "create children" request items:
//!
//! ```json
//! { "block_type": 4, "heading2": { "elements": [ { "text_run": { ... } } ] } }
//! ```

use serde_json::{Map, Value, json};

use crate::convert::block::{Block, Run, Table};

pub const BLOCK_TYPE_TEXT: u32 = 2;
pub const BLOCK_TYPE_BULLET: u32 = 12;
pub const BLOCK_TYPE_ORDERED: u32 = 13;
pub const BLOCK_TYPE_CODE: u32 = 14;
pub const BLOCK_TYPE_CALLOUT: u32 = 19;
pub const BLOCK_TYPE_TABLE: u32 = 31;

/// Code language id for plain text; fence tags are not mapped.
pub const CODE_LANGUAGE_PLAIN_TEXT: u32 = 1;
pub const CALLOUT_BACKGROUND_COLOR: u32 = 5;

/// Backend `block_type` for a heading level (heading1 = 3 ... heading9 = 11).
pub fn heading_block_type(level: u8) -> u32 {
    BLOCK_TYPE_TEXT + u32::from(level)
}

pub fn block_type(block: &Block) -> u32 {
    match block {
        Block::Heading { level, .. } => heading_block_type(*level),
        Block::Paragraph { .. } => BLOCK_TYPE_TEXT,
        Block::BulletItem { .. } => BLOCK_TYPE_BULLET,
        Block::OrderedItem { .. } => BLOCK_TYPE_ORDERED,
        Block::Callout { .. } => BLOCK_TYPE_CALLOUT,
        Block::CodeBlock { .. } => BLOCK_TYPE_CODE,
        Block::Table(_) => BLOCK_TYPE_TABLE,
    }
}

/// Encode one block as its backend payload.
pub fn to_wire(block: &Block) -> Value {
    match block {
        Block::Heading { level, runs } => {
            let key = format!("heading{level}");
            let mut obj = Map::new();
            obj.insert("block_type".into(), json!(heading_block_type(*level)));
            obj.insert(key, json!({ "elements": elements(runs) }));
            Value::Object(obj)
        }
        Block::Paragraph { runs } => text_block(runs),
        Block::BulletItem { runs } => json!({
            "block_type": BLOCK_TYPE_BULLET,
            "bullet": { "elements": elements(runs) },
        }),
        Block::OrderedItem { runs } => json!({
            "block_type": BLOCK_TYPE_ORDERED,
            "ordered": { "elements": elements(runs) },
        }),
        Block::Callout { runs } => json!({
            "block_type": BLOCK_TYPE_CALLOUT,
            "callout": {
                "background_color": CALLOUT_BACKGROUND_COLOR,
                "elements": elements(runs),
            },
        }),
        Block::CodeBlock { code, .. } => json!({
            "block_type": BLOCK_TYPE_CODE,
            "code": {
                "style": { "language": CODE_LANGUAGE_PLAIN_TEXT },
                "elements": [ text_run(&Run::plain(code.as_str())) ],
            },
        }),
        Block::Table(table) => table_block(table, true),
    }
}

/// Plain text block holding `runs`; also used for table cell content.
pub fn text_block(runs: &[Run]) -> Value {
    json!({
        "block_type": BLOCK_TYPE_TEXT,
        "text": { "elements": elements(runs) },
    })
}

/// Table payload. With `with_cells = false` this is the empty grid the
/// backend creates before cells are filled one by one.
pub fn table_block(table: &Table, with_cells: bool) -> Value {
    let mut inner = Map::new();
    inner.insert(
        "property".into(),
        json!({
            "row_size": table.row_count(),
            "column_size": table.column_count(),
            "header_row": true,
        }),
    );
    if with_cells {
        inner.insert("cells".into(), json!(table.cells()));
    }
    json!({
        "block_type": BLOCK_TYPE_TABLE,
        "table": Value::Object(inner),
    })
}

pub fn elements(runs: &[Run]) -> Vec<Value> {
    runs.iter().map(text_run).collect()
}

pub fn text_run(run: &Run) -> Value {
    let mut style = Map::new();
    if run.bold {
        style.insert("bold".into(), Value::Bool(true));
    }
    if let Some(url) = &run.link_url {
        style.insert("link".into(), json!({ "url": url }));
    }
    json!({
        "text_run": {
            "content": run.content,
            "text_element_style": Value::Object(style),
        }
    })
}
