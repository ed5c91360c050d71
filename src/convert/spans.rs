// src/convert/spans.rs

//! Inline span parsing: links first, then bold, no nesting.

use std::sync::OnceLock;

use regex::Regex;

use crate::convert::block::Run;

fn link_regex() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("invalid link regex"))
}

fn bold_regex() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    BOLD.get_or_init(|| Regex::new(r"\*\*.*?\*\*").expect("invalid bold regex"))
}

/// Split `text` into styled runs.
///
/// `[label](url)` becomes a link run; `**text**` inside the literal segments
/// between links becomes a bold run. Unmatched delimiters stay literal text
/// and empty segments are dropped.
pub fn parse_spans(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut cursor = 0;

    for caps in link_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        push_bold_runs(&text[cursor..whole.start()], &mut runs);

        let label = caps.get(1).map_or("", |m| m.as_str());
        let url = caps.get(2).map_or("", |m| m.as_str());
        runs.push(Run::link(label, url));

        cursor = whole.end();
    }
    push_bold_runs(&text[cursor..], &mut runs);

    runs
}

fn push_bold_runs(segment: &str, runs: &mut Vec<Run>) {
    let mut cursor = 0;

    for m in bold_regex().find_iter(segment) {
        push_plain(&segment[cursor..m.start()], runs);

        let matched = m.as_str();
        // "****" has nothing to embolden.
        if matched.len() > 4 {
            runs.push(Run::bold(&matched[2..matched.len() - 2]));
        } else {
            push_plain(matched, runs);
        }

        cursor = m.end();
    }
    push_plain(&segment[cursor..], runs);
}

fn push_plain(text: &str, runs: &mut Vec<Run>) {
    if !text.is_empty() {
        runs.push(Run::plain(text));
    }
}
