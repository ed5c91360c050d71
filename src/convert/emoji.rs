// src/convert/emoji.rs

//! Emoji removal applied to non-table, non-code text.

/// Returns true for code points the converter strips from prose lines:
/// supplementary-plane pictographs, miscellaneous symbols and dingbats,
/// miscellaneous technical symbols, plus a handful of stars, shapes and
/// arrows that commonly show up in headings.
pub fn is_stripped_symbol(c: char) -> bool {
    matches!(
        c as u32,
        0x1_0000..=0x10_FFFF
            | 0x2600..=0x27BF
            | 0x2300..=0x23FF
            | 0x2B50
            | 0x2B55
            | 0x2B1B
            | 0x2B1C
            | 0x203C
            | 0x2049
            | 0x2122
            | 0x2139
            | 0x2194..=0x2199
            | 0x21A9..=0x21AA
    )
}

/// Remove stripped symbols from `text`. Whitespace around them is kept;
/// callers trim afterwards.
pub fn strip_emojis(text: &str) -> String {
    text.chars().filter(|c| !is_stripped_symbol(*c)).collect()
}
