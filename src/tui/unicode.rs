//! Column-width text helpers
//!
//! Table cells, field labels and the footer are laid out in terminal
//! columns, not bytes or chars, so CJK names and emoji line up.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Number of terminal columns needed to display `s`
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Longest prefix of `s` that fits in `budget` columns
fn prefix_within(s: &str, budget: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        used += c.width().unwrap_or(0);
        if used > budget {
            return &s[..idx];
        }
    }
    s
}

/// Cut `s` to at most `max_width` columns, ending in "…" when shortened
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    match max_width {
        0 => String::new(),
        n => {
            let mut out = prefix_within(s, n - 1).to_string();
            out.push(ELLIPSIS);
            out
        }
    }
}

/// Exactly `width` columns: padded with spaces, or truncated
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width);
    let short = width.saturating_sub(display_width(&out));
    out.extend(std::iter::repeat(' ').take(short));
    out
}
