//! Text measurement and wrapping.
//!
//! Wrapping is hard chunking at the column budget (fixed-width, not
//! word-wrap), accumulated per-character with `unicode-width` so fullwidth
//! glyphs count as two columns. Line endings are normalized before any
//! splitting, so `\r\n` text measures and draws identically to `\n` text.

use unicode_width::UnicodeWidthChar;

use crate::cell::{CellAttr, Color};
use crate::geometry::Size;

/// Whether drawn text hard-wraps at the rectangle width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextWrapping {
    Wrap,
    #[default]
    NoWrap,
}

/// Options for text drawing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    pub wrapping: TextWrapping,
    pub foreground: Color,
    pub background: Color,
    pub attrs: CellAttr,
}

/// Display width of one char in cells (control chars count zero).
#[inline]
pub(crate) fn char_width(c: char) -> i32 {
    c.width().unwrap_or(0) as i32
}

/// Display width of a string in cells.
pub fn text_width(s: &str) -> i32 {
    s.chars().map(char_width).fold(0i32, i32::saturating_add)
}

/// Normalize line endings and split into lines.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Hard-wrap a single (newline-free) line at `width` columns.
///
/// Zero or negative budgets fit nothing and yield no chunks. A wide glyph
/// that would straddle the budget starts the next chunk instead.
pub fn wrap_line(line: &str, width: i32) -> Vec<String> {
    if width <= 0 {
        return Vec::new();
    }
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_width = 0i32;
    for c in line.chars() {
        let w = char_width(c);
        if current_width + w > width && !current.is_empty() {
            chunks.push(current);
            current = String::new();
            current_width = 0;
        }
        current.push(c);
        current_width += w;
    }
    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Truncate a line to at most `width` columns (no ellipsis).
pub(crate) fn clip_line(line: &str, width: i32) -> String {
    let mut out = String::new();
    let mut used = 0i32;
    for c in line.chars() {
        let w = char_width(c);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out
}

/// Bounding size of unwrapped text: widest line × line count.
pub fn measure_text(text: &str) -> Size {
    if text.is_empty() {
        return Size::ZERO;
    }
    let lines = split_lines(text);
    let width = lines.iter().map(|l| text_width(l)).max().unwrap_or(0);
    Size::new(width, lines.len() as i32)
}

/// Bounding size of text hard-wrapped at `width` columns.
pub fn measure_wrapped_text(text: &str, width: i32) -> Size {
    if text.is_empty() {
        return Size::ZERO;
    }
    let mut height = 0i32;
    let mut widest = 0i32;
    for line in split_lines(text) {
        let chunks = wrap_line(&line, width);
        if chunks.is_empty() {
            height += 1; // nothing fits, the line still occupies a row
            continue;
        }
        height += chunks.len() as i32;
        for chunk in &chunks {
            widest = widest.max(text_width(chunk));
        }
    }
    Size::new(widest, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_chunks_within_budget() {
        let chunks = wrap_line("abcdefghij", 4);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
        assert!(chunks.iter().all(|c| text_width(c) <= 4));
    }

    #[test]
    fn test_wrap_round_trips_space_free_text() {
        let original = "abcdefghij";
        let joined: String = wrap_line(original, 4).concat();
        assert_eq!(joined, original);
    }

    #[test]
    fn test_wrap_is_chunking_not_word_wrap() {
        assert_eq!(wrap_line("hello world", 5), vec!["hello", " worl", "d"]);
    }

    #[test]
    fn test_wrap_zero_budget() {
        assert!(wrap_line("abc", 0).is_empty());
    }

    #[test]
    fn test_measure_text() {
        assert_eq!(measure_text(""), Size::ZERO);
        assert_eq!(measure_text("hello"), Size::new(5, 1));
        assert_eq!(measure_text("one\ntwo longer\nx"), Size::new(10, 3));
    }

    #[test]
    fn test_measure_normalizes_line_endings() {
        assert_eq!(measure_text("a\r\nb\rc"), Size::new(1, 3));
    }

    #[test]
    fn test_measure_wrapped() {
        assert_eq!(measure_wrapped_text("abcdefghij", 4), Size::new(4, 3));
        assert_eq!(measure_wrapped_text("ab\ncd", 10), Size::new(2, 2));
    }

    #[test]
    fn test_wide_glyphs_count_two_columns() {
        assert_eq!(text_width("日本"), 4);
        let chunks = wrap_line("日本語", 4);
        assert_eq!(chunks, vec!["日本", "語"]);
    }

    #[test]
    fn test_clip_line() {
        assert_eq!(clip_line("hello", 3), "hel");
        assert_eq!(clip_line("日本語", 3), "日");
    }
}
