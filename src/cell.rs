//! Character cells and their attributes.
//!
//! A [`Cell`] is the unit the backend blits: one glyph plus foreground,
//! background and line-attribute flags. The core produces cells transiently
//! during a render pass and never stores them; the backend owns the buffer.

use bitflags::bitflags;

// =============================================================================
// Color
// =============================================================================

/// The 16-value terminal palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Color {
    #[default]
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Yellow = 6,
    Gray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    LightYellow = 14,
    White = 15,
}

impl Color {
    /// Map onto crossterm's named palette colors.
    pub fn to_crossterm(self) -> crossterm::style::Color {
        use crossterm::style::Color as C;
        match self {
            Color::Black => C::Black,
            Color::Blue => C::DarkBlue,
            Color::Green => C::DarkGreen,
            Color::Cyan => C::DarkCyan,
            Color::Red => C::DarkRed,
            Color::Magenta => C::DarkMagenta,
            Color::Yellow => C::DarkYellow,
            Color::Gray => C::Grey,
            Color::DarkGray => C::DarkGrey,
            Color::LightBlue => C::Blue,
            Color::LightGreen => C::Green,
            Color::LightCyan => C::Cyan,
            Color::LightRed => C::Red,
            Color::LightMagenta => C::Magenta,
            Color::LightYellow => C::Yellow,
            Color::White => C::White,
        }
    }
}

// =============================================================================
// CellAttr
// =============================================================================

bitflags! {
    /// Per-cell line attributes.
    ///
    /// Carried through to the backend; terminals that cannot render grid
    /// lines as attributes simply ignore them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellAttr: u16 {
        const TOP_LINE = 0x0400;
        const LEFT_LINE = 0x0800;
        const RIGHT_LINE = 0x1000;
        const BOTTOM_LINE = 0x8000;
    }
}

// =============================================================================
// Cell
// =============================================================================

/// One character cell: glyph, colors, attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub attrs: CellAttr,
}

impl Cell {
    /// A cell with default colors (gray on black).
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            fg: Color::Gray,
            bg: Color::Black,
            attrs: CellAttr::empty(),
        }
    }

    pub const fn styled(ch: char, fg: Color, bg: Color, attrs: CellAttr) -> Self {
        Self { ch, fg, bg, attrs }
    }

    /// A blank cell with the given background.
    pub const fn blank(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::Gray,
            bg,
            attrs: CellAttr::empty(),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ')
    }
}

impl From<char> for Cell {
    fn from(ch: char) -> Self {
        Self::new(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_defaults() {
        let c = Cell::new('x');
        assert_eq!(c.fg, Color::Gray);
        assert_eq!(c.bg, Color::Black);
        assert!(c.attrs.is_empty());
    }

    #[test]
    fn test_attr_bits_are_distinct() {
        let all = CellAttr::TOP_LINE | CellAttr::BOTTOM_LINE | CellAttr::LEFT_LINE | CellAttr::RIGHT_LINE;
        assert_eq!(all.bits().count_ones(), 4);
    }
}
