//! Box-drawing frame glyphs.
//!
//! Each frame style is a 16-entry glyph table indexed by a [`FramePiece`]
//! bit combination: the bits name the directions a line extends out of the
//! cell, so `TOP | RIGHT` is the `└` corner and all four bits make `┼`.
//! The same table drives plain frames and grid separator junctions.

use bitflags::bitflags;

use crate::cell::{CellAttr, Color};

bitflags! {
    /// Directions a frame line leaves a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FramePiece: u8 {
        const TOP = 1;
        const RIGHT = 2;
        const BOTTOM = 4;
        const LEFT = 8;
    }
}

impl FramePiece {
    pub const VERTICAL: Self = Self::TOP.union(Self::BOTTOM);
    pub const HORIZONTAL: Self = Self::LEFT.union(Self::RIGHT);
    pub const CROSS: Self = Self::VERTICAL.union(Self::HORIZONTAL);
}

/// Frame rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameStyle {
    #[default]
    Single,
    Double,
    Fill,
    Simple,
}

/// Glyph tables, indexed by `FramePiece` bits. Entries for bit patterns
/// that are not valid pieces (0, lone directions other than the line
/// pieces) are blank.
const FRAMES: [[char; 16]; 4] = [
    [
        ' ', ' ', ' ', '└', ' ', '│', '┌', '├', ' ', '┘', '─', '┴', '┐', '┤', '┬', '┼',
    ],
    [
        ' ', ' ', ' ', '╚', ' ', '║', '╔', '╠', ' ', '╝', '═', '╩', '╗', '╣', '╦', '╬',
    ],
    [
        ' ', ' ', ' ', '█', ' ', '█', '█', '█', ' ', '█', '█', '█', '█', '█', '█', '█',
    ],
    [
        ' ', ' ', ' ', '+', ' ', '|', '+', '+', ' ', '+', '-', '+', '+', '+', '+', '+',
    ],
];

/// Look up the glyph for a piece in a style.
pub fn frame_piece(piece: FramePiece, style: FrameStyle) -> char {
    FRAMES[style as usize][piece.bits() as usize]
}

/// Options for [`DrawingContext::draw_frame`](crate::drawing::DrawingContext::draw_frame).
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameOptions {
    pub style: FrameStyle,
    pub foreground: Color,
    pub background: Color,
}

impl FrameOptions {
    pub fn styled(style: FrameStyle, foreground: Color, background: Color) -> Self {
        Self {
            style,
            foreground,
            background,
        }
    }
}

/// Options for filled-rectangle drawing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectOptions {
    pub foreground: Color,
    pub background: Color,
    pub attrs: CellAttr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_corners() {
        assert_eq!(frame_piece(FramePiece::BOTTOM | FramePiece::RIGHT, FrameStyle::Single), '┌');
        assert_eq!(frame_piece(FramePiece::BOTTOM | FramePiece::LEFT, FrameStyle::Single), '┐');
        assert_eq!(frame_piece(FramePiece::TOP | FramePiece::RIGHT, FrameStyle::Single), '└');
        assert_eq!(frame_piece(FramePiece::TOP | FramePiece::LEFT, FrameStyle::Single), '┘');
    }

    #[test]
    fn test_lines_and_junctions() {
        assert_eq!(frame_piece(FramePiece::VERTICAL, FrameStyle::Single), '│');
        assert_eq!(frame_piece(FramePiece::HORIZONTAL, FrameStyle::Single), '─');
        assert_eq!(frame_piece(FramePiece::CROSS, FrameStyle::Single), '┼');
        assert_eq!(
            frame_piece(FramePiece::CROSS - FramePiece::TOP, FrameStyle::Double),
            '╦'
        );
        assert_eq!(frame_piece(FramePiece::CROSS, FrameStyle::Simple), '+');
    }
}
