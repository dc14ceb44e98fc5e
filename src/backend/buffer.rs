//! The character-cell buffer backends draw into.
//!
//! Flat `Vec<Cell>` with row-major indexing for cache efficiency; all
//! access is bounds-checked so out-of-range writes are dropped, never an
//! error.

use crate::cell::{Cell, Color};

/// A 2D buffer of terminal cells.
///
/// Row-major: `index = y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenBuffer {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl ScreenBuffer {
    /// Create a buffer filled with blanks on the given background.
    pub fn new(width: i32, height: i32, background: Color) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![Cell::blank(background); (width as usize) * (height as usize)],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Cell at `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&self.cells[idx])
        } else {
            None
        }
    }

    /// Write a cell; out-of-bounds writes are dropped.
    #[inline]
    pub fn put(&mut self, cell: Cell, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Fill the whole buffer with blanks on `background`.
    pub fn fill(&mut self, background: Color) {
        self.cells.fill(Cell::blank(background));
    }

    /// Resize, discarding previous contents.
    pub fn resize(&mut self, width: i32, height: i32, background: Color) {
        *self = Self::new(width, height, background);
    }

    /// Raw cells, row-major (for diff rendering).
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The glyphs of one row as a string (test helper).
    pub fn row_text(&self, y: i32) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y).map(|c| c.ch))
            .collect()
    }
}
