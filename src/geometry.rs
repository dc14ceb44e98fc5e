//! Geometry primitives.
//!
//! Pure value types shared by layout and drawing. Coordinates are `i32`
//! cells; `i32::MAX` doubles as the "infinite" size sentinel, so all size
//! arithmetic saturates.
//!
//! Degenerate geometry is never an error: a rectangle constructed with
//! negative dimensions clamps them to zero, and clipping two disjoint
//! rectangles yields a zero-area rectangle. Layout churn during resize must
//! never crash rendering.

// =============================================================================
// Point
// =============================================================================

/// A position in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return this point translated by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

// =============================================================================
// Size
// =============================================================================

/// A width/height pair in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

// =============================================================================
// Rect
// =============================================================================

/// An axis-aligned rectangle in cell coordinates.
///
/// Width and height are always non-negative: the constructor clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Create a rectangle, clamping negative dimensions to zero.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// First column to the right of the rectangle.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// First row below the rectangle.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x < self.right() && pt.y >= self.y && pt.y < self.bottom()
    }

    /// Return this rectangle translated by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    /// Return this rectangle grown by `(dw, dh)` (negative values shrink).
    pub fn expand(self, dw: i32, dh: i32) -> Self {
        Self::new(
            self.x,
            self.y,
            self.width.saturating_add(dw),
            self.height.saturating_add(dh),
        )
    }

    /// Intersect with another rectangle. Disjoint inputs produce a
    /// zero-area result anchored inside `other`.
    pub fn clip(self, other: Rect) -> Self {
        let nx = self.x.max(other.x);
        let ny = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Self::new(nx, ny, right - nx, bottom - ny)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_dimensions_clamp() {
        let r = Rect::new(3, 4, -10, -1);
        assert_eq!(r.width, 0);
        assert_eq!(r.height, 0);
        assert!(r.is_empty());
    }

    #[test]
    fn test_clip_overlap() {
        let r = Rect::new(2, 2, 10, 10).clip(Rect::new(0, 0, 8, 8));
        assert_eq!(r, Rect::new(2, 2, 6, 6));
    }

    #[test]
    fn test_clip_disjoint_is_zero_area() {
        let r = Rect::new(20, 20, 5, 5).clip(Rect::new(0, 0, 10, 10));
        assert!(r.is_empty());
    }

    #[test]
    fn test_clip_contained() {
        let r = Rect::new(1, 1, 2, 2).clip(Rect::new(0, 0, 10, 10));
        assert_eq!(r, Rect::new(1, 1, 2, 2));
    }

    #[test]
    fn test_contains() {
        let r = Rect::new(1, 1, 3, 3);
        assert!(r.contains(Point::new(1, 1)));
        assert!(r.contains(Point::new(3, 3)));
        assert!(!r.contains(Point::new(4, 3)));
        assert!(!r.contains(Point::new(0, 1)));
    }

    #[test]
    fn test_offset_expand() {
        let r = Rect::new(1, 2, 3, 4).offset(2, -1).expand(-1, 1);
        assert_eq!(r, Rect::new(3, 1, 2, 5));
        // expanding below zero clamps
        assert_eq!(Rect::new(0, 0, 1, 1).expand(-5, -5), Rect::new(0, 0, 0, 0));
    }
}
