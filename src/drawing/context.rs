//! The drawing surface handed to controls.
//!
//! A `DrawingContext` is a view into the backend buffer: a local origin, a
//! clip rectangle in absolute cells, and a reported size. Containers hand
//! children a shrunk context so every control draws in its own coordinate
//! space and cannot paint outside its slot. Shrinking to a degenerate
//! rectangle yields a void context whose operations do nothing, so layout
//! code never special-cases invisible children.

use crate::backend::Backend;
use crate::cell::Cell;
use crate::geometry::{Point, Rect, Size};

use super::frame::{frame_piece, FrameOptions, FramePiece, RectOptions};
use super::text::{char_width, clip_line, split_lines, wrap_line, TextOptions, TextWrapping};

pub struct DrawingContext<'a> {
    backend: &'a mut dyn Backend,
    /// Absolute position of local (0, 0). May lie outside the clip after a
    /// scroll.
    origin: Point,
    /// Absolute drawable region; writes outside it are dropped.
    clip: Rect,
    /// Size the context reports to the control drawing into it.
    size: Size,
    void: bool,
}

impl<'a> DrawingContext<'a> {
    /// A context spanning the whole backend surface.
    pub fn root(backend: &'a mut dyn Backend) -> Self {
        let size = Size::new(backend.window_width(), backend.window_height());
        Self {
            backend,
            origin: Point::ZERO,
            clip: Rect::new(0, 0, size.width, size.height),
            size,
            void: size.width <= 0 || size.height <= 0,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        if self.void { 0 } else { self.size.width }
    }

    #[inline]
    pub fn height(&self) -> i32 {
        if self.void { 0 } else { self.size.height }
    }

    /// Whether every operation on this context is a no-op.
    #[inline]
    pub fn is_void(&self) -> bool {
        self.void
    }

    /// A sub-context for `rect` (local coordinates): translated so the
    /// rectangle's corner becomes (0, 0), clipped to its intersection with
    /// this context. An empty intersection yields a void context.
    pub fn shrink(&mut self, rect: Rect) -> DrawingContext<'_> {
        let origin = self.origin.offset(rect.x, rect.y);
        let absolute = Rect {
            x: origin.x,
            y: origin.y,
            width: rect.width.max(0),
            height: rect.height.max(0),
        };
        let clip = absolute.clip(self.clip);
        let void = self.void || clip.is_empty();
        DrawingContext {
            backend: self.backend,
            origin,
            clip,
            size: Size::new(rect.width.max(0), rect.height.max(0)),
            void,
        }
    }

    /// A sub-context translated by `offset` with the clip left as-is. The
    /// reported size does not change; content scrolled before the clip is
    /// simply dropped on write.
    pub fn scroll(&mut self, offset: Point) -> DrawingContext<'_> {
        DrawingContext {
            backend: self.backend,
            origin: self.origin.offset(offset.x, offset.y),
            clip: self.clip,
            size: self.size,
            void: self.void,
        }
    }

    /// Fill this context's clip region with blanks.
    pub fn clear(&mut self, options: RectOptions) {
        if self.void {
            return;
        }
        let blank = Cell {
            ch: ' ',
            fg: options.foreground,
            bg: options.background,
            attrs: options.attrs,
        };
        for y in self.clip.y..self.clip.bottom() {
            for x in self.clip.x..self.clip.right() {
                self.backend.put_char(blank, x, y);
            }
        }
    }

    /// Write one cell at local `(x, y)`; clipped writes are dropped.
    pub fn put_char(&mut self, cell: Cell, x: i32, y: i32) {
        if self.void {
            return;
        }
        let ax = self.origin.x.saturating_add(x);
        let ay = self.origin.y.saturating_add(y);
        if self.clip.contains(Point::new(ax, ay)) {
            self.backend.put_char(cell, ax, ay);
        }
    }

    /// Fill a local rectangle with `ch`. Iteration is bounded by the clip,
    /// so sentinel-sized rectangles cost only the visible area.
    pub fn draw_rectangle(&mut self, rect: Rect, ch: char, options: RectOptions) {
        if self.void {
            return;
        }
        let absolute = Rect {
            x: self.origin.x.saturating_add(rect.x),
            y: self.origin.y.saturating_add(rect.y),
            width: rect.width.max(0),
            height: rect.height.max(0),
        };
        let visible = absolute.clip(self.clip);
        let cell = Cell {
            ch,
            fg: options.foreground,
            bg: options.background,
            attrs: options.attrs,
        };
        for y in visible.y..visible.bottom() {
            for x in visible.x..visible.right() {
                self.backend.put_char(cell, x, y);
            }
        }
    }

    /// Draw one line of text starting at local `point`, no wrapping.
    pub fn draw_line(&mut self, point: Point, text: &str, options: TextOptions) {
        if self.void {
            return;
        }
        let mut x = point.x;
        for c in text.chars() {
            let w = char_width(c);
            if w == 0 {
                continue;
            }
            let cell = Cell {
                ch: c,
                fg: options.foreground,
                bg: options.background,
                attrs: options.attrs,
            };
            self.put_char(cell, x, point.y);
            x = x.saturating_add(w);
        }
    }

    /// Draw text into a local rectangle, wrapping per `options.wrapping`
    /// and clipping to the rectangle.
    pub fn draw_text(&mut self, rect: Rect, text: &str, options: TextOptions) {
        if self.void || rect.is_empty() {
            return;
        }
        let mut y = rect.y;
        let bottom = rect.bottom();
        'lines: for line in split_lines(text) {
            let rows: Vec<String> = match options.wrapping {
                TextWrapping::Wrap => {
                    let chunks = wrap_line(&line, rect.width);
                    if chunks.is_empty() {
                        vec![String::new()]
                    } else {
                        chunks
                    }
                }
                TextWrapping::NoWrap => vec![clip_line(&line, rect.width)],
            };
            for row in rows {
                if y >= bottom {
                    break 'lines;
                }
                self.draw_line(Point::new(rect.x, y), &row, options);
                y += 1;
            }
        }
    }

    /// Draw a box-drawing frame along the border of a local rectangle.
    pub fn draw_frame(&mut self, rect: Rect, options: FrameOptions) {
        if self.void || rect.is_empty() {
            return;
        }
        let right = rect.x + rect.width - 1;
        let bottom = rect.y + rect.height - 1;
        let opts = RectOptions {
            foreground: options.foreground,
            background: options.background,
            attrs: Default::default(),
        };
        let glyph = |piece: FramePiece| frame_piece(piece, options.style);

        if rect.width == 1 && rect.height == 1 {
            return;
        }
        if rect.width == 1 {
            self.draw_rectangle(
                Rect::new(rect.x, rect.y, 1, rect.height),
                glyph(FramePiece::VERTICAL),
                opts,
            );
            return;
        }
        if rect.height == 1 {
            self.draw_rectangle(
                Rect::new(rect.x, rect.y, rect.width, 1),
                glyph(FramePiece::HORIZONTAL),
                opts,
            );
            return;
        }

        // Edges first, then corners.
        self.draw_rectangle(
            Rect::new(rect.x + 1, rect.y, rect.width - 2, 1),
            glyph(FramePiece::HORIZONTAL),
            opts,
        );
        self.draw_rectangle(
            Rect::new(rect.x + 1, bottom, rect.width - 2, 1),
            glyph(FramePiece::HORIZONTAL),
            opts,
        );
        self.draw_rectangle(
            Rect::new(rect.x, rect.y + 1, 1, rect.height - 2),
            glyph(FramePiece::VERTICAL),
            opts,
        );
        self.draw_rectangle(
            Rect::new(right, rect.y + 1, 1, rect.height - 2),
            glyph(FramePiece::VERTICAL),
            opts,
        );

        let corner = |this: &mut Self, piece: FramePiece, x: i32, y: i32| {
            let cell = Cell {
                ch: glyph(piece),
                fg: options.foreground,
                bg: options.background,
                attrs: Default::default(),
            };
            this.put_char(cell, x, y);
        };
        corner(self, FramePiece::RIGHT | FramePiece::BOTTOM, rect.x, rect.y);
        corner(self, FramePiece::LEFT | FramePiece::BOTTOM, right, rect.y);
        corner(self, FramePiece::RIGHT | FramePiece::TOP, rect.x, bottom);
        corner(self, FramePiece::LEFT | FramePiece::TOP, right, bottom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TestBackend;
    use crate::cell::Color;
    use crate::drawing::FrameStyle;

    fn options() -> TextOptions {
        TextOptions::default()
    }

    #[test]
    fn test_root_spans_backend() {
        let mut backend = TestBackend::new(10, 4);
        let ctx = DrawingContext::root(&mut backend);
        assert_eq!(ctx.width(), 10);
        assert_eq!(ctx.height(), 4);
        assert!(!ctx.is_void());
    }

    #[test]
    fn test_shrink_translates_and_clips() {
        let mut backend = TestBackend::new(10, 4);
        let mut root = DrawingContext::root(&mut backend);
        let mut child = root.shrink(Rect::new(2, 1, 5, 2));
        assert_eq!(child.width(), 5);
        child.draw_line(Point::new(0, 0), "hello world", options());
        drop(child);
        drop(root);
        // Only 5 columns fit the shrunk clip, offset by (2, 1).
        assert_eq!(backend.buffer().row_text(1), "  hello   ");
    }

    #[test]
    fn test_shrink_to_empty_is_void() {
        let mut backend = TestBackend::new(10, 4);
        let before = backend.buffer().clone();
        let mut root = DrawingContext::root(&mut backend);
        let mut child = root.shrink(Rect::new(20, 0, 5, 5));
        assert!(child.is_void());
        assert_eq!(child.width(), 0);
        child.draw_line(Point::new(0, 0), "invisible", options());
        child.draw_frame(Rect::new(0, 0, 5, 5), FrameOptions::default());
        child.clear(RectOptions::default());
        drop(child);
        drop(root);
        assert_eq!(*backend.buffer(), before);
    }

    #[test]
    fn test_scroll_shifts_without_reclipping() {
        let mut backend = TestBackend::new(10, 4);
        let mut root = DrawingContext::root(&mut backend);
        let mut inner = root.shrink(Rect::new(0, 0, 10, 2));
        let mut scrolled = inner.scroll(Point::new(0, -1));
        // Row 1 of the scrolled space lands on row 0; row 0 is dropped.
        scrolled.draw_line(Point::new(0, 0), "gone", options());
        scrolled.draw_line(Point::new(0, 1), "kept", options());
        drop(scrolled);
        drop(inner);
        drop(root);
        assert_eq!(backend.buffer().row_text(0), "kept      ");
        assert_eq!(backend.buffer().row_text(1), "          ");
    }

    #[test]
    fn test_sentinel_sized_rectangle_bounded_by_clip() {
        let mut backend = TestBackend::new(6, 3);
        let mut root = DrawingContext::root(&mut backend);
        root.draw_rectangle(
            Rect::new(1, 1, i32::MAX, i32::MAX),
            '#',
            RectOptions::default(),
        );
        drop(root);
        assert_eq!(backend.buffer().row_text(0), "      ");
        assert_eq!(backend.buffer().row_text(1), " #####");
        assert_eq!(backend.buffer().row_text(2), " #####");
    }

    #[test]
    fn test_draw_frame_single() {
        let mut backend = TestBackend::new(5, 3);
        let mut root = DrawingContext::root(&mut backend);
        root.draw_frame(Rect::new(0, 0, 5, 3), FrameOptions::default());
        drop(root);
        assert_eq!(backend.buffer().row_text(0), "┌───┐");
        assert_eq!(backend.buffer().row_text(1), "│   │");
        assert_eq!(backend.buffer().row_text(2), "└───┘");
    }

    #[test]
    fn test_draw_frame_degenerate_column() {
        let mut backend = TestBackend::new(3, 3);
        let mut root = DrawingContext::root(&mut backend);
        root.draw_frame(Rect::new(1, 0, 1, 3), FrameOptions::default());
        drop(root);
        assert_eq!(backend.buffer().row_text(1), " │ ");
    }

    #[test]
    fn test_draw_text_wraps_and_clips() {
        let mut backend = TestBackend::new(4, 2);
        let mut root = DrawingContext::root(&mut backend);
        root.draw_text(
            Rect::new(0, 0, 4, 2),
            "abcdefghij",
            TextOptions {
                wrapping: TextWrapping::Wrap,
                ..TextOptions::default()
            },
        );
        drop(root);
        assert_eq!(backend.buffer().row_text(0), "abcd");
        assert_eq!(backend.buffer().row_text(1), "efgh");
    }

    #[test]
    fn test_draw_text_no_wrap_truncates() {
        let mut backend = TestBackend::new(4, 2);
        let mut root = DrawingContext::root(&mut backend);
        root.draw_text(Rect::new(0, 0, 4, 2), "abcdefgh\nxy", options());
        drop(root);
        assert_eq!(backend.buffer().row_text(0), "abcd");
        assert_eq!(backend.buffer().row_text(1), "xy  ");
    }

    #[test]
    fn test_clear_fills_clip_only() {
        let mut backend = TestBackend::new(4, 2);
        let mut root = DrawingContext::root(&mut backend);
        root.draw_rectangle(Rect::new(0, 0, 4, 2), '#', RectOptions::default());
        let mut child = root.shrink(Rect::new(1, 0, 2, 2));
        child.clear(RectOptions {
            background: Color::Blue,
            ..RectOptions::default()
        });
        drop(child);
        drop(root);
        assert_eq!(backend.buffer().row_text(0), "#  #");
        assert_eq!(backend.buffer().get(1, 0).unwrap().bg, Color::Blue);
    }

    #[test]
    fn test_double_frame_style() {
        let mut backend = TestBackend::new(4, 3);
        let mut root = DrawingContext::root(&mut backend);
        root.draw_frame(
            Rect::new(0, 0, 4, 3),
            FrameOptions {
                style: FrameStyle::Double,
                ..FrameOptions::default()
            },
        );
        drop(root);
        assert_eq!(backend.buffer().row_text(0), "╔══╗");
        assert_eq!(backend.buffer().row_text(2), "╚══╝");
    }
}
