//! Top-level windows.
//!
//! A window is an ordinary control the console places against the
//! terminal by alignment; it draws a frame with a caption in the top
//! edge. [`GridWindow`] combines the window chrome with grid track
//! layout and separator drawing for its children.

use std::any::Any;

use crate::control::{Behavior, SlotKind};
use crate::drawing::{
    clip_line, text_width, DrawingContext, FrameOptions, FrameStyle, RectOptions, TextOptions,
};
use crate::geometry::{Point, Rect, Size};
use crate::tree::{ControlId, Tree};

use super::grid::{Grid, GridPlacement, GridSize};

/// Caption text for a frame `width` cells wide, padding included.
///
/// Below 9 cells there is no caption at all; a title that cannot fit the
/// width budget is truncated with a trailing ellipsis.
pub(crate) fn window_caption(title: &str, width: i32) -> Option<String> {
    if width < 9 {
        return None;
    }
    let budget = width - 4;
    let text = if text_width(title) + 2 > budget {
        format!("{}...", clip_line(title, width - 9))
    } else {
        title.to_string()
    };
    Some(format!(" {text} "))
}

fn draw_caption(tree: &Tree, id: ControlId, ctx: &mut DrawingContext, title: &str) {
    if let Some(caption) = window_caption(title, ctx.width()) {
        ctx.draw_line(
            Point::new(2, 0),
            &caption,
            TextOptions {
                foreground: tree.foreground(id),
                background: tree.background(id),
                ..TextOptions::default()
            },
        );
    }
}

// =============================================================================
// Window
// =============================================================================

/// A framed, captioned single-child window.
#[derive(Debug, Default)]
pub struct Window {
    pub title: String,
    pub style: FrameStyle,
}

impl Window {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            style: FrameStyle::Single,
        }
    }
}

impl Behavior for Window {
    fn slot_kind(&self) -> SlotKind {
        SlotKind::Content
    }

    fn measure_bounding_box(&self, tree: &Tree, id: ControlId, _child: ControlId) -> Rect {
        let width = tree.actual_width(id);
        let height = tree.actual_height(id);
        Rect::new(1, 1, width.saturating_sub(2), height.saturating_sub(2))
    }

    fn min_width(&self, _tree: &Tree, _id: ControlId) -> i32 {
        2
    }

    fn min_height(&self, _tree: &Tree, _id: ControlId) -> i32 {
        2
    }

    fn box_reduction(&self) -> Size {
        Size::new(2, 2)
    }

    fn render(&self, tree: &Tree, id: ControlId, ctx: &mut DrawingContext) {
        let foreground = tree.foreground(id);
        let background = tree.background(id);
        ctx.clear(RectOptions {
            foreground,
            background,
            ..RectOptions::default()
        });
        ctx.draw_frame(
            Rect::new(0, 0, ctx.width(), ctx.height()),
            FrameOptions::styled(self.style, foreground, background),
        );
        draw_caption(tree, id, ctx, &self.title);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// =============================================================================
// GridWindow
// =============================================================================

/// A captioned window whose children sit on a bordered grid.
#[derive(Debug)]
pub struct GridWindow {
    pub title: String,
    pub grid: Grid,
}

impl GridWindow {
    pub fn new(title: impl Into<String>, rows: Vec<GridSize>, columns: Vec<GridSize>) -> Self {
        Self {
            title: title.into(),
            grid: Grid::new(rows, columns).with_borders(FrameStyle::Single),
        }
    }

    pub fn place(&mut self, child: ControlId, placement: GridPlacement) {
        self.grid.place(child, placement);
    }
}

impl Behavior for GridWindow {
    fn slot_kind(&self) -> SlotKind {
        SlotKind::Children
    }

    fn measure_bounding_box(&self, tree: &Tree, id: ControlId, child: ControlId) -> Rect {
        self.grid.measure_bounding_box(tree, id, child)
    }

    fn max_width(&self, tree: &Tree, id: ControlId) -> i32 {
        self.grid.max_width(tree, id)
    }

    fn max_height(&self, tree: &Tree, id: ControlId) -> i32 {
        self.grid.max_height(tree, id)
    }

    fn render(&self, tree: &Tree, id: ControlId, ctx: &mut DrawingContext) {
        self.grid.draw(tree, id, ctx);
        draw_caption(tree, id, ctx, &self.title);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
