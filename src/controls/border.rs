//! A single-child frame.

use std::any::Any;

use crate::control::Behavior;
use crate::drawing::{DrawingContext, FrameOptions, FrameStyle, RectOptions};
use crate::geometry::{Rect, Size};
use crate::tree::{ControlId, Tree};

/// Draws a one-cell frame and hands the inset rectangle to its content.
#[derive(Debug, Default)]
pub struct Border {
    pub style: FrameStyle,
}

impl Border {
    pub fn new(style: FrameStyle) -> Self {
        Self { style }
    }
}

impl Behavior for Border {
    fn slot_kind(&self) -> crate::control::SlotKind {
        crate::control::SlotKind::Content
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
        let full = Rect::new(0, 0, ctx.width(), ctx.height());
        ctx.clear(RectOptions {
            foreground,
            background,
            ..RectOptions::default()
        });
        ctx.draw_frame(full, FrameOptions::styled(self.style, foreground, background));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
