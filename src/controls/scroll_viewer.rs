//! Viewport over oversized content.
//!
//! The viewer never draws its child; it only reports a scroll transform
//! through `scroll_offset`, which the generic render walk applies to the
//! child's drawing context. Offsets are stored raw and normalized on
//! every layout read, so the trailing edge can never scroll past the
//! viewport edge and the leading edge never past zero.

use std::any::Any;
use std::cell::Cell as StdCell;

use crate::control::{Behavior, KeyResponse, SizePolicy, SlotKind};
use crate::drawing::{DrawingContext, RectOptions};
use crate::geometry::{Point, Rect};
use crate::input::{KeyCode, KeyEvent};
use crate::tree::{ControlId, Tree};

#[derive(Debug, Default)]
pub struct ScrollViewer {
    offset_x: StdCell<i32>,
    offset_y: StdCell<i32>,
}

impl ScrollViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The clamped scroll position.
    pub fn offset(&self, tree: &Tree, id: ControlId) -> Point {
        self.normalize(tree, id)
    }

    pub fn scroll_to(&mut self, x: i32, y: i32) {
        self.offset_x.set(x.max(0));
        self.offset_y.set(y.max(0));
    }

    /// Extent the content wants on each axis. A BoundingBox child cannot
    /// be larger than the viewport, so it never scrolls.
    fn content_extent(tree: &Tree, id: ControlId, child: ControlId) -> (i32, i32) {
        let width = if matches!(tree.width(child), SizePolicy::BoundingBox) {
            tree.actual_width(id)
        } else {
            tree.actual_width(child)
        };
        let height = if matches!(tree.height(child), SizePolicy::BoundingBox) {
            tree.actual_height(id)
        } else {
            tree.actual_height(child)
        };
        (width, height)
    }

    /// Clamp the stored offsets against the current content and viewport
    /// sizes, writing the normalized values back.
    fn normalize(&self, tree: &Tree, id: ControlId) -> Point {
        let Some(child) = tree.content(id) else {
            return Point::ZERO;
        };
        let (content_width, content_height) = Self::content_extent(tree, id, child);
        let max_x = content_width.saturating_sub(tree.actual_width(id)).max(0);
        let max_y = content_height.saturating_sub(tree.actual_height(id)).max(0);
        let x = self.offset_x.get().clamp(0, max_x);
        let y = self.offset_y.get().clamp(0, max_y);
        self.offset_x.set(x);
        self.offset_y.set(y);
        Point::new(x, y)
    }
}

impl Behavior for ScrollViewer {
    fn slot_kind(&self) -> SlotKind {
        SlotKind::Content
    }

    fn focusable(&self) -> bool {
        true
    }

    fn measure_bounding_box(&self, tree: &Tree, id: ControlId, child: ControlId) -> Rect {
        let (width, height) = Self::content_extent(tree, id, child);
        Rect::new(0, 0, width, height)
    }

    fn scroll_offset(&self, tree: &Tree, id: ControlId, _child: ControlId) -> Point {
        let offset = self.normalize(tree, id);
        Point::new(-offset.x, -offset.y)
    }

    fn handle_key(&mut self, _tree: &mut Tree, _id: ControlId, key: KeyEvent) -> KeyResponse {
        if !key.modifiers.is_empty() {
            return KeyResponse::Ignored;
        }
        let (dx, dy) = match key.code {
            KeyCode::Up => (0, -1),
            KeyCode::Down => (0, 1),
            KeyCode::Left => (-1, 0),
            KeyCode::Right => (1, 0),
            _ => return KeyResponse::Ignored,
        };
        // Stored raw; the next layout read clamps.
        self.offset_x
            .set(self.offset_x.get().saturating_add(dx).max(0));
        self.offset_y
            .set(self.offset_y.get().saturating_add(dy).max(0));
        KeyResponse::Handled
    }

    fn render(&self, tree: &Tree, id: ControlId, ctx: &mut DrawingContext) {
        ctx.clear(RectOptions {
            foreground: tree.foreground(id),
            background: tree.background(id),
            ..RectOptions::default()
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
