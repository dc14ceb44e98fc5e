//! A focusable, arrow-scrollable text area.

use std::any::Any;
use std::cell::Cell as StdCell;

use crate::control::{Behavior, KeyResponse};
use crate::drawing::{
    measure_text, measure_wrapped_text, DrawingContext, RectOptions, TextOptions, TextWrapping,
};
use crate::geometry::{Point, Rect, Size};
use crate::input::{KeyCode, KeyEvent};
use crate::tree::{ControlId, Tree};

/// Scrollable text. In wrap mode the text reflows to the box width and
/// only vertical scrolling applies; unwrapped text scrolls on both axes.
/// Offsets clamp against the measured text extent at render time.
#[derive(Debug, Default)]
pub struct TextBox {
    pub text: String,
    pub wrapping: TextWrapping,
    scroll_x: StdCell<i32>,
    scroll_y: StdCell<i32>,
}

impl TextBox {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn scroll(&self) -> Point {
        Point::new(self.scroll_x.get(), self.scroll_y.get())
    }

    fn extent(&self, width: i32) -> Size {
        match self.wrapping {
            TextWrapping::Wrap => measure_wrapped_text(&self.text, width),
            TextWrapping::NoWrap => measure_text(&self.text),
        }
    }
}

impl Behavior for TextBox {
    fn focusable(&self) -> bool {
        true
    }

    fn max_width(&self, _tree: &Tree, _id: ControlId) -> i32 {
        measure_text(&self.text).width
    }

    fn max_height(&self, tree: &Tree, id: ControlId) -> i32 {
        self.extent(tree.actual_width(id)).height
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
        self.scroll_x
            .set(self.scroll_x.get().saturating_add(dx).max(0));
        self.scroll_y
            .set(self.scroll_y.get().saturating_add(dy).max(0));
        KeyResponse::Handled
    }

    fn render(&self, tree: &Tree, id: ControlId, ctx: &mut DrawingContext) {
        let foreground = tree.foreground(id);
        let background = tree.background(id);
        ctx.clear(RectOptions {
            foreground,
            background,
            ..RectOptions::default()
        });

        let width = ctx.width();
        let height = ctx.height();
        let extent = self.extent(width);
        let x = match self.wrapping {
            // Wrapped text reflows instead of scrolling sideways.
            TextWrapping::Wrap => 0,
            TextWrapping::NoWrap => self
                .scroll_x
                .get()
                .clamp(0, extent.width.saturating_sub(width).max(0)),
        };
        let y = self
            .scroll_y
            .get()
            .clamp(0, extent.height.saturating_sub(height).max(0));
        self.scroll_x.set(x);
        self.scroll_y.set(y);

        let mut scrolled = ctx.scroll(Point::new(-x, -y));
        scrolled.draw_text(
            Rect::new(0, 0, extent.width.max(width), extent.height.max(height)),
            &self.text,
            TextOptions {
                wrapping: self.wrapping,
                foreground,
                background,
                ..TextOptions::default()
            },
        );
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
