//! Read-only text display.

use std::any::Any;

use crate::control::Behavior;
use crate::drawing::{
    measure_text, measure_wrapped_text, DrawingContext, RectOptions, TextOptions, TextWrapping,
};
use crate::geometry::Rect;
use crate::tree::{ControlId, Tree};

/// Displays a block of text, optionally hard-wrapped at its own width.
#[derive(Debug, Default)]
pub struct TextView {
    pub text: String,
    pub wrapping: TextWrapping,
}

impl TextView {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wrapping: TextWrapping::NoWrap,
        }
    }

    pub fn wrapped(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wrapping: TextWrapping::Wrap,
        }
    }
}

impl Behavior for TextView {
    fn max_width(&self, _tree: &Tree, _id: ControlId) -> i32 {
        measure_text(&self.text).width
    }

    fn max_height(&self, tree: &Tree, id: ControlId) -> i32 {
        match self.wrapping {
            TextWrapping::NoWrap => measure_text(&self.text).height,
            TextWrapping::Wrap => {
                measure_wrapped_text(&self.text, tree.actual_width(id)).height
            }
        }
    }

    fn render(&self, tree: &Tree, id: ControlId, ctx: &mut DrawingContext) {
        let foreground = tree.foreground(id);
        let background = tree.background(id);
        ctx.clear(RectOptions {
            foreground,
            background,
            ..RectOptions::default()
        });
        ctx.draw_text(
            Rect::new(0, 0, ctx.width(), ctx.height()),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TestBackend;
    use crate::control::SizePolicy;

    #[test]
    fn test_sizes_to_content() {
        let mut tree = Tree::new();
        let view = tree.add(TextView::new("one\ntwo longer"));
        tree.set_width(view, SizePolicy::MaxByContent);
        tree.set_height(view, SizePolicy::MaxByContent);
        assert_eq!(tree.actual_width(view), 10);
        assert_eq!(tree.actual_height(view), 2);
    }

    #[test]
    fn test_wrapped_height_follows_width() {
        let mut tree = Tree::new();
        let view = tree.add(TextView::wrapped("abcdefghij"));
        tree.set_width(view, SizePolicy::Fixed(4));
        tree.set_height(view, SizePolicy::MaxByContent);
        assert_eq!(tree.actual_height(view), 3);
    }

    #[test]
    fn test_render_draws_text() {
        let mut tree = Tree::new();
        let view = tree.add(TextView::new("hi"));
        tree.set_width(view, SizePolicy::Fixed(5));
        tree.set_height(view, SizePolicy::Fixed(1));
        let mut backend = TestBackend::new(5, 1);
        let mut ctx = DrawingContext::root(&mut backend);
        tree.behavior::<TextView>(view).render(&tree, view, &mut ctx);
        drop(ctx);
        assert_eq!(backend.buffer().row_text(0), "hi   ");
    }
}
