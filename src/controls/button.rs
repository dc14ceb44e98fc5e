//! A push button.

use std::any::Any;

use crate::control::{Behavior, KeyResponse};
use crate::drawing::{
    text_width, DrawingContext, FrameOptions, FrameStyle, RectOptions, TextOptions,
};
use crate::geometry::{Point, Rect};
use crate::input::{KeyCode, KeyEvent};
use crate::tree::{ControlId, Tree};

/// A focusable three-row framed button; Enter fires `Clicked`.
#[derive(Debug, Default)]
pub struct Button {
    pub text: String,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Behavior for Button {
    fn focusable(&self) -> bool {
        true
    }

    fn min_width(&self, _tree: &Tree, _id: ControlId) -> i32 {
        text_width(&self.text) + 4
    }

    fn min_height(&self, _tree: &Tree, _id: ControlId) -> i32 {
        3
    }

    fn max_width(&self, tree: &Tree, id: ControlId) -> i32 {
        self.min_width(tree, id)
    }

    fn max_height(&self, _tree: &Tree, _id: ControlId) -> i32 {
        3
    }

    fn handle_key(&mut self, _tree: &mut Tree, _id: ControlId, key: KeyEvent) -> KeyResponse {
        if key.code == KeyCode::Enter && key.modifiers.is_empty() {
            KeyResponse::Clicked
        } else {
            KeyResponse::Ignored
        }
    }

    fn render(&self, tree: &Tree, id: ControlId, ctx: &mut DrawingContext) {
        // The focused button renders inverted.
        let (foreground, background) = if tree.is_focused(id) {
            (tree.background(id), tree.foreground(id))
        } else {
            (tree.foreground(id), tree.background(id))
        };
        let full = Rect::new(0, 0, ctx.width(), ctx.height());
        ctx.clear(RectOptions {
            foreground,
            background,
            ..RectOptions::default()
        });
        ctx.draw_frame(
            full,
            FrameOptions::styled(FrameStyle::Single, foreground, background),
        );
        let x = ((ctx.width() - text_width(&self.text)) / 2).max(1);
        let y = (ctx.height() - 1) / 2;
        ctx.draw_line(
            Point::new(x, y),
            &self.text,
            TextOptions {
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
    use crate::input::Modifiers;

    #[test]
    fn test_enter_fires_clicked() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut tree = Tree::new();
        let button = tree.add(Button::new("OK"));
        let clicks = Rc::new(Cell::new(0));
        let count = clicks.clone();
        tree.on_clicked(
            button,
            Box::new(move |_, _| {
                count.set(count.get() + 1);
                Ok(())
            }),
        );
        tree.dispatch_key(
            button,
            KeyEvent::with_modifiers(KeyCode::Enter, Modifiers::NONE),
        )
        .unwrap();
        assert_eq!(clicks.get(), 1);
        // Other keys do not click.
        tree.dispatch_key(
            button,
            KeyEvent::with_modifiers(KeyCode::Char(' '), Modifiers::NONE),
        )
        .unwrap();
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_sizes_to_label() {
        let mut tree = Tree::new();
        let button = tree.add(Button::new("Save"));
        tree.set_width(button, SizePolicy::MaxByContent);
        tree.set_height(button, SizePolicy::MaxByContent);
        assert_eq!(tree.actual_width(button), 8);
        assert_eq!(tree.actual_height(button), 3);
    }

    #[test]
    fn test_renders_framed_label() {
        let mut tree = Tree::new();
        let button = tree.add(Button::new("OK"));
        tree.set_width(button, SizePolicy::Fixed(6));
        tree.set_height(button, SizePolicy::Fixed(3));
        let mut backend = TestBackend::new(6, 3);
        let mut ctx = DrawingContext::root(&mut backend);
        tree.behavior::<Button>(button).render(&tree, button, &mut ctx);
        drop(ctx);
        assert_eq!(backend.buffer().row_text(0), "┌────┐");
        assert_eq!(backend.buffer().row_text(1), "│ OK │");
        assert_eq!(backend.buffer().row_text(2), "└────┘");
    }

    #[test]
    fn test_failing_click_handler_surfaces() {
        let mut tree = Tree::new();
        let button = tree.add(Button::new("OK"));
        tree.on_clicked(button, Box::new(|_, _| Err("save failed".into())));
        let result = tree.dispatch_key(
            button,
            KeyEvent::with_modifiers(KeyCode::Enter, Modifiers::NONE),
        );
        assert!(result.is_err());
    }
}
