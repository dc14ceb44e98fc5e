//! Tabbed container.
//!
//! All tabs share the content box below a one-row header strip; only the
//! selected tab is visible, focusable, and rendered. The header scrolls
//! horizontally just enough to keep the selected title cell fully in
//! view.

use std::any::Any;

use crate::control::{Behavior, KeyResponse, SlotKind};
use crate::drawing::{
    frame_piece, text_width, DrawingContext, FramePiece, FrameStyle, RectOptions, TextOptions,
};
use crate::geometry::{Point, Rect};
use crate::input::{KeyCode, KeyEvent};
use crate::tree::{ControlId, Tree};

/// One page of a [`TabControl`]: a titled single-child container.
#[derive(Debug, Default)]
pub struct Tab {
    pub title: String,
}

impl Tab {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Behavior for Tab {
    fn slot_kind(&self) -> SlotKind {
        SlotKind::Content
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct TabControl {
    selected: usize,
}

impl TabControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the selected tab, clamped to the child count.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn set_selected_index(&mut self, index: usize) {
        self.selected = index;
    }

    /// The currently selected tab, if any tabs exist.
    pub fn selected_tab(&self, tree: &Tree, id: ControlId) -> Option<ControlId> {
        let children = tree.children(id);
        if children.is_empty() {
            return None;
        }
        children.get(self.selected.min(children.len() - 1)).copied()
    }

    fn title_of(tree: &Tree, child: ControlId) -> String {
        tree.behavior_dyn(child)
            .as_any()
            .downcast_ref::<Tab>()
            .map(|tab| tab.title.clone())
            .unwrap_or_default()
    }

    /// Header cell spans: `(start, width)` per tab, separators included
    /// in the running position.
    fn header_cells(tree: &Tree, id: ControlId) -> Vec<(i32, i32)> {
        let mut cells = Vec::new();
        let mut position = 0i32;
        for (index, child) in tree.children(id).into_iter().enumerate() {
            if index > 0 {
                position += 1; // separator column
            }
            let width = text_width(&Self::title_of(tree, child)) + 2;
            cells.push((position, width));
            position += width;
        }
        cells
    }

    /// Horizontal header scroll keeping the selected cell fully visible.
    fn header_scroll(&self, cells: &[(i32, i32)], viewport: i32) -> i32 {
        if viewport <= 0 {
            return 0;
        }
        match cells.get(self.selected.min(cells.len().saturating_sub(1))) {
            Some(&(start, width)) => {
                let overflow = start + width - viewport;
                overflow.max(0).min(start)
            }
            None => 0,
        }
    }
}

impl Behavior for TabControl {
    fn slot_kind(&self) -> SlotKind {
        SlotKind::Children
    }

    fn focusable(&self) -> bool {
        true
    }

    fn measure_bounding_box(&self, tree: &Tree, id: ControlId, _child: ControlId) -> Rect {
        let width = tree.actual_width(id);
        let height = tree.actual_height(id);
        Rect::new(0, 1, width, height.saturating_sub(1))
    }

    fn is_child_visible(&self, tree: &Tree, id: ControlId, child: ControlId) -> bool {
        self.selected_tab(tree, id) == Some(child)
    }

    fn focusable_children(&self, tree: &Tree, id: ControlId) -> Option<Vec<ControlId>> {
        Some(self.selected_tab(tree, id).into_iter().collect())
    }

    fn handle_key(&mut self, tree: &mut Tree, id: ControlId, key: KeyEvent) -> KeyResponse {
        let count = tree.children(id).len();
        if count == 0 || !key.modifiers.is_empty() {
            return KeyResponse::Ignored;
        }
        match key.code {
            KeyCode::Left => {
                self.selected = self.selected.min(count - 1).saturating_sub(1);
                KeyResponse::Handled
            }
            KeyCode::Right => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
                KeyResponse::Handled
            }
            _ => KeyResponse::Ignored,
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

        let children = tree.children(id);
        if children.is_empty() {
            return;
        }
        let cells = Self::header_cells(tree, id);
        let scroll = self.header_scroll(&cells, ctx.width());
        let selected = self.selected.min(children.len() - 1);

        for (index, (child, &(start, _))) in children.iter().zip(cells.iter()).enumerate() {
            let x = start - scroll;
            if index > 0 {
                ctx.draw_line(
                    Point::new(x - 1, 0),
                    &frame_piece(FramePiece::VERTICAL, FrameStyle::Single).to_string(),
                    TextOptions {
                        foreground,
                        background,
                        ..TextOptions::default()
                    },
                );
            }
            // Selected title renders inverted.
            let (fg, bg) = if index == selected {
                (background, foreground)
            } else {
                (foreground, background)
            };
            ctx.draw_line(
                Point::new(x, 0),
                &format!(" {} ", Self::title_of(tree, *child)),
                TextOptions {
                    foreground: fg,
                    background: bg,
                    ..TextOptions::default()
                },
            );
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
