//! The control capability surface.
//!
//! A control is a node in the [`Tree`](crate::tree::Tree) plus a
//! [`Behavior`]: the tree owns identity, parenthood, sizing policy and
//! event registries generically, while the behavior supplies everything
//! container-specific. The entire layout contract a container implements
//! is three methods (`measure_bounding_box`, `scroll_offset`,
//! `is_child_visible`); the generic render and focus walks never probe
//! concrete types.

use std::any::Any;

use crate::drawing::DrawingContext;
use crate::geometry::{Point, Rect, Size};
use crate::input::KeyEvent;
use crate::tree::{ControlId, Tree};

// =============================================================================
// Sizing
// =============================================================================

/// How a control's width or height is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizePolicy {
    /// Exactly this many cells.
    Fixed(i32),
    /// The sentinel maximum; effectively "as much as can be drawn".
    Infinite,
    /// Whatever the parent's layout allocates.
    #[default]
    BoundingBox,
    /// The control's own minimum (frame thickness and the like).
    MinByContent,
    /// Sized to fit content, via the behavior's max-size hook.
    MaxByContent,
}

/// How many children a control's slot can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// No children.
    Leaf,
    /// One optional child.
    Content,
    /// An ordered child list.
    Children,
}

/// Placement of a window edge-to-edge against the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Begin,
    Center,
    End,
}

impl Alignment {
    /// Offset of an `extent`-sized span inside `available` cells.
    pub fn place(self, extent: i32, available: i32) -> i32 {
        match self {
            Alignment::Begin => 0,
            Alignment::Center => ((available - extent) / 2).max(0),
            Alignment::End => (available - extent).max(0),
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// Error type user handlers may fail with.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// What user event handlers return.
pub type HandlerResult = Result<(), HandlerError>;

/// Mutable key-dispatch state threaded through the bubble chain.
#[derive(Debug)]
pub struct KeyEventArgs {
    pub key: KeyEvent,
    /// Set by a handler to stop further bubbling.
    pub handled: bool,
}

impl KeyEventArgs {
    pub fn new(key: KeyEvent) -> Self {
        Self {
            key,
            handled: false,
        }
    }
}

/// Handler for key events, bubbled with a handled flag.
pub type KeyHandler = Box<dyn FnMut(&mut Tree, ControlId, &mut KeyEventArgs) -> HandlerResult>;

/// Handler for parameterless control events.
pub type EventHandler = Box<dyn FnMut(&mut Tree, ControlId) -> HandlerResult>;

/// What a behavior's built-in key handling did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    /// Not consumed; keep bubbling.
    Ignored,
    /// Consumed.
    Handled,
    /// Consumed, and the control was activated (fires `Clicked`).
    Clicked,
}

// =============================================================================
// Behavior
// =============================================================================

/// Everything container- or widget-specific about a control.
///
/// Defaults describe a plain leaf: no children, no focus, no drawing,
/// content-sized to zero. Containers override the slot kind and the three
/// layout methods; widgets override `render` and `handle_key`.
pub trait Behavior: Any {
    /// Child-slot arity. Fixed per concrete type.
    fn slot_kind(&self) -> SlotKind {
        SlotKind::Leaf
    }

    /// The rectangle allocated to `child`, in this control's local space.
    ///
    /// Default: the full box.
    fn measure_bounding_box(&self, tree: &Tree, id: ControlId, child: ControlId) -> Rect {
        let _ = child;
        Rect::new(0, 0, tree.actual_width(id), tree.actual_height(id))
    }

    /// Scroll transform applied to `child`'s drawing context.
    fn scroll_offset(&self, tree: &Tree, id: ControlId, child: ControlId) -> Point {
        let _ = (tree, id, child);
        Point::ZERO
    }

    /// Whether `child` participates in rendering and focus at all.
    fn is_child_visible(&self, tree: &Tree, id: ControlId, child: ControlId) -> bool {
        let _ = (tree, id, child);
        true
    }

    /// Minimum width, used by the MinByContent policy.
    fn min_width(&self, tree: &Tree, id: ControlId) -> i32 {
        let _ = (tree, id);
        0
    }

    /// Minimum height, used by the MinByContent policy.
    fn min_height(&self, tree: &Tree, id: ControlId) -> i32 {
        let _ = (tree, id);
        0
    }

    /// Cells this control adds around its content on each axis (a frame
    /// adds 2×2). Feeds the default MaxByContent resolution.
    fn box_reduction(&self) -> Size {
        Size::ZERO
    }

    /// Width for the MaxByContent policy. Default: content width plus the
    /// box reduction (max over children for list slots).
    fn max_width(&self, tree: &Tree, id: ControlId) -> i32 {
        tree.content_max_width(id)
    }

    /// Height for the MaxByContent policy.
    fn max_height(&self, tree: &Tree, id: ControlId) -> i32 {
        tree.content_max_height(id)
    }

    /// Whether this control can take keyboard focus. Fixed per concrete
    /// type; sampled once at attach.
    fn focusable(&self) -> bool {
        false
    }

    /// Restrict which children the focus walk descends into. `None`
    /// means all slot children.
    fn focusable_children(&self, tree: &Tree, id: ControlId) -> Option<Vec<ControlId>> {
        let _ = (tree, id);
        None
    }

    /// Draw this control into its own context. Children are drawn by the
    /// generic walk afterwards, through shrunk sub-contexts.
    fn render(&self, tree: &Tree, id: ControlId, ctx: &mut DrawingContext) {
        let _ = (tree, id, ctx);
    }

    /// Built-in key handling, before user key handlers.
    fn handle_key(&mut self, tree: &mut Tree, id: ControlId, key: KeyEvent) -> KeyResponse {
        let _ = (tree, id, key);
        KeyResponse::Ignored
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_place() {
        assert_eq!(Alignment::Begin.place(4, 10), 0);
        assert_eq!(Alignment::Center.place(4, 10), 3);
        assert_eq!(Alignment::End.place(4, 10), 6);
        // oversized extents pin to the origin
        assert_eq!(Alignment::Center.place(20, 10), 0);
        assert_eq!(Alignment::End.place(20, 10), 0);
    }

    #[test]
    fn test_default_size_policy_is_bounding_box() {
        assert_eq!(SizePolicy::default(), SizePolicy::BoundingBox);
    }
}
