//! The control tree.
//!
//! An index arena owns every control: nodes live in a `Vec` with a free
//! pool, and a [`ControlId`] is the only handle application code holds.
//! The tree implements everything generic once — identity, the exclusive
//! parent link and its attach protocol, size resolution with the
//! measurement-cycle guard, visibility resolution, event registries and
//! key dispatch — while each node's [`Behavior`] supplies the
//! container-specific layout answers.
//!
//! Using a `ControlId` after its control has been removed is a contract
//! violation and panics, the same as indexing a vector out of bounds.

use std::cell::Cell as StdCell;
use std::mem;

use crate::cell::Color;
use crate::control::{
    Behavior, EventHandler, KeyEventArgs, KeyHandler, KeyResponse, SizePolicy, SlotKind,
};
use crate::error::{Error, Result};
use crate::geometry::Size;
use crate::input::KeyEvent;

// =============================================================================
// Identity
// =============================================================================

/// Handle to a control in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(u32);

/// The children view of one control: a leaf, a single optional content
/// slot, or an ordered child list. Fixed per behavior type at attach.
#[derive(Debug)]
pub(crate) enum Slot {
    Leaf,
    Content(Option<ControlId>),
    Children(Vec<ControlId>),
}

impl Slot {
    fn for_kind(kind: SlotKind) -> Self {
        match kind {
            SlotKind::Leaf => Slot::Leaf,
            SlotKind::Content => Slot::Content(None),
            SlotKind::Children => Slot::Children(Vec::new()),
        }
    }

    fn children(&self) -> Vec<ControlId> {
        match self {
            Slot::Leaf => Vec::new(),
            Slot::Content(c) => c.iter().copied().collect(),
            Slot::Children(c) => c.clone(),
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// Parameterless per-control events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    Clicked,
    GotFocus,
    LostFocus,
    SizeChanged,
    DetachedFromParent,
    Rendered,
}

#[derive(Default)]
struct Events {
    preview_key: Vec<KeyHandler>,
    key: Vec<KeyHandler>,
    clicked: Vec<EventHandler>,
    got_focus: Vec<EventHandler>,
    lost_focus: Vec<EventHandler>,
    size_changed: Vec<EventHandler>,
    detached: Vec<EventHandler>,
    rendered: Vec<EventHandler>,
}

impl Events {
    fn simple_mut(&mut self, event: ControlEvent) -> &mut Vec<EventHandler> {
        match event {
            ControlEvent::Clicked => &mut self.clicked,
            ControlEvent::GotFocus => &mut self.got_focus,
            ControlEvent::LostFocus => &mut self.lost_focus,
            ControlEvent::SizeChanged => &mut self.size_changed,
            ControlEvent::DetachedFromParent => &mut self.detached,
            ControlEvent::Rendered => &mut self.rendered,
        }
    }
}

// =============================================================================
// Nodes
// =============================================================================

const MEASURING_WIDTH: u8 = 0b01;
const MEASURING_HEIGHT: u8 = 0b10;

struct Node {
    /// `None` only transiently while the behavior is borrowed out for
    /// mutable dispatch.
    behavior: Option<Box<dyn Behavior>>,
    name: Option<String>,
    parent: Option<ControlId>,
    slot: Slot,
    width: SizePolicy,
    height: SizePolicy,
    foreground: Color,
    background: Color,
    visible: bool,
    focusable: bool,
    suppress_handler_errors: bool,
    /// Re-entrancy bits for MaxByContent evaluation.
    measuring: StdCell<u8>,
    events: Events,
}

// =============================================================================
// Tree
// =============================================================================

pub struct Tree {
    nodes: Vec<Option<Node>>,
    free: Vec<u32>,
    /// Fallback box for parentless BoundingBox controls; the console keeps
    /// it equal to the terminal size.
    viewport: Size,
    focused: Option<ControlId>,
    dirty: bool,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            viewport: Size::ZERO,
            focused: None,
            dirty: true,
        }
    }

    // -------------------------------------------------------------------------
    // Arena plumbing
    // -------------------------------------------------------------------------

    /// Add a control with the given behavior. It starts detached,
    /// visible, and BoundingBox-sized.
    pub fn add(&mut self, behavior: impl Behavior) -> ControlId {
        let node = Node {
            slot: Slot::for_kind(behavior.slot_kind()),
            focusable: behavior.focusable(),
            behavior: Some(Box::new(behavior)),
            name: None,
            parent: None,
            width: SizePolicy::BoundingBox,
            height: SizePolicy::BoundingBox,
            foreground: Color::Gray,
            background: Color::Black,
            visible: true,
            suppress_handler_errors: false,
            measuring: StdCell::new(0),
            events: Events::default(),
        };
        self.dirty = true;
        match self.free.pop() {
            Some(index) => {
                self.nodes[index as usize] = Some(node);
                ControlId(index)
            }
            None => {
                self.nodes.push(Some(node));
                ControlId(self.nodes.len() as u32 - 1)
            }
        }
    }

    /// Detach a control and release its whole subtree back to the pool.
    pub fn remove(&mut self, id: ControlId) -> Result<()> {
        self.set_parent(id, None)?;
        self.release(id);
        self.dirty = true;
        Ok(())
    }

    fn release(&mut self, id: ControlId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
        if let Some(node) = self.nodes[id.0 as usize].take() {
            for child in node.slot.children() {
                self.release(child);
            }
            self.free.push(id.0);
        }
    }

    #[inline]
    pub fn contains(&self, id: ControlId) -> bool {
        self.nodes
            .get(id.0 as usize)
            .is_some_and(|slot| slot.is_some())
    }

    fn node(&self, id: ControlId) -> &Node {
        self.nodes[id.0 as usize]
            .as_ref()
            .expect("control was removed")
    }

    fn node_mut(&mut self, id: ControlId) -> &mut Node {
        self.nodes[id.0 as usize]
            .as_mut()
            .expect("control was removed")
    }

    pub(crate) fn behavior_dyn(&self, id: ControlId) -> &dyn Behavior {
        self.node(id)
            .behavior
            .as_deref()
            .expect("behavior is borrowed for dispatch")
    }

    /// Typed view of a control's behavior.
    ///
    /// Panics if `id` holds a different behavior type.
    pub fn behavior<T: Behavior>(&self, id: ControlId) -> &T {
        self.behavior_dyn(id)
            .as_any()
            .downcast_ref()
            .expect("behavior type mismatch")
    }

    /// Mutate a control's behavior and mark the tree dirty.
    ///
    /// Panics if `id` holds a different behavior type.
    pub fn update<T: Behavior, R>(&mut self, id: ControlId, f: impl FnOnce(&mut T) -> R) -> R {
        self.dirty = true;
        let behavior = self
            .node_mut(id)
            .behavior
            .as_deref_mut()
            .expect("behavior is borrowed for dispatch");
        f(behavior
            .as_any_mut()
            .downcast_mut()
            .expect("behavior type mismatch"))
    }

    /// Run `f` with the behavior borrowed out of the node, so it can
    /// receive the tree mutably. While borrowed, the control must not
    /// resolve its own size or behavior through the tree.
    pub(crate) fn with_behavior_mut<R>(
        &mut self,
        id: ControlId,
        f: impl FnOnce(&mut Tree, &mut dyn Behavior) -> R,
    ) -> R {
        let mut behavior = self
            .node_mut(id)
            .behavior
            .take()
            .expect("behavior is borrowed for dispatch");
        let result = f(self, &mut *behavior);
        if self.contains(id) {
            self.node_mut(id).behavior = Some(behavior);
        }
        result
    }

    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------

    pub fn name(&self, id: ControlId) -> Option<&str> {
        self.node(id).name.as_deref()
    }

    /// Name a control. Names are unique within the tree rooted at the
    /// outermost ancestor.
    pub fn set_name(&mut self, id: ControlId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        let root = self.root_of(id);
        if let Some(existing) = self.find_by_name(root, &name) {
            if existing != id {
                return Err(Error::DuplicateName(name));
            }
        }
        self.node_mut(id).name = Some(name);
        Ok(())
    }

    /// Find a control by name in the tree containing `from`.
    pub fn find_by_name(&self, from: ControlId, name: &str) -> Option<ControlId> {
        self.subtree(self.root_of(from))
            .into_iter()
            .find(|&id| self.node(id).name.as_deref() == Some(name))
    }

    pub fn root_of(&self, id: ControlId) -> ControlId {
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            current = parent;
        }
        current
    }

    /// The control and all its descendants, pre-order.
    pub fn subtree(&self, id: ControlId) -> Vec<ControlId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.node(next).slot.children());
        }
        out
    }

    fn is_ancestor(&self, ancestor: ControlId, of: ControlId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).parent;
        }
        false
    }

    // -------------------------------------------------------------------------
    // Attach protocol
    // -------------------------------------------------------------------------

    /// Re-parent a control.
    ///
    /// All failure modes are checked before the first mutation, so a
    /// failed call leaves the tree untouched. Attaching to the current
    /// parent is a no-op; attaching elsewhere evicts the control from its
    /// old slot first (firing `DetachedFromParent`); `None` detaches.
    pub fn set_parent(&mut self, child: ControlId, parent: Option<ControlId>) -> Result<()> {
        let Some(parent) = parent else {
            if self.node(child).parent.is_some() {
                self.detach(child);
            }
            return Ok(());
        };

        if self.node(child).parent == Some(parent) {
            return Ok(());
        }
        if matches!(self.node(parent).slot, Slot::Leaf) {
            return Err(Error::NotAParent(parent));
        }
        if self.is_ancestor(child, parent) {
            return Err(Error::ParentCycle);
        }
        // Merging two trees must not produce colliding names.
        let target_root = self.root_of(parent);
        for id in self.subtree(child) {
            if let Some(name) = self.node(id).name.clone() {
                if self.find_by_name(target_root, &name).is_some() {
                    return Err(Error::DuplicateName(name));
                }
            }
        }

        if self.node(child).parent.is_some() {
            self.detach(child);
        }
        let evicted = match &mut self.node_mut(parent).slot {
            Slot::Content(slot) => {
                let evicted = slot.take();
                *slot = Some(child);
                evicted
            }
            Slot::Children(list) => {
                list.push(child);
                None
            }
            Slot::Leaf => unreachable!("checked above"),
        };
        if let Some(old) = evicted {
            self.node_mut(old).parent = None;
            self.emit_lossy(old, ControlEvent::DetachedFromParent);
        }
        self.node_mut(child).parent = Some(parent);
        self.dirty = true;
        Ok(())
    }

    /// Replace a content control's single child.
    pub fn set_content(&mut self, parent: ControlId, content: Option<ControlId>) -> Result<()> {
        match content {
            Some(child) => self.set_parent(child, Some(parent)),
            None => {
                let current = match &self.node(parent).slot {
                    Slot::Content(c) => *c,
                    _ => return Err(Error::NotAParent(parent)),
                };
                if let Some(child) = current {
                    self.detach(child);
                }
                Ok(())
            }
        }
    }

    /// Append to a children control's list (routes through the attach
    /// protocol).
    pub fn add_child(&mut self, parent: ControlId, child: ControlId) -> Result<()> {
        self.set_parent(child, Some(parent))
    }

    fn detach(&mut self, child: ControlId) {
        if let Some(parent) = self.node(child).parent {
            match &mut self.node_mut(parent).slot {
                Slot::Content(slot) => {
                    if *slot == Some(child) {
                        *slot = None;
                    }
                }
                Slot::Children(list) => list.retain(|&c| c != child),
                Slot::Leaf => {}
            }
        }
        self.node_mut(child).parent = None;
        self.dirty = true;
        self.emit_lossy(child, ControlEvent::DetachedFromParent);
    }

    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.node(id).parent
    }

    /// Children in slot order (the content slot has at most one).
    pub fn children(&self, id: ControlId) -> Vec<ControlId> {
        self.node(id).slot.children()
    }

    /// A content control's single child.
    pub fn content(&self, id: ControlId) -> Option<ControlId> {
        match &self.node(id).slot {
            Slot::Content(c) => *c,
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    pub fn width(&self, id: ControlId) -> SizePolicy {
        self.node(id).width
    }

    pub fn height(&self, id: ControlId) -> SizePolicy {
        self.node(id).height
    }

    pub fn set_width(&mut self, id: ControlId, width: SizePolicy) {
        if self.node(id).width != width {
            self.node_mut(id).width = width;
            self.dirty = true;
            self.emit_lossy(id, ControlEvent::SizeChanged);
        }
    }

    pub fn set_height(&mut self, id: ControlId, height: SizePolicy) {
        if self.node(id).height != height {
            self.node_mut(id).height = height;
            self.dirty = true;
            self.emit_lossy(id, ControlEvent::SizeChanged);
        }
    }

    pub fn foreground(&self, id: ControlId) -> Color {
        self.node(id).foreground
    }

    pub fn background(&self, id: ControlId) -> Color {
        self.node(id).background
    }

    pub fn set_foreground(&mut self, id: ControlId, color: Color) {
        self.node_mut(id).foreground = color;
        self.dirty = true;
    }

    pub fn set_background(&mut self, id: ControlId, color: Color) {
        self.node_mut(id).background = color;
        self.dirty = true;
    }

    pub fn visible(&self, id: ControlId) -> bool {
        self.node(id).visible
    }

    pub fn set_visible(&mut self, id: ControlId, visible: bool) {
        if self.node(id).visible != visible {
            self.node_mut(id).visible = visible;
            self.dirty = true;
        }
    }

    pub fn is_focusable(&self, id: ControlId) -> bool {
        self.node(id).focusable
    }

    /// Whether failing event handlers on this control are logged and
    /// swallowed instead of aborting dispatch.
    pub fn suppress_handler_errors(&self, id: ControlId) -> bool {
        self.node(id).suppress_handler_errors
    }

    pub fn set_suppress_handler_errors(&mut self, id: ControlId, suppress: bool) {
        self.node_mut(id).suppress_handler_errors = suppress;
    }

    // -------------------------------------------------------------------------
    // Size resolution
    // -------------------------------------------------------------------------

    /// The box parentless BoundingBox controls resolve against.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.dirty = true;
        }
    }

    /// Resolve a control's width from its policy.
    pub fn actual_width(&self, id: ControlId) -> i32 {
        let node = self.node(id);
        match node.width {
            SizePolicy::Fixed(n) => n.max(0),
            SizePolicy::Infinite => i32::MAX,
            SizePolicy::BoundingBox => match node.parent {
                Some(parent) => {
                    self.behavior_dyn(parent)
                        .measure_bounding_box(self, parent, id)
                        .width
                }
                None => self.viewport.width,
            },
            SizePolicy::MinByContent => self.behavior_dyn(id).min_width(self, id),
            SizePolicy::MaxByContent => {
                if node.measuring.get() & MEASURING_WIDTH != 0 {
                    log::warn!("width measurement cycle at {id:?}, using sentinel");
                    return i32::MAX;
                }
                node.measuring.set(node.measuring.get() | MEASURING_WIDTH);
                let width = self.behavior_dyn(id).max_width(self, id);
                node.measuring.set(node.measuring.get() & !MEASURING_WIDTH);
                width
            }
        }
    }

    /// Resolve a control's height from its policy.
    pub fn actual_height(&self, id: ControlId) -> i32 {
        let node = self.node(id);
        match node.height {
            SizePolicy::Fixed(n) => n.max(0),
            SizePolicy::Infinite => i32::MAX,
            SizePolicy::BoundingBox => match node.parent {
                Some(parent) => {
                    self.behavior_dyn(parent)
                        .measure_bounding_box(self, parent, id)
                        .height
                }
                None => self.viewport.height,
            },
            SizePolicy::MinByContent => self.behavior_dyn(id).min_height(self, id),
            SizePolicy::MaxByContent => {
                if node.measuring.get() & MEASURING_HEIGHT != 0 {
                    log::warn!("height measurement cycle at {id:?}, using sentinel");
                    return i32::MAX;
                }
                node.measuring.set(node.measuring.get() | MEASURING_HEIGHT);
                let height = self.behavior_dyn(id).max_height(self, id);
                node.measuring.set(node.measuring.get() & !MEASURING_HEIGHT);
                height
            }
        }
    }

    /// Default MaxByContent width: widest child plus the behavior's box
    /// reduction.
    pub(crate) fn content_max_width(&self, id: ControlId) -> i32 {
        let reduction = self.behavior_dyn(id).box_reduction();
        self.children(id)
            .iter()
            .map(|&child| self.actual_width(child))
            .max()
            .unwrap_or(0)
            .saturating_add(reduction.width)
    }

    /// Default MaxByContent height.
    pub(crate) fn content_max_height(&self, id: ControlId) -> i32 {
        let reduction = self.behavior_dyn(id).box_reduction();
        self.children(id)
            .iter()
            .map(|&child| self.actual_height(child))
            .max()
            .unwrap_or(0)
            .saturating_add(reduction.height)
    }

    /// Effective visibility: own flag combined with every ancestor's
    /// verdict.
    pub fn actual_visibility(&self, id: ControlId) -> bool {
        let node = self.node(id);
        if !node.visible {
            return false;
        }
        match node.parent {
            Some(parent) => {
                self.behavior_dyn(parent).is_child_visible(self, parent, id)
                    && self.actual_visibility(parent)
            }
            None => true,
        }
    }

    // -------------------------------------------------------------------------
    // Focus support
    // -------------------------------------------------------------------------

    /// Focusable controls under `root`, depth-first, descending only into
    /// visible subtrees. Containers may narrow the walk via
    /// `focusable_children`.
    pub fn focusable_elements(&self, root: ControlId) -> Vec<ControlId> {
        let mut out = Vec::new();
        self.collect_focusable(root, &mut out);
        out
    }

    /// The control keyboard input is routed to.
    pub fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    pub fn is_focused(&self, id: ControlId) -> bool {
        self.focused == Some(id)
    }

    /// Move focus, firing `LostFocus` then `GotFocus`.
    pub fn set_focused(&mut self, id: Option<ControlId>) -> Result<()> {
        if self.focused == id {
            return Ok(());
        }
        let previous = self.focused.take();
        self.focused = id;
        self.dirty = true;
        if let Some(old) = previous {
            if self.contains(old) {
                self.emit(old, ControlEvent::LostFocus)?;
            }
        }
        if let Some(new) = id {
            self.emit(new, ControlEvent::GotFocus)?;
        }
        Ok(())
    }

    fn collect_focusable(&self, id: ControlId, out: &mut Vec<ControlId>) {
        if !self.node(id).visible {
            return;
        }
        if self.node(id).focusable {
            out.push(id);
        }
        let children = self
            .behavior_dyn(id)
            .focusable_children(self, id)
            .unwrap_or_else(|| self.children(id));
        for child in children {
            if self.behavior_dyn(id).is_child_visible(self, id, child) {
                self.collect_focusable(child, out);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Invalidation
    // -------------------------------------------------------------------------

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn on_preview_key(&mut self, id: ControlId, handler: KeyHandler) {
        self.node_mut(id).events.preview_key.push(handler);
    }

    pub fn on_key_pressed(&mut self, id: ControlId, handler: KeyHandler) {
        self.node_mut(id).events.key.push(handler);
    }

    pub fn on_clicked(&mut self, id: ControlId, handler: EventHandler) {
        self.node_mut(id).events.clicked.push(handler);
    }

    pub fn on_got_focus(&mut self, id: ControlId, handler: EventHandler) {
        self.node_mut(id).events.got_focus.push(handler);
    }

    pub fn on_lost_focus(&mut self, id: ControlId, handler: EventHandler) {
        self.node_mut(id).events.lost_focus.push(handler);
    }

    pub fn on_size_changed(&mut self, id: ControlId, handler: EventHandler) {
        self.node_mut(id).events.size_changed.push(handler);
    }

    pub fn on_detached(&mut self, id: ControlId, handler: EventHandler) {
        self.node_mut(id).events.detached.push(handler);
    }

    pub fn on_rendered(&mut self, id: ControlId, handler: EventHandler) {
        self.node_mut(id).events.rendered.push(handler);
    }

    /// Fire a parameterless event. A failing handler aborts the remaining
    /// handlers and surfaces as [`Error::Handler`] unless the control
    /// suppresses handler errors, in which case it is logged.
    pub fn emit(&mut self, id: ControlId, event: ControlEvent) -> Result<()> {
        let mut handlers = mem::take(self.node_mut(id).events.simple_mut(event));
        let mut result = Ok(());
        for handler in handlers.iter_mut() {
            if let Err(err) = handler(self, id) {
                if self.contains(id) && self.node(id).suppress_handler_errors {
                    log::warn!("suppressed {event:?} handler error on {id:?}: {err}");
                } else {
                    result = Err(Error::Handler(err));
                    break;
                }
            }
            if !self.contains(id) {
                return result;
            }
        }
        // Keep handlers registered while dispatching.
        let slot = self.node_mut(id).events.simple_mut(event);
        handlers.append(slot);
        *slot = handlers;
        result
    }

    fn emit_lossy(&mut self, id: ControlId, event: ControlEvent) {
        if let Err(err) = self.emit(id, event) {
            log::warn!("{event:?} handler error on {id:?}: {err}");
        }
    }

    fn emit_key(&mut self, id: ControlId, preview: bool, args: &mut KeyEventArgs) -> Result<()> {
        let events = &mut self.node_mut(id).events;
        let mut handlers = mem::take(if preview {
            &mut events.preview_key
        } else {
            &mut events.key
        });
        let mut result = Ok(());
        for handler in handlers.iter_mut() {
            if let Err(err) = handler(self, id, args) {
                if self.contains(id) && self.node(id).suppress_handler_errors {
                    log::warn!("suppressed key handler error on {id:?}: {err}");
                } else {
                    result = Err(Error::Handler(err));
                    break;
                }
            }
            if !self.contains(id) {
                return result;
            }
            if args.handled {
                break;
            }
        }
        if self.contains(id) {
            let events = &mut self.node_mut(id).events;
            let slot = if preview {
                &mut events.preview_key
            } else {
                &mut events.key
            };
            handlers.append(slot);
            *slot = handlers;
        }
        result
    }

    // -------------------------------------------------------------------------
    // Key dispatch
    // -------------------------------------------------------------------------

    /// Route a key starting at the focused control.
    ///
    /// Preview handlers run pre-order through the focused subtree; then
    /// the event bubbles from the focused control up through its
    /// ancestors, each getting its built-in handling and then its key
    /// handlers, until one marks it handled.
    pub fn dispatch_key(&mut self, focused: ControlId, key: KeyEvent) -> Result<bool> {
        let mut args = KeyEventArgs::new(key);
        self.preview_walk(focused, &mut args)?;

        let mut current = Some(focused);
        while let Some(id) = current {
            if args.handled {
                break;
            }
            let response =
                self.with_behavior_mut(id, |tree, behavior| behavior.handle_key(tree, id, key));
            match response {
                KeyResponse::Ignored => {}
                KeyResponse::Handled => {
                    args.handled = true;
                    self.dirty = true;
                }
                KeyResponse::Clicked => {
                    args.handled = true;
                    self.dirty = true;
                    self.emit(id, ControlEvent::Clicked)?;
                }
            }
            if !args.handled {
                self.emit_key(id, false, &mut args)?;
            }
            current = if self.contains(id) {
                self.node(id).parent
            } else {
                None
            };
        }
        Ok(args.handled)
    }

    fn preview_walk(&mut self, id: ControlId, args: &mut KeyEventArgs) -> Result<()> {
        self.emit_key(id, true, args)?;
        if args.handled || !self.contains(id) {
            return Ok(());
        }
        for child in self.children(id) {
            if !self.contains(child) {
                continue;
            }
            self.preview_walk(child, args)?;
            if args.handled {
                return Ok(());
            }
        }
        Ok(())
    }
}
