//! The compositor and focus host.
//!
//! A `Console` owns the backend, the control tree, and the ordered list
//! of top-level windows. It drives the render pass (clear, place each
//! window by alignment, recursive render walk) and routes keyboard
//! input: Tab moves focus inside the focused window, Shift+Tab cycles
//! windows, everything else is dispatched through the focused control's
//! bubble chain.

use std::cell::Cell as StdCell;
use std::rc::Rc;
use std::time::Duration;

use crate::backend::{Backend, BackendEvent};
use crate::cell::Color;
use crate::control::Alignment;
use crate::error::{Error, Result};
use crate::geometry::{Rect, Size};
use crate::input::KeyCode;
use crate::tree::{ControlEvent, ControlId, Tree};

const REFRESH_RETRY_LIMIT: u32 = 3;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Cooperative exit flag for [`Console::run`]; clone it into handlers.
#[derive(Clone, Default)]
pub struct ExitHandle {
    flag: Rc<StdCell<bool>>,
}

impl ExitHandle {
    pub fn request_exit(&self) {
        self.flag.set(true);
    }

    pub fn is_exit_requested(&self) -> bool {
        self.flag.get()
    }
}

struct WindowEntry {
    id: ControlId,
    horizontal: Alignment,
    vertical: Alignment,
}

pub struct Console<B: Backend> {
    backend: B,
    tree: Tree,
    windows: Vec<WindowEntry>,
    focused_window: Option<ControlId>,
    /// When false, Tab keys are delivered to controls instead of moving
    /// focus.
    pub can_change_focus: bool,
    started: bool,
    refreshing: bool,
    refresh_pending: bool,
    exit: ExitHandle,
}

impl<B: Backend> Console<B> {
    pub fn new(backend: B) -> Self {
        let mut tree = Tree::new();
        tree.set_viewport(Size::new(
            backend.window_width(),
            backend.window_height(),
        ));
        Self {
            backend,
            tree,
            windows: Vec::new(),
            focused_window: None,
            can_change_focus: true,
            started: false,
            refreshing: false,
            refresh_pending: false,
            exit: ExitHandle::default(),
        }
    }

    #[inline]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    #[inline]
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn exit_handle(&self) -> ExitHandle {
        self.exit.clone()
    }

    // -------------------------------------------------------------------------
    // Windows and focus
    // -------------------------------------------------------------------------

    /// Register a parentless control as a top-level window. The first
    /// window added becomes the focused one.
    pub fn add_window(
        &mut self,
        id: ControlId,
        horizontal: Alignment,
        vertical: Alignment,
    ) -> Result<()> {
        if self.tree.parent(id).is_some() || self.windows.iter().any(|w| w.id == id) {
            return Err(Error::NotTopLevel(id));
        }
        self.windows.push(WindowEntry {
            id,
            horizontal,
            vertical,
        });
        self.tree.mark_dirty();
        if self.focused_window.is_none() {
            self.focus_window(id)?;
        }
        Ok(())
    }

    pub fn remove_window(&mut self, id: ControlId) -> Result<()> {
        let Some(index) = self.windows.iter().position(|w| w.id == id) else {
            return Err(Error::NotTopLevel(id));
        };
        self.windows.remove(index);
        self.tree.mark_dirty();
        if self.focused_window == Some(id) {
            self.focused_window = None;
            self.tree.set_focused(None)?;
            if let Some(first) = self.windows.first().map(|w| w.id) {
                self.focus_window(first)?;
            }
        }
        Ok(())
    }

    pub fn focused_window(&self) -> Option<ControlId> {
        self.focused_window
    }

    /// Focus a window and its first focusable descendant.
    pub fn focus_window(&mut self, id: ControlId) -> Result<()> {
        if !self.windows.iter().any(|w| w.id == id) {
            return Err(Error::NotTopLevel(id));
        }
        self.focused_window = Some(id);
        // The paint order changed even if the focused control did not.
        self.tree.mark_dirty();
        let first = self.tree.focusable_elements(id).first().copied();
        self.tree.set_focused(first)
    }

    /// Advance focus within the focused window. An empty focusable set
    /// leaves focus unset.
    pub fn focus_next(&mut self) -> Result<()> {
        self.cycle_focus(1)
    }

    pub fn focus_prev(&mut self) -> Result<()> {
        self.cycle_focus(-1)
    }

    fn cycle_focus(&mut self, direction: i32) -> Result<()> {
        let Some(window) = self.focused_window else {
            return self.tree.set_focused(None);
        };
        let elements = self.tree.focusable_elements(window);
        if elements.is_empty() {
            return self.tree.set_focused(None);
        }
        let len = elements.len() as i32;
        let next = match self
            .tree
            .focused()
            .and_then(|f| elements.iter().position(|&e| e == f))
        {
            Some(index) => elements[((index as i32 + direction + len) % len) as usize],
            None => elements[0],
        };
        self.tree.set_focused(Some(next))
    }

    /// Cycle to the next window in registration order.
    pub fn focus_next_window(&mut self) -> Result<()> {
        if self.windows.is_empty() {
            return Ok(());
        }
        let index = self
            .focused_window
            .and_then(|f| self.windows.iter().position(|w| w.id == f))
            .map(|i| (i + 1) % self.windows.len())
            .unwrap_or(0);
        self.focus_window(self.windows[index].id)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(Error::AlreadyStarted);
        }
        self.backend.start()?;
        self.started = true;
        self.sync_viewport();
        self.refresh()
    }

    pub fn shutdown(&mut self) -> Result<()> {
        if !self.started {
            return Err(Error::NotStarted);
        }
        self.backend.stop()?;
        self.started = false;
        Ok(())
    }

    /// Drive the event loop until the exit handle fires.
    pub fn run(&mut self) -> Result<()> {
        if !self.started {
            self.start()?;
        }
        while !self.exit.is_exit_requested() {
            match self.backend.poll_event(POLL_INTERVAL)? {
                Some(event) => self.handle_event(event)?,
                None => {
                    if self.tree.is_dirty() {
                        self.refresh()?;
                    }
                }
            }
        }
        self.shutdown()
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn sync_viewport(&mut self) {
        self.tree.set_viewport(Size::new(
            self.backend.window_width(),
            self.backend.window_height(),
        ));
    }

    /// Re-render everything. A refresh requested while one is already
    /// running is coalesced into a bounded retry of the outer pass.
    pub fn refresh(&mut self) -> Result<()> {
        if self.refreshing {
            self.refresh_pending = true;
            return Ok(());
        }
        self.refreshing = true;
        let result = self.refresh_guarded();
        self.refreshing = false;
        result
    }

    fn refresh_guarded(&mut self) -> Result<()> {
        for _ in 0..REFRESH_RETRY_LIMIT {
            self.refresh_pending = false;
            self.render_pass()?;
            if !self.refresh_pending && !self.tree.is_dirty() {
                break;
            }
        }
        Ok(())
    }

    fn render_pass(&mut self) -> Result<()> {
        self.sync_viewport();
        self.tree.clear_dirty();
        self.backend.clear(Color::Black);
        self.backend.set_cursor_visible(false);

        let viewport = self.tree.viewport();
        // Focused window drawn last.
        let mut order: Vec<usize> = (0..self.windows.len()).collect();
        if let Some(focused) = self.focused_window {
            order.sort_by_key(|&i| self.windows[i].id == focused);
        }
        for index in order {
            let entry = &self.windows[index];
            let id = entry.id;
            let width = self.tree.actual_width(id).min(viewport.width);
            let height = self.tree.actual_height(id).min(viewport.height);
            let rect = Rect::new(
                entry.horizontal.place(width, viewport.width),
                entry.vertical.place(height, viewport.height),
                width,
                height,
            );
            let mut root = crate::drawing::DrawingContext::root(&mut self.backend);
            let mut ctx = root.shrink(rect);
            render_subtree(&mut self.tree, id, &mut ctx)?;
        }
        self.backend.refresh()?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    pub fn handle_event(&mut self, event: BackendEvent) -> Result<()> {
        match event {
            BackendEvent::Key(key) => {
                if key.code == KeyCode::Tab && self.can_change_focus {
                    if key.modifiers.shift || key.modifiers.ctrl {
                        self.focus_next_window()?;
                    } else {
                        self.focus_next()?;
                    }
                } else if let Some(target) = self.tree.focused().or(self.focused_window) {
                    self.tree.dispatch_key(target, key)?;
                }
            }
            BackendEvent::Resized { after, .. } => {
                self.tree.set_viewport(after);
                let windows: Vec<ControlId> = self.windows.iter().map(|w| w.id).collect();
                for id in windows {
                    self.tree.emit(id, ControlEvent::SizeChanged)?;
                }
            }
        }
        if self.tree.is_dirty() {
            self.refresh()?;
        }
        Ok(())
    }
}

/// The generic render walk: draw a control, fire `Rendered`, then
/// recurse into each visible child through a context shrunk to its
/// bounding box and scrolled by the parent's offset.
fn render_subtree(
    tree: &mut Tree,
    id: ControlId,
    ctx: &mut crate::drawing::DrawingContext,
) -> Result<()> {
    if !tree.visible(id) {
        return Ok(());
    }
    tree.behavior_dyn(id).render(tree, id, ctx);
    tree.emit(id, ControlEvent::Rendered)?;
    for child in tree.children(id) {
        if !tree.visible(child) || !tree.behavior_dyn(id).is_child_visible(tree, id, child) {
            continue;
        }
        let rect = tree.behavior_dyn(id).measure_bounding_box(tree, id, child);
        let offset = tree.behavior_dyn(id).scroll_offset(tree, id, child);
        let mut shrunk = ctx.shrink(rect);
        let mut sub = shrunk.scroll(offset);
        render_subtree(tree, child, &mut sub)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TestBackend;
    use crate::control::SizePolicy;
    use crate::controls::{Button, Orientation, StackPanel, Window};
    use crate::input::{KeyEvent, Modifiers};

    fn console() -> Console<TestBackend> {
        Console::new(TestBackend::new(20, 10))
    }

    #[test]
    fn test_lifecycle_errors() {
        let mut console = console();
        console.start().unwrap();
        assert!(matches!(console.start(), Err(Error::AlreadyStarted)));
        console.shutdown().unwrap();
        assert!(matches!(console.shutdown(), Err(Error::NotStarted)));
    }

    #[test]
    fn test_render_draws_window_frame() {
        let mut console = console();
        let window = console.tree_mut().add(Window::new("Hi"));
        console
            .add_window(window, Alignment::Begin, Alignment::Begin)
            .unwrap();
        console.start().unwrap();
        let row = console.backend().buffer().row_text(0);
        assert!(row.starts_with("┌─ Hi ─"));
        assert_eq!(console.backend().buffer().row_text(9).chars().next(), Some('└'));
    }

    #[test]
    fn test_centered_window_placement() {
        let mut console = console();
        let window = console.tree_mut().add(Window::new(""));
        console.tree_mut().set_width(window, SizePolicy::Fixed(10));
        console.tree_mut().set_height(window, SizePolicy::Fixed(4));
        console
            .add_window(window, Alignment::Center, Alignment::End)
            .unwrap();
        console.start().unwrap();
        let buffer = console.backend().buffer();
        // 10 wide in 20 columns: x offset 5; 4 tall at the bottom of 10.
        assert_eq!(buffer.get(5, 6).unwrap().ch, '┌');
        assert_eq!(buffer.get(14, 9).unwrap().ch, '┘');
    }

    #[test]
    fn test_focus_cycles_through_all_buttons() {
        let mut console = console();
        let tree = console.tree_mut();
        let window = tree.add(Window::new(""));
        let stack = tree.add(StackPanel::new(Orientation::Vertical));
        tree.set_content(window, Some(stack)).unwrap();
        let buttons: Vec<ControlId> = (0..3)
            .map(|i| {
                let b = tree.add(Button::new(format!("B{i}")));
                tree.set_height(b, SizePolicy::Fixed(3));
                tree.add_child(stack, b).unwrap();
                b
            })
            .collect();
        console
            .add_window(window, Alignment::Begin, Alignment::Begin)
            .unwrap();
        assert_eq!(console.tree().focused(), Some(buttons[0]));
        for _ in 0..buttons.len() {
            console.focus_next().unwrap();
        }
        assert_eq!(console.tree().focused(), Some(buttons[0]));
        console.focus_prev().unwrap();
        assert_eq!(console.tree().focused(), Some(buttons[2]));
    }

    #[test]
    fn test_focus_next_on_empty_set_leaves_focus_unset() {
        let mut console = console();
        let window = console.tree_mut().add(Window::new(""));
        console
            .add_window(window, Alignment::Begin, Alignment::Begin)
            .unwrap();
        assert_eq!(console.tree().focused(), None);
        console.focus_next().unwrap();
        assert_eq!(console.tree().focused(), None);
    }

    #[test]
    fn test_tab_key_moves_focus() {
        let mut console = console();
        let tree = console.tree_mut();
        let window = tree.add(Window::new(""));
        let stack = tree.add(StackPanel::new(Orientation::Vertical));
        tree.set_content(window, Some(stack)).unwrap();
        let a = tree.add(Button::new("A"));
        let b = tree.add(Button::new("B"));
        for id in [a, b] {
            tree.set_height(id, SizePolicy::Fixed(3));
            tree.add_child(stack, id).unwrap();
        }
        console
            .add_window(window, Alignment::Begin, Alignment::Begin)
            .unwrap();
        console.start().unwrap();
        console
            .handle_event(BackendEvent::Key(KeyEvent::new(KeyCode::Tab)))
            .unwrap();
        assert_eq!(console.tree().focused(), Some(b));
    }

    #[test]
    fn test_shift_tab_cycles_windows() {
        let mut console = console();
        let first = console.tree_mut().add(Window::new("1"));
        let second = console.tree_mut().add(Window::new("2"));
        console
            .add_window(first, Alignment::Begin, Alignment::Begin)
            .unwrap();
        console
            .add_window(second, Alignment::End, Alignment::Begin)
            .unwrap();
        assert_eq!(console.focused_window(), Some(first));
        console
            .handle_event(BackendEvent::Key(KeyEvent::with_modifiers(
                KeyCode::Tab,
                Modifiers::shift(),
            )))
            .unwrap();
        assert_eq!(console.focused_window(), Some(second));
    }

    #[test]
    fn test_window_focus_change_repaints_without_focusables() {
        let mut console = console();
        let back = console.tree_mut().add(Window::new("Back"));
        let front = console.tree_mut().add(Window::new("Front"));
        console
            .add_window(back, Alignment::Begin, Alignment::Begin)
            .unwrap();
        console
            .add_window(front, Alignment::Begin, Alignment::Begin)
            .unwrap();
        console.start().unwrap();
        let before = console.backend().refresh_count();
        // Neither window has a focusable control, so only the paint
        // order changes when the focus moves.
        console
            .handle_event(BackendEvent::Key(KeyEvent::with_modifiers(
                KeyCode::Tab,
                Modifiers::shift(),
            )))
            .unwrap();
        assert_eq!(console.focused_window(), Some(front));
        assert!(console.backend().refresh_count() > before);
        assert!(console.backend().buffer().row_text(0).contains("Front"));
    }

    #[test]
    fn test_attached_control_is_not_a_window() {
        let mut console = console();
        let tree = console.tree_mut();
        let window = tree.add(Window::new(""));
        let inner = tree.add(Window::new("inner"));
        tree.set_content(window, Some(inner)).unwrap();
        assert!(matches!(
            console.add_window(inner, Alignment::Begin, Alignment::Begin),
            Err(Error::NotTopLevel(_))
        ));
    }

    #[test]
    fn test_resize_updates_viewport_and_redraws() {
        let mut console = console();
        let window = console.tree_mut().add(Window::new(""));
        console
            .add_window(window, Alignment::Begin, Alignment::Begin)
            .unwrap();
        console.start().unwrap();
        console.backend_mut().set_size(30, 8);
        console
            .handle_event(BackendEvent::Resized {
                before: Size::new(20, 10),
                after: Size::new(30, 8),
            })
            .unwrap();
        assert_eq!(console.tree().viewport(), Size::new(30, 8));
        assert_eq!(console.backend().buffer().get(29, 0).unwrap().ch, '┐');
    }

    #[test]
    fn test_exit_handle_stops_run() {
        let mut console = console();
        let exit = console.exit_handle();
        exit.request_exit();
        console.run().unwrap();
        assert!(!console.is_started());
    }

    #[test]
    fn test_rendered_invalidation_is_coalesced() {
        let mut console = console();
        let window = console.tree_mut().add(Window::new(""));
        console
            .add_window(window, Alignment::Begin, Alignment::Begin)
            .unwrap();
        // A handler that re-dirties the tree on every render would
        // otherwise refresh forever.
        console.tree_mut().on_rendered(
            window,
            Box::new(|tree, _| {
                tree.mark_dirty();
                Ok(())
            }),
        );
        console.start().unwrap();
        assert!(console.backend().refresh_count() <= REFRESH_RETRY_LIMIT as usize);
    }
}
