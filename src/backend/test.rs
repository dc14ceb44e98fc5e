//! In-memory backend for tests and headless rendering.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use super::{Backend, BackendEvent, ScreenBuffer};
use crate::cell::{Cell, Color};
use crate::geometry::Point;

/// A backend that renders into an in-memory [`ScreenBuffer`] and replays
/// queued events, so a full console run can be asserted against cell by
/// cell.
pub struct TestBackend {
    buffer: ScreenBuffer,
    events: VecDeque<BackendEvent>,
    cursor: Point,
    cursor_visible: bool,
    refresh_count: usize,
}

impl TestBackend {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            buffer: ScreenBuffer::new(width, height, Color::Black),
            events: VecDeque::new(),
            cursor: Point::ZERO,
            cursor_visible: true,
            refresh_count: 0,
        }
    }

    /// Queue an event for the next poll.
    pub fn push_event(&mut self, event: BackendEvent) {
        self.events.push_back(event);
    }

    pub fn buffer(&self) -> &ScreenBuffer {
        &self.buffer
    }

    /// Number of completed refresh calls.
    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }

    /// Change the reported terminal size (contents are discarded).
    pub fn set_size(&mut self, width: i32, height: i32) {
        self.buffer.resize(width, height, Color::Black);
    }
}

impl Backend for TestBackend {
    fn window_width(&self) -> i32 {
        self.buffer.width()
    }

    fn window_height(&self) -> i32 {
        self.buffer.height()
    }

    fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    fn cursor(&self) -> Point {
        self.cursor
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn put_char(&mut self, cell: Cell, x: i32, y: i32) {
        self.buffer.put(cell, x, y);
    }

    fn clear(&mut self, background: Color) {
        self.buffer.fill(background);
    }

    fn start(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.refresh_count += 1;
        Ok(())
    }

    fn poll_event(&mut self, _timeout: Duration) -> io::Result<Option<BackendEvent>> {
        Ok(self.events.pop_front())
    }
}
