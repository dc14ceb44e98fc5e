//! Platform backends.
//!
//! The core requires only the narrow [`Backend`] capability set: current
//! terminal dimensions, cursor control, per-cell writes (out-of-bounds
//! writes are the backend's job to ignore), whole-buffer clear, a flush,
//! and event polling that delivers key/resize events on the core thread.
//!
//! Two implementations ship here: [`CrosstermBackend`] for real terminals
//! and [`TestBackend`] for tests and headless rendering.

mod buffer;
mod crossterm;
mod test;

pub use buffer::ScreenBuffer;
pub use crossterm::CrosstermBackend;
pub use test::TestBackend;

use std::io;
use std::time::Duration;

use crate::cell::{Cell, Color};
use crate::geometry::{Point, Size};
use crate::input::KeyEvent;

/// An event delivered by the backend on the core thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendEvent {
    Key(KeyEvent),
    Resized { before: Size, after: Size },
}

/// The capability set the core requires from a platform layer.
pub trait Backend {
    fn window_width(&self) -> i32;
    fn window_height(&self) -> i32;

    fn cursor_visible(&self) -> bool;
    fn set_cursor_visible(&mut self, visible: bool);
    fn cursor(&self) -> Point;
    fn set_cursor(&mut self, x: i32, y: i32);

    /// Write one cell. Out-of-bounds writes are silently ignored.
    fn put_char(&mut self, cell: Cell, x: i32, y: i32);

    /// Fill the entire buffer with blanks on `background`.
    fn clear(&mut self, background: Color);

    /// Enter the platform's UI mode (raw mode, alternate screen, ...).
    fn start(&mut self) -> io::Result<()>;

    /// Leave the platform's UI mode.
    fn stop(&mut self) -> io::Result<()>;

    /// Flush the buffer to the real terminal.
    fn refresh(&mut self) -> io::Result<()>;

    /// Wait up to `timeout` for the next input event.
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<BackendEvent>>;
}
