//! Real-terminal backend built on crossterm.
//!
//! Drawing goes into a [`ScreenBuffer`]; `refresh` diffs it against the
//! previously flushed frame and only emits the cells that changed, wrapped
//! in a synchronized-update block so partial frames never hit the screen.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::event::{
    Event as CtEvent, KeyCode as CtKeyCode, KeyEvent as CtKeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, BeginSynchronizedUpdate, EndSynchronizedUpdate,
    EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, event, queue};

use super::{Backend, BackendEvent, ScreenBuffer};
use crate::cell::{Cell, CellAttr, Color};
use crate::geometry::{Point, Size};
use crate::input::{KeyCode, KeyEvent, Modifiers};

/// Backend for a real terminal.
pub struct CrosstermBackend {
    out: Stdout,
    buffer: ScreenBuffer,
    previous: Option<ScreenBuffer>,
    cursor: Point,
    cursor_visible: bool,
    started: bool,
}

impl CrosstermBackend {
    pub fn new() -> io::Result<Self> {
        let (width, height) = crossterm::terminal::size()?;
        Ok(Self {
            out: io::stdout(),
            buffer: ScreenBuffer::new(width as i32, height as i32, Color::Black),
            previous: None,
            cursor: Point::ZERO,
            cursor_visible: true,
            started: false,
        })
    }

    /// Force the next refresh to redraw every cell.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    fn emit_cell(&mut self, cell: &Cell, x: i32, y: i32) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(x as u16, y as u16),
            SetForegroundColor(cell.fg.to_crossterm()),
            SetBackgroundColor(cell.bg.to_crossterm()),
        )?;
        // Line-drawing attributes have no terminal representation here;
        // underline stands in for a bottom line.
        if cell.attrs.contains(CellAttr::BOTTOM_LINE) {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        queue!(self.out, Print(cell.ch))?;
        if cell.attrs.contains(CellAttr::BOTTOM_LINE) {
            queue!(self.out, SetAttribute(Attribute::NoUnderline))?;
        }
        Ok(())
    }
}

impl Backend for CrosstermBackend {
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
        enable_raw_mode()?;
        crossterm::execute!(self.out, EnterAlternateScreen, cursor::Hide)?;
        self.started = true;
        self.previous = None;
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        crossterm::execute!(self.out, cursor::Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        self.started = false;
        Ok(())
    }

    fn refresh(&mut self) -> io::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let width = self.buffer.width();
        let height = self.buffer.height();
        let same_size = self
            .previous
            .as_ref()
            .is_some_and(|p| p.width() == width && p.height() == height);

        for y in 0..height {
            for x in 0..width {
                let cell = match self.buffer.get(x, y) {
                    Some(c) => *c,
                    None => continue,
                };
                let changed = if same_size {
                    self.previous
                        .as_ref()
                        .and_then(|p| p.get(x, y))
                        .is_none_or(|prev| *prev != cell)
                } else {
                    true
                };
                if changed {
                    self.emit_cell(&cell, x, y)?;
                }
            }
        }

        if self.cursor_visible {
            queue!(
                self.out,
                cursor::MoveTo(self.cursor.x.max(0) as u16, self.cursor.y.max(0) as u16),
                cursor::Show,
            )?;
        } else {
            queue!(self.out, cursor::Hide)?;
        }

        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;

        self.previous = Some(self.buffer.clone());
        Ok(())
    }

    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<BackendEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            CtEvent::Key(key) if key.kind != KeyEventKind::Release => {
                Ok(convert_key_event(key).map(BackendEvent::Key))
            }
            CtEvent::Resize(width, height) => {
                let before = Size::new(self.buffer.width(), self.buffer.height());
                let after = Size::new(width as i32, height as i32);
                self.buffer.resize(after.width, after.height, Color::Black);
                self.previous = None;
                Ok(Some(BackendEvent::Resized { before, after }))
            }
            _ => Ok(None),
        }
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        if self.started {
            let _ = self.stop();
        }
    }
}

/// Convert a crossterm key event to ours, dropping keys we do not model.
fn convert_key_event(event: CtKeyEvent) -> Option<KeyEvent> {
    let code = match event.code {
        CtKeyCode::Char(c) => KeyCode::Char(c),
        CtKeyCode::Enter => KeyCode::Enter,
        CtKeyCode::Tab | CtKeyCode::BackTab => KeyCode::Tab,
        CtKeyCode::Backspace => KeyCode::Backspace,
        CtKeyCode::Delete => KeyCode::Delete,
        CtKeyCode::Esc => KeyCode::Escape,
        CtKeyCode::Up => KeyCode::Up,
        CtKeyCode::Down => KeyCode::Down,
        CtKeyCode::Left => KeyCode::Left,
        CtKeyCode::Right => KeyCode::Right,
        CtKeyCode::Home => KeyCode::Home,
        CtKeyCode::End => KeyCode::End,
        CtKeyCode::PageUp => KeyCode::PageUp,
        CtKeyCode::PageDown => KeyCode::PageDown,
        CtKeyCode::Insert => KeyCode::Insert,
        CtKeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    };
    let mut modifiers = Modifiers::NONE;
    modifiers.ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    modifiers.alt = event.modifiers.contains(KeyModifiers::ALT);
    modifiers.shift =
        event.modifiers.contains(KeyModifiers::SHIFT) || event.code == CtKeyCode::BackTab;
    Some(KeyEvent { code, modifiers })
}
