//! # textframe
//!
//! A retained-mode terminal UI toolkit.
//!
//! Controls live as nodes in an arena [`Tree`](tree::Tree); each node
//! pairs tree-managed properties (size policies, colors, visibility,
//! focus) with a boxed [`Behavior`](control::Behavior) that supplies
//! the control-specific layout, drawing, and key handling. Containers
//! answer three questions per child — its bounding box, its scroll
//! offset, and whether it is visible — and the render walk does the
//! rest through a clipping [`DrawingContext`](drawing::DrawingContext).
//!
//! A [`Console`](console::Console) composes top-level windows onto a
//! [`Backend`](backend::Backend), routes keyboard input through the
//! focused control's bubble chain, and repaints when the tree is dirty:
//!
//! ```text
//! Tree (nodes + behaviors) → render walk → ScreenBuffer → Backend diff
//! ```
//!
//! The crossterm backend drives a real terminal; [`TestBackend`]
//! renders into memory for tests and headless use.

pub mod backend;
pub mod binding;
pub mod cell;
pub mod console;
pub mod control;
pub mod controls;
pub mod drawing;
pub mod error;
pub mod geometry;
pub mod input;
pub mod tree;

pub use backend::{Backend, BackendEvent, CrosstermBackend, ScreenBuffer, TestBackend};
pub use binding::{BindingSet, Source};
pub use cell::{Cell, CellAttr, Color};
pub use console::{Console, ExitHandle};
pub use control::{
    Alignment, Behavior, HandlerError, HandlerResult, KeyEventArgs, KeyResponse, SizePolicy,
    SlotKind,
};
pub use controls::{
    Border, Button, Grid, GridPlacement, GridSize, GridWindow, Orientation, ScrollViewer,
    StackPanel, Tab, TabControl, TextBox, TextView, Window,
};
pub use drawing::{
    measure_text, measure_wrapped_text, text_width, DrawingContext, FrameOptions, FrameStyle,
    RectOptions, TextOptions, TextWrapping,
};
pub use error::{Error, Result};
pub use geometry::{Point, Rect, Size};
pub use input::{KeyCode, KeyEvent, Modifiers};
pub use tree::{ControlEvent, ControlId, Tree};
