//! The built-in control set.
//!
//! Containers (Border, StackPanel, Grid, TabControl, ScrollViewer,
//! Window, GridWindow) each implement the three-method layout contract
//! with a distinct algorithm; the leaves (TextView, TextBox, Button)
//! only draw and handle keys.

mod border;
mod button;
mod grid;
mod scroll_viewer;
mod stack_panel;
mod tab_control;
mod text_box;
mod text_view;
mod window;

pub use border::Border;
pub use button::Button;
pub use grid::{Grid, GridPlacement, GridSize};
pub use scroll_viewer::ScrollViewer;
pub use stack_panel::{Orientation, StackPanel};
pub use tab_control::{Tab, TabControl};
pub use text_box::TextBox;
pub use text_view::TextView;
pub use window::{GridWindow, Window};
