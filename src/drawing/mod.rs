//! Drawing primitives: the clipped/scrolled drawing context, box-drawing
//! frame glyphs, and text measurement/wrapping.

mod context;
mod frame;
mod text;

pub use context::DrawingContext;
pub use frame::{frame_piece, FrameOptions, FramePiece, FrameStyle, RectOptions};
pub use text::{
    measure_text, measure_wrapped_text, text_width, wrap_line, TextOptions, TextWrapping,
};

pub(crate) use text::clip_line;
