//! Terminal render sink.
//!
//! Draws the pad board into a simple framebuffer and flushes only the cells
//! that changed. The layout computed for drawing doubles as the mouse
//! hit-test, and the terminal bell stands in for audio cues.

pub mod bell;
pub mod fb;
pub mod pad_view;
pub mod renderer;

pub use simon_core as core;
pub use simon_types as types;

pub use bell::{BellMode, TerminalBell};
pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
pub use pad_view::{PadLayout, PadView, Viewport, PALETTE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
