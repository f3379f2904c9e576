//! Terminal input module (game-facing).
//!
//! This module is the input adapter of the game. It maps `crossterm` key and
//! mouse events into the normalized [`InputEvent`](crate::types::InputEvent)
//! stream the turn controller consumes, applying the selection precedence rule
//! (keyboard before pointer, one selection per cycle) and a key-release timeout
//! for terminals without key-release events.

pub mod handler;
pub mod latch;
pub mod map;

pub use simon_types as types;

pub use handler::InputAdapter;
pub use latch::{CycleEvents, SelectionLatch};
pub use map::{handle_event, handle_key_event, handle_mouse_event, should_quit, DeviceInput, PadHitTest};
