//! Mapping from terminal events to device inputs.

use crate::types::Symbol;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// A raw device input, still tagged with its origin.
///
/// The [`SelectionLatch`](crate::SelectionLatch) turns these into normalized
/// [`InputEvent`](crate::types::InputEvent)s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceInput {
    KeyPress(Symbol),
    KeyRelease,
    PointerPress(Symbol),
    PointerRelease,
    Quit,
}

/// Screen-space pad lookup, provided by whatever draws the pads.
pub trait PadHitTest {
    fn pad_at(&self, column: u16, row: u16) -> Option<Symbol>;
}

impl<F: Fn(u16, u16) -> Option<Symbol>> PadHitTest for F {
    fn pad_at(&self, column: u16, row: u16) -> Option<Symbol> {
        self(column, row)
    }
}

/// Map a key event. Digit keys `1..=pad_count` select pads; auto-repeat is ignored.
pub fn handle_key_event(key: KeyEvent, pad_count: u8) -> Option<DeviceInput> {
    match key.kind {
        KeyEventKind::Press => {
            if should_quit(key) {
                return Some(DeviceInput::Quit);
            }
            match key.code {
                KeyCode::Char(ch) => Symbol::from_label(ch, pad_count).map(DeviceInput::KeyPress),
                _ => None,
            }
        }
        KeyEventKind::Release => match key.code {
            KeyCode::Char(ch) if Symbol::from_label(ch, pad_count).is_some() => {
                Some(DeviceInput::KeyRelease)
            }
            _ => None,
        },
        KeyEventKind::Repeat => None,
    }
}

/// Map a mouse event. Only the left button selects.
pub fn handle_mouse_event(mouse: MouseEvent, hit: &impl PadHitTest) -> Option<DeviceInput> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => hit
            .pad_at(mouse.column, mouse.row)
            .map(DeviceInput::PointerPress),
        MouseEventKind::Up(MouseButton::Left) => Some(DeviceInput::PointerRelease),
        _ => None,
    }
}

/// Map any terminal event.
pub fn handle_event(event: &Event, pad_count: u8, hit: &impl PadHitTest) -> Option<DeviceInput> {
    match event {
        Event::Key(key) => handle_key_event(*key, pad_count),
        Event::Mouse(mouse) => handle_mouse_event(*mouse, hit),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
