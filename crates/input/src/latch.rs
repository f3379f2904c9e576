//! Selection latch - one judged selection per input cycle.
//!
//! A cycle is the batch of device inputs read before the next event is handed
//! to the game. The latch enforces the selection precedence rule:
//!
//! 1. `Quit` wins over everything.
//! 2. A key press wins over any pointer press. Once a key is latched, pointer
//!    presses in the same batch are dropped, and a second key press is held
//!    over to open the next cycle.
//! 3. Among pointer presses, the latest wins.
//!
//! A release seen after the winning press is reported as `SymbolCleared`
//! right after the selection, so the press is never judged twice.

use arrayvec::ArrayVec;

use crate::map::DeviceInput;
use crate::types::{InputEvent, Symbol};

/// Normalized events produced by one cycle (selection, then release).
pub type CycleEvents = ArrayVec<InputEvent, 2>;

#[derive(Debug, Clone, Default)]
pub struct SelectionLatch {
    key: Option<Symbol>,
    pointer: Option<Symbol>,
    released: bool,
    quit: bool,
    deferred: Option<Symbol>,
}

impl SelectionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one device input. Returns `true` once the cycle must be resolved
    /// without reading further input.
    pub fn offer(&mut self, input: DeviceInput) -> bool {
        match input {
            DeviceInput::Quit => {
                self.quit = true;
                true
            }
            DeviceInput::KeyPress(symbol) if self.key.is_some() => {
                self.deferred = Some(symbol);
                true
            }
            DeviceInput::KeyPress(symbol) => {
                self.key = Some(symbol);
                self.released = false;
                false
            }
            DeviceInput::PointerPress(_) if self.key.is_some() => false,
            DeviceInput::PointerPress(symbol) => {
                self.pointer = Some(symbol);
                self.released = false;
                false
            }
            DeviceInput::KeyRelease | DeviceInput::PointerRelease => {
                self.released = true;
                false
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_none() && self.pointer.is_none() && !self.released && !self.quit
    }

    /// Whether a pointer press offered now would still count.
    pub fn accepts_pointer(&self) -> bool {
        self.key.is_none()
    }

    /// Emit this cycle's events and reset for the next cycle.
    pub fn resolve(&mut self) -> CycleEvents {
        let mut out = CycleEvents::new();
        let latch = std::mem::take(self);

        if latch.quit {
            out.push(InputEvent::Quit);
            return out;
        }
        if let Some(symbol) = latch.deferred {
            self.key = Some(symbol);
        }

        if let Some(symbol) = latch.key.or(latch.pointer) {
            out.push(InputEvent::SymbolSelected(symbol));
        }
        if latch.released {
            out.push(InputEvent::SymbolCleared);
        }
        out
    }
}
