//! Input adapter for terminal environments.
//!
//! Feeds terminal events through the [`SelectionLatch`] and, for terminals that
//! never report key releases, synthesizes `SymbolCleared` once a keyboard
//! selection has been held for the release timeout. As soon as a real key
//! release is seen the timeout is switched off for the rest of the session.

use crossterm::event::Event;

use crate::latch::{CycleEvents, SelectionLatch};
use crate::map::{handle_event, DeviceInput, PadHitTest};
use crate::types::{InputEvent, KEY_RELEASE_TIMEOUT_MS};

#[derive(Debug, Clone)]
pub struct InputAdapter {
    pad_count: u8,
    latch: SelectionLatch,
    /// Milliseconds a keyboard selection has been held, if one is held.
    key_held_ms: Option<u32>,
    key_release_timeout_ms: u32,
    saw_key_release: bool,
}

impl InputAdapter {
    pub fn new(pad_count: u8) -> Self {
        Self {
            pad_count,
            latch: SelectionLatch::new(),
            key_held_ms: None,
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
            saw_key_release: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Terminals that report key releases never need a synthesized one.
    pub fn with_key_release_events(mut self, reported: bool) -> Self {
        self.saw_key_release |= reported;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn pad_count(&self) -> u8 {
        self.pad_count
    }

    /// Offer one terminal event to the current cycle.
    ///
    /// Returns `true` when the cycle must be resolved before reading more.
    /// A key press alone does not close the cycle: queued input behind it is
    /// still drained so pointer presses in the same batch can be dropped.
    pub fn offer(&mut self, event: &Event, hit: &impl PadHitTest) -> bool {
        match handle_event(event, self.pad_count, hit) {
            Some(input) => self.offer_input(input),
            None => false,
        }
    }

    pub fn offer_input(&mut self, input: DeviceInput) -> bool {
        match input {
            DeviceInput::KeyPress(_) => self.key_held_ms = Some(0),
            DeviceInput::KeyRelease => {
                self.saw_key_release = true;
                self.key_held_ms = None;
            }
            DeviceInput::PointerPress(_) if self.latch.accepts_pointer() => {
                self.key_held_ms = None
            }
            DeviceInput::PointerPress(_) => {}
            DeviceInput::PointerRelease | DeviceInput::Quit => {}
        }
        self.latch.offer(input)
    }

    /// Whether input held over from the last cycle is waiting to be resolved.
    pub fn has_pending(&self) -> bool {
        !self.latch.is_empty()
    }

    /// Resolve the current cycle into normalized events.
    pub fn finish_cycle(&mut self) -> CycleEvents {
        self.latch.resolve()
    }

    /// Advance the release timeout. Returns a synthesized release when it expires.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<InputEvent> {
        if self.saw_key_release {
            return None;
        }
        let held = self.key_held_ms.as_mut()?;
        *held = held.saturating_add(elapsed_ms);
        if *held >= self.key_release_timeout_ms {
            self.key_held_ms = None;
            return Some(InputEvent::SymbolCleared);
        }
        None
    }

    /// Milliseconds until [`update`](Self::update) would synthesize a release.
    pub fn release_due_in_ms(&self) -> Option<u32> {
        if self.saw_key_release {
            return None;
        }
        self.key_held_ms
            .map(|held| self.key_release_timeout_ms.saturating_sub(held))
    }
}
