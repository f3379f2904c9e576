//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (turn controller, terminal rendering, input mapping).
//!
//! # Pads
//!
//! The game board is a set of `K` pads, each identified by a zero-based [`Symbol`].
//! The classic game uses four pads:
//!
//! | Symbol | Label | Colour |
//! |--------|-------|--------|
//! | 0 | `1` | green |
//! | 1 | `2` | red |
//! | 2 | `3` | yellow |
//! | 3 | `4` | blue |
//!
//! Labels are 1-based digits, so at most [`MAX_PAD_COUNT`] pads can be driven
//! from the keyboard.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `PLAY_INTERVAL_MS` | 500 | Time each symbol stays active during playback |
//! | `RESET_TIME_MS` | 1000 | Pause between a completed round and the next one |
//! | `KEY_RELEASE_TIMEOUT_MS` | 150 | Synthesized release for terminals without key-up events |
//!
//! # Examples
//!
//! ```
//! use simon_types::{Symbol, Timer, DEFAULT_PAD_COUNT};
//!
//! let s = Symbol::new(2);
//! assert_eq!(s.index(), 2);
//! assert_eq!(s.label(), '3');
//! assert_eq!(Symbol::from_label('3', DEFAULT_PAD_COUNT), Some(s));
//!
//! assert_eq!(Timer::PlaybackTick.as_str(), "playbackTick");
//! ```

/// Default number of pads (4)
pub const DEFAULT_PAD_COUNT: u8 = 4;

/// Highest pad count addressable with single digit keys (1-9)
pub const MAX_PAD_COUNT: u8 = 9;

/// Time each symbol stays active during machine playback (500ms)
pub const PLAY_INTERVAL_MS: u64 = 500;

/// Delay before the next round starts, and before a failed session ends (1000ms)
pub const RESET_TIME_MS: u64 = 1000;

/// Keyboard selection hold time before a release is synthesized (150ms).
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;


/// One pad identity, zero-based.
///
/// A `Symbol` is always smaller than the pad count of the game that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u8);

impl Symbol {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Keyboard/display label (`'1'` for symbol 0).
    pub fn label(self) -> char {
        char::from(b'1' + self.0)
    }

    /// Parse a 1-based digit label into a symbol, if it names one of `pad_count` pads.
    pub fn from_label(ch: char, pad_count: u8) -> Option<Self> {
        let digit = ch.to_digit(10)?;
        if digit == 0 || digit > pad_count as u32 {
            return None;
        }
        Some(Self((digit - 1) as u8))
    }
}

/// Result of advancing a sequence cursor.
///
/// Exhaustion is an explicit variant rather than a sentinel value so it can never
/// collide with symbol `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    Symbol(Symbol),
    EndOfSequence,
}

impl Next {
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Next::Symbol(s) => Some(s),
            Next::EndOfSequence => None,
        }
    }
}

/// Normalized input events consumed by the turn controller.
///
/// The controller does not know whether a selection came from a key press or a
/// pointer press; the input adapter resolves that before emitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A pad was pressed
    SymbolSelected(Symbol),
    /// The pressed pad was released (key-up, pointer release, or release timeout)
    SymbolCleared,
    /// Player asked to leave the game
    Quit,
}

/// Named timers the turn controller schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Advance machine playback by one symbol
    PlaybackTick,
    /// Start the next round after a completed one
    NextRound,
    /// Play the failure cue after a mismatch
    FailureCue,
    /// End the session after the failure cue
    SessionEnd,
}

impl Timer {
    /// camelCase name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Timer::PlaybackTick => "playbackTick",
            Timer::NextRound => "nextRound",
            Timer::FailureCue => "failureCue",
            Timer::SessionEnd => "sessionEnd",
        }
    }
}

/// Turn-taking phases.
///
/// Exactly one is active at a time; only the turn controller moves between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Machine is playing the sequence back
    SimonPlaying,
    /// Waiting for the player to reproduce the sequence
    AwaitingPlayer,
    /// Round complete, waiting for the next round to start
    Resetting,
    /// Player made a mistake; failure cue and session end are pending
    Terminating,
    /// Game ended and the session stays open (restart policy)
    GameOver,
}

impl GameState {
    /// Whether pads accept player selections.
    pub fn input_enabled(&self) -> bool {
        matches!(self, GameState::AwaitingPlayer)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::SimonPlaying => "simonPlaying",
            GameState::AwaitingPlayer => "awaitingPlayer",
            GameState::Resetting => "resetting",
            GameState::Terminating => "terminating",
            GameState::GameOver => "gameOver",
        }
    }
}

/// Outcome of judging one player selection.
///
/// Transient: it only drives the next transition and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Selection matched and more symbols remain in the round
    Match,
    /// Selection differed from the expected symbol
    Mismatch { expected: Symbol, got: Symbol },
    /// Selection matched the final symbol of the round
    SequenceExhausted,
}
