//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the turn-taking rules of the memory game: the growing
//! symbol sequence, the state machine that alternates machine playback with
//! player reproduction, and the timer discipline that paces both.
//! It has **zero dependencies** on rendering, terminals, or async runtimes:
//!
//! - **Deterministic**: Same seed produces the same sequence
//! - **Testable**: A [`TimerQueue`] drives whole games without a clock
//! - **Portable**: Any host that can deliver events and timer tokens can run it
//!
//! # Module Structure
//!
//! - [`sequence`]: Append-only symbol list with a replay cursor
//! - [`controller`]: The turn controller (events in, directives out)
//! - [`scheduler`]: Timer tokens, the [`Scheduler`] trait, and the deterministic [`TimerQueue`]
//! - [`session`]: Applies directives to a scheduler and an audio sink
//! - [`audio`]: The [`AudioSink`] contract plus null/recording sinks
//! - [`config`]: Pad count, pacing, and game-over policy
//! - [`rng`]: Seeded LCG for symbol generation
//!
//! # Game Rules
//!
//! - Every round starts by appending one random symbol to the sequence
//! - The machine plays the entire sequence, one symbol per `play_interval`
//! - The player must repeat the entire sequence, not just the newest symbol
//! - A correct sequence pauses for `reset_time`, then the next round begins
//! - A wrong symbol ends the game; the longest correct run is `len - 1`
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use simon_core::{GameConfig, RecordingAudio, Session, SessionEvent, TimerQueue, TurnController};
//! use simon_types::{GameState, InputEvent};
//!
//! let controller = TurnController::new(GameConfig::default(), 12345);
//! let mut session = Session::new(controller, TimerQueue::new(), RecordingAudio::new());
//! session.start();
//!
//! // One symbol, shown for 500ms, then it is the player's turn.
//! session.advance(Duration::from_millis(500));
//! assert_eq!(session.snapshot().state, GameState::AwaitingPlayer);
//!
//! let expected = session.controller().sequence().as_slice()[0];
//! session.dispatch(SessionEvent::Input(InputEvent::SymbolSelected(expected)));
//! assert_eq!(session.snapshot().state, GameState::Resetting);
//! ```

pub mod audio;
pub mod config;
pub mod controller;
pub mod rng;
pub mod scheduler;
pub mod sequence;
pub mod session;
pub mod snapshot;

pub use simon_types as types;

// Re-export commonly used types for convenience
pub use audio::{AudioSink, Cue, NullAudio, RecordingAudio};
pub use config::{ConfigError, GameConfig, GameOverPolicy};
pub use controller::{Directive, Directives, GameEvent, TurnController};
pub use rng::SimpleRng;
pub use scheduler::{Scheduler, TimerQueue, TimerToken};
pub use sequence::Sequence;
pub use session::{Flow, Session, SessionEvent};
pub use snapshot::GameSnapshot;
