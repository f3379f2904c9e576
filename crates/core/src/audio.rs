//! Audio sink contract.
//!
//! The core never waits for a cue to finish; sinks decide how (and whether) a
//! cue is heard.

use crate::types::Symbol;

pub trait AudioSink {
    /// A symbol became active (machine playback or player press).
    fn play_cue(&mut self, symbol: Symbol);

    /// The player made a mistake. Called once per failed game.
    fn play_failure(&mut self);
}

/// Sink that discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_cue(&mut self, _symbol: Symbol) {}

    fn play_failure(&mut self) {}
}

/// A cue as seen by [`RecordingAudio`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Symbol(Symbol),
    Failure,
}

/// Sink that remembers every cue, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub cues: Vec<Cue>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbols cued so far, skipping failure cues.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.cues
            .iter()
            .filter_map(|c| match c {
                Cue::Symbol(s) => Some(*s),
                Cue::Failure => None,
            })
            .collect()
    }

    pub fn failures(&self) -> usize {
        self.cues.iter().filter(|c| **c == Cue::Failure).count()
    }

    pub fn clear(&mut self) {
        self.cues.clear();
    }
}

impl AudioSink for RecordingAudio {
    fn play_cue(&mut self, symbol: Symbol) {
        self.cues.push(Cue::Symbol(symbol));
    }

    fn play_failure(&mut self) {
        self.cues.push(Cue::Failure);
    }
}
