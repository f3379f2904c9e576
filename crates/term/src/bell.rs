//! Terminal bell as an audio sink.
//!
//! A terminal has one sound, so cues are approximated with BEL. Symbol cues
//! closer together than `min_gap` collapse into one ring.

use std::io::{self, Write};
use std::str::FromStr;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::core::AudioSink;
use crate::types::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BellMode {
    Off,
    /// Ring only when the player makes a mistake
    #[default]
    Failure,
    /// Ring on every cue
    All,
}

impl FromStr for BellMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "0" | "none" => Ok(BellMode::Off),
            "failure" | "fail" => Ok(BellMode::Failure),
            "all" | "1" | "on" => Ok(BellMode::All),
            other => Err(format!("unknown bell mode: {}", other)),
        }
    }
}

pub struct TerminalBell<W: Write> {
    out: W,
    mode: BellMode,
    min_gap: Duration,
    last_cue: Option<Instant>,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout(mode: BellMode, min_gap: Duration) -> Self {
        Self::new(io::stdout(), mode, min_gap)
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, mode: BellMode, min_gap: Duration) -> Self {
        Self {
            out,
            mode,
            min_gap,
            last_cue: None,
        }
    }

    pub fn mode(&self) -> BellMode {
        self.mode
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn ring(&mut self) {
        let res = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        if let Err(e) = res {
            warn!(error = %e, "bell write failed");
        }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play_cue(&mut self, _symbol: Symbol) {
        if self.mode != BellMode::All {
            return;
        }
        let now = Instant::now();
        if let Some(last) = self.last_cue {
            if now.duration_since(last) < self.min_gap {
                return;
            }
        }
        self.last_cue = Some(now);
        self.ring();
    }

    fn play_failure(&mut self) {
        if self.mode != BellMode::Off {
            self.ring();
        }
    }
}
