//! Turn controller - the turn-taking state machine
//!
//! The controller is pure: it consumes [`GameEvent`]s and answers with
//! [`Directive`]s (schedule a timer, play a cue, close the session). It never
//! sleeps, never touches a clock and never calls into audio or rendering code,
//! so a whole game can be driven from a test with a [`TimerQueue`](crate::TimerQueue).
//!
//! # Round Structure
//!
//! ```text
//! SimonPlaying --(sequence exhausted)--> AwaitingPlayer
//! AwaitingPlayer --(match, more left)--> AwaitingPlayer
//! AwaitingPlayer --(match, last one)---> Resetting --(resetTime)--> SimonPlaying
//! AwaitingPlayer --(mismatch)----------> Terminating
//! Terminating --(playInterval)--> failure cue --(resetTime)--> close / restart
//! ```

use std::time::Duration;

use arrayvec::ArrayVec;
use tracing::{debug, info, warn};

use crate::config::{GameConfig, GameOverPolicy};
use crate::sequence::Sequence;
use crate::snapshot::GameSnapshot;
use crate::types::{GameState, InputEvent, Next, Symbol, Timer, TurnOutcome, MAX_PAD_COUNT};

/// Events the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Input(InputEvent),
    Timer(Timer),
    /// A redraw/resize notification with no game meaning.
    Frame,
}

/// Effects requested by the controller, applied by the session in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Schedule { after: Duration, timer: Timer },
    PlayCue(Symbol),
    PlayFailure,
    Close,
}

/// Directives produced by one event. No transition needs more than four.
pub type Directives = ArrayVec<Directive, 4>;

/// Phase plus the data that only exists inside it.
///
/// The active symbol is read from here, so it can never disagree with the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing started yet
    Idle,
    SimonPlaying { showing: Option<Symbol> },
    AwaitingPlayer { held: Option<Symbol> },
    Resetting { held: Option<Symbol> },
    Terminating { held: Option<Symbol> },
    GameOver,
}

#[derive(Debug, Clone)]
pub struct TurnController {
    config: GameConfig,
    sequence: Sequence,
    phase: Phase,
    round: u32,
    longest_run: Option<usize>,
    best_run: usize,
}

impl TurnController {
    /// An out-of-range pad count is clamped to `1..=MAX_PAD_COUNT`.
    pub fn new(mut config: GameConfig, seed: u32) -> Self {
        let pads = config.pad_count.clamp(1, MAX_PAD_COUNT);
        if pads != config.pad_count {
            warn!(requested = config.pad_count, using = pads, "pad count out of range");
            config.pad_count = pads;
        }
        let sequence = Sequence::new(config.pad_count, seed);
        Self {
            config,
            sequence,
            phase: Phase::Idle,
            round: 0,
            longest_run: None,
            best_run: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn longest_run(&self) -> Option<usize> {
        self.longest_run
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Current phase. Before [`start`](Self::start) this reports `SimonPlaying`,
    /// the phase the game opens with.
    pub fn state(&self) -> GameState {
        match self.phase {
            Phase::Idle | Phase::SimonPlaying { .. } => GameState::SimonPlaying,
            Phase::AwaitingPlayer { .. } => GameState::AwaitingPlayer,
            Phase::Resetting { .. } => GameState::Resetting,
            Phase::Terminating { .. } => GameState::Terminating,
            Phase::GameOver => GameState::GameOver,
        }
    }

    /// The highlighted pad: the symbol being played back, or the player's held press.
    pub fn active_symbol(&self) -> Option<Symbol> {
        match self.phase {
            Phase::SimonPlaying { showing } => showing,
            Phase::AwaitingPlayer { held }
            | Phase::Resetting { held }
            | Phase::Terminating { held } => held,
            Phase::Idle | Phase::GameOver => None,
        }
    }

    pub fn input_enabled(&self) -> bool {
        matches!(self.phase, Phase::AwaitingPlayer { .. })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state(),
            active: self.active_symbol(),
            input_enabled: self.input_enabled(),
            pad_count: self.config.pad_count,
            round: self.round,
            sequence_len: self.sequence.len(),
            longest_run: self.longest_run,
            best_run: self.best_run,
        }
    }

    /// Begin the first round. Calling it again once started does nothing.
    pub fn start(&mut self) -> Directives {
        let mut out = Directives::new();
        if self.phase == Phase::Idle {
            self.begin_round(&mut out);
        }
        out
    }

    pub fn handle(&mut self, event: GameEvent) -> Directives {
        let mut out = Directives::new();
        match event {
            GameEvent::Input(InputEvent::Quit) => out.push(Directive::Close),
            GameEvent::Input(InputEvent::SymbolSelected(symbol)) => {
                self.select(symbol, &mut out);
            }
            GameEvent::Input(InputEvent::SymbolCleared) => self.release(),
            GameEvent::Timer(timer) => self.on_timer(timer, &mut out),
            GameEvent::Frame => {}
        }
        out
    }

    fn begin_round(&mut self, out: &mut Directives) {
        self.round += 1;
        self.sequence.reset(true);
        self.phase = Phase::SimonPlaying { showing: None };
        info!(round = self.round, "simon play");
        self.playback_tick(out);
    }

    fn playback_tick(&mut self, out: &mut Directives) {
        match self.sequence.next() {
            Next::Symbol(symbol) => {
                self.phase = Phase::SimonPlaying {
                    showing: Some(symbol),
                };
                out.push(Directive::PlayCue(symbol));
                out.push(Directive::Schedule {
                    after: self.config.play_interval,
                    timer: Timer::PlaybackTick,
                });
            }
            Next::EndOfSequence => {
                self.sequence.reset(false);
                self.phase = Phase::AwaitingPlayer { held: None };
                info!(round = self.round, "user play");
            }
        }
    }

    fn select(&mut self, symbol: Symbol, out: &mut Directives) {
        if !self.input_enabled() {
            debug!(symbol = symbol.index(), state = self.state().as_str(), "selection ignored");
            return;
        }
        if symbol.index() >= self.config.pad_count {
            debug!(symbol = symbol.index(), "selection outside pad range ignored");
            return;
        }

        out.push(Directive::PlayCue(symbol));

        let Some(outcome) = self.judge(symbol) else {
            return;
        };

        match outcome {
            TurnOutcome::Match => {
                self.phase = Phase::AwaitingPlayer { held: Some(symbol) };
            }
            TurnOutcome::SequenceExhausted => {
                self.phase = Phase::Resetting { held: Some(symbol) };
                out.push(Directive::Schedule {
                    after: self.config.reset_time,
                    timer: Timer::NextRound,
                });
            }
            TurnOutcome::Mismatch { .. } => {
                self.phase = Phase::Terminating { held: Some(symbol) };
                out.push(Directive::Schedule {
                    after: self.config.play_interval,
                    timer: Timer::FailureCue,
                });
            }
        }
    }

    /// Compare one selection against the next expected symbol.
    ///
    /// Only reachable while awaiting the player, where the cursor is never
    /// exhausted: the last match moves the game to `Resetting`.
    fn judge(&mut self, got: Symbol) -> Option<TurnOutcome> {
        let expected = self.sequence.next().symbol()?;
        info!(expected = expected.index() + 1, got = got.index() + 1, "judge");

        let outcome = if expected != got {
            TurnOutcome::Mismatch { expected, got }
        } else if self.sequence.has_next() {
            TurnOutcome::Match
        } else {
            TurnOutcome::SequenceExhausted
        };
        Some(outcome)
    }

    fn release(&mut self) {
        match &mut self.phase {
            Phase::AwaitingPlayer { held }
            | Phase::Resetting { held }
            | Phase::Terminating { held } => *held = None,
            _ => {}
        }
    }

    fn on_timer(&mut self, timer: Timer, out: &mut Directives) {
        match (timer, self.phase) {
            (Timer::PlaybackTick, Phase::SimonPlaying { .. }) => self.playback_tick(out),
            (Timer::NextRound, Phase::Resetting { .. }) => self.begin_round(out),
            (Timer::FailureCue, Phase::Terminating { .. }) => {
                let run = self.sequence.len().saturating_sub(1);
                self.longest_run = Some(run);
                self.best_run = self.best_run.max(run);
                info!(longest = run, "longest correct sequence");
                out.push(Directive::PlayFailure);
                out.push(Directive::Schedule {
                    after: self.config.reset_time,
                    timer: Timer::SessionEnd,
                });
            }
            (Timer::SessionEnd, Phase::Terminating { .. }) => match self.config.game_over {
                GameOverPolicy::Close => {
                    self.phase = Phase::GameOver;
                    out.push(Directive::Close);
                }
                GameOverPolicy::Restart => {
                    info!("restart");
                    self.sequence.clear();
                    self.round = 0;
                    self.begin_round(out);
                }
            },
            (timer, _) => {
                debug!(timer = timer.as_str(), state = self.state().as_str(), "timer ignored");
            }
        }
    }
}
