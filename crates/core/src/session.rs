//! Session - one game owned by the host loop
//!
//! Ties the pure [`TurnController`] to a [`Scheduler`] and an [`AudioSink`] and
//! applies the controller's directives in order. All state changes go through
//! [`Session::dispatch`], which the host calls from a single loop, so timers,
//! playback and judging can never interleave.

use std::time::Duration;

use tracing::debug;

use crate::audio::AudioSink;
use crate::controller::{Directive, Directives, GameEvent, TurnController};
use crate::scheduler::{Scheduler, TimerQueue, TimerToken};
use crate::snapshot::GameSnapshot;
use crate::types::InputEvent;

/// Events delivered by the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Input(InputEvent),
    /// A scheduler token elapsed
    TimerFired(TimerToken),
    Frame,
}

/// Whether the host loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close,
}

pub struct Session<S: Scheduler, A: AudioSink> {
    controller: TurnController,
    scheduler: S,
    audio: A,
    closed: bool,
}

impl<S: Scheduler, A: AudioSink> Session<S, A> {
    pub fn new(controller: TurnController, scheduler: S, audio: A) -> Self {
        Self {
            controller,
            scheduler,
            audio,
            closed: false,
        }
    }

    pub fn start(&mut self) -> Flow {
        if self.closed {
            return Flow::Close;
        }
        let directives = self.controller.start();
        self.apply(directives)
    }

    pub fn dispatch(&mut self, event: SessionEvent) -> Flow {
        if self.closed {
            return Flow::Close;
        }

        let event = match event {
            SessionEvent::Input(input) => GameEvent::Input(input),
            SessionEvent::Frame => GameEvent::Frame,
            SessionEvent::TimerFired(token) => match self.scheduler.claim(token) {
                Some(timer) => GameEvent::Timer(timer),
                None => {
                    debug!(token = token.id(), "stale timer");
                    return Flow::Continue;
                }
            },
        };

        let directives = self.controller.handle(event);
        self.apply(directives)
    }

    /// Tear the session down. Every pending timer becomes inert.
    pub fn close(&mut self) {
        if !self.closed {
            self.scheduler.cancel_all();
            self.closed = true;
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.controller.snapshot()
    }

    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    fn apply(&mut self, directives: Directives) -> Flow {
        for directive in directives {
            match directive {
                Directive::Schedule { after, timer } => {
                    self.scheduler.after(after, timer);
                }
                Directive::PlayCue(symbol) => self.audio.play_cue(symbol),
                Directive::PlayFailure => self.audio.play_failure(),
                Directive::Close => {
                    self.close();
                    return Flow::Close;
                }
            }
        }
        Flow::Continue
    }
}

impl<A: AudioSink> Session<TimerQueue, A> {
    /// Headless driver: move the queue's clock and dispatch every timer that fell due.
    ///
    /// The clock stops at each due time on the way, so timers scheduled by a
    /// dispatch are measured from when their predecessor fired.
    pub fn advance(&mut self, elapsed: Duration) -> Flow {
        let target = self.scheduler.now() + elapsed;
        loop {
            let step = match self.scheduler.next_due_in() {
                Some(step) if self.scheduler.now() + step <= target => step,
                _ => break,
            };
            for token in self.scheduler.advance(step) {
                if self.dispatch(SessionEvent::TimerFired(token)) == Flow::Close {
                    return Flow::Close;
                }
            }
        }

        let rest = target.saturating_sub(self.scheduler.now());
        let late = self.scheduler.advance(rest);
        debug_assert!(late.is_empty());

        if self.closed {
            Flow::Close
        } else {
            Flow::Continue
        }
    }
}
