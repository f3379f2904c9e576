//! Host loop.
//!
//! The session is owned by a single synchronous loop that blocks on one
//! channel. Timer tasks run on a small tokio runtime and the input reader on
//! its own thread; both only post [`LoopEvent`]s, so every state change happens
//! here, in arrival order.

use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info};

use crate::config::{HostConfig, InputConfig};
use crate::core::{
    AudioSink, Flow, GameConfig, GameSnapshot, Scheduler, Session, SessionEvent, TurnController,
};
use crate::event::LoopEvent;
use crate::input::InputAdapter;
use crate::reader::InputReader;
use crate::scheduler::TokioScheduler;
use crate::sink::{RenderSink, TerminalSink};
use crate::term::{PadLayout, TerminalBell, TerminalRenderer};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Last round reached
    pub rounds: u32,
    /// Longest correct run of the last failed game, if any game failed
    pub longest_run: Option<usize>,
    pub best_run: usize,
}

impl From<GameSnapshot> for Outcome {
    fn from(snap: GameSnapshot) -> Self {
        Self {
            rounds: snap.round,
            longest_run: snap.longest_run,
            best_run: snap.best_run,
        }
    }
}

impl Outcome {
    /// Line printed after the terminal is restored, when a game was lost.
    pub fn summary(&self) -> Option<String> {
        self.longest_run
            .map(|run| format!("Longest correct sequence: {run}"))
    }
}

/// Drive `session` from `events` until it closes or every sender hangs up.
///
/// The session is always closed on return, so outstanding timers are inert
/// even when drawing or the input source failed.
pub fn run_loop<S, A, R>(
    session: &mut Session<S, A>,
    events: &mut UnboundedReceiver<LoopEvent>,
    sink: &mut R,
) -> Result<Outcome>
where
    S: Scheduler,
    A: AudioSink,
    R: RenderSink,
{
    let result = drive(session, events, sink);
    session.close();
    result.map(|()| Outcome::from(session.snapshot()))
}

fn drive<S, A, R>(
    session: &mut Session<S, A>,
    events: &mut UnboundedReceiver<LoopEvent>,
    sink: &mut R,
) -> Result<()>
where
    S: Scheduler,
    A: AudioSink,
    R: RenderSink,
{
    let mut flow = session.start();
    sink.draw(&session.snapshot())?;

    while flow == Flow::Continue {
        let Some(event) = events.blocking_recv() else {
            debug!("event channel closed");
            break;
        };

        flow = match event {
            LoopEvent::Input(input) => session.dispatch(SessionEvent::Input(input)),
            LoopEvent::Timer(token) => session.dispatch(SessionEvent::TimerFired(token)),
            LoopEvent::Resize => {
                sink.invalidate();
                session.dispatch(SessionEvent::Frame)
            }
            LoopEvent::Closed(e) => return Err(e).context("terminal input failed"),
        };

        sink.draw(&session.snapshot())?;
    }
    Ok(())
}

/// Play one session on the terminal `renderer` (already entered).
pub fn run_session(
    game: GameConfig,
    host: &HostConfig,
    renderer: &mut TerminalRenderer,
) -> Result<Outcome> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("simon-timers")
        .enable_time()
        .build()
        .context("failed to start timer runtime")?;

    let seed = game.seed.unwrap_or_else(seed_from_clock);
    info!(
        seed,
        pads = game.pad_count,
        play_interval_ms = game.play_interval.as_millis() as u64,
        reset_ms = game.reset_time.as_millis() as u64,
        "session start"
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let layout = Arc::new(RwLock::new(PadLayout::default()));

    let adapter = input_adapter(game.pad_count, &host.input, renderer.key_release_events());
    let reader = InputReader::spawn(tx.clone(), adapter, layout.clone())
        .context("failed to spawn input reader")?;

    let bell = TerminalBell::stdout(host.bell, game.play_interval / 2);
    let scheduler = TokioScheduler::new(runtime.handle().clone(), tx);
    let mut session = Session::new(TurnController::new(game, seed), scheduler, bell);

    let result = {
        let mut sink = TerminalSink::new(renderer, layout);
        run_loop(&mut session, &mut rx, &mut sink)
    };

    reader.stop();
    drop(session);
    runtime.shutdown_background();

    if let Ok(outcome) = &result {
        info!(rounds = outcome.rounds, best = outcome.best_run, "session end");
    }
    result
}

fn input_adapter(pad_count: u8, input: &InputConfig, key_release_events: bool) -> InputAdapter {
    if key_release_events {
        debug!("terminal reports key releases");
    }
    InputAdapter::new(pad_count)
        .with_key_release_timeout_ms(input.key_release_timeout_ms)
        .with_key_release_events(key_release_events)
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::time::Duration;

    use tokio::runtime::Runtime;
    use tokio::sync::mpsc::UnboundedSender;

    use crate::core::{RecordingAudio, Sequence};
    use crate::types::{GameState, InputEvent, Symbol};

    const SEED: u32 = 7;

    fn fast_config() -> GameConfig {
        GameConfig {
            play_interval: Duration::from_millis(5),
            reset_time: Duration::from_millis(5),
            seed: Some(SEED),
            ..GameConfig::default()
        }
    }

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .build()
            .unwrap()
    }

    #[derive(Default)]
    struct Frames(Vec<GameSnapshot>);

    impl RenderSink for Frames {
        fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()> {
            self.0.push(*snapshot);
            Ok(())
        }
    }

    /// Plays along from what it sees: repeats the sequence correctly until
    /// `mistake_round`, where it presses the wrong pad first.
    struct Player {
        tx: UnboundedSender<LoopEvent>,
        script: Vec<Symbol>,
        mistake_round: u32,
        last_state: Option<GameState>,
        idx: usize,
    }

    impl RenderSink for Player {
        fn draw(&mut self, snap: &GameSnapshot) -> Result<()> {
            if snap.state == GameState::AwaitingPlayer {
                if self.last_state != Some(GameState::AwaitingPlayer) {
                    self.idx = 0;
                }
                if self.idx < snap.sequence_len {
                    let expected = self.script[self.idx];
                    let symbol = if snap.round == self.mistake_round {
                        Symbol::new((expected.index() + 1) % snap.pad_count)
                    } else {
                        expected
                    };
                    self.idx += 1;
                    let _ = self
                        .tx
                        .send(LoopEvent::Input(InputEvent::SymbolSelected(symbol)));
                }
            }
            self.last_state = Some(snap.state);
            Ok(())
        }
    }

    #[test]
    fn quit_ends_loop_and_cancels_timers() {
        let rt = runtime();
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(LoopEvent::Input(InputEvent::Quit)).unwrap();

        let scheduler = TokioScheduler::new(rt.handle().clone(), tx);
        let controller = TurnController::new(fast_config(), SEED);
        let mut session = Session::new(controller, scheduler, RecordingAudio::new());
        let mut frames = Frames::default();

        let outcome = run_loop(&mut session, &mut rx, &mut frames).unwrap();
        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.longest_run, None);
        assert!(session.is_closed());
        assert_eq!(session.scheduler().pending(), 0);
        assert_eq!(frames.0.len(), 2);
    }

    #[test]
    fn input_failure_is_returned() {
        let rt = runtime();
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(LoopEvent::Closed(io::Error::other("tty gone")))
            .unwrap();

        let scheduler = TokioScheduler::new(rt.handle().clone(), tx);
        let controller = TurnController::new(fast_config(), SEED);
        let mut session = Session::new(controller, scheduler, RecordingAudio::new());

        let err = run_loop(&mut session, &mut rx, &mut Frames::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("tty gone"));
        assert!(session.is_closed());
    }

    #[test]
    fn resize_redraws_without_changing_state() {
        let rt = runtime();
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(LoopEvent::Resize).unwrap();
        tx.send(LoopEvent::Input(InputEvent::Quit)).unwrap();

        let scheduler = TokioScheduler::new(rt.handle().clone(), tx);
        let controller = TurnController::new(fast_config(), SEED);
        let mut session = Session::new(controller, scheduler, RecordingAudio::new());
        let mut frames = Frames::default();

        run_loop(&mut session, &mut rx, &mut frames).unwrap();
        assert_eq!(frames.0[0], frames.0[1]);
    }

    #[test]
    fn scripted_player_reaches_round_three() {
        let rt = runtime();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut expected = Sequence::new(4, SEED);
        for _ in 0..3 {
            expected.reset(true);
        }

        let mut player = Player {
            tx: tx.clone(),
            script: expected.as_slice().to_vec(),
            mistake_round: 3,
            last_state: None,
            idx: 0,
        };
        let scheduler = TokioScheduler::new(rt.handle().clone(), tx);
        let controller = TurnController::new(fast_config(), SEED);
        let mut session = Session::new(controller, scheduler, RecordingAudio::new());

        let outcome = run_loop(&mut session, &mut rx, &mut player).unwrap();
        assert_eq!(
            outcome,
            Outcome {
                rounds: 3,
                longest_run: Some(2),
                best_run: 2,
            }
        );
        assert_eq!(session.audio().failures(), 1);
        assert_eq!(session.snapshot().state, GameState::GameOver);
    }

    #[test]
    fn reported_key_releases_turn_off_synthesized_release() {
        let input = InputConfig {
            key_release_timeout_ms: 40,
        };

        let mut legacy = input_adapter(4, &input, false);
        legacy.offer_input(crate::input::DeviceInput::KeyPress(Symbol::new(0)));
        legacy.finish_cycle();
        assert_eq!(legacy.release_due_in_ms(), Some(40));

        let mut modern = input_adapter(4, &input, true);
        modern.offer_input(crate::input::DeviceInput::KeyPress(Symbol::new(0)));
        modern.finish_cycle();
        assert_eq!(modern.release_due_in_ms(), None);
        assert_eq!(modern.update(1000), None);
    }

    #[test]
    fn summary_reports_last_game_not_best() {
        let outcome = Outcome {
            rounds: 2,
            longest_run: Some(1),
            best_run: 6,
        };
        assert_eq!(
            outcome.summary().as_deref(),
            Some("Longest correct sequence: 1")
        );

        let quit = Outcome {
            longest_run: None,
            ..outcome
        };
        assert_eq!(quit.summary(), None);
    }
}
