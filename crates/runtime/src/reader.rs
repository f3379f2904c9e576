//! Terminal input reader.
//!
//! Runs on its own OS thread (crossterm's event API is blocking). Each pass
//! drains whatever is already queued into one latch cycle and posts the
//! resulting events to the host loop.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::event::LoopEvent;
use crate::input::{CycleEvents, InputAdapter, PadHitTest};
use crate::term::PadLayout;
use crate::types::Symbol;

/// Upper bound on one blocking poll, so the stop flag is noticed promptly.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Where terminal events come from.
pub trait EventSource {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
}

/// The process terminal, via crossterm.
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Events produced by one drained batch.
#[derive(Debug, Default)]
pub struct Cycle {
    pub events: CycleEvents,
    pub resized: bool,
}

/// Read one cycle: wait up to `timeout` for the first event, then take
/// everything already queued until the latch closes the cycle.
///
/// A key press held over from the previous cycle opens this one, so there is
/// no wait and the cycle resolves even when nothing new is queued.
pub fn read_cycle<E: EventSource>(
    source: &mut E,
    adapter: &mut InputAdapter,
    hit: &impl PadHitTest,
    timeout: Duration,
) -> io::Result<Cycle> {
    let mut cycle = Cycle::default();
    let pending = adapter.has_pending();
    let wait = if pending { Duration::ZERO } else { timeout };
    if !source.poll(wait)? {
        if pending {
            cycle.events = adapter.finish_cycle();
        }
        return Ok(cycle);
    }

    loop {
        let done = match source.read()? {
            Event::Resize(..) => {
                cycle.resized = true;
                false
            }
            other => adapter.offer(&other, hit),
        };
        if done || !source.poll(Duration::ZERO)? {
            break;
        }
    }

    cycle.events = adapter.finish_cycle();
    Ok(cycle)
}

/// Pump `source` into `tx` until `stop` is set, the loop hangs up, or the
/// source fails (reported as [`LoopEvent::Closed`]).
pub fn read_loop<E: EventSource>(
    source: &mut E,
    adapter: &mut InputAdapter,
    hit: &impl PadHitTest,
    tx: &UnboundedSender<LoopEvent>,
    stop: &AtomicBool,
) {
    let mut last = Instant::now();

    while !stop.load(Ordering::Relaxed) {
        let now = Instant::now();
        let elapsed_ms = now.duration_since(last).as_millis().min(u32::MAX as u128) as u32;
        last = now;

        if let Some(cleared) = adapter.update(elapsed_ms) {
            debug!("key release timeout");
            if tx.send(LoopEvent::Input(cleared)).is_err() {
                return;
            }
        }

        let timeout = adapter
            .release_due_in_ms()
            .map(|ms| Duration::from_millis(ms as u64))
            .unwrap_or(POLL_INTERVAL)
            .min(POLL_INTERVAL);

        let cycle = match read_cycle(source, adapter, hit, timeout) {
            Ok(cycle) => cycle,
            Err(e) => {
                warn!(error = %e, "input source failed");
                let _ = tx.send(LoopEvent::Closed(e));
                return;
            }
        };

        if cycle.resized && tx.send(LoopEvent::Resize).is_err() {
            return;
        }
        for input in cycle.events {
            if tx.send(LoopEvent::Input(input)).is_err() {
                return;
            }
        }
    }
}

/// Handle to the reader thread. Stopping (or dropping) joins it.
pub struct InputReader {
    stop: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl InputReader {
    pub fn spawn(
        tx: UnboundedSender<LoopEvent>,
        mut adapter: InputAdapter,
        layout: Arc<RwLock<PadLayout>>,
    ) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();

        let thread = thread::Builder::new()
            .name("simon-input".to_string())
            .spawn(move || {
                let hit = |x: u16, y: u16| -> Option<Symbol> {
                    layout.read().ok().and_then(|l| l.pad_at(x, y))
                };
                read_loop(&mut CrosstermEvents, &mut adapter, &hit, &tx, &flag);
                debug!("input reader stopped");
            })?;

        Ok(Self {
            stop,
            thread: Some(thread),
        })
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("input reader panicked");
            }
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.shutdown();
    }
}
