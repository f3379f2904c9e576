//! Tokio-backed scheduler.
//!
//! Each timer is a task that sleeps and then posts its token to the host loop.
//! The task never touches game state; the session claims the token when it
//! arrives, so a timer cancelled after it already posted still resolves to
//! nothing.

use std::collections::HashMap;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::core::{Scheduler, TimerToken};
use crate::event::LoopEvent;
use crate::types::Timer;

pub struct TokioScheduler {
    handle: Handle,
    tx: UnboundedSender<LoopEvent>,
    next_id: u64,
    live: HashMap<TimerToken, (Timer, JoinHandle<()>)>,
}

impl TokioScheduler {
    pub fn new(handle: Handle, tx: UnboundedSender<LoopEvent>) -> Self {
        Self {
            handle,
            tx,
            next_id: 0,
            live: HashMap::new(),
        }
    }
}

impl Scheduler for TokioScheduler {
    fn after(&mut self, delay: Duration, timer: Timer) -> TimerToken {
        self.next_id += 1;
        let token = TimerToken::new(self.next_id);

        let tx = self.tx.clone();
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            // The loop may already be gone.
            let _ = tx.send(LoopEvent::Timer(token));
        });

        self.live.insert(token, (timer, task));
        token
    }

    fn claim(&mut self, token: TimerToken) -> Option<Timer> {
        self.live.remove(&token).map(|(timer, _)| timer)
    }

    fn cancel(&mut self, token: TimerToken) -> bool {
        match self.live.remove(&token) {
            Some((_, task)) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    fn cancel_all(&mut self) {
        for (_, (_, task)) in self.live.drain() {
            task.abort();
        }
    }

    fn pending(&self) -> usize {
        self.live.len()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
