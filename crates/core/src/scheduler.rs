//! Scheduler module - delayed, cancellable timers
//!
//! A scheduler never runs game code itself. When a timer elapses it only
//! reports the [`TimerToken`]; the host loop hands the token back to the
//! session, which [`claim`](Scheduler::claim)s it and, if the timer is still
//! live, feeds the named [`Timer`] to the turn controller. Cancelled timers and
//! timers that outlive a session therefore resolve to nothing.

use std::time::Duration;

use crate::types::Timer;

/// Handle for one scheduled timer. Unique per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

pub trait Scheduler {
    /// Arrange for `timer` to fire once after `delay`.
    fn after(&mut self, delay: Duration, timer: Timer) -> TimerToken;

    /// Consume a fired token. Returns `None` if it was cancelled or already claimed.
    fn claim(&mut self, token: TimerToken) -> Option<Timer>;

    /// Cancel one timer. Returns whether it was still live.
    fn cancel(&mut self, token: TimerToken) -> bool;

    /// Cancel every live timer (session teardown).
    fn cancel_all(&mut self);

    /// Number of live (scheduled or fired but unclaimed) timers.
    fn pending(&self) -> usize;
}

#[derive(Debug, Clone)]
struct Entry {
    token: TimerToken,
    due: Duration,
    timer: Timer,
    fired: bool,
}

/// Deterministic scheduler driven by explicit time steps.
///
/// Used for headless play and tests: nothing happens until
/// [`advance`](TimerQueue::advance) moves the clock.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the queue was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward and return the tokens that became due.
    ///
    /// Tokens come out ordered by due time, ties broken by scheduling order.
    /// Each token is reported once.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerToken> {
        self.now += elapsed;
        let now = self.now;

        let mut due: Vec<(Duration, TimerToken)> = Vec::new();
        for entry in self.entries.iter_mut() {
            if !entry.fired && entry.due <= now {
                entry.fired = true;
                due.push((entry.due, entry.token));
            }
        }
        due.sort();
        due.into_iter().map(|(_, token)| token).collect()
    }

    /// Time until the earliest unfired timer, if any.
    pub fn next_due_in(&self) -> Option<Duration> {
        self.entries
            .iter()
            .filter(|e| !e.fired)
            .map(|e| e.due.saturating_sub(self.now))
            .min()
    }
}

impl Scheduler for TimerQueue {
    fn after(&mut self, delay: Duration, timer: Timer) -> TimerToken {
        let token = TimerToken::new(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            token,
            due: self.now + delay,
            timer,
            fired: false,
        });
        token
    }

    fn claim(&mut self, token: TimerToken) -> Option<Timer> {
        let idx = self.entries.iter().position(|e| e.token == token)?;
        Some(self.entries.remove(idx).timer)
    }

    fn cancel(&mut self, token: TimerToken) -> bool {
        match self.entries.iter().position(|e| e.token == token) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    fn cancel_all(&mut self) {
        self.entries.clear();
    }

    fn pending(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_after_delay_only() {
        let mut q = TimerQueue::new();
        let t = q.after(ms(500), Timer::PlaybackTick);

        assert!(q.advance(ms(499)).is_empty());
        assert_eq!(q.advance(ms(1)), vec![t]);
        assert!(q.advance(ms(1000)).is_empty(), "reported once");
        assert_eq!(q.claim(t), Some(Timer::PlaybackTick));
        assert_eq!(q.claim(t), None);
    }

    #[test]
    fn independent_timers_fire_in_due_order() {
        let mut q = TimerQueue::new();
        let late = q.after(ms(1000), Timer::SessionEnd);
        let early = q.after(ms(500), Timer::FailureCue);
        let tie = q.after(ms(500), Timer::PlaybackTick);

        assert_eq!(q.advance(ms(2000)), vec![early, tie, late]);
        assert_eq!(q.pending(), 3);
    }

    #[test]
    fn cancelled_timer_claims_nothing() {
        let mut q = TimerQueue::new();
        let a = q.after(ms(10), Timer::NextRound);
        let b = q.after(ms(10), Timer::PlaybackTick);
        assert!(q.cancel(a));
        assert!(!q.cancel(a));

        assert_eq!(q.advance(ms(10)), vec![b]);
        assert_eq!(q.claim(a), None);
        assert_eq!(q.claim(b), Some(Timer::PlaybackTick));
    }

    #[test]
    fn cancel_all_invalidates_fired_tokens_too() {
        let mut q = TimerQueue::new();
        let a = q.after(ms(10), Timer::FailureCue);
        let _b = q.after(ms(20), Timer::SessionEnd);

        let fired = q.advance(ms(15));
        assert_eq!(fired, vec![a]);

        q.cancel_all();
        assert_eq!(q.pending(), 0);
        assert_eq!(q.claim(a), None);
        assert!(q.advance(ms(100)).is_empty());
    }

    #[test]
    fn next_due_tracks_earliest_unfired() {
        let mut q = TimerQueue::new();
        assert_eq!(q.next_due_in(), None);
        q.after(ms(300), Timer::NextRound);
        q.after(ms(100), Timer::PlaybackTick);
        assert_eq!(q.next_due_in(), Some(ms(100)));
        q.advance(ms(150));
        assert_eq!(q.next_due_in(), Some(ms(150)));
    }
}
