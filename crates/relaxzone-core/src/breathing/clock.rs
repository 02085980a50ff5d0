//! Phase clock: a one-second countdown for a single breathing phase.
//!
//! The clock owns no thread or timer of its own. Arming and disarming the
//! underlying periodic timer is delegated to a [`TickScheduler`], and each
//! time that timer goes off the owner calls [`PhaseClock::fire`] with the
//! token it was armed with.
//!
//! Every `start` issues a fresh [`ClockToken`]. Cancelling or restarting
//! invalidates the previous token synchronously, so a fire that was already
//! in flight when the countdown was cancelled is rejected instead of being
//! applied.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Identifies one armed countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockToken(u64);

/// Outcome of a single accepted timer fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSignal {
    /// Seconds left after this tick. Never zero.
    Tick(u32),
    /// The countdown reached zero. Emitted exactly once per `start`.
    Completed,
}

/// Source of the repeating one-second timer behind a [`PhaseClock`].
pub trait TickScheduler {
    /// Begin firing `token` once per second until disarmed.
    fn arm(&mut self, token: ClockToken);
    /// Stop firing `token`. Unknown tokens are ignored.
    fn disarm(&mut self, token: ClockToken);
}

impl<T: TickScheduler + ?Sized> TickScheduler for Box<T> {
    fn arm(&mut self, token: ClockToken) {
        (**self).arm(token)
    }

    fn disarm(&mut self, token: ClockToken) {
        (**self).disarm(token)
    }
}

#[derive(Debug, Clone, Copy)]
struct Countdown {
    token: ClockToken,
    remaining: u32,
}

#[derive(Debug)]
pub struct PhaseClock<S> {
    scheduler: S,
    generation: u64,
    active: Option<Countdown>,
}

impl<S: TickScheduler> PhaseClock<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            generation: 0,
            active: None,
        }
    }

    /// Start counting down `duration_secs`, cancelling any countdown in progress.
    ///
    /// A zero duration is treated as a single tick.
    pub fn start(&mut self, duration_secs: u32) -> ClockToken {
        self.cancel();
        self.generation += 1;
        let token = ClockToken(self.generation);
        self.active = Some(Countdown {
            token,
            remaining: duration_secs.max(1),
        });
        self.scheduler.arm(token);
        tracing::trace!(generation = self.generation, duration_secs, "phase clock armed");
        token
    }

    /// Stop the active countdown. Returns `false` when nothing was running.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(countdown) => {
                self.scheduler.disarm(countdown.token);
                tracing::trace!(generation = countdown.token.0, "phase clock cancelled");
                true
            }
            None => false,
        }
    }

    /// Apply one timer fire. Stale tokens yield `None` and change nothing.
    pub fn fire(&mut self, token: ClockToken) -> Option<ClockSignal> {
        let countdown = self.active.as_mut()?;
        if countdown.token != token {
            tracing::trace!(stale = token.0, active = countdown.token.0, "ignoring stale clock fire");
            return None;
        }
        countdown.remaining = countdown.remaining.saturating_sub(1);
        let remaining = countdown.remaining;
        if remaining == 0 {
            self.cancel();
            Some(ClockSignal::Completed)
        } else {
            Some(ClockSignal::Tick(remaining))
        }
    }

    pub fn active_token(&self) -> Option<ClockToken> {
        self.active.map(|c| c.token)
    }

    pub fn remaining(&self) -> Option<u32> {
        self.active.map(|c| c.remaining)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

/// Scheduler that only records what is armed. Time advances when the owner says so.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    armed: BTreeSet<ClockToken>,
    arm_count: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed_len(&self) -> usize {
        self.armed.len()
    }

    /// Total number of `arm` calls seen.
    pub fn arm_count(&self) -> usize {
        self.arm_count
    }
}

impl TickScheduler for ManualScheduler {
    fn arm(&mut self, token: ClockToken) {
        self.armed.insert(token);
        self.arm_count += 1;
    }

    fn disarm(&mut self, token: ClockToken) {
        self.armed.remove(&token);
    }
}
