//! Breathing cycle controller.
//!
//! Drives a [`PhaseClock`] through `Inhale -> Hold -> Exhale -> Inhale ...`
//! for as long as it is running. There is no terminal state; `Ready` is only
//! re-entered through [`BreathingController::reset`].
//!
//! ## State Transitions
//!
//! ```text
//! Ready --start--> Inhale --done--> Hold --done--> Exhale --done--> Inhale ...
//!   any active phase --pause--> same phase, paused (start resumes mid-phase)
//!   anything --reset--> Ready
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut controller = BreathingController::manual(PhaseDurations::default());
//! controller.subscribe(|state| println!("{state:?}"));
//! controller.start();
//! controller.advance_secs(8); // now in Hold
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::clock::{ClockSignal, ClockToken, ManualScheduler, PhaseClock, TickScheduler};
use super::phase::{Phase, PhaseDurations};
use crate::events::Event;

/// Observable state of the exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleState {
    pub phase: Phase,
    pub remaining_secs: u32,
    pub running: bool,
}

impl CycleState {
    pub const READY: CycleState = CycleState {
        phase: Phase::Ready,
        remaining_secs: 0,
        running: false,
    };

    /// 0.0 .. 1.0 progress through the current phase.
    pub fn progress(&self, durations: &PhaseDurations) -> f64 {
        let total = durations.duration(self.phase);
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.remaining_secs);
        f64::from(elapsed) / f64::from(total)
    }

    pub fn instruction(&self) -> &'static str {
        self.phase.instruction()
    }
}

impl Default for CycleState {
    fn default() -> Self {
        Self::READY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&CycleState) + Send>;

pub struct BreathingController<S = ManualScheduler> {
    durations: PhaseDurations,
    state: CycleState,
    clock: PhaseClock<S>,
    completed_cycles: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: TickScheduler> BreathingController<S> {
    pub fn new(durations: PhaseDurations, scheduler: S) -> Self {
        Self {
            durations,
            state: CycleState::READY,
            clock: PhaseClock::new(scheduler),
            completed_cycles: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> CycleState {
        self.state
    }

    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    /// Number of exhale phases finished since the last reset.
    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    pub fn clock(&self) -> &PhaseClock<S> {
        &self.clock
    }

    pub fn progress(&self) -> f64 {
        self.state.progress(&self.durations)
    }

    /// Build a full state snapshot event.
    pub fn snapshot_event(&self) -> Event {
        Event::StateSnapshot {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            running: self.state.running,
            instruction: self.state.instruction().to_string(),
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Register a callback invoked synchronously after every state change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&CycleState) + Send + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start from `Ready`, or resume a paused phase where it left off.
    pub fn start(&mut self) -> Option<Event> {
        if self.state.running {
            tracing::debug!(phase = %self.state.phase, "start ignored, already running");
            return None;
        }

        let event = if self.state.phase == Phase::Ready {
            let duration = self.durations.duration(Phase::Inhale);
            self.state = CycleState {
                phase: Phase::Inhale,
                remaining_secs: duration,
                running: true,
            };
            tracing::debug!(pattern = %self.durations.pattern(), "breathing started");
            Event::BreathingStarted {
                phase: Phase::Inhale,
                duration_secs: duration,
                pattern: self.durations.pattern(),
                at: Utc::now(),
            }
        } else {
            if self.state.remaining_secs == 0 {
                self.state.remaining_secs = self.durations.duration(self.state.phase);
            }
            self.state.running = true;
            tracing::debug!(
                phase = %self.state.phase,
                remaining_secs = self.state.remaining_secs,
                "breathing resumed"
            );
            Event::BreathingResumed {
                phase: self.state.phase,
                remaining_secs: self.state.remaining_secs,
                at: Utc::now(),
            }
        };

        self.clock.start(self.state.remaining_secs);
        self.notify();
        Some(event)
    }

    /// Stop counting, keeping the phase and remaining seconds for a later `start`.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.running {
            tracing::debug!("pause ignored, not running");
            return None;
        }
        self.clock.cancel();
        self.state.running = false;
        tracing::debug!(
            phase = %self.state.phase,
            remaining_secs = self.state.remaining_secs,
            "breathing paused"
        );
        self.notify();
        Some(Event::BreathingPaused {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Return to `Ready` from any state.
    pub fn reset(&mut self) -> Option<Event> {
        self.clock.cancel();
        self.completed_cycles = 0;
        if self.state != CycleState::READY {
            self.state = CycleState::READY;
            tracing::debug!("breathing reset");
            self.notify();
        }
        Some(Event::BreathingReset { at: Utc::now() })
    }

    /// Apply a timer fire delivered by the scheduler.
    ///
    /// Fires for cancelled or superseded countdowns are dropped without
    /// touching state. Returns `Some(Event::PhaseAdvanced)` when a phase ends.
    pub fn on_fire(&mut self, token: ClockToken) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        match self.clock.fire(token)? {
            ClockSignal::Tick(remaining) => {
                tracing::trace!(phase = %self.state.phase, remaining, "tick");
                self.state.remaining_secs = remaining;
                self.notify();
                None
            }
            ClockSignal::Completed => Some(self.advance()),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self) -> Event {
        let from = self.state.phase;
        let to = from.next();
        if from == Phase::Exhale {
            self.completed_cycles += 1;
        }
        let duration = self.durations.duration(to);
        self.state.phase = to;
        self.state.remaining_secs = duration;
        self.clock.start(duration);
        tracing::debug!(%from, %to, duration, cycles = self.completed_cycles, "phase advanced");
        self.notify();
        Event::PhaseAdvanced {
            from,
            to,
            duration_secs: duration,
            completed_cycles: self.completed_cycles,
            at: Utc::now(),
        }
    }

    fn notify(&mut self) {
        let state = self.state;
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&state);
        }
    }
}

impl BreathingController<ManualScheduler> {
    /// Controller driven by explicit [`advance_secs`](Self::advance_secs) calls.
    pub fn manual(durations: PhaseDurations) -> Self {
        Self::new(durations, ManualScheduler::new())
    }

    pub fn scheduler(&self) -> &ManualScheduler {
        self.clock.scheduler()
    }

    /// Let `secs` seconds elapse, firing the armed countdown once per second.
    ///
    /// Returns the phase-advance events produced along the way.
    pub fn advance_secs(&mut self, secs: u32) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..secs {
            let Some(token) = self.clock.active_token() else {
                break;
            };
            if let Some(event) = self.on_fire(token) {
                events.push(event);
            }
        }
        events
    }
}

impl<S> std::fmt::Debug for BreathingController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreathingController")
            .field("durations", &self.durations)
            .field("state", &self.state)
            .field("completed_cycles", &self.completed_cycles)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn controller() -> BreathingController {
        BreathingController::manual(PhaseDurations::relaxing())
    }

    fn state(phase: Phase, remaining_secs: u32, running: bool) -> CycleState {
        CycleState {
            phase,
            remaining_secs,
            running,
        }
    }

    fn recorder(controller: &mut BreathingController) -> Arc<Mutex<Vec<CycleState>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        controller.subscribe(move |s| sink.lock().unwrap().push(*s));
        seen
    }

    #[test]
    fn starts_ready() {
        let c = controller();
        assert_eq!(c.snapshot(), CycleState::READY);
        assert!(!c.clock().is_active());
        assert_eq!(c.progress(), 0.0);
    }

    #[test]
    fn start_enters_inhale_with_full_duration() {
        let mut c = controller();
        let event = c.start();
        assert!(matches!(event, Some(Event::BreathingStarted { duration_secs: 8, .. })));
        assert_eq!(c.snapshot(), state(Phase::Inhale, 8, true));
        assert_eq!(c.scheduler().armed_len(), 1);
    }

    #[test]
    fn first_tick_reports_duration_minus_one() {
        let mut c = controller();
        c.start();
        c.advance_secs(1);
        assert_eq!(c.snapshot(), state(Phase::Inhale, 7, true));
    }

    #[test]
    fn each_phase_advances_exactly_once() {
        let mut c = controller();
        c.start();

        let events = c.advance_secs(8);
        assert_eq!(events.len(), 1);
        assert_eq!(c.snapshot(), state(Phase::Hold, 6, true));

        let events = c.advance_secs(6);
        assert_eq!(events.len(), 1);
        assert_eq!(c.snapshot(), state(Phase::Exhale, 6, true));

        let events = c.advance_secs(6);
        assert_eq!(events.len(), 1);
        assert_eq!(c.snapshot(), state(Phase::Inhale, 8, true));
        assert_eq!(c.completed_cycles(), 1);
    }

    #[test]
    fn pause_twice_matches_pause_once() {
        let mut c = controller();
        c.start();
        c.advance_secs(2);
        assert!(c.pause().is_some());
        let once = c.snapshot();
        assert!(c.pause().is_none());
        assert_eq!(c.snapshot(), once);
        assert_eq!(once, state(Phase::Inhale, 6, false));
        assert!(!c.clock().is_active());
    }

    #[test]
    fn double_start_keeps_one_clock() {
        let mut c = controller();
        assert!(c.start().is_some());
        assert!(c.start().is_none());
        assert_eq!(c.scheduler().armed_len(), 1);
        assert_eq!(c.scheduler().arm_count(), 1);
        let events = c.advance_secs(8);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn resume_continues_mid_phase() {
        let mut c = controller();
        c.start();
        c.advance_secs(3);
        c.pause();
        assert_eq!(c.snapshot(), state(Phase::Inhale, 5, false));

        let event = c.start();
        assert!(matches!(event, Some(Event::BreathingResumed { remaining_secs: 5, .. })));
        c.advance_secs(4);
        assert_eq!(c.snapshot(), state(Phase::Inhale, 1, true));
        c.advance_secs(1);
        assert_eq!(c.snapshot(), state(Phase::Hold, 6, true));
    }

    #[test]
    fn reset_from_any_state() {
        let mut c = controller();
        c.reset();
        assert_eq!(c.snapshot(), CycleState::READY);

        c.start();
        c.advance_secs(3);
        c.reset();
        assert_eq!(c.snapshot(), CycleState::READY);

        c.start();
        c.advance_secs(10);
        c.pause();
        assert_eq!(c.snapshot().phase, Phase::Hold);
        c.reset();
        assert_eq!(c.snapshot(), CycleState::READY);
        assert!(!c.clock().is_active());
        assert_eq!(c.scheduler().armed_len(), 0);
    }

    #[test]
    fn stale_fire_after_pause_is_ignored() {
        let mut c = controller();
        c.start();
        let token = c.clock().active_token().unwrap();
        c.pause();
        let seen = recorder(&mut c);
        assert!(c.on_fire(token).is_none());
        assert_eq!(c.snapshot(), state(Phase::Inhale, 8, false));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn stale_fire_after_resume_is_ignored() {
        let mut c = controller();
        c.start();
        let old = c.clock().active_token().unwrap();
        c.pause();
        c.start();
        assert!(c.on_fire(old).is_none());
        assert_eq!(c.snapshot(), state(Phase::Inhale, 8, true));
    }

    #[test]
    fn stale_fire_after_reset_is_ignored() {
        let mut c = controller();
        c.start();
        c.advance_secs(7);
        let token = c.clock().active_token().unwrap();
        c.reset();
        assert!(c.on_fire(token).is_none());
        assert_eq!(c.snapshot(), CycleState::READY);
    }

    #[test]
    fn subscribers_see_every_change() {
        let mut c = controller();
        let seen = recorder(&mut c);
        c.start();
        c.advance_secs(2);
        c.pause();
        c.reset();
        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                state(Phase::Inhale, 8, true),
                state(Phase::Inhale, 7, true),
                state(Phase::Inhale, 6, true),
                state(Phase::Inhale, 6, false),
                CycleState::READY,
            ]
        );
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut c = controller();
        let seen = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&seen);
        let id = c.subscribe(move |_| *sink.lock().unwrap() += 1);
        c.start();
        assert!(c.unsubscribe(id));
        assert!(!c.unsubscribe(id));
        c.advance_secs(3);
        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn progress_ratio_tracks_elapsed() {
        let mut c = controller();
        c.start();
        c.advance_secs(2);
        assert!((c.progress() - 0.25).abs() < f64::EPSILON);
        c.advance_secs(6);
        assert_eq!(c.progress(), 0.0);
    }

    #[test]
    fn snapshot_event_carries_instruction() {
        let mut c = controller();
        c.start();
        match c.snapshot_event() {
            Event::StateSnapshot {
                phase,
                instruction,
                running,
                ..
            } => {
                assert_eq!(phase, Phase::Inhale);
                assert_eq!(instruction, "Breathe In...");
                assert!(running);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
