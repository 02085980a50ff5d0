//! Integration tests for the breathing cycle controller.
//!
//! Time is driven by the manual scheduler, one second per fire, so every
//! scenario is deterministic.

use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use relaxzone_core::breathing::{BreathingController, CycleState, Phase, PhaseDurations};
use relaxzone_core::Event;

fn state(phase: Phase, remaining_secs: u32, running: bool) -> CycleState {
    CycleState {
        phase,
        remaining_secs,
        running,
    }
}

/// Record the state after each elapsed second.
fn timeline(controller: &mut BreathingController, secs: u32) -> Vec<CycleState> {
    (0..secs)
        .map(|_| {
            controller.advance_secs(1);
            controller.snapshot()
        })
        .collect()
}

#[test]
fn subscriber_sees_timeline_in_order() {
    let mut c = BreathingController::manual(PhaseDurations::short());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    c.subscribe(move |s| sink.lock().unwrap().push((s.phase, s.remaining_secs)));
    c.start();
    c.advance_secs(5);
    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            (Phase::Inhale, 4),
            (Phase::Inhale, 3),
            (Phase::Inhale, 2),
            (Phase::Inhale, 1),
            (Phase::Hold, 4),
            (Phase::Hold, 3),
        ]
    );
}

#[test]
fn end_to_end_eight_six_six() {
    let mut c = BreathingController::manual(PhaseDurations::relaxing());
    c.start();
    assert_eq!(c.snapshot(), state(Phase::Inhale, 8, true));

    let states = timeline(&mut c, 20);
    // states[t - 1] is the state at second t.
    assert_eq!(states[0], state(Phase::Inhale, 7, true));
    assert_eq!(states[6], state(Phase::Inhale, 1, true));
    assert_eq!(states[7], state(Phase::Hold, 6, true));
    assert_eq!(states[8], state(Phase::Hold, 5, true));
    assert_eq!(states[13], state(Phase::Exhale, 6, true));
    assert_eq!(states[19], state(Phase::Inhale, 8, true));

    c.reset();
    assert_eq!(c.snapshot(), CycleState::READY);
}

#[test]
fn four_four_six_pattern_cycles() {
    let mut c = BreathingController::manual(PhaseDurations::short());
    c.start();
    let events = c.advance_secs(14 * 3);
    assert_eq!(events.len(), 9);
    assert_eq!(c.completed_cycles(), 3);
    assert_eq!(c.snapshot(), state(Phase::Inhale, 4, true));
}

#[test]
fn each_duration_advances_once() {
    let durations = PhaseDurations::relaxing();
    for (phase, lead_in) in [(Phase::Inhale, 0), (Phase::Hold, 8), (Phase::Exhale, 14)] {
        let mut c = BreathingController::manual(durations);
        c.start();
        c.advance_secs(lead_in);
        assert_eq!(c.snapshot().phase, phase);

        let events = c.advance_secs(durations.duration(phase));
        assert_eq!(events.len(), 1, "phase {phase}");
        let next = phase.next();
        assert_eq!(c.snapshot(), state(next, durations.duration(next), true));
    }
}

#[test]
fn double_start_fires_one_completion() {
    let mut c = BreathingController::manual(PhaseDurations::relaxing());
    c.start();
    c.start();
    assert_eq!(c.scheduler().armed_len(), 1);

    let completions = c
        .advance_secs(8)
        .into_iter()
        .filter(|e| matches!(e, Event::PhaseAdvanced { from: Phase::Inhale, .. }))
        .count();
    assert_eq!(completions, 1);
    assert_eq!(c.snapshot(), state(Phase::Hold, 6, true));
}

#[test]
fn resume_uses_eight_seconds_total() {
    let mut c = BreathingController::manual(PhaseDurations::relaxing());
    c.start();
    c.advance_secs(3);
    c.pause();
    // Paused time does not count.
    assert!(c.advance_secs(30).is_empty());
    c.start();
    c.advance_secs(5);
    assert_eq!(c.snapshot(), state(Phase::Hold, 6, true));
}

#[test]
fn reset_from_paused_hold() {
    let mut c = BreathingController::manual(PhaseDurations::relaxing());
    c.start();
    c.advance_secs(10);
    c.pause();
    assert_eq!(c.snapshot(), state(Phase::Hold, 4, false));
    c.reset();
    assert_eq!(c.snapshot(), CycleState::READY);
    assert_eq!(c.completed_cycles(), 0);

    c.start();
    assert_eq!(c.snapshot(), state(Phase::Inhale, 8, true));
}

#[test]
fn cancellation_beats_same_instant_fire() {
    let mut c = BreathingController::manual(PhaseDurations::relaxing());
    c.start();
    c.advance_secs(7);
    let pending = c.clock().active_token().unwrap();

    // The fire that would complete Inhale is delivered after the pause.
    c.pause();
    assert!(c.on_fire(pending).is_none());
    assert_eq!(c.snapshot(), state(Phase::Inhale, 1, false));

    c.start();
    assert!(c.on_fire(pending).is_none());
    assert_eq!(c.snapshot(), state(Phase::Inhale, 1, true));
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Start,
    Pause,
    Reset,
    Wait(u32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Start),
        Just(Op::Pause),
        Just(Op::Reset),
        (1u32..12).prop_map(Op::Wait),
    ]
}

proptest! {
    #[test]
    fn state_invariants_hold(
        inhale in 1u32..10,
        hold in 1u32..10,
        exhale in 1u32..10,
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let durations = PhaseDurations::new(inhale, hold, exhale).unwrap();
        let mut c = BreathingController::manual(durations);
        for op in ops {
            match op {
                Op::Start => { c.start(); }
                Op::Pause => { c.pause(); }
                Op::Reset => { c.reset(); }
                Op::Wait(secs) => { c.advance_secs(secs); }
            }
            let s = c.snapshot();
            prop_assert!(s.remaining_secs <= durations.duration(s.phase));
            prop_assert_eq!(s.running, c.clock().is_active());
            prop_assert!(c.scheduler().armed_len() <= 1);
            if s.phase == Phase::Ready {
                prop_assert_eq!(s.remaining_secs, 0);
                prop_assert!(!s.running);
            }
            let progress = c.progress();
            prop_assert!((0.0..=1.0).contains(&progress));
        }
    }

    #[test]
    fn pause_is_idempotent(waits in prop::collection::vec(0u32..25, 1..4)) {
        let mut c = BreathingController::manual(PhaseDurations::relaxing());
        c.start();
        for secs in waits {
            c.advance_secs(secs);
        }
        c.pause();
        let once = c.snapshot();
        c.pause();
        prop_assert_eq!(c.snapshot(), once);
    }
}
