//! Tokio driver for a [`BreathingController`].
//!
//! The session task is the only owner of the controller. Timer tasks spawned
//! by [`TokioScheduler`] do nothing but push their [`ClockToken`] into a
//! channel once per second; the session loop hands those tokens to the
//! controller, which discards any that belong to a cancelled countdown.
//! Commands are polled before timer fires so a pause issued at the same
//! instant as a tick always wins.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use super::clock::{ClockToken, TickScheduler};
use super::controller::{BreathingController, CycleState};
use super::phase::PhaseDurations;
use crate::error::{CoreError, Result};
use crate::events::Event;

const TICK_PERIOD: Duration = Duration::from_secs(1);
const EVENT_CAPACITY: usize = 64;

/// Arms one `tokio::time::interval` task per countdown.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    fires: mpsc::UnboundedSender<ClockToken>,
    timers: HashMap<ClockToken, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(fires: mpsc::UnboundedSender<ClockToken>) -> Self {
        Self {
            fires,
            timers: HashMap::new(),
        }
    }

    pub fn armed_len(&self) -> usize {
        self.timers.len()
    }
}

impl TickScheduler for TokioScheduler {
    fn arm(&mut self, token: ClockToken) {
        let fires = self.fires.clone();
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            loop {
                interval.tick().await;
                if fires.send(token).is_err() {
                    break;
                }
            }
        });
        if let Some(previous) = self.timers.insert(token, handle) {
            previous.abort();
        }
    }

    fn disarm(&mut self, token: ClockToken) {
        if let Some(handle) = self.timers.remove(&token) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Pause,
    Reset,
    Shutdown,
}

/// Handle to a running breathing session.
#[derive(Debug)]
pub struct BreathingSession {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<CycleState>,
    events: broadcast::Sender<Event>,
    durations: PhaseDurations,
    task: JoinHandle<()>,
}

impl BreathingSession {
    /// Spawn the session loop on the current tokio runtime.
    pub fn spawn(durations: PhaseDurations) -> Self {
        let (fire_tx, fire_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(CycleState::READY);
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let mut controller = BreathingController::new(durations, TokioScheduler::new(fire_tx));
        controller.subscribe(move |state| {
            state_tx.send_replace(*state);
        });

        let task = tokio::spawn(run_loop(controller, fire_rx, command_rx, event_tx.clone()));
        tracing::info!(pattern = %durations.pattern(), "breathing session spawned");

        Self {
            commands: command_tx,
            state: state_rx,
            events: event_tx,
            durations,
            task,
        }
    }

    pub fn start(&self) -> Result<()> {
        self.send(Command::Start)
    }

    pub fn pause(&self) -> Result<()> {
        self.send(Command::Pause)
    }

    pub fn reset(&self) -> Result<()> {
        self.send(Command::Reset)
    }

    /// Latest published state.
    pub fn snapshot(&self) -> CycleState {
        *self.state.borrow()
    }

    /// Receiver that observes every state change.
    pub fn watch(&self) -> watch::Receiver<CycleState> {
        self.state.clone()
    }

    /// Receiver for lifecycle events (start, pause, phase changes, reset).
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    /// Stop the session and wait for its task to finish.
    pub async fn shutdown(self) -> Result<()> {
        // The loop may already be gone; joining below reports that case.
        let _ = self.commands.send(Command::Shutdown);
        self.task
            .await
            .map_err(|e| CoreError::Custom(format!("breathing session task failed: {e}")))
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| CoreError::SessionClosed)
    }
}

async fn run_loop(
    mut controller: BreathingController<TokioScheduler>,
    mut fires: mpsc::UnboundedReceiver<ClockToken>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    events: broadcast::Sender<Event>,
) {
    loop {
        let event = tokio::select! {
            biased;
            command = commands.recv() => match command {
                Some(Command::Start) => controller.start(),
                Some(Command::Pause) => controller.pause(),
                Some(Command::Reset) => controller.reset(),
                Some(Command::Shutdown) | None => break,
            },
            Some(token) = fires.recv() => controller.on_fire(token),
        };
        if let Some(event) = event {
            // No subscribers is fine.
            let _ = events.send(event);
        }
    }
    controller.reset();
    tracing::info!("breathing session stopped");
}
