mod clock;
mod controller;
mod phase;
mod session;

pub use clock::{ClockSignal, ClockToken, ManualScheduler, PhaseClock, TickScheduler};
pub use controller::{BreathingController, CycleState, SubscriptionId};
pub use phase::{Phase, PhaseDurations};
pub use session::{BreathingSession, TokioScheduler};
