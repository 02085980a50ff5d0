use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::breathing::Phase;
use crate::content::Vote;

/// Every state change in the system produces an Event.
/// Front-ends render them; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    BreathingStarted {
        phase: Phase,
        duration_secs: u32,
        pattern: String,
        at: DateTime<Utc>,
    },
    BreathingResumed {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    BreathingPaused {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    BreathingReset {
        at: DateTime<Utc>,
    },
    PhaseAdvanced {
        from: Phase,
        to: Phase,
        duration_secs: u32,
        completed_cycles: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        remaining_secs: u32,
        running: bool,
        instruction: String,
        progress: f64,
        at: DateTime<Utc>,
    },
    MemeVoted {
        meme_id: String,
        vote: Vote,
        likes: u32,
        dislikes: u32,
        at: DateTime<Utc>,
    },
    ShoutoutPosted {
        shoutout_id: String,
        message: String,
        at: DateTime<Utc>,
    },
    /// Simulated upload; nothing is stored.
    MemeSubmitted {
        receipt_id: String,
        file_name: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Name of the variant, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::BreathingStarted { .. } => "BreathingStarted",
            Event::BreathingResumed { .. } => "BreathingResumed",
            Event::BreathingPaused { .. } => "BreathingPaused",
            Event::BreathingReset { .. } => "BreathingReset",
            Event::PhaseAdvanced { .. } => "PhaseAdvanced",
            Event::StateSnapshot { .. } => "StateSnapshot",
            Event::MemeVoted { .. } => "MemeVoted",
            Event::ShoutoutPosted { .. } => "ShoutoutPosted",
            Event::MemeSubmitted { .. } => "MemeSubmitted",
        }
    }
}
