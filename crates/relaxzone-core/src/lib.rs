//! # Relax Zone Core Library
//!
//! Core logic for the Relax Zone wellness toolkit. Every feature is usable
//! from the standalone `relaxzone` CLI; nothing is persisted except the
//! user's configuration file.
//!
//! ## Architecture
//!
//! - **Breathing**: a phase clock plus a cycle controller that loops
//!   inhale, hold and exhale until paused or reset. Timer scheduling is
//!   injected, so the same controller runs on tokio or on a manual clock
//! - **Content**: meme feed with voting, quote rotation, shoutout board,
//!   simulated meme submission and the music player
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`BreathingController`]: breathing state machine
//! - [`BreathingSession`]: tokio driver for a controller
//! - [`Config`]: application configuration management
//! - [`Event`]: every state change, serializable as JSON

pub mod breathing;
pub mod content;
pub mod error;
pub mod events;
pub mod storage;

pub use breathing::{BreathingController, BreathingSession, CycleState, Phase, PhaseDurations};
pub use content::{MemeFeed, MemeSubmissionForm, MusicPlayer, QuoteRotator, ShoutoutBoard, Vote};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use storage::Config;
