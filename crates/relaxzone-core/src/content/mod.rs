//! Relax Zone content: meme feed, quotes, community shoutouts,
//! simulated meme submission and the music player.

pub mod memes;
pub mod music;
pub mod quotes;
pub mod shoutouts;
pub mod submission;

pub use memes::{Meme, MemeCard, MemeFeed, Vote};
pub use music::MusicPlayer;
pub use quotes::QuoteRotator;
pub use shoutouts::{Posted, Shoutout, ShoutoutBoard};
pub use submission::{MemeSubmissionForm, SelectedFile, SubmissionReceipt};
