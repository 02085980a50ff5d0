//! Community message board. Posts are kept in memory, newest first.

use chrono::{DateTime, Utc};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 5;

/// When a shoutout was posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Posted {
    /// Seed content carries a pre-rendered relative label.
    Label { text: String },
    At { at: DateTime<Utc> },
}

impl Posted {
    /// Relative label such as `Just now` or `5 hours ago`.
    pub fn relative_to(&self, now: DateTime<Utc>) -> String {
        match self {
            Posted::Label { text } => text.clone(),
            Posted::At { at } => {
                let secs = (now - *at).num_seconds().max(0);
                match secs {
                    0..=59 => "Just now".to_string(),
                    60..=3_599 => plural(secs / 60, "minute"),
                    3_600..=86_399 => plural(secs / 3_600, "hour"),
                    86_400..=604_799 => plural(secs / 86_400, "day"),
                    _ => plural(secs / 604_800, "week"),
                }
            }
        }
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shoutout {
    pub id: String,
    pub user: String,
    pub avatar_fallback: String,
    pub message: String,
    pub posted: Posted,
}

fn seeded(id: &str, user: &str, avatar: &str, message: &str, label: &str) -> Shoutout {
    Shoutout {
        id: id.to_string(),
        user: user.to_string(),
        avatar_fallback: avatar.to_string(),
        message: message.to_string(),
        posted: Posted::Label {
            text: label.to_string(),
        },
    }
}

pub fn seed_shoutouts() -> Vec<Shoutout> {
    vec![
        seeded(
            "shoutout1",
            "Alex P.",
            "AP",
            "Keep pushing, everyone! Your hard work will pay off. \u{2728}",
            "2 hours ago",
        ),
        seeded(
            "shoutout2",
            "Sarah K.",
            "SK",
            "Don't forget to take breaks and celebrate small wins! You got this! \u{1F4AA}",
            "5 hours ago",
        ),
        seeded(
            "shoutout3",
            "Mike B.",
            "MB",
            "Networking is key! Reach out and connect. Opportunities are everywhere.",
            "1 day ago",
        ),
        seeded(
            "shoutout4",
            "Jessica L.",
            "JL",
            "Feeling a bit down today but seeing your positive messages helps a lot! Thanks community! \u{2764}\u{FE0F}",
            "3 days ago",
        ),
        seeded(
            "shoutout5",
            "Chris T.",
            "CT",
            "Just landed an interview! Persistence is everything. Don't give up!",
            "1 week ago",
        ),
    ]
}

#[derive(Debug, Clone)]
pub struct ShoutoutBoard {
    shoutouts: Vec<Shoutout>,
    author: String,
    avatar: String,
    rng: Mcg128Xsl64,
}

impl ShoutoutBoard {
    pub fn new(shoutouts: Vec<Shoutout>) -> Self {
        Self {
            shoutouts,
            author: "You".to_string(),
            avatar: "\u{1F60A}".to_string(),
            rng: Mcg128Xsl64::from_entropy(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_shoutouts())
    }

    /// Name shown on posts made through this board.
    pub fn with_author(mut self, author: impl Into<String>, avatar: impl Into<String>) -> Self {
        self.author = author.into();
        self.avatar = avatar.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mcg128Xsl64::seed_from_u64(seed);
        self
    }

    /// Newest first.
    pub fn shoutouts(&self) -> &[Shoutout] {
        &self.shoutouts
    }

    pub fn len(&self) -> usize {
        self.shoutouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shoutouts.is_empty()
    }

    /// Post a message to the top of the board.
    pub fn post(&mut self, message: &str) -> Result<Event, ValidationError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        let now = Utc::now();
        let shoutout = Shoutout {
            id: self.next_id(now),
            user: self.author.clone(),
            avatar_fallback: self.avatar.clone(),
            message: message.to_string(),
            posted: Posted::At { at: now },
        };
        tracing::debug!(id = %shoutout.id, "shoutout posted");
        let event = Event::ShoutoutPosted {
            shoutout_id: shoutout.id.clone(),
            message: shoutout.message.clone(),
            at: now,
        };
        self.shoutouts.insert(0, shoutout);
        Ok(event)
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| BASE36[self.rng.gen_range(0..BASE36.len())] as char)
            .collect();
        format!("shoutout-{}-{}", now.timestamp_millis(), suffix)
    }
}
