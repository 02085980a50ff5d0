//! Meme feed with per-viewer like/dislike voting.
//!
//! Votes live only as long as the feed does.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meme {
    pub id: String,
    pub image_url: String,
    pub alt_text: String,
    /// Two-word hint for image search.
    pub ai_hint: String,
    pub initial_likes: u32,
    pub initial_dislikes: u32,
}

impl Meme {
    fn seed(id: &str, image_url: &str, alt_text: &str, ai_hint: &str, likes: u32, dislikes: u32) -> Self {
        Self {
            id: id.to_string(),
            image_url: image_url.to_string(),
            alt_text: alt_text.to_string(),
            ai_hint: ai_hint.to_string(),
            initial_likes: likes,
            initial_dislikes: dislikes,
        }
    }
}

/// Built-in feed content.
pub fn seed_memes() -> Vec<Meme> {
    vec![
        Meme::seed(
            "meme0",
            "https://upload.wikimedia.org/wikipedia/commons/thumb/b/b1/VAN_CAT.png/800px-VAN_CAT.png",
            "Van cat sitting proudly",
            "white cat with odd eyes",
            12,
            1,
        ),
        Meme::seed(
            "meme1",
            "https://picsum.photos/seed/jobhunt/600/400",
            "Funny meme about job hunting stress",
            "job hunting",
            15,
            2,
        ),
        Meme::seed(
            "meme2",
            "https://picsum.photos/seed/workcat/600/400",
            "Cat looking tired while working on a laptop meme",
            "cat work",
            22,
            1,
        ),
        Meme::seed(
            "meme3",
            "https://picsum.photos/seed/coffee/600/400",
            "Illustration showing stages of programmer needing coffee",
            "coffee programming",
            30,
            0,
        ),
        Meme::seed(
            "meme4",
            "https://picsum.photos/seed/relax/600/400",
            "Person relaxing peacefully in a hammock meme style",
            "relax chill",
            18,
            3,
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    #[default]
    None,
    Liked,
    Disliked,
}

/// A meme plus the viewer's current vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemeCard {
    pub meme: Meme,
    pub likes: u32,
    pub dislikes: u32,
    pub vote: Vote,
}

impl MemeCard {
    pub fn new(meme: Meme) -> Self {
        Self {
            likes: meme.initial_likes,
            dislikes: meme.initial_dislikes,
            vote: Vote::None,
            meme,
        }
    }

    /// Toggle a like. Liking replaces an existing dislike.
    pub fn like(&mut self) -> Vote {
        match self.vote {
            Vote::Liked => {
                self.likes = self.likes.saturating_sub(1);
                self.vote = Vote::None;
            }
            Vote::Disliked => {
                self.dislikes = self.dislikes.saturating_sub(1);
                self.likes += 1;
                self.vote = Vote::Liked;
            }
            Vote::None => {
                self.likes += 1;
                self.vote = Vote::Liked;
            }
        }
        self.vote
    }

    /// Toggle a dislike. Disliking replaces an existing like.
    pub fn dislike(&mut self) -> Vote {
        match self.vote {
            Vote::Disliked => {
                self.dislikes = self.dislikes.saturating_sub(1);
                self.vote = Vote::None;
            }
            Vote::Liked => {
                self.likes = self.likes.saturating_sub(1);
                self.dislikes += 1;
                self.vote = Vote::Disliked;
            }
            Vote::None => {
                self.dislikes += 1;
                self.vote = Vote::Disliked;
            }
        }
        self.vote
    }

    fn voted_event(&self) -> Event {
        Event::MemeVoted {
            meme_id: self.meme.id.clone(),
            vote: self.vote,
            likes: self.likes,
            dislikes: self.dislikes,
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemeFeed {
    cards: Vec<MemeCard>,
}

impl MemeFeed {
    pub fn new(memes: Vec<Meme>) -> Self {
        Self {
            cards: memes.into_iter().map(MemeCard::new).collect(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_memes())
    }

    pub fn cards(&self) -> &[MemeCard] {
        &self.cards
    }

    pub fn get(&self, id: &str) -> Option<&MemeCard> {
        self.cards.iter().find(|c| c.meme.id == id)
    }

    pub fn like(&mut self, id: &str) -> Result<Event, ValidationError> {
        let card = self.card_mut(id)?;
        card.like();
        Ok(card.voted_event())
    }

    pub fn dislike(&mut self, id: &str) -> Result<Event, ValidationError> {
        let card = self.card_mut(id)?;
        card.dislike();
        Ok(card.voted_event())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    fn card_mut(&mut self, id: &str) -> Result<&mut MemeCard, ValidationError> {
        self.cards
            .iter_mut()
            .find(|c| c.meme.id == id)
            .ok_or_else(|| ValidationError::UnknownMeme(id.to_string()))
    }
}
