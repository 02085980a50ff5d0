use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

pub const MOTIVATIONAL_QUOTES: &[&str] = &[
    "The only way to do great work is to love what you do. - Steve Jobs",
    "Believe you can and you're halfway there. - Theodore Roosevelt",
    "Your limitation\u{2014}it's only your imagination.",
    "Push yourself, because no one else is going to do it for you.",
    "Great things never come from comfort zones.",
    "Dream it. Wish it. Do it.",
    "Success doesn\u{2019}t just find you. You have to go out and get it.",
    "The harder you work for something, the greater you\u{2019}ll feel when you achieve it.",
    "Don\u{2019}t stop when you\u{2019}re tired. Stop when you\u{2019}re done.",
    "Wake up with determination. Go to bed with satisfaction.",
];

/// Picks random quotes. In shuffle mode (the default) the same quote is never
/// shown twice in a row; otherwise every draw is independent.
#[derive(Debug, Clone)]
pub struct QuoteRotator {
    quotes: Vec<String>,
    rng: Mcg128Xsl64,
    current: Option<usize>,
    shuffle: bool,
}

impl QuoteRotator {
    pub fn new(quotes: Vec<String>) -> Self {
        Self {
            quotes,
            rng: Mcg128Xsl64::from_entropy(),
            current: None,
            shuffle: true,
        }
    }

    /// Deterministic rotator for reproducible output.
    pub fn with_seed(quotes: Vec<String>, seed: u64) -> Self {
        Self {
            quotes,
            rng: Mcg128Xsl64::seed_from_u64(seed),
            current: None,
            shuffle: true,
        }
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    pub fn builtin() -> Self {
        Self::new(MOTIVATIONAL_QUOTES.iter().map(|q| q.to_string()).collect())
    }

    pub fn current(&self) -> Option<&str> {
        self.current.map(|i| self.quotes[i].as_str())
    }

    /// Advance to a new random quote. `None` only when there are no quotes.
    pub fn next_quote(&mut self) -> Option<&str> {
        let index = match (self.quotes.len(), self.current) {
            (0, _) => return None,
            (1, _) | (_, None) => self.rng.gen_range(0..self.quotes.len()),
            (len, Some(_)) if !self.shuffle => self.rng.gen_range(0..len),
            (len, Some(previous)) => {
                // Draw from the other len-1 slots.
                let offset = self.rng.gen_range(1..len);
                (previous + offset) % len
            }
        };
        self.current = Some(index);
        Some(self.quotes[index].as_str())
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
