use clap::Subcommand;
use relaxzone_core::content::MemeCard;
use relaxzone_core::MemeFeed;

#[derive(Subcommand)]
pub enum MemesAction {
    /// Show the meme feed
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Like a meme (toggles; replaces a dislike)
    Like {
        /// Meme ID, e.g. "meme1"
        id: String,
    },
    /// Dislike a meme (toggles; replaces a like)
    Dislike {
        /// Meme ID, e.g. "meme1"
        id: String,
    },
}

/// Votes are not persisted, so every invocation starts from the seeded feed.
pub fn run(action: MemesAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut feed = MemeFeed::seeded();

    match action {
        MemesAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(feed.cards())?);
            } else {
                for card in feed.cards() {
                    println!("{}", format_card(card));
                }
            }
        }
        MemesAction::Like { id } => {
            let event = feed.like(&id)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        MemesAction::Dislike { id } => {
            let event = feed.dislike(&id)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }
    Ok(())
}

fn format_card(card: &MemeCard) -> String {
    format!(
        "{:<6} +{:<3} -{:<3} {}\n       {}",
        card.meme.id, card.likes, card.dislikes, card.meme.alt_text, card.meme.image_url
    )
}
