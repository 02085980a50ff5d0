use std::io::Write;

use chrono::Utc;
use clap::Subcommand;
use relaxzone_core::content::Shoutout;
use relaxzone_core::{Config, ShoutoutBoard};

#[derive(Subcommand)]
pub enum ShoutoutsAction {
    /// Show the board, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Post a message to the board
    Post {
        /// Message text
        message: String,
    },
}

/// Posts live only for the current invocation.
pub fn run(action: ShoutoutsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut board = ShoutoutBoard::seeded()
        .with_author(config.profile.display_name, config.profile.avatar);

    match action {
        ShoutoutsAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(board.shoutouts())?);
            } else {
                print_board(&mut std::io::stdout().lock(), board.shoutouts())?;
            }
        }
        ShoutoutsAction::Post { message } => {
            let event = board.post(&message)?;
            eprintln!("Message posted! Your positivity has been shared.");
            println!("{}", serde_json::to_string_pretty(&event)?);
            // stdout carries only the event.
            print_board(&mut std::io::stderr().lock(), board.shoutouts())?;
        }
    }
    Ok(())
}

fn print_board(out: &mut dyn Write, shoutouts: &[Shoutout]) -> std::io::Result<()> {
    if shoutouts.is_empty() {
        return writeln!(out, "No shoutouts yet. Be the first!");
    }
    let now = Utc::now();
    for s in shoutouts {
        writeln!(out, "[{}] {} ({})", s.avatar_fallback, s.user, s.posted.relative_to(now))?;
        writeln!(out, "    {}", s.message)?;
    }
    Ok(())
}
