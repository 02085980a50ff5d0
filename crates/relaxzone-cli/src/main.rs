use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "relaxzone", version, about = "Relax Zone CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Guided breathing exercise (live controls: s=start p=pause r=reset q=quit)
    #[command(args_conflicts_with_subcommands = true)]
    Breathe(commands::breathe::BreatheArgs),
    /// Print motivational quotes
    Quote {
        /// Number of quotes to print
        #[arg(long, default_value = "1")]
        count: usize,
    },
    /// Meme feed and voting
    Memes {
        #[command(subcommand)]
        action: commands::memes::MemesAction,
    },
    /// Community shoutout board
    Shoutouts {
        #[command(subcommand)]
        action: commands::shoutouts::ShoutoutsAction,
    },
    /// Submit a meme image (simulated, nothing is uploaded)
    Submit {
        /// Path to an image file
        path: std::path::PathBuf,
    },
    /// Relaxing music player
    Music,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Breathe(args) => commands::breathe::run(args),
        Commands::Quote { count } => commands::quote::run(count),
        Commands::Memes { action } => commands::memes::run(action),
        Commands::Shoutouts { action } => commands::shoutouts::run(action),
        Commands::Submit { path } => commands::submit::run(&path),
        Commands::Music => commands::music::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
