mod config;

pub use config::{BreathingConfig, Config, FeedConfig, MusicConfig, ProfileConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/relaxzone[-dev]/` based on RELAXZONE_ENV.
///
/// Set RELAXZONE_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RELAXZONE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("relaxzone-dev")
    } else {
        base_dir.join("relaxzone")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
