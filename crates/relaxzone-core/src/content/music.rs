use serde::{Deserialize, Serialize};

/// Relaxing music stream embedded by default.
pub const DEFAULT_MUSIC_URL: &str = "https://www.youtube.com/embed/5qap5aO4i9A";

/// Embedded music player that can be shown or hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicPlayer {
    embed_url: String,
    visible: bool,
}

impl MusicPlayer {
    /// Build a player for `base_url`, appending the autoplay/mute query flags.
    pub fn new(base_url: &str, autoplay: bool, muted: bool) -> Result<Self, url::ParseError> {
        let mut embed_url = url::Url::parse(base_url)?;
        embed_url
            .query_pairs_mut()
            .append_pair("autoplay", flag(autoplay))
            .append_pair("mute", flag(muted));
        Ok(Self {
            embed_url: embed_url.into(),
            visible: false,
        })
    }

    pub fn embed_url(&self) -> &str {
        &self.embed_url
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the player; returns the new visibility.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Label for the toggle control.
    pub fn toggle_label(&self) -> &'static str {
        if self.visible {
            "Hide Relaxing Music Player"
        } else {
            "Show Relaxing Music Player"
        }
    }
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self {
            embed_url: format!("{DEFAULT_MUSIC_URL}?autoplay=0&mute=1"),
            visible: false,
        }
    }
}

fn flag(on: bool) -> &'static str {
    if on {
        "1"
    } else {
        "0"
    }
}
