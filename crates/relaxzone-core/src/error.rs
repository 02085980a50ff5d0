//! Core error types for relaxzone-core.
//!
//! The breathing controller itself never fails; these types cover
//! configuration, user input and the async session plumbing.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for relaxzone-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The breathing session task is no longer running
    #[error("Breathing session has shut down")]
    SessionClosed,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration schema
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Shoutout with nothing but whitespace
    #[error("Message is empty: please write something to post")]
    EmptyMessage,

    /// Meme form submitted without a file
    #[error("No meme selected: please select an image file to submit")]
    NoFileSelected,

    /// Only image files can be submitted
    #[error("Unsupported file type '{file_name}': only image files are accepted")]
    UnsupportedFileType { file_name: String },

    /// Vote or lookup for a meme that is not in the feed
    #[error("Unknown meme: {0}")]
    UnknownMeme(String),

    /// Phase durations must be positive
    #[error("Invalid duration for '{field}': {value} (must be at least 1 second)")]
    InvalidDuration { field: String, value: u32 },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        CoreError::Custom(format!("TOML serialization failed: {err}"))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
