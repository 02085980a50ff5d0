pub mod breathe;
pub mod config;
pub mod memes;
pub mod music;
pub mod quote;
pub mod shoutouts;
pub mod submit;
