//! # Core Module
//!
//! Configuration, error taxonomy, and reply formatting for the bot.

pub mod config;
pub mod error;
pub mod response;

// Re-export commonly used items
pub use config::{Config, StartupTick};
pub use error::StateError;
