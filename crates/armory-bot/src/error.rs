//! Application-wide error types using thiserror.

use armory_common::ArmoryError;
use armory_config::ConfigError;
use armory_profile::GatewayError;
use poise::serenity_prelude as serenity;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Startup failure in a workspace crate.
    #[error("Startup error: {0}")]
    Armory(#[from] ArmoryError),

    /// The profile API client could not be built.
    #[error("Profile API error: {0}")]
    Gateway(#[from] GatewayError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// The logging subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
