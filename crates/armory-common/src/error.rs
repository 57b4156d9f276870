//! Application-wide error type using thiserror.

use thiserror::Error;

/// Result type alias for Armory operations.
pub type Result<T> = std::result::Result<T, ArmoryError>;

/// Main error type shared by the Armory crates.
#[derive(Error, Debug)]
pub enum ArmoryError {
    /// A command argument could not be turned into a valid value.
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        /// Name of the offending argument.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Localization catalog error.
    #[error("Localization error: {message}")]
    Localization {
        /// Description of the failure.
        message: String,
        /// Locale the failure relates to, if any.
        locale: Option<String>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArmoryError {
    /// Creates an invalid input error for the given argument.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a localization error.
    pub fn localization(message: impl Into<String>, locale: Option<&str>) -> Self {
        Self::Localization {
            message: message.into(),
            locale: locale.map(str::to_string),
        }
    }

    /// Whether the error was caused by user input rather than the bot itself.
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
