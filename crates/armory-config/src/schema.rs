//! Configuration schema definitions using serde.

use crate::loader::ConfigError;
use crate::validator::ConfigValidator;
use armory_common::FetchPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for Armory Bot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Blizzard API configuration.
    pub blizzard: BlizzardConfig,
    /// Character lookup configuration.
    pub lookup: LookupConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Data configuration.
    pub data: DataConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Application id of the bot.
    pub application_id: Option<u64>,
    /// Guild to register commands in; global registration when absent.
    pub guild_id: Option<u64>,
}

/// Blizzard profile API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlizzardConfig {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Locale requested for localized names, e.g. `en_US`.
    pub locale: String,
    /// API base URL; `{region}` is replaced with the region code.
    pub api_base_url: String,
    /// OAuth token endpoint.
    pub oauth_url: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

/// Character lookup configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// How failures of optional resources are handled.
    pub policy: FetchPolicy,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter directive, e.g. `info` or `armory_commands=debug`.
    pub level: String,
    /// Whether to emit JSON lines.
    pub json: bool,
    /// Directory for daily-rolling log files; stdout only when absent.
    pub directory: Option<PathBuf>,
}

/// Data configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Language code for localization.
    pub language: String,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigValidator::validate(self)
    }
}

impl BlizzardConfig {
    /// API base URL for the given region code.
    pub fn api_base_for(&self, region: &str) -> String {
        self.api_base_url.replace("{region}", region)
    }
}
