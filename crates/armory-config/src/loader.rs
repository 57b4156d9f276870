//! Configuration loading from files and environment variables.

use crate::schema::Config;
use armory_common::FetchPolicy;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "ARMORY_CONFIG_PATH";

/// File names probed in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["config.toml", "config.yaml", "config.yml"];

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file.
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error.
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension is neither TOML nor YAML.
    #[error("Unsupported configuration format: '{0}'")]
    UnsupportedFormat(PathBuf),

    /// Environment variable parsing error.
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParse {
        /// Variable name.
        var: String,
        /// Parse failure description.
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration value '{field}': {message}")]
    Invalid {
        /// Dotted path of the offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },
}

impl ConfigError {
    /// Creates a validation error for a field.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ConfigError> for armory_common::ArmoryError {
    fn from(err: ConfigError) -> Self {
        Self::config(err.to_string())
    }
}

/// Configuration loader: file, then environment overrides, then validation.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader for an explicit configuration file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Creates a loader that finds its file through `ARMORY_CONFIG_PATH` or
    /// the default file names. No file at all is not an error.
    pub fn discover() -> Self {
        let path = env::var_os(CONFIG_PATH_VAR).map(PathBuf::from).or_else(|| {
            DEFAULT_CONFIG_FILES
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
        });
        Self { path }
    }

    /// Path of the configuration file this loader reads, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads `.env`, the configuration file and process environment overrides,
    /// then validates the result.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        self.load_with_env(|key| env::var(key).ok())
    }

    /// Same as [`ConfigLoader::load`] with an explicit environment lookup.
    pub fn load_with_env<F>(&self, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::read_file(path)?
            }
            None => {
                info!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_env_overrides(&mut config, lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML or YAML file, chosen by extension.
    pub fn read_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("yaml" | "yml") => Ok(serde_yaml::from_str(&content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Applies environment variable overrides to configuration.
    pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Discord configuration overrides
        if let Some(token) = lookup("DISCORD_TOKEN") {
            config.discord.token = token;
        }

        if let Some(id) = lookup("CLIENT_ID") {
            config.discord.application_id = Some(parse_id("CLIENT_ID", &id)?);
        }

        if let Some(id) = lookup("GUILD_ID") {
            config.discord.guild_id = Some(parse_id("GUILD_ID", &id)?);
        }

        // Blizzard configuration overrides
        if let Some(client_id) = lookup("BLIZZARD_CLIENT_ID") {
            config.blizzard.client_id = client_id;
        }

        if let Some(secret) = lookup("BLIZZARD_CLIENT_SECRET") {
            config.blizzard.client_secret = secret;
        }

        if let Some(locale) = lookup("BLIZZARD_LOCALE") {
            config.blizzard.locale = locale;
        }

        // Lookup, logging and data overrides
        if let Some(policy) = lookup("ARMORY_FETCH_POLICY") {
            config.lookup.policy =
                policy
                    .parse::<FetchPolicy>()
                    .map_err(|e| ConfigError::EnvParse {
                        var: "ARMORY_FETCH_POLICY".to_string(),
                        message: e.to_string(),
                    })?;
        }

        if let Some(level) = lookup("ARMORY_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(language) = lookup("ARMORY_LANGUAGE") {
            config.data.language = language;
        }

        Ok(())
    }
}

fn parse_id(var: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::EnvParse {
        var: var.to_string(),
        message: e.to_string(),
    })
}
