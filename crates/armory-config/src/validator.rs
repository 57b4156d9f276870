//! Runtime validation of loaded configuration.

use crate::loader::ConfigError;
use crate::schema::Config;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first problem found.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.discord.token.trim().is_empty() {
            return Err(ConfigError::invalid("discord.token", "Discord token cannot be empty"));
        }

        for (field, id) in [
            ("discord.application_id", config.discord.application_id),
            ("discord.guild_id", config.discord.guild_id),
        ] {
            if id == Some(0) {
                return Err(ConfigError::invalid(field, "Discord ids are never zero"));
            }
        }

        if config.blizzard.client_id.trim().is_empty() {
            return Err(ConfigError::invalid(
                "blizzard.client_id",
                "Blizzard client id cannot be empty",
            ));
        }

        if config.blizzard.client_secret.trim().is_empty() {
            return Err(ConfigError::invalid(
                "blizzard.client_secret",
                "Blizzard client secret cannot be empty",
            ));
        }

        if config.blizzard.timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "blizzard.timeout_seconds",
                "request timeout must be at least one second",
            ));
        }

        if !config.blizzard.api_base_url.starts_with("http") {
            return Err(ConfigError::invalid(
                "blizzard.api_base_url",
                "API base URL must be an http(s) URL",
            ));
        }

        if !is_language_tag(&config.data.language) {
            return Err(ConfigError::invalid(
                "data.language",
                format!("'{}' is not a language tag", config.data.language),
            ));
        }

        Ok(())
    }
}

fn is_language_tag(value: &str) -> bool {
    !value.is_empty()
        && value
            .split('-')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.discord.token = "token".to_string();
        config.blizzard.client_id = "id".to_string();
        config.blizzard.client_secret = "secret".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(ConfigValidator::validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_guild_id_fails() {
        let mut config = valid_config();
        config.discord.guild_id = Some(0);
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "discord.guild_id"));
    }

    #[test]
    fn test_missing_blizzard_secret_fails() {
        let mut config = valid_config();
        config.blizzard.client_secret = "  ".to_string();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("blizzard.client_secret"));
    }

    #[test]
    fn test_zero_timeout_fails() {
        let mut config = valid_config();
        config.blizzard.timeout_seconds = 0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_language_tag_check() {
        assert!(is_language_tag("en-US"));
        assert!(is_language_tag("de"));
        assert!(!is_language_tag("en_US"));
        assert!(!is_language_tag("en-"));
    }
}
