//! Default configuration values.

use crate::schema::*;

/// Default Blizzard API base URL template.
pub const DEFAULT_API_BASE_URL: &str = "https://{region}.api.blizzard.com";

/// Default Blizzard OAuth token endpoint.
pub const DEFAULT_OAUTH_URL: &str = "https://oauth.battle.net/token";

/// Default locale for localized API fields.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Default language for bot replies.
pub const DEFAULT_LANGUAGE: &str = "en-US";

impl Default for BlizzardConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            locale: DEFAULT_LOCALE.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            oauth_url: DEFAULT_OAUTH_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            directory: None,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}
