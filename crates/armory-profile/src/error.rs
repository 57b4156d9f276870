//! Error types for gateway calls and character lookups.

use crate::gateway::Resource;
use armory_common::CharacterIdentity;
use thiserror::Error;

/// A single gateway call failed.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport-level failure, including timeouts.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The body did not match the expected resource shape.
    #[error("malformed {resource} response: {source}")]
    Decode {
        /// Resource that was being decoded.
        resource: Resource,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// The OAuth token could not be obtained.
    #[error("OAuth token request failed: {0}")]
    Auth(String),

    /// The configured base URL cannot carry a resource path.
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

/// A character lookup failed because a required resource was unusable.
///
/// Network failures, unknown characters and malformed responses all end up
/// here; callers only ever show one fixed message for it.
#[derive(Debug, Error)]
#[error("failed to fetch {resource} for {identity}: {source}")]
pub struct LookupFailure {
    /// Resource whose call failed.
    pub resource: Resource,
    /// Character being looked up.
    pub identity: CharacterIdentity,
    /// Underlying gateway error.
    #[source]
    pub source: GatewayError,
}

impl LookupFailure {
    /// Wraps a gateway error with the resource and character it concerns.
    pub fn new(resource: Resource, identity: &CharacterIdentity, source: GatewayError) -> Self {
        Self {
            resource,
            identity: identity.clone(),
            source,
        }
    }

    /// Whether the API reported the character as missing.
    pub const fn is_not_found(&self) -> bool {
        matches!(self.source, GatewayError::Status { status: 404, .. })
    }
}
