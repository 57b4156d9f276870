//! Blizzard profile API client.

use crate::error::GatewayError;
use crate::gateway::{ProfileGateway, Resource};
use crate::resources::{
    AchievementsSummary, CharacterMedia, CharacterProfile, MountCollection, PvpSummary,
    SpecializationsSummary,
};
use armory_common::CharacterIdentity;
use armory_config::BlizzardConfig;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// Tokens are refreshed this long before the server-side expiry.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// HTTP client for the Blizzard profile API.
///
/// Holds one pooled `reqwest` client and a client-credentials token that is
/// fetched lazily and reused until shortly before it expires.
pub struct BlizzardClient {
    http: reqwest::Client,
    config: BlizzardConfig,
    oauth_url: Url,
    token: RwLock<Option<AccessToken>>,
}

impl std::fmt::Debug for BlizzardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlizzardClient")
            .field("api_base_url", &self.config.api_base_url)
            .field("oauth_url", &self.oauth_url.as_str())
            .field("locale", &self.config.locale)
            .finish_non_exhaustive()
    }
}

impl BlizzardClient {
    /// Creates a client from the Blizzard section of the configuration.
    pub fn from_config(config: &BlizzardConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
            oauth_url: Url::parse(&config.oauth_url)?,
            token: RwLock::new(None),
        })
    }

    /// Builds the URL of a character resource, including namespace and locale.
    pub fn resource_url(
        &self,
        identity: &CharacterIdentity,
        resource: Resource,
    ) -> Result<Url, GatewayError> {
        let base = self.config.api_base_for(identity.region.as_str());
        let mut url = Url::parse(&base)?;
        let name = identity.api_name();

        url.path_segments_mut()
            .map_err(|()| GatewayError::InvalidUrl(base.clone()))?
            .pop_if_empty()
            .extend(["profile", "wow", "character", identity.realm_slug.as_str(), name.as_str()])
            .extend(resource.path_segments());

        url.query_pairs_mut()
            .append_pair("namespace", &identity.region.profile_namespace())
            .append_pair("locale", &self.config.locale);

        Ok(url)
    }

    async fn access_token(&self) -> Result<String, GatewayError> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_fresh() {
                return Ok(token.value.clone());
            }
        }

        let mut slot = self.token.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(token) = slot.as_ref() {
            if token.is_fresh() {
                return Ok(token.value.clone());
            }
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *slot = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<AccessToken, GatewayError> {
        debug!("Requesting OAuth token from {}", self.oauth_url);

        let response = self
            .http
            .post(self.oauth_url.clone())
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Auth(format!(
                "token endpoint returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Auth(e.to_string()))?;

        info!("Obtained OAuth token valid for {}s", body.expires_in);
        let lifetime = Duration::from_secs(body.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN);
        Ok(AccessToken {
            value: body.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        identity: &CharacterIdentity,
        resource: Resource,
    ) -> Result<T, GatewayError> {
        let url = self.resource_url(identity, resource)?;
        let token = self.access_token().await?;

        debug!("Fetching {} for {}", resource, identity);
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| GatewayError::Decode { resource, source })
    }
}

#[async_trait]
impl ProfileGateway for BlizzardClient {
    async fn profile(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<CharacterProfile, GatewayError> {
        self.fetch(identity, Resource::Profile).await
    }

    async fn media(&self, identity: &CharacterIdentity) -> Result<CharacterMedia, GatewayError> {
        self.fetch(identity, Resource::Media).await
    }

    async fn specializations(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<SpecializationsSummary, GatewayError> {
        self.fetch(identity, Resource::Specializations).await
    }

    async fn achievements(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<AchievementsSummary, GatewayError> {
        self.fetch(identity, Resource::Achievements).await
    }

    async fn mounts(&self, identity: &CharacterIdentity) -> Result<MountCollection, GatewayError> {
        self.fetch(identity, Resource::Mounts).await
    }

    async fn pvp_summary(&self, identity: &CharacterIdentity) -> Result<PvpSummary, GatewayError> {
        self.fetch(identity, Resource::PvpSummary).await
    }
}
