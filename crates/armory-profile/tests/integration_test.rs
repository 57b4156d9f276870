//! Integration tests for armory-profile crate.
//!
//! These tests run the lookup pipeline end to end: gateway, snapshot
//! builder, comparator and renderer.

use armory_common::test_utils::{blizzard_fixtures, identity_fixtures, init_test_logging};
use armory_common::{CharacterIdentity, FetchPolicy};
use armory_config::BlizzardConfig;
use armory_i18n::Messages;
use armory_profile::{
    compare_snapshots, AchievementsSummary, BlizzardClient, CharacterMedia, CharacterProfile,
    GatewayError, MountCollection, ProfileGateway, PvpSummary, Renderer, Resource,
    SnapshotBuilder, SpecializationsSummary, GREATER_MARKER,
};
use async_trait::async_trait;
use httpmock::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory gateway keyed by lowercase character name.
#[derive(Default)]
struct FakeGateway {
    item_levels: HashMap<String, u32>,
    achievements: Vec<(&'static str, Option<i64>)>,
}

impl FakeGateway {
    fn with(mut self, name: &str, item_level: u32) -> Self {
        self.item_levels.insert(name.to_lowercase(), item_level);
        self
    }

    fn known(&self, identity: &CharacterIdentity) -> Result<u32, GatewayError> {
        self.item_levels
            .get(&identity.api_name())
            .copied()
            .ok_or_else(|| GatewayError::Status {
                status: 404,
                url: format!("fake://{}", identity.to_token()),
            })
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

#[async_trait]
impl ProfileGateway for FakeGateway {
    async fn profile(&self, identity: &CharacterIdentity) -> Result<CharacterProfile, GatewayError> {
        let item_level = self.known(identity)?;
        Ok(decode(blizzard_fixtures::profile(&identity.name, item_level, 12000)))
    }

    async fn media(&self, identity: &CharacterIdentity) -> Result<CharacterMedia, GatewayError> {
        self.known(identity)?;
        Ok(decode(blizzard_fixtures::media(&identity.name)))
    }

    async fn specializations(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<SpecializationsSummary, GatewayError> {
        self.known(identity)?;
        Ok(decode(blizzard_fixtures::specializations(Some("Frost"))))
    }

    async fn achievements(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<AchievementsSummary, GatewayError> {
        self.known(identity)?;
        Ok(decode(blizzard_fixtures::achievements(&self.achievements)))
    }

    async fn mounts(&self, identity: &CharacterIdentity) -> Result<MountCollection, GatewayError> {
        self.known(identity)?;
        Ok(decode(blizzard_fixtures::mounts(0)))
    }

    async fn pvp_summary(&self, identity: &CharacterIdentity) -> Result<PvpSummary, GatewayError> {
        self.known(identity)?;
        Ok(decode(blizzard_fixtures::pvp_summary(12, 345)))
    }
}

fn messages() -> &'static Messages {
    Messages::english().unwrap()
}

#[tokio::test]
async fn test_comparison_marks_higher_item_level() {
    init_test_logging();
    let gateway = FakeGateway::default().with("Thrall", 450).with("Jaina", 440);
    let builder = SnapshotBuilder::new(Arc::new(gateway), FetchPolicy::BestEffort);

    let thrall = identity_fixtures::thrall();
    let jaina = identity_fixtures::jaina();
    let (a, b) = tokio::try_join!(
        builder.build(&thrall),
        builder.build(&jaina),
    )
    .unwrap();

    let doc = Renderer::new(messages()).render_comparison(&a, &b, &compare_snapshots(&a, &b));
    let left = doc.fields[1].value.lines().next().unwrap();
    let right = doc.fields[2].value.lines().next().unwrap();
    assert!(left.contains(GREATER_MARKER));
    assert!(!right.contains(GREATER_MARKER));
}

#[tokio::test]
async fn test_comparison_aborts_when_second_profile_fails() {
    let gateway = FakeGateway::default().with("Thrall", 450);
    let builder = SnapshotBuilder::new(Arc::new(gateway), FetchPolicy::BestEffort);

    let thrall = identity_fixtures::thrall();
    let jaina = identity_fixtures::jaina();
    let result = tokio::try_join!(
        builder.build(&thrall),
        builder.build(&jaina),
    );

    let failure = result.unwrap_err();
    assert_eq!(failure.resource, Resource::Profile);
    assert_eq!(failure.identity, identity_fixtures::jaina());
    assert!(failure.is_not_found());
}

#[tokio::test]
async fn test_empty_achievements_render_none() {
    let gateway = FakeGateway::default().with("Thrall", 450);
    let builder = SnapshotBuilder::new(Arc::new(gateway), FetchPolicy::Strict);

    let snapshot = builder.build(&identity_fixtures::thrall()).await.unwrap();
    let doc = Renderer::new(messages()).render_single(&snapshot);

    assert_eq!(doc.field("Latest Achievement"), Some("None"));
    assert_eq!(doc.field("Gladiator"), Some("No Gladiator achievements"));
    assert_eq!(doc.field("Mounts"), Some("0 collected"));
}

#[tokio::test]
async fn test_gladiator_achievement_is_detected() {
    let gateway = FakeGateway {
        achievements: vec![
            ("Loremaster", None),
            ("Gladiator: Season 1", Some(blizzard_fixtures::COMPLETED_AT_MILLIS)),
        ],
        ..FakeGateway::default()
    }
    .with("Thrall", 450);
    let builder = SnapshotBuilder::new(Arc::new(gateway), FetchPolicy::BestEffort);

    let snapshot = builder.build(&identity_fixtures::thrall()).await.unwrap();
    let doc = Renderer::new(messages()).render_single(&snapshot);
    assert_eq!(doc.field("Gladiator"), Some("Gladiator: Season 1 (2024-01-01)"));

    let pvp = builder.build_pvp(&identity_fixtures::thrall()).await.unwrap();
    assert_eq!(pvp.gladiator_history.len(), 1);
}

#[tokio::test]
async fn test_lookup_over_http() {
    init_test_logging();
    let server = MockServer::start_async().await;
    let base = "/profile/wow/character/silver-hand/thrall";

    server
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200).json_body(blizzard_fixtures::oauth_token("token"));
        })
        .await;

    let routes: [(String, Value); 6] = [
        (base.to_string(), blizzard_fixtures::profile("Thrall", 450, 12000)),
        (format!("{base}/pvp-summary"), blizzard_fixtures::pvp_summary(42, 9001)),
        (format!("{base}/character-media"), blizzard_fixtures::media("Thrall")),
        (
            format!("{base}/specializations"),
            blizzard_fixtures::specializations(Some("Elemental")),
        ),
        (format!("{base}/collections/mounts"), blizzard_fixtures::mounts(5)),
        (
            format!("{base}/achievements"),
            blizzard_fixtures::achievements(&[("Explorer", Some(1))]),
        ),
    ];
    for (path, body) in routes {
        server
            .mock_async(|when, then| {
                when.method(GET).path(path.as_str()).query_param("namespace", "profile-eu");
                then.status(200).json_body(body);
            })
            .await;
    }

    let config = BlizzardConfig {
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
        api_base_url: server.base_url(),
        oauth_url: server.url("/token"),
        ..BlizzardConfig::default()
    };
    let client = BlizzardClient::from_config(&config).unwrap();
    let builder = SnapshotBuilder::new(Arc::new(client), FetchPolicy::Strict);

    let snapshot = builder.build(&identity_fixtures::thrall()).await.unwrap();
    assert!(!snapshot.has_unavailable());

    let doc = Renderer::new(messages()).render_single(&snapshot);
    assert_eq!(doc.field("Mounts"), Some("5 collected"));
    assert_eq!(doc.field("Latest Achievement"), Some("Explorer"));
    assert_eq!(doc.footer.as_deref(), Some("Silver Hand (eu)"));
}
