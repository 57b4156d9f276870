//! Integration tests for armory-commands crate.
//!
//! These tests drive the command pipeline against an in-memory gateway and
//! check the outcomes the commands would send.

use armory_commands::{
    commands, compare_outcome, lookup_outcome, menu_custom_id, pvp_outcome, CharacterArgs, Data,
    Outcome,
};
use armory_common::test_utils::{blizzard_fixtures, identity_fixtures, init_test_logging};
use armory_common::CharacterIdentity;
use armory_config::Config;
use armory_profile::{
    AchievementsSummary, CharacterMedia, CharacterProfile, GatewayError, MountCollection,
    ProfileGateway, PvpSummary, SpecializationsSummary,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

const LOOKUP_FAILED: &str = "Failed to fetch character info. Please check name/realm/region.";
const COMPARE_FAILED: &str = "❌ Failed to fetch one or both characters. Please check the input.";

/// Knows exactly one character: Thrall of Silver Hand (EU).
struct ThrallOnly;

fn decode<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

fn known(identity: &CharacterIdentity) -> Result<(), GatewayError> {
    if identity.api_name() == "thrall" {
        Ok(())
    } else {
        Err(GatewayError::Status {
            status: 404,
            url: identity.to_token(),
        })
    }
}

#[async_trait]
impl ProfileGateway for ThrallOnly {
    async fn profile(&self, identity: &CharacterIdentity) -> Result<CharacterProfile, GatewayError> {
        known(identity)?;
        Ok(decode(blizzard_fixtures::profile("Thrall", 450, 12000)))
    }

    async fn media(&self, identity: &CharacterIdentity) -> Result<CharacterMedia, GatewayError> {
        known(identity)?;
        Ok(decode(blizzard_fixtures::media("Thrall")))
    }

    async fn specializations(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<SpecializationsSummary, GatewayError> {
        known(identity)?;
        Ok(decode(blizzard_fixtures::specializations(Some("Elemental"))))
    }

    async fn achievements(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<AchievementsSummary, GatewayError> {
        known(identity)?;
        Ok(decode(blizzard_fixtures::achievements(&[(
            "Gladiator: Season 1",
            Some(blizzard_fixtures::COMPLETED_AT_MILLIS),
        )])))
    }

    async fn mounts(&self, identity: &CharacterIdentity) -> Result<MountCollection, GatewayError> {
        known(identity)?;
        Ok(decode(blizzard_fixtures::mounts(12)))
    }

    async fn pvp_summary(&self, identity: &CharacterIdentity) -> Result<PvpSummary, GatewayError> {
        known(identity)?;
        Ok(decode(blizzard_fixtures::pvp_summary(42, 9001)))
    }
}

fn data() -> Data {
    Data::new(Arc::new(Config::default()), Arc::new(ThrallOnly)).unwrap()
}

const THRALL: CharacterArgs<'static> = CharacterArgs {
    name: "Thrall",
    realm: "Silver Hand",
    region: "eu",
};

#[test]
fn test_command_table() {
    let names: Vec<String> = commands().into_iter().map(|command| command.name).collect();
    assert_eq!(names, ["character-lookup", "character-compare"]);
}

#[tokio::test]
async fn test_lookup_renders_single_view_with_identity() {
    init_test_logging();
    let data = data();

    let Outcome::Document(document) = lookup_outcome(&data, "Thrall", "Silver Hand", "EU").await
    else {
        panic!("lookup should succeed");
    };

    assert_eq!(document.identity, Some(identity_fixtures::thrall()));
    assert_eq!(document.field("Item Level"), Some("450"));
    assert_eq!(document.field("Mounts"), Some("12 collected"));
}

#[tokio::test]
async fn test_lookup_failures_use_fixed_message() {
    let data = data();

    let unknown = lookup_outcome(&data, "Jaina", "Proudmoore", "us").await;
    assert_eq!(unknown, Outcome::Failure(LOOKUP_FAILED.to_string()));

    let bad_region = lookup_outcome(&data, "Thrall", "Silver Hand", "mars").await;
    assert_eq!(bad_region, Outcome::Failure(LOOKUP_FAILED.to_string()));
}

#[tokio::test]
async fn test_compare_aborts_when_one_character_fails() {
    let data = data();
    let jaina = CharacterArgs {
        name: "Jaina",
        realm: "Proudmoore",
        region: "us",
    };

    let outcome = compare_outcome(&data, THRALL, jaina).await;
    assert_eq!(outcome, Outcome::Failure(COMPARE_FAILED.to_string()));
}

#[tokio::test]
async fn test_compare_of_equal_characters_has_no_markers() {
    let data = data();

    let Outcome::Document(document) = compare_outcome(&data, THRALL, THRALL).await else {
        panic!("comparison should succeed");
    };

    assert_eq!(document.identity, None);
    assert_eq!(document.fields[1].value, "450\n12000");
    assert_eq!(document.fields[2].value, "450\n12000");
}

#[tokio::test]
async fn test_pvp_menu_round_trip() {
    let data = data();
    let custom_id = menu_custom_id(&identity_fixtures::thrall()).unwrap();

    let Outcome::Document(document) = pvp_outcome(&data, &custom_id).await else {
        panic!("PvP details should succeed");
    };

    assert_eq!(document.title.as_deref(), Some("Thrall - PvP"));
    assert_eq!(
        document.field("Gladiator Achievements"),
        Some("Gladiator: Season 1 (2024-01-01)")
    );
}

#[tokio::test]
async fn test_pvp_footer_matches_the_lookup_it_follows() {
    let data = data();

    let Outcome::Document(lookup) = lookup_outcome(&data, "Thrall", "Silver Hand", "eu").await
    else {
        panic!("lookup should succeed");
    };
    let identity = lookup.identity.clone().unwrap();
    let custom_id = menu_custom_id(&identity).unwrap();

    let Outcome::Document(pvp) = pvp_outcome(&data, &custom_id).await else {
        panic!("PvP details should succeed");
    };

    assert_eq!(lookup.footer.as_deref(), Some("Silver Hand (eu)"));
    assert_eq!(pvp.footer, lookup.footer);
}

#[tokio::test]
async fn test_pvp_menu_with_bad_token_fails_cleanly() {
    let data = data();
    let outcome = pvp_outcome(&data, "pvp:nowhere").await;
    assert!(matches!(outcome, Outcome::Failure(_)));
}
