//! Test utilities and shared test helpers for Armory Bot.
//!
//! This module provides logging initialization, identity fixtures and
//! canned Blizzard profile API payloads that can be used across all crates
//! in the workspace for unit and integration testing.

use crate::CharacterIdentity;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Identity fixtures.
pub mod identity_fixtures {
    use super::CharacterIdentity;

    /// An EU character on a realm whose name needs slugging.
    pub fn thrall() -> CharacterIdentity {
        CharacterIdentity::parse("Thrall", "Silver Hand", "eu").expect("valid fixture identity")
    }

    /// A US character on a single-word realm.
    pub fn jaina() -> CharacterIdentity {
        CharacterIdentity::parse("Jaina", "Proudmoore", "us").expect("valid fixture identity")
    }
}

/// Canned Blizzard profile API payloads.
pub mod blizzard_fixtures {
    use serde_json::{json, Value};

    /// Completion timestamp used for fixture achievements (2024-01-01 12:00 UTC).
    pub const COMPLETED_AT_MILLIS: i64 = 1_704_110_400_000;

    /// Character profile summary.
    pub fn profile(name: &str, item_level: u32, achievement_points: u32) -> Value {
        json!({
            "id": 1234,
            "name": name,
            "level": 80,
            "equipped_item_level": item_level,
            "average_item_level": item_level + 2,
            "achievement_points": achievement_points,
            "character_class": { "id": 7, "name": "Shaman" },
            "race": { "id": 2, "name": "Orc" },
            "faction": { "type": "HORDE", "name": "Horde" },
            "realm": { "id": 3391, "name": "Silver Hand", "slug": "silver-hand" },
            "active_spec": { "id": 262, "name": "Elemental" }
        })
    }

    /// PvP summary.
    pub fn pvp_summary(honor_level: u32, honorable_kills: u64) -> Value {
        json!({
            "honor_level": honor_level,
            "honorable_kills": honorable_kills,
            "pvp_map_statistics": []
        })
    }

    /// Mount collection with `count` entries.
    pub fn mounts(count: usize) -> Value {
        let mounts: Vec<Value> = (0..count)
            .map(|i| json!({ "mount": { "id": i, "name": format!("Mount {i}") } }))
            .collect();
        json!({ "mounts": mounts })
    }

    /// Achievement list from `(name, completed_timestamp)` pairs.
    pub fn achievements(entries: &[(&str, Option<i64>)]) -> Value {
        let achievements: Vec<Value> = entries
            .iter()
            .enumerate()
            .map(|(id, (name, completed))| {
                let mut entry = json!({
                    "id": id,
                    "achievement": { "id": id, "name": name }
                });
                if let Some(completed) = completed {
                    entry["completed_timestamp"] = json!(completed);
                }
                entry
            })
            .collect();
        json!({
            "total_quantity": entries.len(),
            "total_points": entries.len() * 10,
            "achievements": achievements
        })
    }

    /// Specializations summary; `None` omits the active specialization.
    pub fn specializations(active: Option<&str>) -> Value {
        match active {
            Some(name) => json!({
                "active_specialization": { "id": 262, "name": name },
                "specializations": []
            }),
            None => json!({ "specializations": [] }),
        }
    }

    /// Character media with avatar, inset and main-raw assets.
    pub fn media(name: &str) -> Value {
        let base = format!("https://render.worldofwarcraft.com/eu/character/{}", name.to_lowercase());
        json!({
            "assets": [
                { "key": "avatar", "value": format!("{base}-avatar.jpg") },
                { "key": "inset", "value": format!("{base}-inset.jpg") },
                { "key": "main-raw", "value": format!("{base}-main-raw.png") }
            ]
        })
    }

    /// OAuth client-credentials token response.
    pub fn oauth_token(access_token: &str) -> Value {
        json!({
            "access_token": access_token,
            "token_type": "bearer",
            "expires_in": 86399,
            "sub": "client-id"
        })
    }
}

/// Property-based testing strategies using proptest.
pub mod property_testing {
    use crate::Region;
    use proptest::prelude::*;

    /// Strategy for realm names made of capitalised words separated by spaces.
    pub fn realm_name_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(r"[A-Z][a-z]{2,9}", 1..4).prop_map(|words| words.join(" "))
    }

    /// Strategy for already-slugged realm names.
    pub fn realm_slug_strategy() -> impl Strategy<Value = String> {
        r"[a-z]{3,10}(-[a-z]{3,10}){0,2}".prop_map(|s| s.to_string())
    }

    /// Strategy for supported regions.
    pub fn region_strategy() -> impl Strategy<Value = Region> {
        prop::sample::select(Region::ALL.to_vec())
    }

    /// Strategy for character names.
    pub fn character_name_strategy() -> impl Strategy<Value = String> {
        r"[A-Z][a-z]{1,11}".prop_map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        // Should not panic when called multiple times
        init_test_logging();
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_identity_fixtures_are_slugged() {
        assert_eq!(identity_fixtures::thrall().realm_slug.as_str(), "silver-hand");
        assert_eq!(identity_fixtures::jaina().realm_slug.as_str(), "proudmoore");
    }

    #[test]
    fn test_achievement_fixture_omits_missing_timestamps() {
        let value = blizzard_fixtures::achievements(&[("A", None), ("B", Some(5))]);
        let entries = value["achievements"].as_array().unwrap();
        assert!(entries[0].get("completed_timestamp").is_none());
        assert_eq!(entries[1]["completed_timestamp"], 5);
    }
}
