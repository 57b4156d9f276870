//! Typed Blizzard profile API resources.
//!
//! Responses are decoded straight into these records at the gateway
//! boundary. Fields marked required here fail decoding when absent, so
//! downstream code never has to guess whether a value is present.

use serde::Deserialize;

/// A localized `{ "name": ... }` reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedRef {
    /// Localized display name.
    pub name: String,
}

/// Realm reference embedded in a profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RealmRef {
    /// Localized realm name.
    pub name: String,
    /// Realm slug.
    pub slug: String,
}

/// `/profile/wow/character/{realm}/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CharacterProfile {
    /// Character name with canonical casing.
    pub name: String,
    /// Character level.
    pub level: u32,
    /// Item level of equipped gear.
    pub equipped_item_level: u32,
    /// Achievement points.
    pub achievement_points: u32,
    /// Character class.
    pub character_class: NamedRef,
    /// Home realm.
    pub realm: RealmRef,
    /// Active specialization, when the profile carries one.
    #[serde(default)]
    pub active_spec: Option<NamedRef>,
}

/// A single media asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaAsset {
    /// Asset kind, e.g. `avatar` or `main-raw`.
    pub key: String,
    /// Asset URL.
    pub value: String,
}

/// `.../character-media`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CharacterMedia {
    /// Render assets.
    #[serde(default)]
    pub assets: Vec<MediaAsset>,
}

impl CharacterMedia {
    /// URL of the asset with the given key.
    pub fn asset(&self, key: &str) -> Option<&str> {
        self.assets
            .iter()
            .find(|asset| asset.key == key)
            .map(|asset| asset.value.as_str())
    }
}

/// `.../specializations`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SpecializationsSummary {
    /// Active specialization; absent for characters without one.
    #[serde(default)]
    pub active_specialization: Option<NamedRef>,
}

/// One entry of the achievements list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AchievementEntry {
    /// The achievement itself.
    pub achievement: NamedRef,
    /// Completion time in milliseconds since the epoch.
    #[serde(default)]
    pub completed_timestamp: Option<i64>,
}

/// `.../achievements`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AchievementsSummary {
    /// Achievements in API order.
    pub achievements: Vec<AchievementEntry>,
}

/// One entry of the mount collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MountEntry {
    /// The mount.
    pub mount: NamedRef,
}

/// `.../collections/mounts`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MountCollection {
    /// Collected mounts.
    pub mounts: Vec<MountEntry>,
}

/// `.../pvp-summary`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PvpSummary {
    /// Honor level.
    pub honor_level: u32,
    /// Lifetime honorable kills.
    pub honorable_kills: u64,
}
