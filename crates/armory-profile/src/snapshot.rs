//! Character snapshot assembly.
//!
//! A [`SnapshotBuilder`] issues every gateway call for one character
//! concurrently and folds the responses into a flat [`CharacterSnapshot`].
//! Assembly itself is a pure function of the responses.

use crate::error::{GatewayError, LookupFailure};
use crate::gateway::{ProfileGateway, Resource};
use crate::resources::{
    AchievementEntry, AchievementsSummary, CharacterMedia, CharacterProfile, MountCollection,
    PvpSummary, SpecializationsSummary,
};
use armory_common::{timestamp_from_millis, CharacterIdentity, FetchPolicy};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Substring that marks an achievement as a gladiator title.
const GLADIATOR_MARKER: &str = "gladiator";

/// A snapshot field that may be unavailable because its call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// The call succeeded.
    Value(T),
    /// The call failed under the best-effort policy.
    Unavailable,
}

impl<T> Field<T> {
    /// The value, if the call succeeded.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Unavailable => None,
        }
    }

    /// Whether the call failed.
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// Maps the contained value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Self::Value(value) => Field::Value(f(value)),
            Self::Unavailable => Field::Unavailable,
        }
    }

    /// Borrows the contained value.
    pub const fn as_ref(&self) -> Field<&T> {
        match self {
            Self::Value(value) => Field::Value(value),
            Self::Unavailable => Field::Unavailable,
        }
    }
}

/// A gladiator-type achievement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GladiatorAchievement {
    /// Achievement name.
    pub name: String,
    /// Completion time, when the API reports one.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Render URLs for a character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Portrait {
    /// Small avatar image.
    pub avatar_url: Option<String>,
    /// Full-body render.
    pub render_url: Option<String>,
}

/// Point-in-time aggregate of one character's stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSnapshot {
    /// Identity the snapshot was built for.
    pub identity: CharacterIdentity,
    /// Character name with canonical casing.
    pub name: String,
    /// Localized realm name.
    pub realm_name: String,
    /// Character level.
    pub level: u32,
    /// Class name.
    pub class_name: String,
    /// Equipped item level.
    pub item_level: u32,
    /// Achievement points.
    pub achievement_points: u32,
    /// Honor level.
    pub honor_level: u32,
    /// Lifetime honorable kills.
    pub honorable_kills: u64,
    /// Number of collected mounts.
    pub mount_count: Field<u64>,
    /// Active specialization; `None` when the character has none.
    pub active_spec: Field<Option<String>>,
    /// First gladiator achievement, if any.
    pub gladiator: Field<Option<GladiatorAchievement>>,
    /// Most recently completed achievement.
    pub latest_achievement: Field<Option<String>>,
    /// Render URLs.
    pub portrait: Field<Portrait>,
}

impl CharacterSnapshot {
    /// Whether any best-effort field degraded.
    pub const fn has_unavailable(&self) -> bool {
        self.mount_count.is_unavailable()
            || self.active_spec.is_unavailable()
            || self.gladiator.is_unavailable()
            || self.latest_achievement.is_unavailable()
            || self.portrait.is_unavailable()
    }
}

/// PvP-focused snapshot for the follow-up view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PvpSnapshot {
    /// Identity the snapshot was built for.
    pub identity: CharacterIdentity,
    /// Character name with canonical casing.
    pub name: String,
    /// Localized realm name.
    pub realm_name: String,
    /// Honor level.
    pub honor_level: u32,
    /// Lifetime honorable kills.
    pub honorable_kills: u64,
    /// Every gladiator achievement, oldest first; undated entries last.
    pub gladiator_history: Vec<GladiatorAchievement>,
}

/// Raw gateway responses for one character.
#[derive(Debug, Clone)]
pub struct CharacterResponses {
    /// Profile summary.
    pub profile: CharacterProfile,
    /// PvP summary.
    pub pvp: PvpSummary,
    /// Render assets.
    pub media: Field<CharacterMedia>,
    /// Specializations summary.
    pub specializations: Field<SpecializationsSummary>,
    /// Mount collection.
    pub mounts: Field<MountCollection>,
    /// Achievements list.
    pub achievements: Field<AchievementsSummary>,
}

impl CharacterSnapshot {
    /// Assembles a snapshot from gateway responses.
    pub fn assemble(identity: &CharacterIdentity, responses: CharacterResponses) -> Self {
        let CharacterResponses {
            profile,
            pvp,
            media,
            specializations,
            mounts,
            achievements,
        } = responses;

        let profile_spec = profile.active_spec.map(|spec| spec.name);
        let active_spec = match specializations {
            Field::Value(summary) => Field::Value(
                summary
                    .active_specialization
                    .map(|spec| spec.name)
                    .or(profile_spec),
            ),
            Field::Unavailable if profile_spec.is_some() => Field::Value(profile_spec),
            Field::Unavailable => Field::Unavailable,
        };

        let achievements = achievements.map(|summary| summary.achievements);

        Self {
            identity: identity.clone(),
            name: profile.name,
            realm_name: profile.realm.name,
            level: profile.level,
            class_name: profile.character_class.name,
            item_level: profile.equipped_item_level,
            achievement_points: profile.achievement_points,
            honor_level: pvp.honor_level,
            honorable_kills: pvp.honorable_kills,
            mount_count: mounts.map(|collection| collection.mounts.len() as u64),
            active_spec,
            gladiator: achievements.as_ref().map(|entries| find_gladiator(entries)),
            latest_achievement: achievements.as_ref().map(|entries| latest_achievement(entries)),
            portrait: media.map(|media| Portrait {
                avatar_url: media.asset("avatar").map(str::to_string),
                render_url: media.asset("main-raw").map(str::to_string),
            }),
        }
    }
}

impl PvpSnapshot {
    /// Assembles a PvP snapshot from gateway responses.
    pub fn assemble(
        identity: &CharacterIdentity,
        profile: CharacterProfile,
        pvp: PvpSummary,
        achievements: &AchievementsSummary,
    ) -> Self {
        let mut gladiator_history: Vec<GladiatorAchievement> = achievements
            .achievements
            .iter()
            .filter(|entry| is_gladiator(entry))
            .map(to_gladiator)
            .collect();
        gladiator_history.sort_by_key(|g| (g.completed_at.is_none(), g.completed_at));

        Self {
            identity: identity.clone(),
            name: profile.name,
            realm_name: profile.realm.name,
            honor_level: pvp.honor_level,
            honorable_kills: pvp.honorable_kills,
            gladiator_history,
        }
    }
}

fn is_gladiator(entry: &AchievementEntry) -> bool {
    entry
        .achievement
        .name
        .to_lowercase()
        .contains(GLADIATOR_MARKER)
}

fn to_gladiator(entry: &AchievementEntry) -> GladiatorAchievement {
    GladiatorAchievement {
        name: entry.achievement.name.clone(),
        completed_at: entry.completed_timestamp.and_then(timestamp_from_millis),
    }
}

/// First achievement whose name contains "gladiator", case-insensitively.
pub fn find_gladiator(entries: &[AchievementEntry]) -> Option<GladiatorAchievement> {
    entries.iter().find(|entry| is_gladiator(entry)).map(to_gladiator)
}

/// Name of the most recently listed achievement.
///
/// The API lists the newest entry first, so completion timestamps are ignored.
pub fn latest_achievement(entries: &[AchievementEntry]) -> Option<String> {
    entries.first().map(|entry| entry.achievement.name.clone())
}

async fn required<T>(
    resource: Resource,
    identity: &CharacterIdentity,
    call: impl Future<Output = Result<T, GatewayError>> + Send,
) -> Result<T, LookupFailure> {
    call.await
        .map_err(|source| LookupFailure::new(resource, identity, source))
}

fn degrade<T>(
    resource: Resource,
    identity: &CharacterIdentity,
    result: Result<T, GatewayError>,
) -> Field<T> {
    match result {
        Ok(value) => Field::Value(value),
        Err(e) => {
            warn!("{} unavailable for {}: {}", resource, identity, e);
            Field::Unavailable
        }
    }
}

/// Builds snapshots through a [`ProfileGateway`].
#[derive(Clone)]
pub struct SnapshotBuilder {
    gateway: Arc<dyn ProfileGateway>,
    policy: FetchPolicy,
}

impl std::fmt::Debug for SnapshotBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotBuilder")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SnapshotBuilder {
    /// Creates a builder over a gateway.
    pub fn new(gateway: Arc<dyn ProfileGateway>, policy: FetchPolicy) -> Self {
        Self { gateway, policy }
    }

    /// Fetches every resource for a character and assembles a snapshot.
    pub async fn build(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<CharacterSnapshot, LookupFailure> {
        debug!("Building snapshot for {} ({:?})", identity, self.policy);

        let responses = match self.policy {
            FetchPolicy::Strict => self.fetch_strict(identity).await?,
            FetchPolicy::BestEffort => self.fetch_best_effort(identity).await?,
        };

        Ok(CharacterSnapshot::assemble(identity, responses))
    }

    /// Fetches profile, PvP summary and achievements for the PvP view.
    pub async fn build_pvp(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<PvpSnapshot, LookupFailure> {
        debug!("Building PvP snapshot for {}", identity);
        let gateway = self.gateway.as_ref();

        let (profile, pvp, achievements) = tokio::try_join!(
            required(Resource::Profile, identity, gateway.profile(identity)),
            required(Resource::PvpSummary, identity, gateway.pvp_summary(identity)),
            required(Resource::Achievements, identity, gateway.achievements(identity)),
        )?;

        Ok(PvpSnapshot::assemble(identity, profile, pvp, &achievements))
    }

    async fn fetch_strict(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<CharacterResponses, LookupFailure> {
        let gateway = self.gateway.as_ref();

        let (profile, pvp, media, specializations, mounts, achievements) = tokio::try_join!(
            required(Resource::Profile, identity, gateway.profile(identity)),
            required(Resource::PvpSummary, identity, gateway.pvp_summary(identity)),
            required(Resource::Media, identity, gateway.media(identity)),
            required(Resource::Specializations, identity, gateway.specializations(identity)),
            required(Resource::Mounts, identity, gateway.mounts(identity)),
            required(Resource::Achievements, identity, gateway.achievements(identity)),
        )?;

        Ok(CharacterResponses {
            profile,
            pvp,
            media: Field::Value(media),
            specializations: Field::Value(specializations),
            mounts: Field::Value(mounts),
            achievements: Field::Value(achievements),
        })
    }

    async fn fetch_best_effort(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<CharacterResponses, LookupFailure> {
        let gateway = self.gateway.as_ref();

        let (profile, pvp, media, specializations, mounts, achievements) = tokio::join!(
            gateway.profile(identity),
            gateway.pvp_summary(identity),
            gateway.media(identity),
            gateway.specializations(identity),
            gateway.mounts(identity),
            gateway.achievements(identity),
        );

        Ok(CharacterResponses {
            profile: profile.map_err(|e| LookupFailure::new(Resource::Profile, identity, e))?,
            pvp: pvp.map_err(|e| LookupFailure::new(Resource::PvpSummary, identity, e))?,
            media: degrade(Resource::Media, identity, media),
            specializations: degrade(Resource::Specializations, identity, specializations),
            mounts: degrade(Resource::Mounts, identity, mounts),
            achievements: degrade(Resource::Achievements, identity, achievements),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockProfileGateway;
    use armory_common::test_utils::{blizzard_fixtures, identity_fixtures, init_test_logging};
    use serde::de::DeserializeOwned;
    use serde_json::Value;

    fn decode<T: DeserializeOwned>(value: Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    fn unavailable() -> GatewayError {
        GatewayError::Status {
            status: 503,
            url: "https://eu.api.blizzard.com".to_string(),
        }
    }

    fn complete_gateway(achievements: &'static [(&'static str, Option<i64>)]) -> MockProfileGateway {
        let mut gateway = MockProfileGateway::new();
        gateway
            .expect_profile()
            .returning(|_| Ok(decode(blizzard_fixtures::profile("Thrall", 450, 12000))));
        gateway
            .expect_pvp_summary()
            .returning(|_| Ok(decode(blizzard_fixtures::pvp_summary(42, 9001))));
        gateway
            .expect_media()
            .returning(|_| Ok(decode(blizzard_fixtures::media("Thrall"))));
        gateway
            .expect_specializations()
            .returning(|_| Ok(decode(blizzard_fixtures::specializations(Some("Enhancement")))));
        gateway
            .expect_mounts()
            .returning(|_| Ok(decode(blizzard_fixtures::mounts(3))));
        gateway
            .expect_achievements()
            .returning(move |_| Ok(decode(blizzard_fixtures::achievements(achievements))));
        gateway
    }

    const SEASON_ONE: &[(&str, Option<i64>)] = &[
        ("Loremaster", Some(blizzard_fixtures::COMPLETED_AT_MILLIS - 1_000)),
        ("Gladiator: Season 1", Some(blizzard_fixtures::COMPLETED_AT_MILLIS)),
        ("Exalted", None),
    ];

    fn builder(gateway: MockProfileGateway, policy: FetchPolicy) -> SnapshotBuilder {
        SnapshotBuilder::new(Arc::new(gateway), policy)
    }

    #[tokio::test]
    async fn test_complete_responses_populate_every_field() {
        init_test_logging();
        let snapshot = builder(complete_gateway(SEASON_ONE), FetchPolicy::BestEffort)
            .build(&identity_fixtures::thrall())
            .await
            .unwrap();

        assert!(!snapshot.has_unavailable());
        assert_eq!(snapshot.item_level, 450);
        assert_eq!(snapshot.honor_level, 42);
        assert_eq!(snapshot.honorable_kills, 9001);
        assert_eq!(snapshot.mount_count, Field::Value(3));
        assert_eq!(snapshot.active_spec, Field::Value(Some("Enhancement".to_string())));
        assert_eq!(
            snapshot.latest_achievement,
            Field::Value(Some("Loremaster".to_string()))
        );

        let gladiator = snapshot.gladiator.value().unwrap().as_ref().unwrap();
        assert_eq!(gladiator.name, "Gladiator: Season 1");
        assert_eq!(
            gladiator.completed_at,
            timestamp_from_millis(blizzard_fixtures::COMPLETED_AT_MILLIS)
        );
    }

    #[tokio::test]
    async fn test_identical_responses_yield_identical_snapshots() {
        let builder = builder(complete_gateway(SEASON_ONE), FetchPolicy::BestEffort);
        let identity = identity_fixtures::thrall();
        let first = builder.build(&identity).await.unwrap();
        let second = builder.build(&identity).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_best_effort_degrades_optional_fields() {
        init_test_logging();
        let mut gateway = MockProfileGateway::new();
        gateway
            .expect_profile()
            .returning(|_| Ok(decode(blizzard_fixtures::profile("Thrall", 450, 12000))));
        gateway
            .expect_pvp_summary()
            .returning(|_| Ok(decode(blizzard_fixtures::pvp_summary(42, 9001))));
        gateway.expect_media().returning(|_| Err(unavailable()));
        gateway.expect_specializations().returning(|_| Err(unavailable()));
        gateway.expect_mounts().returning(|_| Err(unavailable()));
        gateway.expect_achievements().returning(|_| Err(unavailable()));

        let snapshot = builder(gateway, FetchPolicy::BestEffort)
            .build(&identity_fixtures::thrall())
            .await
            .unwrap();

        assert!(snapshot.has_unavailable());
        assert!(snapshot.mount_count.is_unavailable());
        assert!(snapshot.gladiator.is_unavailable());
        assert!(snapshot.portrait.is_unavailable());
        // The profile still names a spec.
        assert_eq!(snapshot.active_spec, Field::Value(Some("Elemental".to_string())));
    }

    #[tokio::test]
    async fn test_strict_fails_on_optional_resource() {
        let mut gateway = MockProfileGateway::new();
        gateway
            .expect_profile()
            .returning(|_| Ok(decode(blizzard_fixtures::profile("Thrall", 450, 12000))));
        gateway
            .expect_pvp_summary()
            .returning(|_| Ok(decode(blizzard_fixtures::pvp_summary(42, 9001))));
        gateway
            .expect_media()
            .returning(|_| Ok(decode(blizzard_fixtures::media("Thrall"))));
        gateway
            .expect_specializations()
            .returning(|_| Ok(decode(blizzard_fixtures::specializations(None))));
        gateway.expect_mounts().returning(|_| Err(unavailable()));
        gateway
            .expect_achievements()
            .returning(|_| Ok(decode(blizzard_fixtures::achievements(&[]))));

        let failure = builder(gateway, FetchPolicy::Strict)
            .build(&identity_fixtures::thrall())
            .await
            .unwrap_err();
        assert_eq!(failure.resource, Resource::Mounts);
    }

    #[tokio::test]
    async fn test_required_profile_failure_fails_build() {
        let mut gateway = MockProfileGateway::new();
        gateway.expect_profile().returning(|_| {
            Err(GatewayError::Status {
                status: 404,
                url: "https://eu.api.blizzard.com".to_string(),
            })
        });
        gateway
            .expect_pvp_summary()
            .returning(|_| Ok(decode(blizzard_fixtures::pvp_summary(1, 0))));
        gateway.expect_media().returning(|_| Err(unavailable()));
        gateway.expect_specializations().returning(|_| Err(unavailable()));
        gateway.expect_mounts().returning(|_| Err(unavailable()));
        gateway.expect_achievements().returning(|_| Err(unavailable()));

        let failure = builder(gateway, FetchPolicy::BestEffort)
            .build(&identity_fixtures::thrall())
            .await
            .unwrap_err();
        assert_eq!(failure.resource, Resource::Profile);
        assert!(failure.is_not_found());
    }

    #[tokio::test]
    async fn test_build_pvp_collects_gladiator_history() {
        let achievements: &'static [(&'static str, Option<i64>)] = &[
            ("Gladiator: Season 2", Some(blizzard_fixtures::COMPLETED_AT_MILLIS)),
            ("Loremaster", None),
            ("Gladiator: Season 1", Some(blizzard_fixtures::COMPLETED_AT_MILLIS - 5_000)),
        ];
        let pvp = builder(complete_gateway(achievements), FetchPolicy::Strict)
            .build_pvp(&identity_fixtures::thrall())
            .await
            .unwrap();

        let names: Vec<&str> = pvp.gladiator_history.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Gladiator: Season 1", "Gladiator: Season 2"]);
        assert_eq!(pvp.honor_level, 42);
    }

    #[test]
    fn test_latest_achievement_rules() {
        let undated: AchievementsSummary =
            decode(blizzard_fixtures::achievements(&[("First", None), ("Second", None)]));
        assert_eq!(latest_achievement(&undated.achievements).as_deref(), Some("First"));

        let dated: AchievementsSummary = decode(blizzard_fixtures::achievements(&[
            ("First Listed", Some(1_000)),
            ("Second Listed", Some(2_000)),
        ]));
        assert_eq!(
            latest_achievement(&dated.achievements).as_deref(),
            Some("First Listed")
        );

        assert_eq!(latest_achievement(&[]), None);
    }

    #[test]
    fn test_gladiator_match_is_case_insensitive() {
        let summary: AchievementsSummary =
            decode(blizzard_fixtures::achievements(&[("Elite GLADIATOR", None)]));
        assert!(find_gladiator(&summary.achievements).is_some());

        let none: AchievementsSummary =
            decode(blizzard_fixtures::achievements(&[("Explorer", None)]));
        assert!(find_gladiator(&none.achievements).is_none());
    }
}
