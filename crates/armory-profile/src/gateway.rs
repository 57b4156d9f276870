//! The seam between the lookup pipeline and the Blizzard profile API.

use crate::error::GatewayError;
use crate::resources::{
    AchievementsSummary, CharacterMedia, CharacterProfile, MountCollection, PvpSummary,
    SpecializationsSummary,
};
use armory_common::CharacterIdentity;
use async_trait::async_trait;
use std::fmt;

/// Character resources exposed by the profile API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Profile summary.
    Profile,
    /// Render assets.
    Media,
    /// Specializations summary.
    Specializations,
    /// Achievements list.
    Achievements,
    /// Mount collection.
    Mounts,
    /// PvP summary.
    PvpSummary,
}

impl Resource {
    /// Path segments appended after `/profile/wow/character/{realm}/{name}`.
    pub const fn path_segments(self) -> &'static [&'static str] {
        match self {
            Self::Profile => &[],
            Self::Media => &["character-media"],
            Self::Specializations => &["specializations"],
            Self::Achievements => &["achievements"],
            Self::Mounts => &["collections", "mounts"],
            Self::PvpSummary => &["pvp-summary"],
        }
    }

    /// Short name used in logs and error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Media => "media",
            Self::Specializations => "specializations",
            Self::Achievements => "achievements",
            Self::Mounts => "mounts",
            Self::PvpSummary => "pvp summary",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fetches typed character resources.
///
/// Every method either returns a fully decoded record or a
/// [`GatewayError`]; implementations never hand back partially filled data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Profile summary.
    async fn profile(&self, identity: &CharacterIdentity)
        -> Result<CharacterProfile, GatewayError>;

    /// Render assets.
    async fn media(&self, identity: &CharacterIdentity) -> Result<CharacterMedia, GatewayError>;

    /// Specializations summary.
    async fn specializations(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<SpecializationsSummary, GatewayError>;

    /// Achievements list.
    async fn achievements(
        &self,
        identity: &CharacterIdentity,
    ) -> Result<AchievementsSummary, GatewayError>;

    /// Mount collection.
    async fn mounts(&self, identity: &CharacterIdentity)
        -> Result<MountCollection, GatewayError>;

    /// PvP summary.
    async fn pvp_summary(&self, identity: &CharacterIdentity)
        -> Result<PvpSummary, GatewayError>;
}
