//! Common type definitions and newtype wrappers for domain modeling.

use crate::error::{ArmoryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Battle.net region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Americas and Oceania.
    Us,
    /// Europe.
    Eu,
    /// Korea.
    Kr,
    /// Taiwan.
    Tw,
    /// China.
    Cn,
}

impl Region {
    /// All supported regions.
    pub const ALL: [Self; 5] = [Self::Us, Self::Eu, Self::Kr, Self::Tw, Self::Cn];

    /// Lowercase region code as used by the Blizzard API.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Eu => "eu",
            Self::Kr => "kr",
            Self::Tw => "tw",
            Self::Cn => "cn",
        }
    }

    /// Profile namespace for this region, e.g. `profile-eu`.
    pub fn profile_namespace(self) -> String {
        format!("profile-{}", self.as_str())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ArmoryError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == code)
            .ok_or_else(|| {
                ArmoryError::invalid_input("region", format!("unknown region '{}'", s.trim()))
            })
    }
}

/// A normalized realm slug, e.g. `silver-hand`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RealmSlug(String);

impl RealmSlug {
    /// Normalizes a realm name into a slug.
    ///
    /// The name is trimmed and lowercased, apostrophes are dropped and
    /// spaces become hyphens. An already-slugged realm is returned unchanged.
    pub fn from_realm(realm: &str) -> Self {
        let slug = realm
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| *c != '\'')
            .map(|c| if c == ' ' { '-' } else { c })
            .collect();
        Self(slug)
    }

    /// The slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RealmSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const TOKEN_SEPARATOR: char = ':';

/// The (region, realm, name) triple that identifies one character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterIdentity {
    /// Character name as typed by the user.
    pub name: String,
    /// Realm name as typed by the user.
    pub realm: String,
    /// Normalized realm slug used for API calls.
    pub realm_slug: RealmSlug,
    /// Region the character lives in.
    pub region: Region,
}

impl CharacterIdentity {
    /// Builds an identity from raw command arguments.
    pub fn parse(name: &str, realm: &str, region: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ArmoryError::invalid_input("name", "character name is empty"));
        }

        let realm = realm.trim();
        let realm_slug = RealmSlug::from_realm(realm);
        if realm_slug.as_str().is_empty() {
            return Err(ArmoryError::invalid_input("realm", "realm is empty"));
        }
        if realm_slug.as_str().contains(TOKEN_SEPARATOR) {
            return Err(ArmoryError::invalid_input(
                "realm",
                format!("realm '{realm}' contains '{TOKEN_SEPARATOR}'"),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            realm: realm.to_string(),
            realm_slug,
            region: region.parse()?,
        })
    }

    /// Character name in the lowercase form the profile API expects.
    pub fn api_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Encodes the identity as an opaque `region:realm-slug:name` token.
    ///
    /// Neither region nor slug can contain the separator, so a name holding
    /// one still decodes intact.
    pub fn to_token(&self) -> String {
        format!(
            "{}{TOKEN_SEPARATOR}{}{TOKEN_SEPARATOR}{}",
            self.region,
            self.realm_slug,
            self.api_name()
        )
    }

    /// Decodes a token produced by [`CharacterIdentity::to_token`].
    pub fn from_token(token: &str) -> Result<Self> {
        let mut parts = token.splitn(3, TOKEN_SEPARATOR);
        let (Some(region), Some(realm), Some(name)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ArmoryError::invalid_input(
                "token",
                format!("malformed identity token '{token}'"),
            ));
        };
        Self::parse(name, realm, region)
    }
}

impl fmt::Display for CharacterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({})", self.name, self.realm_slug, self.region)
    }
}

/// How the snapshot builder treats failures of optional resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPolicy {
    /// Any failed call fails the whole lookup.
    Strict,
    /// Optional resources degrade to an unavailable marker.
    #[default]
    BestEffort,
}

impl FromStr for FetchPolicy {
    type Err = ArmoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "strict" => Ok(Self::Strict),
            "best_effort" => Ok(Self::BestEffort),
            other => Err(ArmoryError::invalid_input(
                "fetch policy",
                format!("expected 'strict' or 'best_effort', got '{other}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_parse_is_case_insensitive() {
        assert_eq!("EU".parse::<Region>().unwrap(), Region::Eu);
        assert_eq!(" us ".parse::<Region>().unwrap(), Region::Us);
        assert!("xx".parse::<Region>().is_err());
    }

    #[test]
    fn test_realm_slug_normalization() {
        assert_eq!(RealmSlug::from_realm("Silver Hand").as_str(), "silver-hand");
        assert_eq!(RealmSlug::from_realm("silver-hand").as_str(), "silver-hand");
        assert_eq!(RealmSlug::from_realm("Kel'Thuzad").as_str(), "kelthuzad");
    }

    #[test]
    fn test_identity_parse_rejects_empty_name() {
        let err = CharacterIdentity::parse("  ", "Silver Hand", "eu").unwrap_err();
        assert!(err.is_user_error());
    }

    #[test]
    fn test_identity_token_round_trip() {
        let identity = CharacterIdentity::parse("Thrall", "Silver Hand", "EU").unwrap();
        let token = identity.to_token();
        assert_eq!(token, "eu:silver-hand:thrall");

        let decoded = CharacterIdentity::from_token(&token).unwrap();
        assert_eq!(decoded.region, Region::Eu);
        assert_eq!(decoded.realm_slug, identity.realm_slug);
        assert_eq!(decoded.api_name(), "thrall");
    }

    #[test]
    fn test_separator_in_realm_is_rejected() {
        let err = CharacterIdentity::parse("name", "a:b", "eu").unwrap_err();
        assert!(err.is_user_error());

        let identity = CharacterIdentity::parse("odd:name", "Silver Hand", "eu").unwrap();
        let decoded = CharacterIdentity::from_token(&identity.to_token()).unwrap();
        assert_eq!(decoded.realm_slug.as_str(), "silver-hand");
        assert_eq!(decoded.api_name(), "odd:name");
    }

    #[test]
    fn test_identity_token_rejects_garbage() {
        assert!(CharacterIdentity::from_token("not-a-token").is_err());
        assert!(CharacterIdentity::from_token("zz:realm:name").is_err());
    }

    #[test]
    fn test_fetch_policy_parse() {
        assert_eq!("strict".parse::<FetchPolicy>().unwrap(), FetchPolicy::Strict);
        assert_eq!(
            "best-effort".parse::<FetchPolicy>().unwrap(),
            FetchPolicy::BestEffort
        );
        assert!("sometimes".parse::<FetchPolicy>().is_err());
    }
}
