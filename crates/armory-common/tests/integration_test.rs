//! Integration tests for armory-common crate.

use chrono::{TimeZone, Utc};
use armory_common::{
    format_date, truncate_string, ArmoryError, CharacterIdentity, FetchPolicy, RealmSlug, Region,
};

#[test]
fn test_region_display() {
    assert_eq!(format!("{}", Region::Eu), "eu");
    assert_eq!(Region::Us.profile_namespace(), "profile-us");
}

#[test]
fn test_realm_slug_display() {
    let slug = RealmSlug::from_realm("Argent Dawn");
    assert_eq!(format!("{slug}"), "argent-dawn");
}

#[test]
fn test_identity_display() {
    let identity = CharacterIdentity::parse("Thrall", "Silver Hand", "eu").unwrap();
    assert_eq!(format!("{identity}"), "Thrall-silver-hand (eu)");
}

#[test]
fn test_identity_rejects_unknown_region() {
    let err = CharacterIdentity::parse("Thrall", "Silver Hand", "mars").unwrap_err();
    assert!(matches!(err, ArmoryError::InvalidInput { ref field, .. } if field == "region"));
}

#[test]
fn test_default_fetch_policy_is_best_effort() {
    assert_eq!(FetchPolicy::default(), FetchPolicy::BestEffort);
}

#[test]
fn test_format_date() {
    let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    assert_eq!(format_date(timestamp), "2024-01-01");
}

#[test]
fn test_truncate_string() {
    let input = "This is a very long string that should be truncated";
    let truncated = truncate_string(input, 20);
    assert_eq!(truncated, "This is a very lo...");

    let short = "Short";
    let not_truncated = truncate_string(short, 20);
    assert_eq!(not_truncated, "Short");
}
