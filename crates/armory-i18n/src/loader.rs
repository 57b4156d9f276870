//! Fluent bundle loading from catalogs embedded at compile time.

use armory_common::{ArmoryError, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use tracing::{debug, warn};
use unic_langid::{langid, LanguageIdentifier};

/// A thread-safe bundle of parsed messages.
pub type Bundle = FluentBundle<FluentResource>;

/// Language used when the configured one has no catalog.
pub const FALLBACK_LANGUAGE: LanguageIdentifier = langid!("en-US");

/// Catalogs compiled into the binary, keyed by primary language subtag.
const CATALOGS: &[(&str, &str)] = &[("en", include_str!("../locales/en-US/armory.ftl"))];

/// Fluent bundle loader.
pub struct FluentLoader;

impl FluentLoader {
    /// Parses a language tag such as `en-US`.
    pub fn parse_language(language: &str) -> Result<LanguageIdentifier> {
        language.parse().map_err(|e| {
            ArmoryError::localization(format!("invalid language tag: {e}"), Some(language))
        })
    }

    /// Embedded catalog source for the language, if one exists.
    pub fn catalog_for(language: &LanguageIdentifier) -> Option<&'static str> {
        CATALOGS
            .iter()
            .find(|(primary, _)| *primary == language.language.as_str())
            .map(|(_, source)| *source)
    }

    /// Loads a bundle for the given language, falling back to English when
    /// no catalog exists for it.
    pub fn load_bundle(language: &str) -> Result<(Bundle, LanguageIdentifier)> {
        let requested = Self::parse_language(language)?;
        let (langid, source) = match Self::catalog_for(&requested) {
            Some(source) => (requested, source),
            None => {
                warn!(
                    "No message catalog for '{}', falling back to {}",
                    language, FALLBACK_LANGUAGE
                );
                let source = Self::catalog_for(&FALLBACK_LANGUAGE).ok_or_else(|| {
                    ArmoryError::localization("fallback catalog missing", Some(language))
                })?;
                (FALLBACK_LANGUAGE, source)
            }
        };

        let bundle = Self::build_bundle(langid.clone(), source)?;
        debug!("Loaded message catalog for {}", langid);
        Ok((bundle, langid))
    }

    /// Parses a Fluent source into a bundle for one language.
    pub fn build_bundle(langid: LanguageIdentifier, source: &str) -> Result<Bundle> {
        let locale = langid.to_string();
        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            ArmoryError::localization(format!("catalog parse errors: {errors:?}"), Some(&locale))
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![langid]);
        // Isolation marks would leak into Discord embeds.
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            ArmoryError::localization(format!("catalog conflicts: {errors:?}"), Some(&locale))
        })?;

        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_catalog_loads() {
        let (bundle, langid) = FluentLoader::load_bundle("en-US").unwrap();
        assert_eq!(langid, FALLBACK_LANGUAGE);
        assert!(bundle.has_message("lookup-failed"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let (bundle, langid) = FluentLoader::load_bundle("fr-FR").unwrap();
        assert_eq!(langid, FALLBACK_LANGUAGE);
        assert!(bundle.has_message("compare-failed"));
    }

    #[test]
    fn test_invalid_language_tag_is_an_error() {
        assert!(FluentLoader::load_bundle("not a tag!").is_err());
    }

    #[test]
    fn test_broken_source_is_reported() {
        let result = FluentLoader::build_bundle(FALLBACK_LANGUAGE, "broken = { $");
        assert!(result.is_err());
    }
}
