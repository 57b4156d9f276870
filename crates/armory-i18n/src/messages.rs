//! Message lookup over a loaded catalog.

use crate::loader::{Bundle, FluentLoader};
use armory_common::Result;
use fluent_bundle::{FluentArgs, FluentValue};
use once_cell::sync::Lazy;
use std::fmt;
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Message keys used by the bot.
pub mod keys {
    #![allow(missing_docs)]

    pub const LOOKUP_FAILED: &str = "lookup-failed";
    pub const COMPARE_FAILED: &str = "compare-failed";
    pub const PVP_FAILED: &str = "pvp-failed";
    pub const COMMAND_ERROR: &str = "command-error";

    pub const PLACEHOLDER_NONE: &str = "placeholder-none";
    pub const PLACEHOLDER_UNAVAILABLE: &str = "placeholder-unavailable";
    pub const PLACEHOLDER_NO_GLADIATOR: &str = "placeholder-no-gladiator";
    pub const GLADIATOR_YES: &str = "gladiator-yes";
    pub const GLADIATOR_NO: &str = "gladiator-no";

    pub const SINGLE_AUTHOR: &str = "single-author";
    pub const FOOTER_REALM: &str = "footer-realm";
    pub const LABEL_ITEM_LEVEL: &str = "label-item-level";
    pub const LABEL_SPECIALIZATION: &str = "label-specialization";
    pub const LABEL_MOUNTS: &str = "label-mounts";
    pub const LABEL_ACHIEVEMENT_POINTS: &str = "label-achievement-points";
    pub const LABEL_LATEST_ACHIEVEMENT: &str = "label-latest-achievement";
    pub const LABEL_GLADIATOR: &str = "label-gladiator";
    pub const LABEL_HONOR_LEVEL: &str = "label-honor-level";
    pub const LABEL_HONORABLE_KILLS: &str = "label-honorable-kills";
    pub const MOUNTS_COLLECTED: &str = "mounts-collected";
    pub const GLADIATOR_ENTRY: &str = "gladiator-entry";

    pub const COMPARE_TITLE: &str = "compare-title";
    pub const COMPARE_DESCRIPTION: &str = "compare-description";
    pub const COMPARE_SECTION_GEAR: &str = "compare-section-gear";
    pub const COMPARE_SECTION_PVP: &str = "compare-section-pvp";
    pub const COMPARE_SECTION_MISC: &str = "compare-section-misc";
    pub const COMPARE_LABEL_HONORABLE_KILLS: &str = "compare-label-honorable-kills";
    pub const COMPARE_LABEL_MOUNTS: &str = "compare-label-mounts";

    pub const PVP_TITLE: &str = "pvp-title";
    pub const PVP_LABEL_GLADIATOR_HISTORY: &str = "pvp-label-gladiator-history";

    pub const MENU_PLACEHOLDER: &str = "menu-placeholder";
    pub const MENU_PVP: &str = "menu-pvp";
    pub const MENU_PVP_DESCRIPTION: &str = "menu-pvp-description";

    /// Every key the bot looks up; each must exist in every catalog.
    pub const ALL: &[&str] = &[
        LOOKUP_FAILED,
        COMPARE_FAILED,
        PVP_FAILED,
        COMMAND_ERROR,
        PLACEHOLDER_NONE,
        PLACEHOLDER_UNAVAILABLE,
        PLACEHOLDER_NO_GLADIATOR,
        GLADIATOR_YES,
        GLADIATOR_NO,
        SINGLE_AUTHOR,
        FOOTER_REALM,
        LABEL_ITEM_LEVEL,
        LABEL_SPECIALIZATION,
        LABEL_MOUNTS,
        LABEL_ACHIEVEMENT_POINTS,
        LABEL_LATEST_ACHIEVEMENT,
        LABEL_GLADIATOR,
        LABEL_HONOR_LEVEL,
        LABEL_HONORABLE_KILLS,
        MOUNTS_COLLECTED,
        GLADIATOR_ENTRY,
        COMPARE_TITLE,
        COMPARE_DESCRIPTION,
        COMPARE_SECTION_GEAR,
        COMPARE_SECTION_PVP,
        COMPARE_SECTION_MISC,
        COMPARE_LABEL_HONORABLE_KILLS,
        COMPARE_LABEL_MOUNTS,
        PVP_TITLE,
        PVP_LABEL_GLADIATOR_HISTORY,
        MENU_PLACEHOLDER,
        MENU_PVP,
        MENU_PVP_DESCRIPTION,
    ];
}

static ENGLISH: Lazy<Option<Messages>> = Lazy::new(|| Messages::new("en-US").ok());

/// Message accessor for localized reply text.
pub struct Messages {
    bundle: Bundle,
    language: LanguageIdentifier,
}

impl fmt::Debug for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Messages")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl Messages {
    /// Loads the catalog for a language, falling back to English.
    pub fn new(language: &str) -> Result<Self> {
        let (bundle, language) = FluentLoader::load_bundle(language)?;
        Ok(Self { bundle, language })
    }

    /// Shared English catalog, if the embedded catalog parsed.
    pub fn english() -> Option<&'static Self> {
        ENGLISH.as_ref()
    }

    /// Language the catalog was loaded for.
    pub const fn language(&self) -> &LanguageIdentifier {
        &self.language
    }

    /// Whether the catalog defines a message.
    pub fn has(&self, key: &str) -> bool {
        self.bundle.has_message(key)
    }

    /// Gets a localized message. Unknown keys come back verbatim.
    pub fn get(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Gets a localized message with string arguments.
    pub fn get_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let Some(pattern) = self.bundle.get_message(key).and_then(|m| m.value()) else {
            warn!("Missing message '{}' for {}", key, self.language);
            return key.to_string();
        };

        let mut errors = Vec::new();
        let formatted = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!("Errors formatting '{}': {:?}", key, errors);
        }
        formatted.into_owned()
    }
}
