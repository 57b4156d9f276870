//! Reply rendering.
//!
//! Turns snapshots and comparison results into platform-neutral
//! [`ReplyDocument`]s. Every label and placeholder comes from the message
//! catalog; missing values are shown as explicit placeholders, never dropped.

use crate::comparison::{AnnotatedValue, Annotation, ComparisonResult, Stat, StatValue};
use crate::snapshot::{CharacterSnapshot, Field, GladiatorAchievement, PvpSnapshot};
use armory_common::{format_date, truncate_string, CharacterIdentity, EMBED_FIELD_LIMIT};
use armory_i18n::{keys, Messages};

/// Accent color of the single-character view.
pub const SINGLE_COLOR: u32 = 0x00AE86;
/// Accent color of the comparison view.
pub const COMPARE_COLOR: u32 = 0x992D22;
/// Accent color of the PvP view.
pub const PVP_COLOR: u32 = 0xC41E3A;

/// Appended to the greater of two numbers.
pub const GREATER_MARKER: &str = "🟢";
/// Appended to the lesser of two numbers.
pub const LESSER_MARKER: &str = "❌";

const FIELD_NAME_LIMIT: usize = 256;

/// Author line of a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyAuthor {
    /// Author text.
    pub name: String,
    /// Icon shown next to the author text.
    pub icon_url: Option<String>,
}

/// One name/value field of a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyField {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: String,
    /// Whether the field may share a row.
    pub inline: bool,
}

impl ReplyField {
    fn new(name: impl AsRef<str>, value: impl AsRef<str>, inline: bool) -> Self {
        Self {
            name: truncate_string(name.as_ref(), FIELD_NAME_LIMIT),
            value: truncate_string(value.as_ref(), EMBED_FIELD_LIMIT),
            inline,
        }
    }
}

/// Structured reply, independent of the chat platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyDocument {
    /// Title line.
    pub title: Option<String>,
    /// Description under the title.
    pub description: Option<String>,
    /// Author line.
    pub author: Option<ReplyAuthor>,
    /// Thumbnail image.
    pub thumbnail: Option<String>,
    /// Fields in display order.
    pub fields: Vec<ReplyField>,
    /// Accent color.
    pub color: u32,
    /// Footer text.
    pub footer: Option<String>,
    /// Character the reply is about, for follow-up actions.
    pub identity: Option<CharacterIdentity>,
}

impl ReplyDocument {
    /// Value of the first field with the given name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}

/// Renders reply documents from a message catalog.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    messages: &'a Messages,
}

impl<'a> Renderer<'a> {
    /// Creates a renderer over a catalog.
    pub const fn new(messages: &'a Messages) -> Self {
        Self { messages }
    }

    /// Single-character view.
    pub fn render_single(&self, snapshot: &CharacterSnapshot) -> ReplyDocument {
        let m = self.messages;
        let level = snapshot.level.to_string();
        let portrait = snapshot.portrait.value();

        let specialization = match &snapshot.active_spec {
            Field::Value(Some(spec)) => spec.clone(),
            Field::Value(None) => m.get(keys::PLACEHOLDER_NONE),
            Field::Unavailable => self.unavailable(),
        };
        let mounts = match snapshot.mount_count {
            Field::Value(count) => {
                m.get_with_args(keys::MOUNTS_COLLECTED, &[("count", &count.to_string())])
            }
            Field::Unavailable => self.unavailable(),
        };
        let latest = match &snapshot.latest_achievement {
            Field::Value(Some(name)) => name.clone(),
            Field::Value(None) => m.get(keys::PLACEHOLDER_NONE),
            Field::Unavailable => self.unavailable(),
        };
        let gladiator = match &snapshot.gladiator {
            Field::Value(Some(gladiator)) => self.gladiator_entry(gladiator),
            Field::Value(None) => m.get(keys::PLACEHOLDER_NO_GLADIATOR),
            Field::Unavailable => self.unavailable(),
        };

        ReplyDocument {
            author: Some(ReplyAuthor {
                name: m.get_with_args(
                    keys::SINGLE_AUTHOR,
                    &[
                        ("name", &snapshot.name),
                        ("level", &level),
                        ("class", &snapshot.class_name),
                    ],
                ),
                icon_url: portrait.and_then(|p| p.avatar_url.clone()),
            }),
            thumbnail: portrait.and_then(|p| p.render_url.clone()),
            fields: vec![
                ReplyField::new(m.get(keys::LABEL_ITEM_LEVEL), snapshot.item_level.to_string(), true),
                ReplyField::new(m.get(keys::LABEL_SPECIALIZATION), specialization, true),
                ReplyField::new(m.get(keys::LABEL_MOUNTS), mounts, true),
                ReplyField::new(
                    m.get(keys::LABEL_ACHIEVEMENT_POINTS),
                    snapshot.achievement_points.to_string(),
                    true,
                ),
                ReplyField::new(m.get(keys::LABEL_LATEST_ACHIEVEMENT), latest, false),
                ReplyField::new(m.get(keys::LABEL_GLADIATOR), gladiator, false),
                ReplyField::new(m.get(keys::LABEL_HONOR_LEVEL), snapshot.honor_level.to_string(), true),
                ReplyField::new(
                    m.get(keys::LABEL_HONORABLE_KILLS),
                    snapshot.honorable_kills.to_string(),
                    true,
                ),
            ],
            color: SINGLE_COLOR,
            footer: Some(self.footer(&snapshot.realm_name, &snapshot.identity)),
            identity: Some(snapshot.identity.clone()),
            ..ReplyDocument::default()
        }
    }

    /// Side-by-side comparison view.
    pub fn render_comparison(
        &self,
        left: &CharacterSnapshot,
        right: &CharacterSnapshot,
        result: &ComparisonResult,
    ) -> ReplyDocument {
        let m = self.messages;
        let left_region = left.identity.region.to_string();
        let right_region = right.identity.region.to_string();

        let description = m.get_with_args(
            keys::COMPARE_DESCRIPTION,
            &[
                ("left", &left.name),
                ("left-realm", &left.identity.realm),
                ("left-region", &left_region),
                ("right", &right.name),
                ("right-realm", &right.identity.realm),
                ("right-region", &right_region),
            ],
        );

        let sections = [
            (keys::COMPARE_SECTION_GEAR, [Stat::ItemLevel, Stat::AchievementPoints]),
            (keys::COMPARE_SECTION_PVP, [Stat::HonorLevel, Stat::HonorableKills]),
            (keys::COMPARE_SECTION_MISC, [Stat::MountCount, Stat::Gladiator]),
        ];

        let mut fields = Vec::with_capacity(sections.len() * 3);
        for (section, stats) in sections {
            let labels: Vec<String> = stats
                .iter()
                .map(|stat| format!("**{}**", m.get(stat_label(*stat))))
                .collect();
            let (left_values, right_values): (Vec<String>, Vec<String>) = stats
                .iter()
                .map(|stat| match result.get(*stat) {
                    Some(compared) => (self.annotated(&compared.left), self.annotated(&compared.right)),
                    None => (self.unavailable(), self.unavailable()),
                })
                .unzip();

            fields.push(ReplyField::new(m.get(section), labels.join("\n"), true));
            fields.push(ReplyField::new(&left.name, left_values.join("\n"), true));
            fields.push(ReplyField::new(&right.name, right_values.join("\n"), true));
        }

        ReplyDocument {
            title: Some(m.get(keys::COMPARE_TITLE)),
            description: Some(description),
            fields,
            color: COMPARE_COLOR,
            ..ReplyDocument::default()
        }
    }

    /// PvP detail view.
    pub fn render_pvp(&self, pvp: &PvpSnapshot) -> ReplyDocument {
        let m = self.messages;

        let history = if pvp.gladiator_history.is_empty() {
            m.get(keys::PLACEHOLDER_NO_GLADIATOR)
        } else {
            pvp.gladiator_history
                .iter()
                .map(|gladiator| self.gladiator_entry(gladiator))
                .collect::<Vec<_>>()
                .join("\n")
        };

        ReplyDocument {
            title: Some(m.get_with_args(keys::PVP_TITLE, &[("name", &pvp.name)])),
            fields: vec![
                ReplyField::new(m.get(keys::LABEL_HONOR_LEVEL), pvp.honor_level.to_string(), true),
                ReplyField::new(
                    m.get(keys::LABEL_HONORABLE_KILLS),
                    pvp.honorable_kills.to_string(),
                    true,
                ),
                ReplyField::new(m.get(keys::PVP_LABEL_GLADIATOR_HISTORY), history, false),
            ],
            color: PVP_COLOR,
            footer: Some(self.footer(&pvp.realm_name, &pvp.identity)),
            identity: Some(pvp.identity.clone()),
            ..ReplyDocument::default()
        }
    }

    fn unavailable(&self) -> String {
        self.messages.get(keys::PLACEHOLDER_UNAVAILABLE)
    }

    /// Uses the API's realm name so every view of a character agrees,
    /// whether it came from typed arguments or a decoded token.
    fn footer(&self, realm_name: &str, identity: &CharacterIdentity) -> String {
        self.messages.get_with_args(
            keys::FOOTER_REALM,
            &[("realm", realm_name), ("region", identity.region.as_str())],
        )
    }

    fn gladiator_entry(&self, gladiator: &GladiatorAchievement) -> String {
        match gladiator.completed_at {
            Some(at) => self.messages.get_with_args(
                keys::GLADIATOR_ENTRY,
                &[("name", &gladiator.name), ("date", &format_date(at))],
            ),
            None => gladiator.name.clone(),
        }
    }

    fn annotated(&self, value: &AnnotatedValue) -> String {
        let marker = match value.annotation {
            Annotation::Greater => Some(GREATER_MARKER),
            Annotation::Lesser => Some(LESSER_MARKER),
            Annotation::Unordered => None,
        };

        match (&value.value, marker) {
            (StatValue::Number(n), Some(marker)) => format!("{n} {marker}"),
            (StatValue::Number(n), None) => n.to_string(),
            // Gladiator status carries its own yes/no marker.
            (StatValue::Flag(true), _) => {
                format!("{} {GREATER_MARKER}", self.messages.get(keys::GLADIATOR_YES))
            }
            (StatValue::Flag(false), _) => {
                format!("{} {LESSER_MARKER}", self.messages.get(keys::GLADIATOR_NO))
            }
            (StatValue::Text(text), _) => text.clone(),
            (StatValue::Unavailable, _) => self.unavailable(),
        }
    }
}

const fn stat_label(stat: Stat) -> &'static str {
    match stat {
        Stat::ItemLevel => keys::LABEL_ITEM_LEVEL,
        Stat::AchievementPoints => keys::LABEL_ACHIEVEMENT_POINTS,
        Stat::HonorLevel => keys::LABEL_HONOR_LEVEL,
        Stat::HonorableKills => keys::COMPARE_LABEL_HONORABLE_KILLS,
        Stat::MountCount => keys::COMPARE_LABEL_MOUNTS,
        Stat::Gladiator => keys::LABEL_GLADIATOR,
    }
}
