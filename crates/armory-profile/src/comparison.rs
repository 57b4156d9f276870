//! Stat-by-stat comparison of two characters.

use crate::snapshot::{CharacterSnapshot, Field};
use std::cmp::Ordering;

/// Stats shown in the comparison view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    /// Equipped item level.
    ItemLevel,
    /// Achievement points.
    AchievementPoints,
    /// Honor level.
    HonorLevel,
    /// Lifetime honorable kills.
    HonorableKills,
    /// Collected mounts.
    MountCount,
    /// Gladiator status.
    Gladiator,
}

impl Stat {
    /// Every stat, in display order.
    pub const ALL: [Self; 6] = [
        Self::ItemLevel,
        Self::AchievementPoints,
        Self::HonorLevel,
        Self::HonorableKills,
        Self::MountCount,
        Self::Gladiator,
    ];
}

/// A stat value as it enters the comparator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatValue {
    /// Orderable value.
    Number(u64),
    /// Yes/no value; never ordered.
    Flag(bool),
    /// Free text; never ordered.
    Text(String),
    /// The value could not be fetched.
    Unavailable,
}

impl StatValue {
    const fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<Field<u64>> for StatValue {
    fn from(field: Field<u64>) -> Self {
        match field {
            Field::Value(n) => Self::Number(n),
            Field::Unavailable => Self::Unavailable,
        }
    }
}

/// One stat for both characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatPair {
    /// Which stat.
    pub stat: Stat,
    /// First character's value.
    pub left: StatValue,
    /// Second character's value.
    pub right: StatValue,
}

/// Ordering tag attached to a compared value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// Strictly greater than the other side.
    Greater,
    /// Strictly less than the other side.
    Lesser,
    /// Equal, or not comparable.
    Unordered,
}

/// A value together with its ordering tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedValue {
    /// The value.
    pub value: StatValue,
    /// Its ordering relative to the other side.
    pub annotation: Annotation,
}

/// A compared stat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparedStat {
    /// Which stat.
    pub stat: Stat,
    /// First character.
    pub left: AnnotatedValue,
    /// Second character.
    pub right: AnnotatedValue,
}

/// Comparator output, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonResult {
    /// Compared stats.
    pub stats: Vec<ComparedStat>,
}

impl ComparisonResult {
    /// Looks up a compared stat.
    pub fn get(&self, stat: Stat) -> Option<&ComparedStat> {
        self.stats.iter().find(|compared| compared.stat == stat)
    }
}

/// Annotates each pair. Only two numbers are ever ordered.
pub fn compare(pairs: Vec<StatPair>) -> ComparisonResult {
    let stats = pairs
        .into_iter()
        .map(|StatPair { stat, left, right }| {
            let (left_tag, right_tag) = match (left.as_number(), right.as_number()) {
                (Some(a), Some(b)) => match a.cmp(&b) {
                    Ordering::Greater => (Annotation::Greater, Annotation::Lesser),
                    Ordering::Less => (Annotation::Lesser, Annotation::Greater),
                    Ordering::Equal => (Annotation::Unordered, Annotation::Unordered),
                },
                _ => (Annotation::Unordered, Annotation::Unordered),
            };

            ComparedStat {
                stat,
                left: AnnotatedValue {
                    value: left,
                    annotation: left_tag,
                },
                right: AnnotatedValue {
                    value: right,
                    annotation: right_tag,
                },
            }
        })
        .collect();

    ComparisonResult { stats }
}

fn gladiator_value(snapshot: &CharacterSnapshot) -> StatValue {
    match &snapshot.gladiator {
        Field::Value(gladiator) => StatValue::Flag(gladiator.is_some()),
        Field::Unavailable => StatValue::Unavailable,
    }
}

/// Extracts the compared stats from two snapshots.
pub fn stat_pairs(left: &CharacterSnapshot, right: &CharacterSnapshot) -> Vec<StatPair> {
    Stat::ALL
        .into_iter()
        .map(|stat| {
            let value = |snapshot: &CharacterSnapshot| match stat {
                Stat::ItemLevel => StatValue::Number(u64::from(snapshot.item_level)),
                Stat::AchievementPoints => {
                    StatValue::Number(u64::from(snapshot.achievement_points))
                }
                Stat::HonorLevel => StatValue::Number(u64::from(snapshot.honor_level)),
                Stat::HonorableKills => StatValue::Number(snapshot.honorable_kills),
                Stat::MountCount => snapshot.mount_count.clone().into(),
                Stat::Gladiator => gladiator_value(snapshot),
            };
            StatPair {
                stat,
                left: value(left),
                right: value(right),
            }
        })
        .collect()
}

/// Compares two snapshots.
pub fn compare_snapshots(left: &CharacterSnapshot, right: &CharacterSnapshot) -> ComparisonResult {
    compare(stat_pairs(left, right))
}
