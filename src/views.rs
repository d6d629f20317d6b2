//! Derived view models.
//!
//! Pure functions over fetched snapshots. Nothing here does I/O or mutates its
//! input; callers recompute whenever a snapshot changes.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::api::types::{NewsItem, ParticipantRoster, TrainingSession};
use crate::constants::text;
use crate::constants::views::PAGE_LIMIT;
use crate::dates::parse_timestamp;
use crate::fetch::{FetchState, FetchStatus};
use crate::types::RoomId;

/// Category a training name falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainingKind {
    /// Karate
    Karate,
    /// Judo, also spelled "dzsudo"
    Judo,
    /// Boxing and kick-boxing
    Kickbox,
    /// Yoga
    Yoga,
    /// Conditioning, fitness and crossfit
    Conditioning,
    /// Children's groups
    Kids,
    /// Competition prep and sparring
    Competition,
    /// Anything no rule recognizes
    General,
}

impl TrainingKind {
    /// Display label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Karate => "Karate",
            Self::Judo => "Judo",
            Self::Kickbox => "Kick-box",
            Self::Yoga => "Jóga",
            Self::Conditioning => "Erőnléti",
            Self::Kids => "Gyerek",
            Self::Competition => "Verseny",
            Self::General => "Edzés",
        }
    }

    /// SF Symbols glyph name
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Karate => "figure.martial.arts",
            Self::Judo => "figure.wrestling",
            Self::Kickbox => "figure.kickboxing",
            Self::Yoga => "figure.yoga",
            Self::Conditioning => "dumbbell.fill",
            Self::Kids => "figure.and.child.holdinghands",
            Self::Competition => "trophy.fill",
            Self::General => "figure.run",
        }
    }
}

/// Keyword rules, checked top to bottom. Keywords are lowercase.
///
/// Position in this table is also the ordering priority of type filters.
const CATEGORY_RULES: &[(&[&str], TrainingKind)] = &[
    (&["karate"], TrainingKind::Karate),
    (&["judo", "dzsudo"], TrainingKind::Judo),
    (&["box", "kick"], TrainingKind::Kickbox),
    (&["jóga", "joga", "yoga"], TrainingKind::Yoga),
    (&["erőnléti", "kondi", "fitness", "crossfit"], TrainingKind::Conditioning),
    (&["gyerek", "kids"], TrainingKind::Kids),
    (&["verseny", "sparring"], TrainingKind::Competition),
];

fn rule_index(name: &str) -> Option<usize> {
    let name = name.to_lowercase();
    CATEGORY_RULES
        .iter()
        .position(|(keywords, _)| keywords.iter().any(|k| name.contains(k)))
}

/// Category of a training name; case-insensitive, never fails
pub fn classify(name: &str) -> TrainingKind {
    rule_index(name).map_or(TrainingKind::General, |i| CATEGORY_RULES[i].1)
}

/// Display label for a training name
pub fn classify_label(name: &str) -> &'static str {
    classify(name).label()
}

/// Icon glyph for a training name
pub fn classify_icon(name: &str) -> &'static str {
    classify(name).icon()
}

/// One entry of the type filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeOption {
    /// Training name the option filters on
    pub name: String,
    /// Category label
    pub label: &'static str,
    /// Category icon glyph
    pub icon: &'static str,
}

/// Distinct room ids, ascending
pub fn room_filter_options(trainings: &[TrainingSession]) -> Vec<RoomId> {
    trainings
        .iter()
        .map(|t| t.room_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct training names, ordered by category priority.
///
/// Names in the same category are alphabetical; unrecognized names follow
/// all recognized ones, also alphabetical.
pub fn type_filter_options(trainings: &[TrainingSession]) -> Vec<TypeOption> {
    let names: BTreeSet<&str> = trainings.iter().map(|t| t.name.as_str()).collect();
    let mut names: Vec<&str> = names.into_iter().collect();
    // Stable sort keeps the alphabetical order inside each rule.
    names.sort_by_key(|name| rule_index(name).unwrap_or(usize::MAX));

    names
        .into_iter()
        .map(|name| {
            let kind = classify(name);
            TypeOption {
                name: name.to_string(),
                label: kind.label(),
                icon: kind.icon(),
            }
        })
        .collect()
}

/// Active filter on the training list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrainingFilter {
    /// No filtering
    #[default]
    All,
    /// Trainings held in one room
    Room(RoomId),
    /// Exact training name
    Type(String),
}

impl TrainingFilter {
    /// Whether `training` passes the filter
    pub fn matches(&self, training: &TrainingSession) -> bool {
        match self {
            Self::All => true,
            Self::Room(room) => training.room_id == *room,
            Self::Type(name) => training.name == *name,
        }
    }

    /// Chip label for the filter
    pub fn label(&self) -> String {
        match self {
            Self::All => text::FILTER_ALL.to_string(),
            Self::Room(room) => format!("{room}. terem"),
            Self::Type(name) => name.clone(),
        }
    }
}

/// Trainings passing `filter`, in input order
pub fn filtered_trainings<'a>(
    trainings: &'a [TrainingSession],
    filter: &TrainingFilter,
) -> Vec<&'a TrainingSession> {
    trainings.iter().filter(|t| filter.matches(t)).collect()
}

/// Trainings by start time, earliest first.
///
/// Unparsable timestamps go last; ties keep their input order.
pub fn sorted_by_start_time<'a>(
    trainings: impl IntoIterator<Item = &'a TrainingSession>,
) -> Vec<&'a TrainingSession> {
    let mut sorted: Vec<_> = trainings.into_iter().collect();
    sorted.sort_by_cached_key(|t| {
        let start = parse_timestamp(&t.start_timestamp);
        (start.is_none(), start)
    });
    sorted
}

/// News newest first.
///
/// Unparsable timestamps go last; ties keep their input order, so sorting a
/// sorted list changes nothing.
pub fn sorted_news_by_recency<'a>(
    news: impl IntoIterator<Item = &'a NewsItem>,
) -> Vec<&'a NewsItem> {
    let mut sorted: Vec<_> = news.into_iter().collect();
    sorted.sort_by_cached_key(|n| {
        let created = parse_timestamp(&n.created_at);
        (created.is_none(), Reverse(created))
    });
    sorted
}

/// First `limit` items, or all of them when expanded
pub fn paginated<T>(items: &[T], limit: usize, expanded: bool) -> &[T] {
    if expanded {
        items
    } else {
        &items[..limit.min(items.len())]
    }
}

/// Show-more control under a paginated list.
///
/// The training list toggles both ways; the news list only expands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowMore {
    /// Whether every item is shown
    pub expanded: bool,
    collapsible: bool,
    more_label: &'static str,
}

impl Default for ShowMore {
    fn default() -> Self {
        Self::trainings()
    }
}

impl ShowMore {
    /// Two-way toggle of the home screen training list
    pub const fn trainings() -> Self {
        Self {
            expanded: false,
            collapsible: true,
            more_label: text::SHOW_MORE,
        }
    }

    /// One-way expander of the news list
    pub const fn news() -> Self {
        Self {
            expanded: false,
            collapsible: false,
            more_label: text::SHOW_MORE_NEWS,
        }
    }

    /// Flip the state; an expanded news list stays expanded
    pub fn toggle(&mut self) {
        if self.collapsible || !self.expanded {
            self.expanded = !self.expanded;
        }
    }

    /// Items to render
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginated(items, PAGE_LIMIT, self.expanded)
    }

    /// Whether the control is shown for a list of `total` items
    pub const fn needs_toggle(&self, total: usize) -> bool {
        total > PAGE_LIMIT && (self.collapsible || !self.expanded)
    }

    /// Text of the control
    pub const fn toggle_label(&self) -> &'static str {
        if self.expanded {
            text::SHOW_LESS
        } else {
            self.more_label
        }
    }
}

/// Participant total to display; the backend count, not the listed length
pub const fn roster_total(roster: &ParticipantRoster) -> u32 {
    roster.count
}

/// A fetch succeeded and returned nothing
pub fn is_empty_state<T>(state: &FetchState<Vec<T>>) -> bool {
    state.status == FetchStatus::Success && state.data().is_some_and(Vec::is_empty)
}
