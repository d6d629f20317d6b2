//! Timestamp parsing and display formatting.
//!
//! The backend sends timestamps like `2024-06-01T08:00:00.000Z`. They are
//! parsed with one fixed item list and nothing else; a value that does not
//! match yields `None`, and every display helper falls back to a placeholder
//! label instead of guessing. Display converts to the device's local zone;
//! the `*_in` variants take an explicit zone.

use chrono::format::{self, Fixed, Item, Numeric, Pad, Parsed};
use std::fmt::Display;

use chrono::{DateTime, Datelike, FixedOffset, Local, TimeZone, Timelike, Weekday};

use crate::constants::text;

/// `YYYY-MM-DDTHH:MM:SS[.fff](Z|+HH:MM)`
const TIMESTAMP_FORMAT: &[Item<'static>] = &[
    Item::Numeric(Numeric::Year, Pad::Zero),
    Item::Literal("-"),
    Item::Numeric(Numeric::Month, Pad::Zero),
    Item::Literal("-"),
    Item::Numeric(Numeric::Day, Pad::Zero),
    Item::Literal("T"),
    Item::Numeric(Numeric::Hour, Pad::Zero),
    Item::Literal(":"),
    Item::Numeric(Numeric::Minute, Pad::Zero),
    Item::Literal(":"),
    Item::Numeric(Numeric::Second, Pad::Zero),
    Item::Fixed(Fixed::Nanosecond),
    Item::Fixed(Fixed::TimezoneOffsetZ),
];

const MONTHS: [&str; 12] = [
    "január",
    "február",
    "március",
    "április",
    "május",
    "június",
    "július",
    "augusztus",
    "szeptember",
    "október",
    "november",
    "december",
];

/// Parse a backend timestamp, `None` if it does not match the wire format.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, raw.trim(), TIMESTAMP_FORMAT.iter()).ok()?;
    parsed.to_datetime().ok()
}

fn parse_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    parse_timestamp(raw).map(|dt| dt.with_timezone(tz))
}

/// Start label for lists in local time, e.g. `2024.06.01 08:00`.
pub fn format_start(raw: &str) -> String {
    format_start_in(raw, &Local)
}

/// [`format_start`] in `tz`
pub fn format_start_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    parse_in(raw, tz).map_or_else(
        || text::NO_TIME.to_string(),
        |dt| dt.format("%Y.%m.%d %H:%M").to_string(),
    )
}

/// Capitalized Hungarian weekday in local time, e.g. `Szombat`.
pub fn format_day(raw: &str) -> String {
    format_day_in(raw, &Local)
}

/// [`format_day`] in `tz`
pub fn format_day_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String {
    parse_in(raw, tz).map_or_else(
        || text::NO_DAY.to_string(),
        |dt| weekday_name(dt.weekday()).to_string(),
    )
}

/// Local time of day, e.g. `08:00`.
pub fn format_time(raw: &str) -> String {
    format_time_in(raw, &Local)
}

/// [`format_time`] in `tz`
pub fn format_time_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    parse_in(raw, tz).map_or_else(
        || text::NO_TIME.to_string(),
        |dt| dt.format("%H:%M").to_string(),
    )
}

/// News card date in local time, e.g. `június 1. 08:00`.
pub fn format_news_date(raw: &str) -> String {
    format_news_date_in(raw, &Local)
}

/// [`format_news_date`] in `tz`
pub fn format_news_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String {
    parse_in(raw, tz).map_or_else(
        || text::NO_TIME.to_string(),
        |dt| {
            let month = MONTHS[dt.month0() as usize];
            format!("{month} {}. {:02}:{:02}", dt.day(), dt.hour(), dt.minute())
        },
    )
}

const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Hétfő",
        Weekday::Tue => "Kedd",
        Weekday::Wed => "Szerda",
        Weekday::Thu => "Csütörtök",
        Weekday::Fri => "Péntek",
        Weekday::Sat => "Szombat",
        Weekday::Sun => "Vasárnap",
    }
}
