//! Clock face formatting — localized date line and `HH:MM` time.
//!
//! Input is the *corrected* time: local clock plus the learned clock and
//! timezone offsets, expressed as a UTC instant whose calendar fields are the
//! wall-clock fields of the display's time zone. That is why only the UTC
//! accessors are used here.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Deserialize;

const ENGLISH_WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday and month names. A missing field keeps the English names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Locale {
    /// Weekday names, starting with Sunday.
    pub weekdays: [String; 7],
    /// Month names, starting with January.
    pub months: [String; 12],
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            weekdays: ENGLISH_WEEKDAYS.map(String::from),
            months: ENGLISH_MONTHS.map(String::from),
        }
    }
}

impl Locale {
    /// Name of the weekday `days_from_sunday` (0 = Sunday).
    pub fn weekday(&self, days_from_sunday: u32) -> &str {
        usize::try_from(days_from_sunday)
            .ok()
            .and_then(|i| self.weekdays.get(i))
            .map_or("", String::as_str)
    }

    /// Name of month `month0` (0 = January).
    pub fn month(&self, month0: u32) -> &str {
        usize::try_from(month0)
            .ok()
            .and_then(|i| self.months.get(i))
            .map_or("", String::as_str)
    }
}

/// Two-line date: weekday, then `<day>. <month>`.
pub fn format_date(now: DateTime<Utc>, locale: &Locale) -> String {
    format!(
        "{}\n{}. {}",
        locale.weekday(now.weekday().num_days_from_sunday()),
        now.day(),
        locale.month(now.month0())
    )
}

/// Zero-padded `HH:MM`. Seconds are never shown.
pub fn format_time(now: DateTime<Utc>) -> String {
    format!("{:02}:{:02}", now.hour(), now.minute())
}
