mod consts;
mod engine;
mod format;
mod prelude;
mod types;
mod utils;

pub use consts::*;
pub use engine::{Clock, Engine, FixedClock, SystemClock};
pub use pure_rust_locales::Locale;
pub use types::{Field, Formats, Meridiem, Options, Unit};
pub use utils::{MonthArray, ThaiDateUtils, WeekGrid, YearRange};

use crate::consts::{DISPLAY_FORMAT, NANOS_PER_MILLI};
use crate::prelude::*;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use std::fmt;
use std::str::FromStr;

/// A wall-clock date and time in the adapter's calendar, kept at
/// millisecond precision.
///
/// Values are never modified in place: every engine and adapter operation
/// returns a new `ThaiDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, Into)]
pub struct ThaiDate(NaiveDateTime);

/// Error type for date parsing, locale binding and date arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Input didn't match the pattern, or named an impossible date.
    #[error("Invalid date {value:?} for format {format:?}")]
    InvalidFormat { value: String, format: String },

    /// Input matched none of the accepted date shapes.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// Locale tag names no known locale.
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    /// Unit name isn't one of the calendar units.
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Arithmetic left the representable date range.
    #[error("Date out of range after moving {amount} {unit}(s)")]
    OutOfRange { amount: i64, unit: Unit },
}

impl ThaiDate {
    /// Wraps a chrono value, dropping anything below milliseconds.
    pub fn new(value: NaiveDateTime) -> Self {
        let millis = value.nanosecond() / NANOS_PER_MILLI * NANOS_PER_MILLI;
        Self(value.with_nanosecond(millis).unwrap_or(value))
    }

    /// Midnight of a Common Era calendar day (month is 1-based).
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the day doesn't exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        Self::from_ymd_hms(year, month, day, 0, 0, 0)
    }

    /// # Errors
    /// Returns `DateError::InvalidDate` if the date or time doesn't exist.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .map(Self)
            .ok_or_else(|| {
                DateError::InvalidDate(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                ))
            })
    }

    /// Midnight of a Buddhist Era calendar day (month is 1-based).
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the day doesn't exist.
    pub fn from_be_ymd(be_year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        let year = be_year.checked_sub(BUDDHIST_ERA_OFFSET).ok_or_else(|| {
            DateError::InvalidDate(format!("BE {be_year}-{month:02}-{day:02}"))
        })?;
        Self::from_ymd(year, month, day)
    }

    /// The underlying chrono value
    #[inline]
    pub const fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    #[inline]
    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    /// Common Era year
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Buddhist Era year (Common Era + 543)
    pub fn be_year(&self) -> i32 {
        self.0.year() + BUDDHIST_ERA_OFFSET
    }

    /// Month, 1-based
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Month index, 0-based
    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn millisecond(&self) -> u32 {
        self.0.nanosecond() / NANOS_PER_MILLI % 1_000
    }
}

impl From<NaiveDateTime> for ThaiDate {
    fn from(value: NaiveDateTime) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ThaiDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl FromStr for ThaiDate {
    type Err = DateError;

    /// Accepts the `Display` form (signed years outside 0..=9999 included)
    /// and the ISO shapes in [`ISO_FORMATS`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, DISPLAY_FORMAT) {
            return Ok(Self::new(value));
        }
        let names = format::Names::for_locale(Locale::POSIX, false);
        ISO_FORMATS
            .iter()
            .find_map(|pattern| {
                let items = format::tokenize(pattern);
                // Every ISO shape carries a year, so the fallback day is never consulted
                format::scan(trimmed, &items, &names)?.resolve(NaiveDate::default())
            })
            .map(Self::new)
            .ok_or_else(|| DateError::InvalidDate(s.to_owned()))
    }
}

impl serde::Serialize for ThaiDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ThaiDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
