use crate::DateError;
use crate::consts::{
    DATE_FORMAT, DATE_TIME_12H_FORMAT, DATE_TIME_24H_FORMAT, MS_PER_DAY, MS_PER_HOUR,
    MS_PER_MINUTE, MS_PER_SECOND, MS_PER_WEEK, TIME_12H_FORMAT, TIME_24H_FORMAT, YEAR_FORMAT,
    YEAR_MONTH_FORMAT,
};
use crate::prelude::*;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Calendar unit used for arithmetic, truncation and differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[display(fmt = "millisecond")]
    Millisecond,
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "week")]
    Week,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

impl Unit {
    /// Length of the unit in milliseconds, `None` for the calendar-length
    /// units (month, year)
    pub const fn fixed_millis(self) -> Option<i64> {
        match self {
            Self::Millisecond => Some(1),
            Self::Second => Some(MS_PER_SECOND),
            Self::Minute => Some(MS_PER_MINUTE),
            Self::Hour => Some(MS_PER_HOUR),
            Self::Day => Some(MS_PER_DAY),
            Self::Week => Some(MS_PER_WEEK),
            Self::Month | Self::Year => None,
        }
    }
}

impl FromStr for Unit {
    type Err = DateError;

    /// Accepts singular, plural and the short aliases (`ms`, `s`,
    /// `m`, `h`, `d`, `w`, `M`, `y`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim() {
            "M" => return Ok(Self::Month),
            "m" => return Ok(Self::Minute),
            other => other.to_ascii_lowercase(),
        };
        match unit.trim_end_matches('s') {
            "m" | "millisecond" => Ok(Self::Millisecond),
            "" | "second" => Ok(Self::Second),
            "minute" => Ok(Self::Minute),
            "h" | "hour" => Ok(Self::Hour),
            "d" | "day" => Ok(Self::Day),
            "w" | "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "y" | "year" => Ok(Self::Year),
            _ => Err(DateError::UnknownUnit(s.to_owned())),
        }
    }
}

/// A settable date field. Month values are 0-based, like the picker's month index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "date")]
    Date,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "millisecond")]
    Millisecond,
}

/// Half of the day shown next to a 12h clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Meridiem {
    #[display(fmt = "AM")]
    Am,
    #[display(fmt = "PM")]
    Pm,
}

impl Meridiem {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

/// Only the exact token `am` reads as [`Meridiem::Am`]; every other input,
/// including malformed tokens, reads as [`Meridiem::Pm`].
impl From<&str> for Meridiem {
    fn from(token: &str) -> Self {
        if token == "am" { Self::Am } else { Self::Pm }
    }
}

impl FromStr for Meridiem {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// Display patterns the adapter exposes to the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formats {
    pub year: String,
    pub date: String,
    pub time_24h: String,
    pub time_12h: String,
    pub year_month: String,
    pub date_time_24h: String,
    pub date_time_12h: String,
}

impl Default for Formats {
    fn default() -> Self {
        Self {
            year: YEAR_FORMAT.to_owned(),
            date: DATE_FORMAT.to_owned(),
            time_24h: TIME_24H_FORMAT.to_owned(),
            time_12h: TIME_12H_FORMAT.to_owned(),
            year_month: YEAR_MONTH_FORMAT.to_owned(),
            date_time_24h: DATE_TIME_24H_FORMAT.to_owned(),
            date_time_12h: DATE_TIME_12H_FORMAT.to_owned(),
        }
    }
}

/// Adapter configuration, fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Locale tag such as `th`, `th-TH` or `en_US`. Keeps the engine's
    /// locale when absent.
    pub locale: Option<String>,
    /// First day of the week. Keeps the engine's week start when absent.
    pub week_start: Option<Weekday>,
    pub formats: Formats,
}

impl Options {
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub const fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = Some(week_start);
        self
    }

    pub fn with_formats(mut self, formats: Formats) -> Self {
        self.formats = formats;
        self
    }
}
