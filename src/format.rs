//! Date pattern language shared by formatting and parsing.
//!
//! Patterns use Moment-style tokens (`BBBB`, `MMMM`, `Do`, `HH`, ...) with
//! `[...]` for escaped literal text. Names come from the locale database.

use crate::consts::BUDDHIST_ERA_OFFSET;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use pure_rust_locales::{Locale, locale_match};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    BuddhistYear,
    BuddhistYearShort,
    Year,
    YearShort,
    MonthName,
    MonthAbbr,
    MonthPadded,
    Month,
    DayOrdinal,
    DayPadded,
    Day,
    WeekdayName,
    WeekdayAbbr,
    WeekdayNarrow,
    WeekdayNumber,
    Hour24Padded,
    Hour24,
    Hour12Padded,
    Hour12,
    MinutePadded,
    Minute,
    SecondPadded,
    Second,
    Millisecond,
    MeridiemUpper,
    MeridiemLower,
}

// Longer tokens sharing a prefix must come first.
const TOKENS: &[(&str, Token)] = &[
    ("BBBB", Token::BuddhistYear),
    ("BB", Token::BuddhistYearShort),
    ("YYYY", Token::Year),
    ("YY", Token::YearShort),
    ("MMMM", Token::MonthName),
    ("MMM", Token::MonthAbbr),
    ("MM", Token::MonthPadded),
    ("M", Token::Month),
    ("Do", Token::DayOrdinal),
    ("DD", Token::DayPadded),
    ("D", Token::Day),
    ("dddd", Token::WeekdayName),
    ("ddd", Token::WeekdayAbbr),
    ("dd", Token::WeekdayNarrow),
    ("d", Token::WeekdayNumber),
    ("HH", Token::Hour24Padded),
    ("H", Token::Hour24),
    ("hh", Token::Hour12Padded),
    ("h", Token::Hour12),
    ("mm", Token::MinutePadded),
    ("m", Token::Minute),
    ("ss", Token::SecondPadded),
    ("s", Token::Second),
    ("SSS", Token::Millisecond),
    ("A", Token::MeridiemUpper),
    ("a", Token::MeridiemLower),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Item<'a> {
    Token(Token),
    Literal(&'a str),
}

pub(crate) fn tokenize(pattern: &str) -> Vec<Item<'_>> {
    let mut items = Vec::new();
    let mut rest = pattern;
    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(close) = rest.find(']') {
                items.push(Item::Literal(&rest[1..close]));
                rest = &rest[close + 1..];
                continue;
            }
        }
        if let Some((text, token)) = TOKENS.iter().find(|(text, _)| rest.starts_with(text)) {
            items.push(Item::Token(*token));
            rest = &rest[text.len()..];
        } else {
            let len = c.len_utf8();
            items.push(Item::Literal(&rest[..len]));
            rest = &rest[len..];
        }
    }
    items
}

/// Month, weekday and meridiem strings of one locale.
/// Weekday tables start on Sunday.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Names {
    months: &'static [&'static str],
    months_abbr: &'static [&'static str],
    weekdays: &'static [&'static str],
    weekdays_abbr: &'static [&'static str],
    am_pm: &'static [&'static str],
    english_ordinals: bool,
}

impl Names {
    pub(crate) fn for_locale(locale: Locale, english_ordinals: bool) -> Self {
        Self {
            months: locale_match!(locale => LC_TIME::MON),
            months_abbr: locale_match!(locale => LC_TIME::ABMON),
            weekdays: locale_match!(locale => LC_TIME::DAY),
            weekdays_abbr: locale_match!(locale => LC_TIME::ABDAY),
            am_pm: locale_match!(locale => LC_TIME::AM_PM),
            english_ordinals,
        }
    }

    fn pick(table: &[&'static str], index: usize) -> &'static str {
        table.get(index).copied().unwrap_or_default()
    }

    fn meridiem(&self, pm: bool) -> &'static str {
        match Self::pick(self.am_pm, usize::from(pm)) {
            "" if pm => "PM",
            "" => "AM",
            text => text,
        }
    }

    fn narrow_weekday(&self, index: usize) -> String {
        let abbr: String = Self::pick(self.weekdays_abbr, index).chars().take(2).collect();
        abbr.trim_end_matches('.').to_owned()
    }

    fn ordinal(&self, day: u32) -> String {
        if !self.english_ordinals {
            return day.to_string();
        }
        let suffix = match (day % 100, day % 10) {
            (11..=13, _) => "th",
            (_, 1) => "st",
            (_, 2) => "nd",
            (_, 3) => "rd",
            _ => "th",
        };
        format!("{day}{suffix}")
    }
}

pub(crate) fn render(items: &[Item<'_>], dt: &NaiveDateTime, names: &Names) -> String {
    let mut out = String::new();
    let month0 = dt.month0() as usize;
    let weekday = dt.weekday().num_days_from_sunday() as usize;
    let hour12 = match dt.hour() % 12 {
        0 => 12,
        h => h,
    };
    let be_year = dt.year() + BUDDHIST_ERA_OFFSET;

    for item in items {
        let token = match item {
            Item::Literal(text) => {
                out.push_str(text);
                continue;
            }
            Item::Token(token) => *token,
        };
        // Writing into a String can't fail
        let _ = match token {
            Token::BuddhistYear => write!(out, "{be_year}"),
            Token::BuddhistYearShort => write!(out, "{:02}", be_year.rem_euclid(100)),
            Token::Year => write!(out, "{:04}", dt.year()),
            Token::YearShort => write!(out, "{:02}", dt.year().rem_euclid(100)),
            Token::MonthName => write!(out, "{}", Names::pick(names.months, month0)),
            Token::MonthAbbr => write!(out, "{}", Names::pick(names.months_abbr, month0)),
            Token::MonthPadded => write!(out, "{:02}", dt.month()),
            Token::Month => write!(out, "{}", dt.month()),
            Token::DayOrdinal => write!(out, "{}", names.ordinal(dt.day())),
            Token::DayPadded => write!(out, "{:02}", dt.day()),
            Token::Day => write!(out, "{}", dt.day()),
            Token::WeekdayName => write!(out, "{}", Names::pick(names.weekdays, weekday)),
            Token::WeekdayAbbr => write!(out, "{}", Names::pick(names.weekdays_abbr, weekday)),
            Token::WeekdayNarrow => write!(out, "{}", names.narrow_weekday(weekday)),
            Token::WeekdayNumber => write!(out, "{weekday}"),
            Token::Hour24Padded => write!(out, "{:02}", dt.hour()),
            Token::Hour24 => write!(out, "{}", dt.hour()),
            Token::Hour12Padded => write!(out, "{hour12:02}"),
            Token::Hour12 => write!(out, "{hour12}"),
            Token::MinutePadded => write!(out, "{:02}", dt.minute()),
            Token::Minute => write!(out, "{}", dt.minute()),
            Token::SecondPadded => write!(out, "{:02}", dt.second()),
            Token::Second => write!(out, "{}", dt.second()),
            Token::Millisecond => write!(out, "{:03}", dt.nanosecond() / 1_000_000 % 1_000),
            Token::MeridiemUpper => write!(out, "{}", names.meridiem(dt.hour() >= 12)),
            Token::MeridiemLower => {
                write!(out, "{}", names.meridiem(dt.hour() >= 12).to_lowercase())
            }
        };
    }
    out
}

/// Fields read from an input string, before defaults are applied.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Parsed {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    millisecond: Option<u32>,
    pm: Option<bool>,
}

impl Parsed {
    /// Fills missing fields relative to `today` and builds the date.
    /// Returns `None` for impossible dates.
    pub(crate) fn resolve(&self, today: NaiveDate) -> Option<NaiveDateTime> {
        let year = self.year.unwrap_or_else(|| today.year());
        let month = match (self.year, self.month) {
            (_, Some(month)) => month,
            (Some(_), None) => 1,
            (None, None) => today.month(),
        };
        let day = match (self.day, self.year, self.month) {
            (Some(day), _, _) => day,
            (None, None, None) => today.day(),
            (None, _, _) => 1,
        };
        let mut hour = self.hour.unwrap_or(0);
        match self.pm {
            Some(true) if hour < 12 => hour += 12,
            Some(false) if hour == 12 => hour = 0,
            _ => {}
        }
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_milli_opt(
            hour,
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.millisecond.unwrap_or(0),
        )?;
        Some(date.and_time(time))
    }
}

struct Scanner<'a> {
    rest: &'a str,
}

impl Scanner<'_> {
    fn digits(&mut self, min: usize, max: usize) -> Option<u32> {
        let len = self
            .rest
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if len < min {
            return None;
        }
        let value = self.rest[..len].parse().ok()?;
        self.rest = &self.rest[len..];
        Some(value)
    }

    /// Index of the longest table entry the input starts with, ignoring ASCII case.
    fn name(&mut self, table: &[&str]) -> Option<usize> {
        let (index, len) = table
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .filter(|(_, name)| {
                self.rest
                    .get(..name.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(name))
            })
            .map(|(index, name)| (index, name.len()))
            .max_by_key(|(_, len)| *len)?;
        self.rest = &self.rest[len..];
        Some(index)
    }

    fn literal(&mut self, text: &str) -> Option<()> {
        self.rest = self.rest.strip_prefix(text)?;
        Some(())
    }

    fn meridiem(&mut self, names: &Names) -> Option<bool> {
        if let Some(index) = self.name(names.am_pm) {
            return Some(index == 1);
        }
        self.name(&["am", "pm"]).map(|index| index == 1)
    }

    fn ordinal_suffix(&mut self) {
        for suffix in ["st", "nd", "rd", "th"] {
            if let Some(rest) = self.rest.strip_prefix(suffix) {
                self.rest = rest;
                return;
            }
        }
    }
}

/// Reads `value` against a tokenized pattern. The whole input must be consumed.
pub(crate) fn scan(value: &str, items: &[Item<'_>], names: &Names) -> Option<Parsed> {
    let mut scanner = Scanner { rest: value };
    let mut parsed = Parsed::default();

    for item in items {
        let token = match item {
            Item::Literal(text) => {
                scanner.literal(text)?;
                continue;
            }
            Item::Token(token) => *token,
        };
        match token {
            Token::BuddhistYear => {
                let be_year = i32::try_from(scanner.digits(4, 4)?).ok()?;
                parsed.year = Some(be_year - BUDDHIST_ERA_OFFSET);
            }
            Token::BuddhistYearShort => {
                let be_year = i32::try_from(scanner.digits(2, 2)?).ok()? + 2500;
                parsed.year = Some(be_year - BUDDHIST_ERA_OFFSET);
            }
            Token::Year => parsed.year = Some(i32::try_from(scanner.digits(4, 4)?).ok()?),
            Token::YearShort => {
                let year = i32::try_from(scanner.digits(2, 2)?).ok()?;
                parsed.year = Some(year + if year > 68 { 1900 } else { 2000 });
            }
            Token::MonthName => parsed.month = Some(index_to_month(scanner.name(names.months)?)?),
            Token::MonthAbbr => {
                parsed.month = Some(index_to_month(scanner.name(names.months_abbr)?)?);
            }
            Token::MonthPadded | Token::Month => parsed.month = Some(scanner.digits(1, 2)?),
            Token::DayOrdinal => {
                parsed.day = Some(scanner.digits(1, 2)?);
                scanner.ordinal_suffix();
            }
            Token::DayPadded | Token::Day => parsed.day = Some(scanner.digits(1, 2)?),
            Token::WeekdayName => {
                scanner.name(names.weekdays)?;
            }
            Token::WeekdayAbbr | Token::WeekdayNarrow => {
                scanner.name(names.weekdays_abbr)?;
            }
            Token::WeekdayNumber => {
                scanner.digits(1, 1)?;
            }
            Token::Hour24Padded | Token::Hour24 | Token::Hour12Padded | Token::Hour12 => {
                parsed.hour = Some(scanner.digits(1, 2)?);
            }
            Token::MinutePadded | Token::Minute => parsed.minute = Some(scanner.digits(1, 2)?),
            Token::SecondPadded | Token::Second => parsed.second = Some(scanner.digits(1, 2)?),
            Token::Millisecond => parsed.millisecond = Some(scanner.digits(3, 3)?),
            Token::MeridiemUpper | Token::MeridiemLower => {
                parsed.pm = Some(scanner.meridiem(names)?);
            }
        }
    }

    scanner.rest.is_empty().then_some(parsed)
}

fn index_to_month(index: usize) -> Option<u32> {
    u32::try_from(index + 1).ok()
}
