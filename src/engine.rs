//! Calendar engine: locale binding, parsing, formatting and unit arithmetic
//! on [`ThaiDate`] values.

use crate::consts::{DEFAULT_LOCALE, LOCALE_ALIASES};
use crate::format::{self, Names};
use crate::types::{Field, Unit};
use crate::{DateError, ThaiDate};
use chrono::{
    DateTime, Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike,
    Weekday,
};
use log::debug;
use pure_rust_locales::Locale;

/// Source of "now" for the engine.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time of the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Calendar engine bound to one locale and week start.
#[derive(Debug, Clone)]
pub struct Engine<C = SystemClock> {
    tag: String,
    locale: Locale,
    names: Names,
    week_start: Weekday,
    clock: C,
}

impl Default for Engine<SystemClock> {
    fn default() -> Self {
        Self::bind(DEFAULT_LOCALE, Locale::th_TH, Weekday::Sun, SystemClock)
    }
}

impl Engine<SystemClock> {
    /// Engine for a locale tag, using the host clock.
    ///
    /// # Errors
    /// Returns `DateError::UnknownLocale` if the tag names no known locale.
    pub fn new(tag: &str) -> Result<Self, DateError> {
        Self::default().with_locale(tag)
    }
}

impl<C: Clock> Engine<C> {
    fn bind(tag: &str, locale: Locale, week_start: Weekday, clock: C) -> Self {
        let english_ordinals = tag.starts_with("en");
        Self {
            tag: tag.to_owned(),
            locale,
            names: Names::for_locale(locale, english_ordinals),
            week_start,
            clock,
        }
    }

    /// Re-binds the engine to another locale tag (`th`, `th-TH`, `en_US`, ...).
    ///
    /// # Errors
    /// Returns `DateError::UnknownLocale` if the tag names no known locale.
    pub fn with_locale(self, tag: &str) -> Result<Self, DateError> {
        let locale = resolve_locale(tag)?;
        Ok(Self::bind(tag, locale, self.week_start, self.clock))
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    /// Swaps the clock, keeping locale and week start.
    pub fn with_clock<D: Clock>(self, clock: D) -> Engine<D> {
        Engine {
            tag: self.tag,
            locale: self.locale,
            names: self.names,
            week_start: self.week_start,
            clock,
        }
    }

    /// The locale tag as configured
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub const fn locale(&self) -> Locale {
        self.locale
    }

    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn now(&self) -> ThaiDate {
        ThaiDate::new(self.clock.now())
    }

    /// Reads `value` with a pattern such as `DD/MM/BBBB`. Fields absent from
    /// the pattern default relative to the clock's current date.
    ///
    /// # Errors
    /// Returns `DateError::InvalidFormat` if the value doesn't match the
    /// pattern or names an impossible date.
    pub fn parse(&self, value: &str, pattern: &str) -> Result<ThaiDate, DateError> {
        let items = format::tokenize(pattern);
        format::scan(value, &items, &self.names)
            .and_then(|parsed| parsed.resolve(self.clock.now().date()))
            .map(ThaiDate::new)
            .ok_or_else(|| {
                debug!("cannot read {value:?} as {pattern:?}");
                DateError::InvalidFormat {
                    value: value.to_owned(),
                    format: pattern.to_owned(),
                }
            })
    }

    /// Reads an ISO 8601 date, or an RFC 3339 timestamp converted to local time.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the value has neither shape.
    pub fn parse_iso(&self, value: &str) -> Result<ThaiDate, DateError> {
        value.parse::<ThaiDate>().or_else(|err| {
            DateTime::parse_from_rfc3339(value.trim())
                .map(|dt| ThaiDate::new(dt.with_timezone(&Local).naive_local()))
                .map_err(|_| err)
        })
    }

    pub fn is_valid(&self, value: &str) -> bool {
        self.parse_iso(value).is_ok()
    }

    pub fn format(&self, date: &ThaiDate, pattern: &str) -> String {
        format::render(&format::tokenize(pattern), &date.datetime(), &self.names)
    }

    /// Days between the week start and `day`
    fn days_into_week(&self, day: NaiveDate) -> u64 {
        let offset = (day.weekday().num_days_from_sunday() + 7
            - self.week_start.num_days_from_sunday())
            % 7;
        u64::from(offset)
    }

    fn first_day_of_week(&self, day: NaiveDate) -> NaiveDate {
        day.checked_sub_days(Days::new(self.days_into_week(day)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// First instant of the unit containing `date`.
    pub fn start_of(&self, date: &ThaiDate, unit: Unit) -> ThaiDate {
        let dt = date.datetime();
        let day = dt.date();
        let start = match unit {
            Unit::Millisecond => Some(dt),
            Unit::Second => dt.with_nanosecond(0),
            Unit::Minute => day.and_hms_opt(dt.hour(), dt.minute(), 0),
            Unit::Hour => day.and_hms_opt(dt.hour(), 0, 0),
            Unit::Day => day.and_hms_opt(0, 0, 0),
            Unit::Week => self.first_day_of_week(day).and_hms_opt(0, 0, 0),
            Unit::Month => day.with_day(1).and_then(|d| d.and_hms_opt(0, 0, 0)),
            Unit::Year => {
                NaiveDate::from_ymd_opt(day.year(), 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
            }
        };
        start.map_or(*date, ThaiDate::new)
    }

    /// Last instant (`.999`) of the unit containing `date`.
    pub fn end_of(&self, date: &ThaiDate, unit: Unit) -> ThaiDate {
        let dt = date.datetime();
        let day = dt.date();
        let last_day = match unit {
            Unit::Week => Some(
                self.first_day_of_week(day)
                    .checked_add_days(Days::new(6))
                    .unwrap_or(NaiveDate::MAX),
            ),
            Unit::Month => NaiveDate::from_ymd_opt(
                day.year(),
                day.month(),
                days_in_month(day.year(), day.month()),
            ),
            Unit::Year => NaiveDate::from_ymd_opt(day.year(), 12, 31),
            _ => Some(day),
        };
        let end = match unit {
            Unit::Millisecond => Some(dt),
            Unit::Second => dt.with_nanosecond(999_000_000),
            Unit::Minute => day.and_hms_milli_opt(dt.hour(), dt.minute(), 59, 999),
            Unit::Hour => day.and_hms_milli_opt(dt.hour(), 59, 59, 999),
            Unit::Day | Unit::Week | Unit::Month | Unit::Year => {
                last_day.and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
            }
        };
        end.map_or(*date, ThaiDate::new)
    }

    /// Moves `date` by `amount` units. Month and year steps keep the
    /// day-of-month, clamped to the length of the target month.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result isn't representable.
    pub fn add(&self, date: &ThaiDate, amount: i64, unit: Unit) -> Result<ThaiDate, DateError> {
        let dt = date.datetime();
        let shifted = match unit {
            Unit::Millisecond => {
                TimeDelta::try_milliseconds(amount).and_then(|d| dt.checked_add_signed(d))
            }
            Unit::Second => TimeDelta::try_seconds(amount).and_then(|d| dt.checked_add_signed(d)),
            Unit::Minute => TimeDelta::try_minutes(amount).and_then(|d| dt.checked_add_signed(d)),
            Unit::Hour => TimeDelta::try_hours(amount).and_then(|d| dt.checked_add_signed(d)),
            Unit::Day => shift_days(dt, amount),
            Unit::Week => amount.checked_mul(7).and_then(|days| shift_days(dt, days)),
            Unit::Month => shift_months(dt, amount),
            Unit::Year => amount.checked_mul(12).and_then(|months| shift_months(dt, months)),
        };
        shifted
            .map(ThaiDate::new)
            .ok_or(DateError::OutOfRange { amount, unit })
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the result isn't representable.
    pub fn subtract(
        &self,
        date: &ThaiDate,
        amount: i64,
        unit: Unit,
    ) -> Result<ThaiDate, DateError> {
        let negated = amount
            .checked_neg()
            .ok_or(DateError::OutOfRange { amount, unit })?;
        self.add(date, negated, unit)
    }

    /// Returns `date` with one field replaced. Values outside the field's
    /// range roll into the next larger unit (hour 25 is 01:00 the next day,
    /// month 12 is January of the next year).
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result isn't representable.
    pub fn set(&self, date: &ThaiDate, field: Field, value: i64) -> Result<ThaiDate, DateError> {
        let dt = date.datetime();
        let updated = match field {
            Field::Year => i32::try_from(value)
                .ok()
                .and_then(|year| with_year_month(dt, year, dt.month())),
            Field::Month => set_month(dt, value),
            Field::Date => dt
                .with_day(1)
                .and_then(|first| shift_days(first, value.checked_sub(1)?)),
            Field::Hour => dt
                .with_hour(0)
                .zip(TimeDelta::try_hours(value))
                .and_then(|(base, delta)| base.checked_add_signed(delta)),
            Field::Minute => dt
                .with_minute(0)
                .zip(TimeDelta::try_minutes(value))
                .and_then(|(base, delta)| base.checked_add_signed(delta)),
            Field::Second => dt
                .with_second(0)
                .zip(TimeDelta::try_seconds(value))
                .and_then(|(base, delta)| base.checked_add_signed(delta)),
            Field::Millisecond => dt
                .with_nanosecond(0)
                .zip(TimeDelta::try_milliseconds(value))
                .and_then(|(base, delta)| base.checked_add_signed(delta)),
        };
        updated.map(ThaiDate::new).ok_or(DateError::OutOfRange {
            amount: value,
            unit: field_unit(field),
        })
    }

    /// With a unit, true iff `other` lies inside the unit containing `date`.
    pub fn is_same(&self, date: &ThaiDate, other: &ThaiDate, unit: Option<Unit>) -> bool {
        match unit {
            None | Some(Unit::Millisecond) => date == other,
            Some(unit) => self.start_of(date, unit) <= *other && *other <= self.end_of(date, unit),
        }
    }

    /// With a unit, true iff `other` lies before the unit containing `date`.
    pub fn is_after(&self, date: &ThaiDate, other: &ThaiDate, unit: Option<Unit>) -> bool {
        match unit {
            None | Some(Unit::Millisecond) => date > other,
            Some(unit) => *other < self.start_of(date, unit),
        }
    }

    /// With a unit, true iff `other` lies after the unit containing `date`.
    pub fn is_before(&self, date: &ThaiDate, other: &ThaiDate, unit: Option<Unit>) -> bool {
        match unit {
            None | Some(Unit::Millisecond) => date < other,
            Some(unit) => self.end_of(date, unit) < *other,
        }
    }

    /// `date - comparing` in `unit` (milliseconds by default), truncated
    /// toward zero unless `float`.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if a month anchor isn't representable.
    #[allow(clippy::cast_precision_loss)]
    pub fn diff(
        &self,
        date: &ThaiDate,
        comparing: &ThaiDate,
        unit: Option<Unit>,
        float: bool,
    ) -> Result<f64, DateError> {
        let unit = unit.unwrap_or(Unit::Millisecond);
        let (a, b) = (date.datetime(), comparing.datetime());
        let result = match unit.fixed_millis() {
            Some(size) => millis_between(a, b) / size as f64,
            None => {
                let months =
                    month_diff(a, b).ok_or(DateError::OutOfRange { amount: 1, unit })?;
                if unit == Unit::Year { months / 12.0 } else { months }
            }
        };
        // `+ 0.0` folds a negative zero into zero
        Ok(if float { result } else { result.trunc() + 0.0 })
    }
}

fn resolve_locale(tag: &str) -> Result<Locale, DateError> {
    let normalized = tag.trim().replace('-', "_");
    let candidate = match LOCALE_ALIASES.iter().find(|(alias, _)| *alias == normalized) {
        Some((_, full)) => (*full).to_owned(),
        None if !normalized.contains('_') && !normalized.is_empty() => {
            format!("{normalized}_{}", normalized.to_uppercase())
        }
        None => normalized.clone(),
    };
    Locale::try_from(candidate.as_str())
        .or_else(|_| Locale::try_from(normalized.as_str()))
        .map_err(|_| DateError::UnknownLocale(tag.to_owned()))
}

const fn field_unit(field: Field) -> Unit {
    match field {
        Field::Year => Unit::Year,
        Field::Month => Unit::Month,
        Field::Date => Unit::Day,
        Field::Hour => Unit::Hour,
        Field::Minute => Unit::Minute,
        Field::Second => Unit::Second,
        Field::Millisecond => Unit::Millisecond,
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|day| NaiveDate::from_ymd_opt(year, month, *day).is_some())
        .unwrap_or(28)
}

fn with_year_month(dt: NaiveDateTime, year: i32, month: u32) -> Option<NaiveDateTime> {
    let day = dt.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.and_time(dt.time()))
}

fn set_month(dt: NaiveDateTime, month0: i64) -> Option<NaiveDateTime> {
    let total = i64::from(dt.year()).checked_mul(12)?.checked_add(month0)?;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    with_year_month(dt, year, month)
}

fn shift_days(dt: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    let magnitude = Days::new(days.unsigned_abs());
    if days < 0 {
        dt.checked_sub_days(magnitude)
    } else {
        dt.checked_add_days(magnitude)
    }
}

fn shift_months(dt: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months < 0 {
        dt.checked_sub_months(magnitude)
    } else {
        dt.checked_add_months(magnitude)
    }
}

#[allow(clippy::cast_precision_loss)]
fn millis_between(a: NaiveDateTime, b: NaiveDateTime) -> f64 {
    a.signed_duration_since(b).num_milliseconds() as f64
}

/// Fractional months from `b` back to `a`, anchored on `a`'s day-of-month
/// and interpolated across the month that contains `b`.
#[allow(clippy::cast_precision_loss)]
fn month_diff(a: NaiveDateTime, b: NaiveDateTime) -> Option<f64> {
    if a.day() < b.day() {
        return month_diff(b, a).map(|months| -months);
    }
    let whole = (i64::from(b.year()) - i64::from(a.year())) * 12
        + (i64::from(b.month()) - i64::from(a.month()));
    let anchor = shift_months(a, whole)?;
    let behind = b < anchor;
    let neighbour = shift_months(a, whole + if behind { -1 } else { 1 })?;
    let span = if behind {
        millis_between(anchor, neighbour)
    } else {
        millis_between(neighbour, anchor)
    };
    let months = -(whole as f64 + millis_between(b, anchor) / span);
    Some(if months.is_nan() { 0.0 } else { months + 0.0 })
}
