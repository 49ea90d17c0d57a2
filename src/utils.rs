//! Date-picker adapter for the Thai solar calendar.
//!
//! [`ThaiDateUtils`] gives a picker component everything it needs to render
//! month views, year lists and header text without knowing anything about
//! Buddhist Era years or Thai month names.

use crate::consts::{
    DATE_PICKER_HEADER_FORMAT, DATE_TIME_PICKER_HEADER_FORMAT, DAY_TEXT_FORMAT, DAYS_IN_WEEK,
    HOUR_12H_TEXT_FORMAT, HOUR_24H_TEXT_FORMAT, MINUTE_TEXT_FORMAT, MONTH_TEXT_FORMAT,
    MONTHS_IN_YEAR, SECOND_TEXT_FORMAT, WEEKDAY_LABEL_FORMAT,
};
use crate::engine::{Clock, Engine, SystemClock};
use crate::types::{Field, Formats, Meridiem, Options, Unit};
use crate::{DateError, ThaiDate};
use log::{debug, trace};

/// Week rows of a month view, each holding seven consecutive days.
pub type WeekGrid = Vec<Vec<ThaiDate>>;

/// The first day of each month of one year.
pub type MonthArray = Vec<ThaiDate>;

/// The first instant of each year in a span of years.
pub type YearRange = Vec<ThaiDate>;

/// Calendar adapter bound to one locale and set of display formats.
///
/// The adapter holds no date state; every operation is a pure function of
/// its arguments and the configuration fixed at construction.
#[derive(Debug, Clone)]
pub struct ThaiDateUtils<C = SystemClock> {
    engine: Engine<C>,
    formats: Formats,
}

impl Default for ThaiDateUtils<SystemClock> {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            formats: Formats::default(),
        }
    }
}

impl ThaiDateUtils<SystemClock> {
    /// Adapter over the default engine (Thai locale, host clock).
    ///
    /// # Errors
    /// Returns `DateError::UnknownLocale` if `options.locale` names no known locale.
    pub fn new(options: Options) -> Result<Self, DateError> {
        Self::with_engine(options, Engine::default())
    }
}

impl<C: Clock> ThaiDateUtils<C> {
    /// Adapter over an injected engine. A locale or week start given in
    /// `options` re-binds the engine; otherwise the engine's own are kept.
    ///
    /// # Errors
    /// Returns `DateError::UnknownLocale` if `options.locale` names no known locale.
    pub fn with_engine(options: Options, engine: Engine<C>) -> Result<Self, DateError> {
        let engine = match options.locale.as_deref() {
            Some(tag) => engine.with_locale(tag)?,
            None => engine,
        };
        let engine = match options.week_start {
            Some(week_start) => engine.with_week_start(week_start),
            None => engine,
        };
        debug!(
            "date adapter bound to locale {} (week starts {})",
            engine.tag(),
            engine.week_start()
        );
        Ok(Self {
            engine,
            formats: options.formats,
        })
    }

    pub const fn engine(&self) -> &Engine<C> {
        &self.engine
    }

    pub const fn formats(&self) -> &Formats {
        &self.formats
    }

    pub fn year_format(&self) -> &str {
        &self.formats.year
    }

    pub fn date_format(&self) -> &str {
        &self.formats.date
    }

    pub fn time_24h_format(&self) -> &str {
        &self.formats.time_24h
    }

    pub fn time_12h_format(&self) -> &str {
        &self.formats.time_12h
    }

    pub fn year_month_format(&self) -> &str {
        &self.formats.year_month
    }

    pub fn date_time_24h_format(&self) -> &str {
        &self.formats.date_time_24h
    }

    pub fn date_time_12h_format(&self) -> &str {
        &self.formats.date_time_12h
    }

    // --- reading values ---

    pub fn now(&self) -> ThaiDate {
        self.engine.now()
    }

    /// Reads `value` with `format`. An empty value is no date rather than an error.
    ///
    /// # Errors
    /// Returns `DateError::InvalidFormat` if a non-empty value doesn't match.
    pub fn parse(&self, value: &str, format: &str) -> Result<Option<ThaiDate>, DateError> {
        if value.is_empty() {
            return Ok(None);
        }
        self.engine.parse(value, format).map(Some)
    }

    /// Reads an ISO date. An absent or empty value is no date rather than an error.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if a non-empty value isn't an ISO date.
    pub fn date(&self, value: Option<&str>) -> Result<Option<ThaiDate>, DateError> {
        match value {
            None | Some("") => Ok(None),
            Some(value) => self.engine.parse_iso(value).map(Some),
        }
    }

    pub fn is_valid(&self, value: &str) -> bool {
        self.engine.is_valid(value)
    }

    pub const fn is_null(&self, date: Option<&ThaiDate>) -> bool {
        date.is_none()
    }

    // --- comparison ---

    /// Both absent is equal; one absent is never equal; otherwise exact-instant equality.
    pub fn is_equal(&self, value: Option<&ThaiDate>, comparing: Option<&ThaiDate>) -> bool {
        match (value, comparing) {
            (None, None) => true,
            (Some(value), Some(comparing)) => self.engine.is_same(value, comparing, None),
            _ => false,
        }
    }

    pub fn is_same_day(&self, date: &ThaiDate, comparing: &ThaiDate) -> bool {
        self.engine.is_same(date, comparing, Some(Unit::Day))
    }

    pub fn is_same_month(&self, date: &ThaiDate, comparing: &ThaiDate) -> bool {
        self.engine.is_same(date, comparing, Some(Unit::Month))
    }

    pub fn is_same_year(&self, date: &ThaiDate, comparing: &ThaiDate) -> bool {
        self.engine.is_same(date, comparing, Some(Unit::Year))
    }

    pub fn is_same_hour(&self, date: &ThaiDate, comparing: &ThaiDate) -> bool {
        self.engine.is_same(date, comparing, Some(Unit::Hour))
    }

    pub fn is_after(&self, date: &ThaiDate, value: &ThaiDate) -> bool {
        self.engine.is_after(date, value, None)
    }

    pub fn is_before(&self, date: &ThaiDate, value: &ThaiDate) -> bool {
        self.engine.is_before(date, value, None)
    }

    pub fn is_after_day(&self, date: &ThaiDate, value: &ThaiDate) -> bool {
        self.engine.is_after(date, value, Some(Unit::Day))
    }

    pub fn is_before_day(&self, date: &ThaiDate, value: &ThaiDate) -> bool {
        self.engine.is_before(date, value, Some(Unit::Day))
    }

    pub fn is_after_year(&self, date: &ThaiDate, value: &ThaiDate) -> bool {
        self.engine.is_after(date, value, Some(Unit::Year))
    }

    pub fn is_before_year(&self, date: &ThaiDate, value: &ThaiDate) -> bool {
        self.engine.is_before(date, value, Some(Unit::Year))
    }

    /// `date - comparing` in `unit` (milliseconds by default).
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the months between the dates can't be measured.
    pub fn diff(
        &self,
        date: &ThaiDate,
        comparing: &ThaiDate,
        unit: Option<Unit>,
        float: bool,
    ) -> Result<f64, DateError> {
        self.engine.diff(date, comparing, unit, float)
    }

    // --- fields ---

    pub fn year(&self, date: &ThaiDate) -> i32 {
        date.year()
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the year isn't representable.
    pub fn set_year(&self, date: &ThaiDate, year: i64) -> Result<ThaiDate, DateError> {
        self.engine.set(date, Field::Year, year)
    }

    /// Month index, 0-based
    pub fn month(&self, date: &ThaiDate) -> u32 {
        date.month0()
    }

    /// Sets the 0-based month index, clamping the day to the month's length.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result isn't representable.
    pub fn set_month(&self, date: &ThaiDate, month: i64) -> Result<ThaiDate, DateError> {
        self.engine.set(date, Field::Month, month)
    }

    pub fn hours(&self, date: &ThaiDate) -> u32 {
        date.hour()
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the result isn't representable.
    pub fn set_hours(&self, date: &ThaiDate, hours: i64) -> Result<ThaiDate, DateError> {
        self.engine.set(date, Field::Hour, hours)
    }

    pub fn minutes(&self, date: &ThaiDate) -> u32 {
        date.minute()
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the result isn't representable.
    pub fn set_minutes(&self, date: &ThaiDate, minutes: i64) -> Result<ThaiDate, DateError> {
        self.engine.set(date, Field::Minute, minutes)
    }

    pub fn seconds(&self, date: &ThaiDate) -> u32 {
        date.second()
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the result isn't representable.
    pub fn set_seconds(&self, date: &ThaiDate, seconds: i64) -> Result<ThaiDate, DateError> {
        self.engine.set(date, Field::Second, seconds)
    }

    // --- arithmetic ---

    /// Moves `date` by `count` days; negative counts step backwards.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result isn't representable.
    pub fn add_days(&self, date: &ThaiDate, count: i64) -> Result<ThaiDate, DateError> {
        if count < 0 {
            let back = count.checked_abs().ok_or(DateError::OutOfRange {
                amount: count,
                unit: Unit::Day,
            })?;
            self.engine.subtract(date, back, Unit::Day)
        } else {
            self.engine.add(date, count, Unit::Day)
        }
    }

    pub fn start_of_day(&self, date: &ThaiDate) -> ThaiDate {
        self.engine.start_of(date, Unit::Day)
    }

    pub fn end_of_day(&self, date: &ThaiDate) -> ThaiDate {
        self.engine.end_of(date, Unit::Day)
    }

    pub fn start_of_month(&self, date: &ThaiDate) -> ThaiDate {
        self.engine.start_of(date, Unit::Month)
    }

    pub fn end_of_month(&self, date: &ThaiDate) -> ThaiDate {
        self.engine.end_of(date, Unit::Month)
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the result isn't representable.
    pub fn next_month(&self, date: &ThaiDate) -> Result<ThaiDate, DateError> {
        self.engine.add(date, 1, Unit::Month)
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the result isn't representable.
    pub fn previous_month(&self, date: &ThaiDate) -> Result<ThaiDate, DateError> {
        self.engine.subtract(date, 1, Unit::Month)
    }

    /// `date` with `time`'s hour and minute. Seconds stay those of `date`.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result isn't representable.
    pub fn merge_date_and_time(
        &self,
        date: &ThaiDate,
        time: &ThaiDate,
    ) -> Result<ThaiDate, DateError> {
        let with_hours = self.set_hours(date, i64::from(self.hours(time)))?;
        self.set_minutes(&with_hours, i64::from(self.minutes(time)))
    }

    // --- grids and ranges ---

    /// The 1st of every month in `date`'s year, January first.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` at the end of the representable range.
    pub fn month_array(&self, date: &ThaiDate) -> Result<MonthArray, DateError> {
        let mut months = Vec::with_capacity(MONTHS_IN_YEAR);
        let mut current = self.engine.start_of(date, Unit::Year);
        months.push(current);
        while months.len() < MONTHS_IN_YEAR {
            current = self.next_month(&current)?;
            months.push(current);
        }
        Ok(months)
    }

    /// Week rows covering the month of `date`, from the start of the week
    /// holding the 1st to the end of the week holding the last day. Four to
    /// six rows depending on how the month falls.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` at the ends of the representable range.
    pub fn week_array(&self, date: &ThaiDate) -> Result<WeekGrid, DateError> {
        let start = self
            .engine
            .start_of(&self.engine.start_of(date, Unit::Month), Unit::Week);
        let end = self
            .engine
            .end_of(&self.engine.end_of(date, Unit::Month), Unit::Week);

        let mut weeks: WeekGrid = Vec::new();
        let mut current = start;
        let mut count = 0;
        // `end` is the last millisecond of the final week, so its day is included
        while self.engine.is_before(&current, &end, None) {
            if count % DAYS_IN_WEEK == 0 {
                weeks.push(Vec::with_capacity(DAYS_IN_WEEK));
            }
            if let Some(week) = weeks.last_mut() {
                week.push(current);
            }
            current = self.engine.add(&current, 1, Unit::Day)?;
            count += 1;
        }
        trace!("week grid for {date}: {} rows", weeks.len());
        Ok(weeks)
    }

    /// Start of every year from `start`'s year through `end`'s year.
    /// Empty when `start` falls in a later year than `end`.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` at the end of the representable range.
    pub fn year_range(&self, start: &ThaiDate, end: &ThaiDate) -> Result<YearRange, DateError> {
        let start_date = self.engine.start_of(start, Unit::Year);
        let end_date = self.engine.end_of(end, Unit::Year);

        let mut years = Vec::new();
        let mut current = start_date;
        while self.engine.is_before(&current, &end_date, None) {
            years.push(current);
            if current.year() == end_date.year() {
                break;
            }
            current = self.engine.add(&current, 1, Unit::Year)?;
        }
        trace!("year range {start}..{end}: {} years", years.len());
        Ok(years)
    }

    /// Narrow weekday labels for the header row, starting on the week start.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the clock sits at the end of the
    /// representable range.
    pub fn weekdays(&self) -> Result<Vec<String>, DateError> {
        let start = self.engine.start_of(&self.now(), Unit::Week);
        (0_i64..)
            .take(DAYS_IN_WEEK)
            .map(|offset| {
                let day = self.engine.add(&start, offset, Unit::Day)?;
                Ok(self.format(&day, WEEKDAY_LABEL_FORMAT))
            })
            .collect()
    }

    // --- text ---

    pub fn format(&self, date: &ThaiDate, format: &str) -> String {
        self.engine.format(date, format)
    }

    /// Numbers are shown as given.
    pub fn format_number<'a>(&self, number: &'a str) -> &'a str {
        number
    }

    /// `AM` for the token `am`, `PM` for anything else.
    pub fn meridiem_text(&self, ampm: &str) -> &'static str {
        Meridiem::from(ampm).as_str()
    }

    pub fn month_text(&self, date: &ThaiDate) -> String {
        self.format(date, MONTH_TEXT_FORMAT)
    }

    /// Month name and Buddhist Era year, for the month view header.
    pub fn calendar_header_text(&self, date: &ThaiDate) -> String {
        self.format(date, &self.formats.year_month)
    }

    pub fn year_text(&self, date: &ThaiDate) -> String {
        self.format(date, &self.formats.year)
    }

    pub fn date_picker_header_text(&self, date: &ThaiDate) -> String {
        self.format(date, DATE_PICKER_HEADER_FORMAT)
    }

    pub fn date_time_picker_header_text(&self, date: &ThaiDate) -> String {
        self.format(date, DATE_TIME_PICKER_HEADER_FORMAT)
    }

    pub fn day_text(&self, date: &ThaiDate) -> String {
        self.format(date, DAY_TEXT_FORMAT)
    }

    pub fn hour_text(&self, date: &ThaiDate, ampm: bool) -> String {
        let format = if ampm {
            HOUR_12H_TEXT_FORMAT
        } else {
            HOUR_24H_TEXT_FORMAT
        };
        self.format(date, format)
    }

    pub fn minute_text(&self, date: &ThaiDate) -> String {
        self.format(date, MINUTE_TEXT_FORMAT)
    }

    pub fn second_text(&self, date: &ThaiDate) -> String {
        self.format(date, SECOND_TEXT_FORMAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FixedClock;
    use chrono::{NaiveDate, TimeDelta, Weekday};

    fn date(y: i32, m: u32, d: u32) -> ThaiDate {
        ThaiDate::from_ymd(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> ThaiDate {
        ThaiDate::from_ymd_hms(y, m, d, h, min, s).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2026, 10, 16)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        )
    }

    fn utils() -> ThaiDateUtils<FixedClock> {
        ThaiDateUtils::with_engine(Options::default(), Engine::default().with_clock(clock()))
            .unwrap()
    }

    fn english() -> ThaiDateUtils<FixedClock> {
        ThaiDateUtils::with_engine(
            Options::default().with_locale("en"),
            Engine::default().with_clock(clock()),
        )
        .unwrap()
    }

    fn months_between(from: (i32, u32), to: (i32, u32)) -> impl Iterator<Item = (i32, u32)> {
        let first = from.0 * 12 + from.1 as i32 - 1;
        let last = to.0 * 12 + to.1 as i32 - 1;
        (first..=last).map(|n| (n.div_euclid(12), n.rem_euclid(12) as u32 + 1))
    }

    #[test]
    fn test_construction() {
        let u = ThaiDateUtils::new(Options::default()).unwrap();
        assert_eq!(u.engine().tag(), "th_TH");
        assert_eq!(u.year_format(), "BBBB");
        assert_eq!(u.date_format(), "MMMM Do");
        assert_eq!(u.time_24h_format(), "HH:mm");
        assert_eq!(u.time_12h_format(), "hh:mm A");
        assert_eq!(u.year_month_format(), "MMMM BBBB");
        assert_eq!(u.date_time_24h_format(), "MMMM Do HH:mm");
        assert_eq!(u.date_time_12h_format(), "MMMM Do hh:mm a");

        let u = ThaiDateUtils::default();
        assert_eq!(u.engine().locale(), crate::Locale::th_TH);
    }

    #[test]
    fn test_construction_unknown_locale() {
        let result = ThaiDateUtils::new(Options::default().with_locale("zz-ZZ"));
        assert!(matches!(result, Err(DateError::UnknownLocale(_))));
    }

    #[test]
    fn test_options_rebind_injected_engine() {
        let engine = Engine::new("en").unwrap().with_clock(clock());
        let kept = ThaiDateUtils::with_engine(Options::default(), engine.clone()).unwrap();
        assert_eq!(kept.engine().tag(), "en");

        let rebound = ThaiDateUtils::with_engine(
            Options::default()
                .with_locale("th")
                .with_week_start(Weekday::Mon),
            engine,
        )
        .unwrap();
        assert_eq!(rebound.engine().locale(), crate::Locale::th_TH);
        assert_eq!(rebound.engine().week_start(), Weekday::Mon);
    }

    // --- reading values ---

    #[test]
    fn test_parse_empty_is_none() {
        let u = utils();
        assert_eq!(u.parse("", "DD/MM/BBBB").unwrap(), None);
        assert_eq!(
            u.parse("15/02/2567", "DD/MM/BBBB").unwrap(),
            Some(date(2024, 2, 15))
        );
        assert!(matches!(
            u.parse("15-02-2567", "DD/MM/BBBB"),
            Err(DateError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_date_absent_is_none() {
        let u = utils();
        assert_eq!(u.date(None).unwrap(), None);
        assert_eq!(u.date(Some("")).unwrap(), None);
        assert_eq!(u.date(Some("2024-02-15")).unwrap(), Some(date(2024, 2, 15)));
        assert!(matches!(
            u.date(Some("garbage")),
            Err(DateError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_is_valid_and_is_null() {
        let u = utils();
        assert!(u.is_valid("2024-02-29"));
        assert!(!u.is_valid("2024-02-30"));
        assert!(u.is_null(None));
        assert!(!u.is_null(Some(&date(2024, 1, 1))));
    }

    #[test]
    fn test_now() {
        assert_eq!(utils().now(), at(2026, 10, 16, 9, 30, 0));
    }

    // --- comparison ---

    #[test]
    fn test_is_equal_null_handling() {
        let u = utils();
        let d = date(2024, 2, 15);
        assert!(u.is_equal(None, None));
        assert!(!u.is_equal(None, Some(&d)));
        assert!(!u.is_equal(Some(&d), None));
        assert!(u.is_equal(Some(&d), Some(&date(2024, 2, 15))));
        assert!(!u.is_equal(Some(&d), Some(&at(2024, 2, 15, 0, 0, 1))));
    }

    #[test]
    fn test_is_same_units() {
        let u = utils();
        let a = at(2024, 2, 15, 10, 5, 0);
        assert!(u.is_same_day(&a, &at(2024, 2, 15, 23, 0, 0)));
        assert!(!u.is_same_day(&a, &date(2024, 2, 16)));
        assert!(u.is_same_month(&a, &date(2024, 2, 29)));
        assert!(!u.is_same_month(&a, &date(2023, 2, 15)));
        assert!(u.is_same_year(&a, &date(2024, 12, 31)));
        assert!(!u.is_same_year(&a, &date(2025, 1, 1)));
        assert!(u.is_same_hour(&a, &at(2024, 2, 15, 10, 59, 59)));
        assert!(!u.is_same_hour(&a, &at(2024, 2, 15, 11, 0, 0)));
    }

    #[test]
    fn test_is_after_and_before() {
        let u = utils();
        let a = at(2024, 2, 15, 10, 0, 0);
        let b = at(2024, 2, 15, 10, 1, 0);
        assert!(u.is_before(&a, &b));
        assert!(u.is_after(&b, &a));
        assert!(!u.is_before(&a, &a));
        assert!(!u.is_after(&a, &a));
    }

    #[test]
    fn test_day_granularity_equal_day_is_neither() {
        let u = utils();
        for d in [
            date(2024, 2, 15),
            at(2024, 2, 15, 23, 59, 59),
            at(1999, 12, 31, 12, 0, 0),
        ] {
            assert!(!u.is_after_day(&d, &d));
            assert!(!u.is_before_day(&d, &d));
        }
        let morning = at(2024, 2, 15, 1, 0, 0);
        let night = at(2024, 2, 15, 23, 0, 0);
        assert!(!u.is_after_day(&night, &morning));
        assert!(!u.is_before_day(&morning, &night));
        assert!(u.is_before_day(&night, &date(2024, 2, 16)));
        assert!(u.is_after_day(&date(2024, 2, 16), &night));
    }

    #[test]
    fn test_year_granularity() {
        let u = utils();
        let jan = date(2024, 1, 1);
        let dec = at(2024, 12, 31, 23, 59, 59);
        assert!(!u.is_before_year(&jan, &dec));
        assert!(!u.is_after_year(&dec, &jan));
        assert!(u.is_before_year(&dec, &date(2025, 1, 1)));
        assert!(u.is_after_year(&date(2025, 1, 1), &dec));
    }

    #[test]
    fn test_diff() {
        let u = utils();
        let a = date(2024, 3, 1);
        let b = date(2024, 2, 1);
        assert_eq!(u.diff(&a, &b, Some(Unit::Day), false).unwrap(), 29.0);
        assert_eq!(u.diff(&a, &b, Some(Unit::Month), false).unwrap(), 1.0);
        assert_eq!(u.diff(&a, &b, None, false).unwrap(), 29.0 * 86_400_000.0);
    }

    // --- fields ---

    #[test]
    fn test_field_getters() {
        let u = utils();
        let d = at(2024, 6, 10, 14, 25, 45);
        assert_eq!(u.year(&d), 2024);
        assert_eq!(u.month(&d), 5);
        assert_eq!(u.hours(&d), 14);
        assert_eq!(u.minutes(&d), 25);
        assert_eq!(u.seconds(&d), 45);
    }

    #[test]
    fn test_field_setters_return_new_values() {
        let u = utils();
        let d = at(2024, 1, 31, 14, 25, 45);
        assert_eq!(u.set_year(&d, 2025).unwrap(), at(2025, 1, 31, 14, 25, 45));
        assert_eq!(u.set_month(&d, 1).unwrap(), at(2024, 2, 29, 14, 25, 45));
        assert_eq!(u.set_hours(&d, 0).unwrap(), at(2024, 1, 31, 0, 25, 45));
        assert_eq!(u.set_minutes(&d, 59).unwrap(), at(2024, 1, 31, 14, 59, 45));
        assert_eq!(u.set_seconds(&d, 0).unwrap(), at(2024, 1, 31, 14, 25, 0));
        // Input untouched
        assert_eq!(d, at(2024, 1, 31, 14, 25, 45));
    }

    // --- arithmetic ---

    #[test]
    fn test_add_days_sign_dispatch() {
        let u = utils();
        let d = date(2024, 3, 1);
        assert_eq!(u.add_days(&d, 1).unwrap(), date(2024, 3, 2));
        assert_eq!(u.add_days(&d, 0).unwrap(), d);
        assert_eq!(u.add_days(&d, -1).unwrap(), date(2024, 2, 29));
        assert_eq!(u.add_days(&d, -366).unwrap(), date(2023, 3, 1));
        assert!(matches!(
            u.add_days(&d, i64::MIN),
            Err(DateError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_add_days_symmetry() {
        let u = utils();
        let d = at(2024, 2, 29, 12, 0, 0);
        for n in 0..400 {
            let forward = u.add_days(&d, n).unwrap();
            assert_eq!(u.add_days(&forward, -n).unwrap(), d);
        }
    }

    #[test]
    fn test_day_and_month_bounds() {
        let u = utils();
        let d = at(2024, 2, 15, 13, 45, 30);
        assert_eq!(u.start_of_day(&d), date(2024, 2, 15));
        assert_eq!(
            u.end_of_day(&d),
            ThaiDate::new(at(2024, 2, 15, 23, 59, 59).datetime() + TimeDelta::milliseconds(999))
        );
        assert_eq!(u.start_of_month(&d), date(2024, 2, 1));
        assert_eq!(u.end_of_month(&d).date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(u.end_of_month(&d).millisecond(), 999);
    }

    #[test]
    fn test_month_stepping() {
        let u = utils();
        let d = date(2024, 1, 31);
        assert_eq!(u.next_month(&d).unwrap(), date(2024, 2, 29));
        assert_eq!(u.previous_month(&d).unwrap(), date(2023, 12, 31));
        assert_eq!(u.previous_month(&date(2024, 3, 31)).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_merge_date_and_time() {
        let u = utils();
        let d = at(2024, 2, 15, 0, 0, 10);
        let t = at(1999, 7, 4, 18, 42, 33);
        let merged = u.merge_date_and_time(&d, &t).unwrap();
        assert_eq!(merged.year(), 2024);
        assert_eq!(merged.month(), 2);
        assert_eq!(merged.day(), 15);
        assert_eq!(merged.hour(), 18);
        assert_eq!(merged.minute(), 42);
        // Seconds come from the date, not the time
        assert_eq!(merged.second(), 10);
    }

    // --- grids and ranges ---

    #[test]
    fn test_month_array() {
        let u = utils();
        let months = u.month_array(&date(2024, 6, 10)).unwrap();
        assert_eq!(months.len(), 12);
        assert_eq!(months[5], date(2024, 6, 1));
        assert_eq!(months[5].month0(), 5);
        assert_eq!(months[5].day(), 1);
        assert_eq!(months[5].year(), 2024);
    }

    #[test]
    fn test_month_array_all_months() {
        let u = utils();
        for (y, m) in months_between((1999, 1), (2030, 12)) {
            for d in [1, 15, 28] {
                let months = u.month_array(&at(y, m, d, 17, 30, 0)).unwrap();
                assert_eq!(months.len(), 12);
                for (i, month) in months.iter().enumerate() {
                    assert_eq!(month.month0() as usize, i);
                    assert_eq!(month.day(), 1);
                    assert_eq!(month.year(), y);
                    assert_eq!(*month, u.start_of_day(month));
                }
            }
        }
    }

    #[test]
    fn test_month_array_from_month_end() {
        let u = utils();
        let months = u.month_array(&date(2023, 1, 31)).unwrap();
        assert_eq!(months[1], date(2023, 2, 1));
        assert_eq!(months[11], date(2023, 12, 1));
    }

    #[test]
    fn test_week_array_february_2024() {
        let u = utils();
        let weeks = u.week_array(&date(2024, 2, 15)).unwrap();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks.iter().map(Vec::len).sum::<usize>(), 35);
        assert_eq!(weeks[0][0], date(2024, 1, 28));
        assert_eq!(weeks[0][4], date(2024, 2, 1));
        assert_eq!(weeks[4][4], date(2024, 2, 29));
        assert_eq!(weeks[4][6], date(2024, 3, 2));
    }

    #[test]
    fn test_week_array_row_counts() {
        let u = utils();
        // February 2015 starts on Sunday and has 28 days
        assert_eq!(u.week_array(&date(2015, 2, 10)).unwrap().len(), 4);
        // March 2024 starts on Friday and runs to Sunday the 31st
        assert_eq!(u.week_array(&date(2024, 3, 10)).unwrap().len(), 6);
        // June 2024 starts on Saturday
        assert_eq!(u.week_array(&date(2024, 6, 30)).unwrap().len(), 6);
        assert_eq!(u.week_array(&date(2024, 4, 1)).unwrap().len(), 5);
    }

    #[test]
    fn test_week_array_covers_month_exactly() {
        let u = utils();
        for (y, m) in months_between((2000, 1), (2030, 12)) {
            let d = at(y, m, 13, 18, 45, 12);
            let weeks = u.week_array(&d).unwrap();
            assert!((4..=6).contains(&weeks.len()), "{y}-{m}: {} rows", weeks.len());

            let first = u.engine().start_of(&u.start_of_month(&d), Unit::Week);
            let last = u.engine().end_of(&u.end_of_month(&d), Unit::Week);
            assert_eq!(weeks[0][0], first);
            assert_eq!(
                weeks.last().and_then(|w| w.last()).map(ThaiDate::date),
                Some(last.date())
            );

            let days: Vec<ThaiDate> = weeks.iter().flatten().copied().collect();
            for week in &weeks {
                assert_eq!(week.len(), 7);
                assert_eq!(week[0].weekday(), Weekday::Sun);
            }
            for pair in weeks.windows(2) {
                assert_eq!(u.diff(&pair[1][0], &pair[0][0], Some(Unit::Day), false).unwrap(), 7.0);
            }
            for pair in days.windows(2) {
                assert_eq!(u.add_days(&pair[0], 1).unwrap(), pair[1]);
            }
            assert!(days.iter().all(|day| *day == u.start_of_day(day)));
        }
    }

    #[test]
    fn test_week_array_monday_start() {
        let u = ThaiDateUtils::with_engine(
            Options::default().with_week_start(Weekday::Mon),
            Engine::default().with_clock(clock()),
        )
        .unwrap();
        let weeks = u.week_array(&date(2024, 2, 15)).unwrap();
        assert_eq!(weeks[0][0], date(2024, 1, 29));
        assert_eq!(weeks.last().unwrap()[6], date(2024, 3, 3));
        assert!(weeks.iter().all(|w| w[0].weekday() == Weekday::Mon));
    }

    #[test]
    fn test_year_range_same_year() {
        let u = utils();
        let start = date(2024, 3, 5);
        let end = date(2024, 11, 20);
        let years = u.year_range(&start, &end).unwrap();
        assert_eq!(years, vec![date(2024, 1, 1)]);
        assert_eq!(u.year_range(&start, &start).unwrap(), vec![date(2024, 1, 1)]);
    }

    #[test]
    fn test_year_range_spans() {
        let u = utils();
        let start = at(1990, 7, 14, 8, 0, 0);
        for k in 0..40 {
            let end = date(1990 + k, 2, 1);
            let years = u.year_range(&start, &end).unwrap();
            assert_eq!(years.len(), k as usize + 1);
            for (i, year) in years.iter().enumerate() {
                assert_eq!(*year, date(1990 + i as i32, 1, 1));
            }
            for pair in years.windows(2) {
                assert!(pair[0] < pair[1]);
                assert_eq!(pair[1].year() - pair[0].year(), 1);
            }
        }
    }

    #[test]
    fn test_year_range_reversed_is_empty() {
        let u = utils();
        let years = u.year_range(&date(2030, 1, 1), &date(2020, 1, 1)).unwrap();
        assert!(years.is_empty());
    }

    #[test]
    fn test_weekdays_english() {
        let u = english();
        assert_eq!(
            u.weekdays().unwrap(),
            vec!["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]
        );
    }

    #[test]
    fn test_weekdays_monday_start() {
        let u = ThaiDateUtils::with_engine(
            Options::default()
                .with_locale("en-US")
                .with_week_start(Weekday::Mon),
            Engine::default().with_clock(clock()),
        )
        .unwrap();
        let labels = u.weekdays().unwrap();
        assert_eq!(labels.first().map(String::as_str), Some("Mo"));
        assert_eq!(labels.last().map(String::as_str), Some("Su"));
    }

    #[test]
    fn test_weekdays_thai() {
        assert_eq!(
            utils().weekdays().unwrap(),
            vec!["อา", "จ", "อ", "พ", "พฤ", "ศ", "ส"]
        );
    }

    // --- text ---

    #[test]
    fn test_meridiem_text() {
        let u = utils();
        assert_eq!(u.meridiem_text("am"), "AM");
        assert_eq!(u.meridiem_text("pm"), "PM");
        assert_eq!(u.meridiem_text("xyz"), "PM");
    }

    #[test]
    fn test_format_number_is_identity() {
        let u = utils();
        assert_eq!(u.format_number("07"), "07");
        assert_eq!(u.format_number("๑๒"), "๑๒");
    }

    #[test]
    fn test_thai_header_text() {
        let u = utils();
        let d = at(2024, 2, 15, 9, 5, 3);
        assert_eq!(u.calendar_header_text(&d), "กุมภาพันธ์ 2567");
        assert_eq!(u.month_text(&d), "กุมภาพันธ์");
        assert_eq!(u.year_text(&d), "2567");
        assert_eq!(u.day_text(&d), "15");
    }

    #[test]
    fn test_english_header_text() {
        let u = english();
        let d = at(2024, 2, 15, 21, 5, 3);
        assert_eq!(u.calendar_header_text(&d), "February 2567");
        assert_eq!(u.date_picker_header_text(&d), "Thu, Feb 15");
        assert_eq!(u.date_time_picker_header_text(&d), "Feb 15");
        assert_eq!(u.format(&d, u.date_format()), "February 15th");
        assert_eq!(u.format(&d, u.date_time_12h_format()), "February 15th 09:05 pm");
    }

    #[test]
    fn test_clock_text() {
        let u = utils();
        let d = at(2024, 2, 15, 21, 5, 3);
        assert_eq!(u.hour_text(&d, true), "09");
        assert_eq!(u.hour_text(&d, false), "21");
        assert_eq!(u.minute_text(&d), "05");
        assert_eq!(u.second_text(&d), "03");
        let midnight = date(2024, 2, 15);
        assert_eq!(u.hour_text(&midnight, true), "12");
        assert_eq!(u.hour_text(&midnight, false), "00");
    }

    #[test]
    fn test_custom_formats() {
        let formats = Formats {
            year: "YYYY".to_owned(),
            year_month: "MM/BBBB".to_owned(),
            ..Formats::default()
        };
        let u = ThaiDateUtils::with_engine(
            Options::default().with_formats(formats),
            Engine::default().with_clock(clock()),
        )
        .unwrap();
        let d = date(2024, 2, 15);
        assert_eq!(u.year_text(&d), "2024");
        assert_eq!(u.calendar_header_text(&d), "02/2567");
    }

    #[test]
    fn test_adapter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ThaiDateUtils<SystemClock>>();
        assert_send_sync::<ThaiDateUtils<FixedClock>>();
    }
}
