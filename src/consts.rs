/// Offset between the Buddhist Era and the Common Era year
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Months in a calendar year
pub const MONTHS_IN_YEAR: usize = 12;

/// Days in a week row of the month grid
pub const DAYS_IN_WEEK: usize = 7;

/// Locale bound when no locale tag is configured
pub const DEFAULT_LOCALE: &str = "th_TH";

/// Bare language tags that don't follow the `xx` → `xx_XX` rule
pub(crate) const LOCALE_ALIASES: &[(&str, &str)] = &[("en", "en_US"), ("th", "th_TH")];

/// Milliseconds per fixed-length unit
pub(crate) const MS_PER_SECOND: i64 = 1_000;
pub(crate) const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub(crate) const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub(crate) const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
pub(crate) const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;

/// Nanoseconds per millisecond, the precision dates are kept at
pub(crate) const NANOS_PER_MILLI: u32 = 1_000_000;

// Default adapter formats
pub const YEAR_FORMAT: &str = "BBBB";
pub const DATE_FORMAT: &str = "MMMM Do";
pub const TIME_24H_FORMAT: &str = "HH:mm";
pub const TIME_12H_FORMAT: &str = "hh:mm A";
pub const YEAR_MONTH_FORMAT: &str = "MMMM BBBB";
pub const DATE_TIME_24H_FORMAT: &str = "MMMM Do HH:mm";
pub const DATE_TIME_12H_FORMAT: &str = "MMMM Do hh:mm a";

// Fixed header patterns
pub const MONTH_TEXT_FORMAT: &str = "MMMM";
pub const DATE_PICKER_HEADER_FORMAT: &str = "ddd, MMM D";
pub const DATE_TIME_PICKER_HEADER_FORMAT: &str = "MMM D";
pub const WEEKDAY_LABEL_FORMAT: &str = "dd";
pub const DAY_TEXT_FORMAT: &str = "D";
pub const HOUR_12H_TEXT_FORMAT: &str = "hh";
pub const HOUR_24H_TEXT_FORMAT: &str = "HH";
pub const MINUTE_TEXT_FORMAT: &str = "mm";
pub const SECOND_TEXT_FORMAT: &str = "ss";

/// Shapes accepted when reading a date without an explicit pattern,
/// most specific first
pub const ISO_FORMATS: &[&str] = &[
    "YYYY-MM-DDTHH:mm:ss.SSS",
    "YYYY-MM-DDTHH:mm:ss",
    "YYYY-MM-DDTHH:mm",
    "YYYY-MM-DD HH:mm:ss.SSS",
    "YYYY-MM-DD HH:mm:ss",
    "YYYY-MM-DD HH:mm",
    "YYYY-MM-DD",
    "YYYY-MM",
    "YYYY",
];

/// chrono pattern used by `Display`, equivalent to the first `ISO_FORMATS` entry
pub(crate) const DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";
