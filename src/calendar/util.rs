use crate::locale::Localization;
use thiserror::Error;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Earliest date the picker navigates to.  `time` can represent one more
/// year on either side, which leaves room for the padding days of every
/// month the picker can display.
pub(crate) const EARLIEST: Date = ymd(-9998, Month::January, 1);

/// Latest date the picker navigates to
pub(crate) const LATEST: Date = ymd(9998, Month::December, 31);

const WEEKDAY_NAMES: [&str; DAYS_IN_WEEK] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

const fn ymd(year: i32, month: Month, day: u8) -> Date {
    match Date::from_calendar_date(year, month, day) {
        Ok(date) => date,
        Err(_) => panic!("date constant should be a valid calendar date"),
    }
}

pub(crate) trait WeekdayExt {
    /// Number of days from Sunday
    fn index0(&self) -> u16;

    /// Column at which this weekday is drawn in a week that starts on
    /// `week_start`
    fn column(&self, week_start: Weekday) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }

    fn column(&self, week_start: Weekday) -> u16 {
        (self.index0() + 7 - week_start.index0()) % 7
    }
}

/// Anything that falls on a single calendar day
pub(crate) trait CalendarDay {
    fn calendar_day(&self) -> Date;
}

impl CalendarDay for Date {
    fn calendar_day(&self) -> Date {
        *self
    }
}

impl CalendarDay for PrimitiveDateTime {
    fn calendar_day(&self) -> Date {
        self.date()
    }
}

impl CalendarDay for OffsetDateTime {
    fn calendar_day(&self) -> Date {
        self.date()
    }
}

/// Returns true if `a` and `b` fall on the same year, month, and day of
/// month.  Time of day (and offset) is ignored.
pub(crate) fn same_calendar_day<A: CalendarDay, B: CalendarDay>(a: A, b: B) -> bool {
    let (a, b) = (a.calendar_day(), b.calendar_day());
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Shift `base` by the given numbers of years, months, and days.
///
/// The year and month deltas are applied together first; if the day of
/// month does not exist in the resulting month, it is clamped to the
/// month's last day (so March 31 minus one month is the end of February).
/// The day delta is then added, rolling over month and year boundaries as
/// needed.
///
/// Results never leave `EARLIEST..=LATEST`.  A year or month shift that
/// would land outside the range leaves the date as it was, while a day
/// shift that would is clamped to the nearer end.
pub(crate) fn shift_date(base: Date, years: i32, months: i32, days: i64) -> Date {
    let months = i64::from(years) * 12 + i64::from(months);
    shift_days(shift_months(base, months), days)
}

fn shift_months(base: Date, months: i64) -> Date {
    let index = i64::from(base.year()) * 12 + i64::from(u8::from(base.month())) - 1 + months;
    let year = index.div_euclid(12);
    if year < i64::from(EARLIEST.year()) || year > i64::from(LATEST.year()) {
        return base;
    }
    let month = u8::try_from(index.rem_euclid(12) + 1)
        .ok()
        .and_then(|m| Month::try_from(m).ok());
    i32::try_from(year)
        .ok()
        .zip(month)
        .and_then(|(year, month)| clamp_day(year, month, base.day()))
        .unwrap_or(base)
}

fn shift_days(base: Date, days: i64) -> Date {
    let jd = i64::from(base.to_julian_day()).saturating_add(days).clamp(
        i64::from(EARLIEST.to_julian_day()),
        i64::from(LATEST.to_julian_day()),
    );
    i32::try_from(jd)
        .ok()
        .and_then(|jd| Date::from_julian_day(jd).ok())
        .unwrap_or(base)
}

// Returns the given date, or the last day of the month if `day` is past the
// end of the month
fn clamp_day(year: i32, month: Month, day: u8) -> Option<Date> {
    (1..=day)
        .rev()
        .find_map(|d| Date::from_calendar_date(year, month, d).ok())
}

/// The first day of the month containing `date`
pub(crate) fn first_of_month(date: Date) -> Date {
    date.replace_day(1).unwrap_or(date)
}

/// The last day of the month containing `date`
pub(crate) fn last_of_month(date: Date) -> Date {
    clamp_day(date.year(), date.month(), 31).unwrap_or(date)
}

/// Returns true if `a` and `b` are in the same month of the same year
pub(crate) fn same_month(a: Date, b: Date) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// The locale's weekday abbreviations, rotated so that index 0 is
/// `week_start`
pub(crate) fn weekday_abbreviations(
    locale: &Localization,
    week_start: Weekday,
) -> [&str; DAYS_IN_WEEK] {
    let mut wd = week_start;
    std::array::from_fn(|_| {
        let abbr = locale.weekday_abbreviation(wd);
        wd = wd.next();
        abbr
    })
}

/// Convert a number of days from Sunday (0 through 6) to a `Weekday`
pub(crate) fn weekday_from_index(index: u8) -> Option<Weekday> {
    (index < 7).then(|| Weekday::Sunday.nth_next(index))
}

/// Parse a weekday given either as a number of days from Sunday or as an
/// English weekday name.  Names are case-insensitive and may be abbreviated
/// to any prefix of at least two letters.
pub(crate) fn parse_weekday(s: &str) -> Result<Weekday, ParseWeekdayError> {
    let s = s.trim();
    if let Ok(index) = s.parse::<u8>() {
        return weekday_from_index(index).ok_or_else(|| ParseWeekdayError(s.to_owned()));
    }
    let lower = s.to_ascii_lowercase();
    if lower.len() >= 2 {
        for (name, i) in std::iter::zip(WEEKDAY_NAMES, 0u8..) {
            if name.starts_with(&lower) {
                return weekday_from_index(i).ok_or_else(|| ParseWeekdayError(s.to_owned()));
            }
        }
    }
    Err(ParseWeekdayError(s.to_owned()))
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid weekday {0:?}; expected a number from 0 (Sunday) to 6 or a weekday name")]
pub(crate) struct ParseWeekdayError(String);
