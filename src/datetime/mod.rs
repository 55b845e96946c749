//! Calendar arithmetic and the local date and time of day value types.

mod date;
mod time_of_day;

pub use date::Date;
pub use time_of_day::TimeOfDay;

use crate::parse::parse_utc_date_time;
use crate::{
    Error, CUMUL_DAY_IN_MONTHS_NORMAL_YEAR, DAYS_PER_WEEK, DAY_IN_MONTHS_NORMAL_YEAR,
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};

use std::fmt;

/// Calendar breakdown of a Unix time, in the proleptic gregorian calendar
///
/// Fields may be set out of range, in which case [`CalendarTime::to_unix_time`] carries them into the
/// next larger unit, like `timegm`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CalendarTime {
    /// Year
    pub year: i32,
    /// Month in `[1, 12]`
    pub month: i32,
    /// Day of the month in `[1, 31]`
    pub month_day: i32,
    /// Hours since midnight in `[0, 23]`
    pub hour: i32,
    /// Minutes in `[0, 59]`
    pub minute: i32,
    /// Seconds in `[0, 59]`
    pub second: i32,
    /// Day of the week in `[0, 6]` from Sunday, ignored by [`CalendarTime::to_unix_time`]
    pub week_day: i32,
}

impl CalendarTime {
    /// Construct the calendar breakdown of a Unix time in seconds, like `gmtime`
    pub fn from_unix_time(unix_time: i64) -> Self {
        let days = unix_time.div_euclid(SECONDS_PER_DAY);
        let seconds_of_day = unix_time.rem_euclid(SECONDS_PER_DAY);

        let (year, month, month_day) = civil_from_days(days);

        Self {
            year,
            month,
            month_day,
            hour: (seconds_of_day / SECONDS_PER_HOUR) as i32,
            minute: (seconds_of_day / SECONDS_PER_MINUTE % 60) as i32,
            second: (seconds_of_day % SECONDS_PER_MINUTE) as i32,
            week_day: week_day_from_days(days),
        }
    }

    /// Construct a calendar breakdown at midnight of the provided date
    pub fn from_date(date: &Date) -> Self {
        Self {
            year: date.year(),
            month: date.month() as i32,
            month_day: date.month_day() as i32,
            hour: 0,
            minute: 0,
            second: 0,
            week_day: date.day_of_week() as i32,
        }
    }

    /// Returns the Unix time in seconds of this breakdown interpreted as UTC, like `timegm`
    pub fn to_unix_time(&self) -> i64 {
        let months = self.year as i64 * 12 + (self.month as i64 - 1);
        let year = months.div_euclid(12) as i32;
        let month = months.rem_euclid(12) as usize + 1;

        let days = days_since_unix_epoch(year, month, 1) + self.month_day as i64 - 1;

        days * SECONDS_PER_DAY
            + self.hour as i64 * SECONDS_PER_HOUR
            + self.minute as i64 * SECONDS_PER_MINUTE
            + self.second as i64
    }

    /// Carry out-of-range fields and recompute the week day, returning the Unix time in seconds
    pub fn normalize(&mut self) -> i64 {
        let unix_time = self.to_unix_time();
        *self = Self::from_unix_time(unix_time);
        unix_time
    }

    /// Returns the date part
    pub fn date(&self) -> Date {
        let mut normalized = *self;
        normalized.normalize();
        Date::from_normalized(normalized.year, normalized.month as u8, normalized.month_day as u8)
    }

    /// Returns the time of day part
    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_seconds(
            self.hour as i64 * SECONDS_PER_HOUR + self.minute as i64 * SECONDS_PER_MINUTE + self.second as i64,
        )
    }

    /// Replace the time of day, leaving the breakdown unchanged for `None`
    pub fn set_time_of_day(&mut self, time_of_day: Option<TimeOfDay>) {
        if let Some(time_of_day) = time_of_day {
            self.hour = time_of_day.hour() as i32;
            self.minute = time_of_day.minute() as i32;
            self.second = time_of_day.second() as i32;
        }
    }

    /// Replace the date, keeping the time of day
    pub fn set_date(&mut self, date: &Date) {
        self.year = date.year();
        self.month = date.month() as i32;
        self.month_day = date.month_day() as i32;
        self.week_day = date.day_of_week() as i32;
    }

    /// Returns the hour in 12-hour format, in `[1, 12]`
    pub fn hour_format_12(&self) -> i32 {
        match self.hour {
            0 => 12,
            hour if hour > 12 => hour - 12,
            hour => hour,
        }
    }

    /// Returns `true` before noon
    pub fn is_am(&self) -> bool {
        self.hour < 12
    }

    /// Returns `true` from noon on
    pub fn is_pm(&self) -> bool {
        !self.is_am()
    }

    /// Returns which occurrence of its week day in the month this day is, in `[1, 5]`
    pub fn ordinal(&self) -> i32 {
        1 + (self.month_day - 1) / DAYS_PER_WEEK as i32
    }
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.month_day, self.hour, self.minute, self.second
        )
    }
}

/// Check if a year is a leap year
pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Compute the number of days since Unix epoch (`1970-01-01T00:00:00Z`).
///
/// ## Inputs
///
/// * `year`: Year
/// * `month`: Month in `[1, 12]`
/// * `month_day`: Day of the month in `[1, 31]`
pub(crate) fn days_since_unix_epoch(year: i32, month: usize, month_day: i64) -> i64 {
    let is_leap_year = is_leap_year(year);

    let year = year as i64;

    let mut result = (year - 1970) * 365;

    if year >= 1970 {
        result += (year - 1968) / 4;
        result -= (year - 1900) / 100;
        result += (year - 1600) / 400;

        if is_leap_year && month < 3 {
            result -= 1;
        }
    } else {
        result += (year - 1972) / 4;
        result -= (year - 2000) / 100;
        result += (year - 2000) / 400;

        if is_leap_year && month >= 3 {
            result += 1;
        }
    }

    result += CUMUL_DAY_IN_MONTHS_NORMAL_YEAR[month - 1] + month_day - 1;

    result
}

/// Compute the year, month and month day of a number of days since Unix epoch
fn civil_from_days(days: i64) -> (i32, i32, i32) {
    // Shift the epoch to 0000-03-01, the start of a 400-year cycle with the leap day at its end
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let day_of_era = days.rem_euclid(146_097);
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;

    let month_day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 { shifted_month + 3 } else { shifted_month - 9 };
    let year = year_of_era + era * 400 + (month <= 2) as i64;

    (year as i32, month as i32, month_day as i32)
}

/// Compute the week day of a number of days since Unix epoch, in `[0, 6]` from Sunday
fn week_day_from_days(days: i64) -> i32 {
    // 1970-01-01 is a Thursday
    (4 + days).rem_euclid(DAYS_PER_WEEK) as i32
}

/// Returns the number of days in a month, or `0` for a month outside of `[1, 12]`
pub fn last_day_of_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => DAY_IN_MONTHS_NORMAL_YEAR[month as usize - 1] as u8,
        _ => 0,
    }
}

/// Returns the day of the month of the `ordinal`-th `week_day` of a month, or `0` if there is none
///
/// A positive `ordinal` counts from the start of the month, `1` being the first occurrence. A
/// negative `ordinal` counts from the end of the month, `-1` being the last occurrence.
pub fn day_of_week_of_month(year: i32, month: u8, week_day: u8, ordinal: i32) -> u8 {
    let last_day = last_day_of_month(year, month) as i64;
    if last_day == 0 || week_day > 6 || ordinal == 0 {
        return 0;
    }

    let week_day = week_day as i64;
    let ordinal = ordinal as i64;

    let month_day = if ordinal > 0 {
        let week_day_of_first_month_day =
            (4 + days_since_unix_epoch(year, month as usize, 1)).rem_euclid(DAYS_PER_WEEK);
        let first_occurence = 1 + (week_day - week_day_of_first_month_day).rem_euclid(DAYS_PER_WEEK);
        first_occurence + (ordinal - 1) * DAYS_PER_WEEK
    } else {
        let week_day_of_last_month_day =
            (4 + days_since_unix_epoch(year, month as usize, last_day)).rem_euclid(DAYS_PER_WEEK);
        let last_occurence =
            last_day - (week_day_of_last_month_day - week_day).rem_euclid(DAYS_PER_WEEK);
        last_occurence + (ordinal + 1) * DAYS_PER_WEEK
    };

    if (1..=last_day).contains(&month_day) {
        month_day as u8
    } else {
        0
    }
}

/// Parse a UTC date time string of the form `YYYY-MM-DD HH:MM:SS` into a Unix time in seconds
///
/// Any single character may separate the date from the time.
pub fn parse_utc_time(s: &str) -> Result<i64, Error> {
    Ok(parse_utc_date_time(s)?.to_unix_time())
}

/// Format a Unix time in seconds as a UTC `YYYY-MM-DD<separator>HH:MM:SS` string
pub fn format_utc_time(unix_time: i64, separator: char) -> String {
    let fields = CalendarTime::from_unix_time(unix_time);
    format!(
        "{:04}-{:02}-{:02}{}{:02}:{:02}:{:02}",
        fields.year, fields.month, fields.month_day, separator, fields.hour, fields.minute, fields.second
    )
}
