use super::{civil_from_days, days_since_unix_epoch, last_day_of_month, week_day_from_days, CalendarTime};
use crate::parse::parse_date;
use crate::Error;

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};

/// Calendar date in the proleptic gregorian calendar
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Date {
    /// Year
    year: i32,
    /// Month in `[1, 12]`
    month: u8,
    /// Day of the month in `[1, 31]`
    month_day: u8,
}

impl Date {
    /// Construct a date, checking that the day exists in the month
    pub fn new(year: i32, month: u8, month_day: u8) -> Result<Self, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::Date("invalid month"));
        }
        if month_day == 0 || month_day > last_day_of_month(year, month) {
            return Err(Error::Date("invalid month day"));
        }

        Ok(Self { year, month, month_day })
    }

    /// Construct a date from fields already known to be in range
    pub(super) fn from_normalized(year: i32, month: u8, month_day: u8) -> Self {
        Self { year, month, month_day }
    }

    /// Construct the date part of a calendar breakdown
    pub fn from_calendar_time(fields: &CalendarTime) -> Self {
        fields.date()
    }

    /// Returns year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns month in `[1, 12]`
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns day of the month in `[1, 31]`
    pub fn month_day(&self) -> u8 {
        self.month_day
    }

    /// Returns day of the week in `[0, 6]` from Sunday
    pub fn day_of_week(&self) -> u8 {
        week_day_from_days(self.days_since_unix_epoch()) as u8
    }

    /// Returns the date `days` days later, or earlier for a negative count
    pub fn add_days(&self, days: i64) -> Self {
        Self::from_days_since_unix_epoch(self.days_since_unix_epoch() + days)
    }

    /// Construct a date from a number of days since `1970-01-01`
    pub(crate) fn from_days_since_unix_epoch(days: i64) -> Self {
        let (year, month, month_day) = civil_from_days(days);
        Self::from_normalized(year, month as u8, month_day as u8)
    }

    /// Number of days since `1970-01-01`
    pub(crate) fn days_since_unix_epoch(&self) -> i64 {
        days_since_unix_epoch(self.year, self.month as usize, self.month_day as i64)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.month_day)
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_date(s)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
