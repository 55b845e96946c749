use crate::datetime::{days_since_unix_epoch, last_day_of_month, CalendarTime, Date, TimeOfDay};
use crate::parse::{parse_transition_rule, Cursor};
use crate::{Error, DAYS_PER_WEEK};

use std::fmt;
use std::str::FromStr;

use tracing::trace;

/// Yearly transition rule, represented by a month, a month week, a week day and a local time
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TransitionRule {
    /// Month in `[1, 12]`
    month: u8,
    /// Week of the month in `[1, 5]`, with `5` representing the last week of the month
    week: u8,
    /// Day of the week in `[0, 6]` from Sunday
    week_day: u8,
    /// Local time of the transition, possibly negative or exceeding 24 hours
    time: TimeOfDay,
}

impl TransitionRule {
    /// Construct a transition rule
    pub fn new(month: u8, week: u8, week_day: u8, time: TimeOfDay) -> Result<Self, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::TransitionRule("invalid rule day month"));
        }

        if !(1..=5).contains(&week) {
            return Err(Error::TransitionRule("invalid rule day week"));
        }

        if week_day > 6 {
            return Err(Error::TransitionRule("invalid rule day week day"));
        }

        Ok(Self { month, week, week_day, time })
    }

    /// Returns month in `[1, 12]`
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns week of the month in `[1, 5]`
    pub fn week(&self) -> u8 {
        self.week
    }

    /// Returns day of the week in `[0, 6]` from Sunday
    pub fn week_day(&self) -> u8 {
        self.week_day
    }

    /// Returns local time of the transition
    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    /// Get the transition date for the provided year
    pub fn transition_date(&self, year: i32) -> Date {
        let month = self.month as usize;
        let day_in_month = last_day_of_month(year, self.month) as i64;

        let week_day_of_first_month_day =
            (4 + days_since_unix_epoch(year, month, 1)).rem_euclid(DAYS_PER_WEEK);
        let first_week_day_occurence_in_month =
            1 + (self.week_day as i64 - week_day_of_first_month_day).rem_euclid(DAYS_PER_WEEK);

        let mut month_day =
            first_week_day_occurence_in_month + (self.week as i64 - 1) * DAYS_PER_WEEK;
        if month_day > day_in_month {
            month_day -= DAYS_PER_WEEK
        }

        Date::from_days_since_unix_epoch(days_since_unix_epoch(year, month, month_day))
    }

    /// Returns the UTC Unix time in seconds of the transition for the provided year
    ///
    /// `tz_adjust` is the UTC offset in force immediately before the transition, positive west of
    /// UTC. It is added to the local transition time without normalization, so that out-of-range
    /// hours carry into the neighboring days.
    pub fn calculate(&self, year: i32, tz_adjust: TimeOfDay) -> i64 {
        let mut fields = CalendarTime::from_date(&self.transition_date(year));
        self.time.adjust(&mut fields);
        tz_adjust.adjust(&mut fields);

        let unix_time = fields.to_unix_time();
        trace!(rule = %self, year, unix_time, "computed transition");
        unix_time
    }
}

impl fmt::Display for TransitionRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "M{}.{}.{}/{}", self.month, self.week, self.week_day, self.time)
    }
}

impl FromStr for TransitionRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(s.as_bytes());
        let rule = parse_transition_rule(&mut cursor)?;

        if !cursor.is_empty() {
            return Err(Error::TransitionRule("remaining data after parsing transition rule"));
        }

        Ok(rule)
    }
}
