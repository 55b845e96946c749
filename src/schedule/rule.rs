use super::json::RuleConfig;
use super::{RangePosition, TimeOfDayRange};
use crate::convert::LocalTimeConvert;
use crate::datetime::{day_of_week_of_month, last_day_of_month, Date, TimeOfDay};
use crate::{Error, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

use serde::Deserialize;
use tracing::{debug, trace};

/// Recurrence rule of a schedule, restricted to a range of local times of day
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(try_from = "RuleConfig")]
pub enum ScheduleRule {
    /// Every `increment` minutes within each local hour, counted from the minute of the range start
    MinuteOfHour {
        /// Increment in minutes, `1..=60`
        increment: u32,
        /// Allowed times of day
        range: TimeOfDayRange,
    },
    /// Every `increment` hours from the range start
    HourOfDay {
        /// Increment in hours, `1..=24`
        increment: u32,
        /// Allowed times of day
        range: TimeOfDayRange,
    },
    /// The `ordinal`-th `week_day` of each month, at the range start
    DayOfWeekOfMonth {
        /// Day of the week, `0` being Sunday
        week_day: u8,
        /// Occurrence in the month, `1..=5`, or `-5..=-1` from the end of the month
        ordinal: i32,
        /// Allowed times of day
        range: TimeOfDayRange,
    },
    /// A day of each month at the range start, counted from the end of the month if not positive
    DayOfMonth {
        /// Day of the month, `0` being the last day
        day: i32,
        /// Allowed times of day
        range: TimeOfDayRange,
    },
    /// Every day at the range start
    Time {
        /// Allowed times of day
        range: TimeOfDayRange,
    },
}

impl ScheduleRule {
    /// Returns the range of the rule
    pub fn range(&self) -> &TimeOfDayRange {
        match self {
            Self::MinuteOfHour { range, .. }
            | Self::HourOfDay { range, .. }
            | Self::DayOfWeekOfMonth { range, .. }
            | Self::DayOfMonth { range, .. }
            | Self::Time { range } => range,
        }
    }

    /// Returns `true` for rules repeating within a day
    pub fn is_multiple(&self) -> bool {
        matches!(self, Self::MinuteOfHour { .. } | Self::HourOfDay { .. })
    }

    /// Check the rule parameters
    pub fn validate(&self) -> Result<(), Error> {
        match *self {
            Self::MinuteOfHour { increment, .. } if !(1..=60).contains(&increment) => {
                Err(Error::Schedule("minute increment must be in 1..=60"))
            }
            Self::HourOfDay { increment, .. } if !(1..=24).contains(&increment) => {
                Err(Error::Schedule("hour increment must be in 1..=24"))
            }
            Self::DayOfWeekOfMonth { week_day, .. } if week_day > 6 => {
                Err(Error::Schedule("week day must be in 0..=6"))
            }
            Self::DayOfWeekOfMonth { ordinal, .. } if ordinal == 0 || !(-5..=5).contains(&ordinal) => {
                Err(Error::Schedule("week day ordinal must be in -5..=5 and not 0"))
            }
            Self::DayOfMonth { day, .. } if !(-30..=31).contains(&day) => {
                Err(Error::Schedule("day of month must be in -30..=31"))
            }
            _ => Ok(()),
        }
    }

    /// Returns the next time of the rule strictly after the current time of `conv`
    ///
    /// Local dates are scanned from the current one, up to `lookahead_days` days later or the expiration
    /// date of the range restriction if it is earlier.
    pub fn next_scheduled_time(&self, conv: &LocalTimeConvert, lookahead_days: u32) -> Option<i64> {
        let restriction = self.range().restriction();

        let first_date = conv.local_date();
        let mut end_date = first_date.add_days(lookahead_days as i64);
        if let Some(expiration_date) = restriction.expiration_date() {
            end_date = end_date.min(expiration_date);
        }

        let mut date = first_date;
        while date <= end_date {
            if restriction.is_valid(&date) {
                if let Some(time) = self.candidate(conv, &date, date == first_date) {
                    trace!(rule = ?self, start = conv.time(), time, "accepted schedule candidate");
                    return Some(time);
                }
            }
            date = date.add_days(1);
        }

        debug!(rule = ?self, start = conv.time(), %end_date, "no scheduled time in lookahead window");
        None
    }

    /// Returns the first time of the rule on a local date strictly after the current time of `conv`
    fn candidate(&self, conv: &LocalTimeConvert, date: &Date, first_day: bool) -> Option<i64> {
        let start = conv.time();
        let range = self.range();
        let after_start = |time: i64| (time > start).then_some(time);
        let range_start = || conv.local_to_utc(date, range.start());

        match *self {
            Self::MinuteOfHour { increment, .. } => {
                if !first_day {
                    return after_start(range_start());
                }

                match range.position_of(conv.local_time_of_day()) {
                    RangePosition::Before => after_start(range_start()),
                    RangePosition::Within => next_minute_boundary(conv, range, increment as i64),
                    RangePosition::After => None,
                }
            }
            Self::HourOfDay { increment, .. } => {
                let step = increment as i64 * SECONDS_PER_HOUR;
                let end = range.end().to_seconds();

                let mut seconds = range.start().to_seconds();
                while seconds <= end && seconds < SECONDS_PER_DAY {
                    let time = conv.local_to_utc(date, TimeOfDay::from_seconds(seconds));
                    if time > start {
                        return Some(time);
                    }
                    seconds += step;
                }
                None
            }
            Self::DayOfWeekOfMonth { week_day, ordinal, .. } => {
                let month_day = day_of_week_of_month(date.year(), date.month(), week_day, ordinal);
                match date.month_day() == month_day {
                    true => after_start(range_start()),
                    false => None,
                }
            }
            Self::DayOfMonth { day, .. } => {
                let month_day = match day {
                    day if day > 0 => day,
                    day => last_day_of_month(date.year(), date.month()) as i32 + day,
                };
                match date.month_day() as i32 == month_day {
                    true => after_start(range_start()),
                    false => None,
                }
            }
            Self::Time { .. } => after_start(range_start()),
        }
    }
}

/// Returns the next minute boundary after the current time of `conv`, if it lies within the range
///
/// Boundaries are counted from the minute of the range start within each local hour. The delta to the
/// boundary is added to the instant, so a repeated hour is walked through.
fn next_minute_boundary(conv: &LocalTimeConvert, range: &TimeOfDayRange, increment: i64) -> Option<i64> {
    let step = increment * SECONDS_PER_MINUTE;
    let offset = (range.start().minute() as i64 % increment) * SECONDS_PER_MINUTE
        + range.start().second() as i64;

    let local = conv.local_time();
    let position = local.minute as i64 * SECONDS_PER_MINUTE + local.second as i64;

    let mut boundary = offset + ((position - offset).div_euclid(step) + 1) * step;
    if boundary >= SECONDS_PER_HOUR {
        boundary = SECONDS_PER_HOUR + offset;
    }

    let time = conv.time() + boundary - position;
    let probe = conv.with_time(time);

    let within = range.position_of(probe.local_time_of_day()) == RangePosition::Within;
    match within && range.restriction().is_valid(&probe.local_date()) {
        true => Some(time),
        false => None,
    }
}
