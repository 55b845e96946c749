use super::CalendarTime;
use crate::parse::parse_time_of_day;
use crate::{Error, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};

/// Time of day, or signed duration when used as a timezone offset or transition time
///
/// The sign of the hour applies to the whole value: `-3:30` is three hours and a half before the
/// reference point. Transition times may use hours beyond `[0, 24]`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TimeOfDay {
    /// Hours, possibly negative
    hour: i16,
    /// Minutes in `[0, 59]`
    minute: u8,
    /// Seconds in `[0, 59]`
    second: u8,
}

impl TimeOfDay {
    /// `00:00:00`
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0, second: 0 };

    /// `23:59:59`, the last second of a day
    pub const END_OF_DAY: Self = Self { hour: 23, minute: 59, second: 59 };

    /// Construct a time of day, with minutes and seconds in `[0, 59]`
    pub fn new(hour: i16, minute: u8, second: u8) -> Result<Self, Error> {
        if minute > 59 {
            return Err(Error::TimeOfDay("invalid minute"));
        }
        if second > 59 {
            return Err(Error::TimeOfDay("invalid second"));
        }

        Ok(Self { hour, minute, second })
    }

    /// Construct a time of day from signed seconds, clamping the hour to the `i16` range
    pub fn from_seconds(seconds: i64) -> Self {
        let magnitude = seconds.abs();
        let hour = (magnitude / SECONDS_PER_HOUR).min(i16::MAX as i64) as i16;

        Self {
            hour: if seconds < 0 { -hour } else { hour },
            minute: (magnitude / SECONDS_PER_MINUTE % 60) as u8,
            second: (magnitude % SECONDS_PER_MINUTE) as u8,
        }
    }

    /// Returns hours
    pub fn hour(&self) -> i16 {
        self.hour
    }

    /// Returns minutes
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Returns seconds
    pub fn second(&self) -> u8 {
        self.second
    }

    /// Returns the signed number of seconds represented by this value
    pub fn to_seconds(&self) -> i64 {
        let magnitude = (self.hour as i64).abs() * SECONDS_PER_HOUR
            + self.minute as i64 * SECONDS_PER_MINUTE
            + self.second as i64;

        if self.hour < 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Returns the same value with one hour less, used to derive a default DST offset
    pub fn earlier_by_one_hour(&self) -> Self {
        Self { hour: self.hour.saturating_sub(1), ..*self }
    }

    /// Add this value to the time fields of a calendar breakdown, without normalizing it
    pub fn adjust(&self, fields: &mut CalendarTime) {
        fields.hour += self.hour as i32;

        if self.hour < 0 {
            fields.minute -= self.minute as i32;
            fields.second -= self.second as i32;
        } else {
            fields.minute += self.minute as i32;
            fields.second += self.second as i32;
        }
    }

    /// Format as `HH:MM:SS`, with a zero-padded hour
    pub fn to_padded_string(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time_of_day(s)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
