//! Host configuration: the active time zone and the schedule search window.

use crate::convert::LocalTimeConvert;
use crate::schedule::Schedule;
use crate::timezone::PosixTimezone;
use crate::Error;

use serde::Deserialize;

/// Default number of days scanned by a schedule search after the starting date
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 3;

/// Configuration shared by conversions and schedule searches
///
/// Deserializes from `{"tz": "<TZ string>", "lookaheadDays": <days>}`, both keys being optional.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Active time zone
    #[serde(rename = "tz")]
    pub timezone: PosixTimezone,
    /// Number of days scanned by a schedule search after the starting date
    #[serde(rename = "lookaheadDays")]
    pub schedule_lookahead_days: u32,
}

impl Config {
    /// Construct a configuration for a time zone, with the default lookahead
    pub fn new(timezone: PosixTimezone) -> Self {
        Self { timezone, ..Self::default() }
    }

    /// Construct a conversion engine for a Unix time in the configured time zone
    pub fn converter(&self, time: i64) -> LocalTimeConvert<'_> {
        LocalTimeConvert::new(&self.timezone, time)
    }

    /// Decode a schedule from an array of rule objects, with the configured lookahead
    pub fn schedule_from_json(&self, value: &serde_json::Value) -> Result<Schedule, Error> {
        Ok(Schedule::from_json_value(value)?.with_lookahead_days(self.schedule_lookahead_days))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { timezone: PosixTimezone::utc(), schedule_lookahead_days: DEFAULT_LOOKAHEAD_DAYS }
    }
}
