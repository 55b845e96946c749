#![deny(missing_docs)]

//! This crate converts between Unix timestamps and local civil time under a POSIX timezone rule, and
//! evaluates recurring schedules expressed in that local time.
//!
//! It is meant for hosts without a timezone database: daylight saving transitions are computed from a
//! compact [POSIX `TZ` string](https://pubs.opengroup.org/onlinepubs/9699919799/basedefs/V1_chap08.html)
//! of the form `std offset[dst[offset][,start[/time],end[/time]]]`, where `start` and `end` use the
//! `Mm.w.d` notation.
//!
//! # Usage
//!
//! ## Time zone conversion
//!
//! ```rust
//! # fn main() -> Result<(), localtime::Error> {
//! use localtime::{LocalTimeConvert, Position, PosixTimezone, TimeOfDay};
//!
//! let new_york: PosixTimezone = "EST5EDT,M3.2.0/2:00:00,M11.1.0/2:00:00".parse()?;
//!
//! // 2021-06-03T18:10:52Z
//! let conv = LocalTimeConvert::new(&new_york, 1622743852);
//! assert_eq!(conv.position(), Position::InDst);
//! assert_eq!(conv.dst_start(), 1615705200);
//! assert_eq!(conv.standard_start(), 1636264800);
//! assert_eq!(conv.zone_name(), "EDT");
//! assert_eq!(conv.format("%Y-%m-%d %H:%M:%S %z")?, "2021-06-03 14:10:52 -04:00");
//!
//! // Move to the next 3:00 PM local time
//! let mut conv = conv;
//! conv.next_local_time("15:00".parse::<TimeOfDay>()?);
//! assert_eq!(conv.time(), localtime::parse_utc_time("2021-06-03 19:00:00")?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Schedules
//!
//! ```rust
//! # fn main() -> Result<(), localtime::Error> {
//! use localtime::{parse_utc_time, Config, DayOfWeekMask, Schedule, TimeOfDay, TimeOfDayRange};
//!
//! let config = Config::new("EST5EDT,M3.2.0/2:00:00,M11.1.0/2:00:00".parse()?);
//!
//! // Every 15 minutes from 9:00 AM to 5:00 PM on weekdays, every hour otherwise
//! let business_hours = TimeOfDayRange::new("09:00".parse()?, "17:00".parse()?)
//!     .with_only_on_days(DayOfWeekMask::WEEKDAY);
//! let schedule = Schedule::new()
//!     .with_minute_multiple(15, business_hours)?
//!     .with_minute_multiple(60, TimeOfDayRange::default())?;
//!
//! // Friday 2021-12-03, 05:10:52 local time
//! let mut conv = config.converter(parse_utc_time("2021-12-03 10:10:52")?);
//! assert!(conv.next_schedule(&schedule));
//! assert_eq!(conv.local_time_of_day(), TimeOfDay::new(6, 0, 0)?);
//!
//! // The same schedule from JSON
//! let json = serde_json::json!([
//!     { "mh": 15, "s": "09:00:00", "e": "17:00:00", "y": 62 },
//!     { "mh": 60 }
//! ]);
//! let from_json = config.schedule_from_json(&json)?;
//! assert_eq!(from_json.next_scheduled_time(&conv), schedule.next_scheduled_time(&conv));
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

mod config;
mod convert;
mod datetime;
mod error;
mod parse;
mod restriction;
mod schedule;
mod timezone;

pub use config::{Config, DEFAULT_LOOKAHEAD_DAYS};
pub use convert::{LocalTimeConvert, TIME_FORMAT_DEFAULT, TIME_FORMAT_ISO8601_FULL};
pub use datetime::{
    day_of_week_of_month, format_utc_time, last_day_of_month, parse_utc_time, CalendarTime, Date,
    TimeOfDay,
};
pub use error::Error;
pub use restriction::{DateRestriction, DayOfWeekMask};
pub use schedule::{RangePosition, Schedule, ScheduleManager, ScheduleRule, TimeOfDayRange};
pub use timezone::{Position, PosixTimezone, TransitionRule};

/// Number of hours in one day
const HOURS_PER_DAY: i64 = 24;
/// Number of seconds in one minute
const SECONDS_PER_MINUTE: i64 = 60;
/// Number of seconds in one hour
const SECONDS_PER_HOUR: i64 = 3600;
/// Number of seconds in one day
const SECONDS_PER_DAY: i64 = SECONDS_PER_HOUR * HOURS_PER_DAY;
/// Number of days in one week
const DAYS_PER_WEEK: i64 = 7;

/// Month days in a normal year
const DAY_IN_MONTHS_NORMAL_YEAR: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
/// Cumulated month days in a normal year
const CUMUL_DAY_IN_MONTHS_NORMAL_YEAR: [i64; 12] =
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
