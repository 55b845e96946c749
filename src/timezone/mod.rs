//! Types related to a POSIX time zone rule.

mod rule;

pub use rule::TransitionRule;

use crate::datetime::{CalendarTime, TimeOfDay};
use crate::parse::parse_posix_tz;
use crate::Error;

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};


/// Position of an instant relative to the DST transitions of its year
///
/// With the northern ordering, DST starts and ends within the year. With the southern ordering,
/// standard time starts and ends within the year, and DST spans the year boundary.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Position {
    /// The time zone has no DST
    NoDst,
    /// Standard time, before the DST start of the year
    BeforeDst,
    /// DST, between the DST start and the standard time start of the year
    InDst,
    /// Standard time, after the standard time start of the year
    AfterDst,
    /// DST, before the standard time start of the year
    BeforeStandard,
    /// Standard time, between the standard time start and the DST start of the year
    InStandard,
    /// DST, after the DST start of the year
    AfterStandard,
}

impl Position {
    /// Returns `true` if DST is in effect at this position
    pub fn is_dst(&self) -> bool {
        matches!(self, Self::InDst | Self::BeforeStandard | Self::AfterStandard)
    }
}

/// Time zone described by a POSIX `TZ` string
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct PosixTimezone {
    /// Standard time zone designation
    standard_name: String,
    /// Standard time UTC offset, positive west of UTC
    standard_offset: TimeOfDay,
    /// DST zone designation, empty without DST
    dst_name: String,
    /// DST UTC offset, positive west of UTC
    dst_offset: TimeOfDay,
    /// DST start and standard time start rules
    rules: Option<(TransitionRule, TransitionRule)>,
    /// `false` if an incomplete DST clause was dropped while parsing
    valid: bool,
}

impl PosixTimezone {
    /// Construct a time zone from parsed parts
    pub(crate) fn from_parts(
        standard_name: String,
        standard_offset: TimeOfDay,
        dst_name: String,
        dst_offset: TimeOfDay,
        rules: Option<(TransitionRule, TransitionRule)>,
        valid: bool,
    ) -> Self {
        Self { standard_name, standard_offset, dst_name, dst_offset, rules, valid }
    }

    /// Construct a time zone with DST
    pub fn with_dst(
        standard_name: &str,
        standard_offset: TimeOfDay,
        dst_name: &str,
        dst_offset: TimeOfDay,
        dst_start: TransitionRule,
        standard_start: TransitionRule,
    ) -> Self {
        Self::from_parts(
            standard_name.to_owned(),
            standard_offset,
            dst_name.to_owned(),
            dst_offset,
            Some((dst_start, standard_start)),
            true,
        )
    }

    /// Construct a time zone with a fixed UTC offset
    pub fn fixed(name: &str, offset: TimeOfDay) -> Self {
        Self::from_parts(
            name.to_owned(),
            offset,
            String::new(),
            offset.earlier_by_one_hour(),
            None,
            true,
        )
    }

    /// Returns the `UTC0` time zone
    pub fn utc() -> Self {
        Self::fixed("UTC", TimeOfDay::MIDNIGHT)
    }

    /// Returns standard time zone designation
    pub fn standard_name(&self) -> &str {
        &self.standard_name
    }

    /// Returns standard time UTC offset, positive west of UTC
    pub fn standard_offset(&self) -> TimeOfDay {
        self.standard_offset
    }

    /// Returns DST zone designation
    pub fn dst_name(&self) -> &str {
        &self.dst_name
    }

    /// Returns DST UTC offset, positive west of UTC
    pub fn dst_offset(&self) -> TimeOfDay {
        self.dst_offset
    }

    /// Returns DST start rule
    pub fn dst_start(&self) -> Option<TransitionRule> {
        self.rules.map(|(dst_start, _)| dst_start)
    }

    /// Returns standard time start rule
    pub fn standard_start(&self) -> Option<TransitionRule> {
        self.rules.map(|(_, standard_start)| standard_start)
    }

    /// Returns `true` if the time zone has DST transitions
    pub fn has_dst(&self) -> bool {
        self.rules.is_some()
    }

    /// Returns `false` if the `TZ` string had a DST start rule without a standard time start rule
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns `true` for a UTC time zone, formatted with a `Z` offset
    pub fn is_z(&self) -> bool {
        !self.has_dst()
            && self.standard_offset.to_seconds() == 0
            && matches!(self.standard_name.as_str(), "UTC" | "Z")
    }

    /// Returns the UTC offset in force, positive west of UTC
    pub fn offset(&self, is_dst: bool) -> TimeOfDay {
        if is_dst {
            self.dst_offset
        } else {
            self.standard_offset
        }
    }

    /// Returns the zone designation in force
    pub fn zone_name(&self, is_dst: bool) -> &str {
        if is_dst {
            &self.dst_name
        } else {
            &self.standard_name
        }
    }

    /// Returns the DST start and standard time start Unix times in seconds for the provided year
    pub fn transitions(&self, year: i32) -> Option<(i64, i64)> {
        self.rules.map(|(dst_start, standard_start)| {
            (
                dst_start.calculate(year, self.standard_offset),
                standard_start.calculate(year, self.dst_offset),
            )
        })
    }

    /// Returns the position of a Unix time in seconds relative to the transitions of its UTC year,
    /// along with these transitions
    pub fn position_at(&self, unix_time: i64) -> (Position, Option<(i64, i64)>) {
        let year = CalendarTime::from_unix_time(unix_time).year;

        match self.transitions(year) {
            None => (Position::NoDst, None),
            Some((dst_start, standard_start)) => {
                (classify(unix_time, dst_start, standard_start), Some((dst_start, standard_start)))
            }
        }
    }

    /// Convert a local calendar breakdown to a Unix time in seconds
    ///
    /// A local time repeated at the end of DST resolves to its standard time occurrence. A local time
    /// skipped at the start of DST resolves with the DST offset.
    pub fn local_to_utc(&self, local: &CalendarTime) -> i64 {
        let unix_time = local.to_unix_time();
        let standard_candidate = unix_time + self.standard_offset.to_seconds();

        if self.has_dst() && self.position_at(standard_candidate).0.is_dst() {
            unix_time + self.dst_offset.to_seconds()
        } else {
            standard_candidate
        }
    }
}

impl Default for PosixTimezone {
    fn default() -> Self {
        Self::utc()
    }
}

/// Classify a Unix time against the transitions of its year
fn classify(unix_time: i64, dst_start: i64, standard_start: i64) -> Position {
    if dst_start < standard_start {
        if unix_time < dst_start {
            Position::BeforeDst
        } else if unix_time < standard_start {
            Position::InDst
        } else {
            Position::AfterDst
        }
    } else if unix_time < standard_start {
        Position::BeforeStandard
    } else if unix_time < dst_start {
        Position::InStandard
    } else {
        Position::AfterStandard
    }
}

/// Write a zone designation, quoted if it is not only made of letters
fn write_designation(f: &mut fmt::Formatter, name: &str) -> fmt::Result {
    if name.bytes().all(|b| b.is_ascii_alphabetic()) {
        f.write_str(name)
    } else {
        write!(f, "<{}>", name)
    }
}

impl fmt::Display for PosixTimezone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_designation(f, &self.standard_name)?;
        write!(f, "{}", self.standard_offset)?;

        if !self.dst_name.is_empty() {
            write_designation(f, &self.dst_name)?;
            write!(f, "{}", self.dst_offset)?;
        }

        if let Some((dst_start, standard_start)) = &self.rules {
            write!(f, ",{},{}", dst_start, standard_start)?;
        }

        Ok(())
    }
}

impl FromStr for PosixTimezone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_posix_tz(s.as_bytes())
    }
}

impl<'de> Deserialize<'de> for PosixTimezone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
