//! Decoding of schedules from already parsed JSON values.

use super::{Schedule, ScheduleManager, ScheduleRule, TimeOfDayRange};
use crate::config::DEFAULT_LOOKAHEAD_DAYS;
use crate::datetime::{Date, TimeOfDay};
use crate::restriction::{DateRestriction, DayOfWeekMask};
use crate::Error;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Range keys of a rule object
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RangeConfig {
    #[serde(rename = "s")]
    start: Option<TimeOfDay>,
    #[serde(rename = "e")]
    end: Option<TimeOfDay>,
    #[serde(rename = "y")]
    days: Option<u8>,
    #[serde(rename = "a", default)]
    only_on: Vec<Date>,
    #[serde(rename = "x", default)]
    except: Vec<Date>,
}

impl From<RangeConfig> for TimeOfDayRange {
    fn from(config: RangeConfig) -> Self {
        // Without a mask or allowed dates, every day of the week is allowed
        let days = match (config.days, config.only_on.is_empty()) {
            (Some(bits), _) => DayOfWeekMask::from_bits(bits),
            (None, true) => DayOfWeekMask::ALL,
            (None, false) => DayOfWeekMask::NONE,
        };

        let mut restriction = DateRestriction::default()
            .with_only_on_days(days)
            .with_only_on_dates(config.only_on)
            .with_except_dates(config.except);

        if restriction.is_empty() {
            restriction = DateRestriction::all();
        }

        Self::new(
            config.start.unwrap_or(TimeOfDay::MIDNIGHT),
            config.end.unwrap_or(TimeOfDay::END_OF_DAY),
        )
        .with_restriction(restriction)
    }
}

/// Rule object, with shortcut keys selecting the rule kind
#[derive(Debug, Deserialize)]
pub(crate) struct RuleConfig {
    #[serde(flatten)]
    range: RangeConfig,
    #[serde(rename = "m")]
    kind: Option<u8>,
    #[serde(rename = "i")]
    value: Option<i32>,
    #[serde(rename = "d")]
    week_day: Option<u8>,
    mh: Option<i32>,
    hd: Option<i32>,
    dw: Option<i32>,
    dm: Option<i32>,
    tm: Option<TimeOfDay>,
}

/// Rule kind codes of the `m` key
const KIND_MINUTE_OF_HOUR: u8 = 1;
const KIND_HOUR_OF_DAY: u8 = 2;
const KIND_DAY_OF_WEEK_OF_MONTH: u8 = 3;
const KIND_DAY_OF_MONTH: u8 = 4;
const KIND_TIME: u8 = 5;

impl TryFrom<RuleConfig> for ScheduleRule {
    type Error = Error;

    fn try_from(config: RuleConfig) -> Result<Self, Self::Error> {
        let (kind, shortcut_value) = if let Some(value) = config.mh {
            (KIND_MINUTE_OF_HOUR, Some(value))
        } else if let Some(value) = config.hd {
            (KIND_HOUR_OF_DAY, Some(value))
        } else if let Some(value) = config.dw {
            (KIND_DAY_OF_WEEK_OF_MONTH, Some(value))
        } else if let Some(value) = config.dm {
            (KIND_DAY_OF_MONTH, Some(value))
        } else if config.tm.is_some() {
            (KIND_TIME, None)
        } else {
            (config.kind.ok_or(Error::Schedule("missing rule kind"))?, None)
        };

        let mut range = TimeOfDayRange::from(config.range);
        if let Some(time) = config.tm {
            range = TimeOfDayRange::new(time, range.end()).with_restriction(range.restriction().clone());
        }

        let value = config.value.or(shortcut_value);
        let increment = || -> Result<u32, Error> {
            let value = value.ok_or(Error::Schedule("missing rule increment"))?;
            u32::try_from(value).map_err(|_| Error::Schedule("invalid rule increment"))
        };

        let rule = match kind {
            KIND_MINUTE_OF_HOUR => Self::MinuteOfHour { increment: increment()?, range },
            KIND_HOUR_OF_DAY => Self::HourOfDay { increment: increment()?, range },
            KIND_DAY_OF_WEEK_OF_MONTH => Self::DayOfWeekOfMonth {
                week_day: config.week_day.ok_or(Error::Schedule("missing rule week day"))?,
                ordinal: value.ok_or(Error::Schedule("missing rule ordinal"))?,
                range,
            },
            KIND_DAY_OF_MONTH => Self::DayOfMonth { day: value.unwrap_or(0), range },
            KIND_TIME => Self::Time { range },
            _ => return Err(Error::Schedule("unknown rule kind")),
        };

        rule.validate()?;
        Ok(rule)
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rules = Vec::<ScheduleRule>::deserialize(deserializer)?;
        Ok(Self { rules, lookahead_days: DEFAULT_LOOKAHEAD_DAYS })
    }
}

impl<'de> Deserialize<'de> for ScheduleManager {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let schedules = BTreeMap::<String, Schedule>::deserialize(deserializer)?;

        let mut manager = Self::new();
        for (name, schedule) in schedules {
            manager.add_schedule(&name, schedule);
        }
        Ok(manager)
    }
}

impl Schedule {
    /// Decode a schedule from an array of rule objects
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, Error> {
        Ok(Self::deserialize(value)?)
    }
}

impl ScheduleManager {
    /// Decode named schedules from an object mapping names to arrays of rule objects
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, Error> {
        Ok(Self::deserialize(value)?)
    }
}
