use super::json::RangeConfig;
use crate::convert::LocalTimeConvert;
use crate::datetime::{Date, TimeOfDay};
use crate::restriction::{DateRestriction, DayOfWeekMask};

use serde::Deserialize;

/// Position of a time of day relative to a range
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RangePosition {
    /// Before the range start
    Before,
    /// Between the range start and the range end, both included
    Within,
    /// After the range end
    After,
}

/// Closed range of local times of day, on the dates allowed by a restriction
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(from = "RangeConfig")]
pub struct TimeOfDayRange {
    start: TimeOfDay,
    end: TimeOfDay,
    restriction: DateRestriction,
}

impl TimeOfDayRange {
    /// Construct a range valid on every date
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end, restriction: DateRestriction::all() }
    }

    /// Construct a range from `start` to the end of the day, valid on every date
    pub fn starting_at(start: TimeOfDay) -> Self {
        Self::new(start, TimeOfDay::END_OF_DAY)
    }

    /// Replace the date restriction
    pub fn with_restriction(mut self, restriction: DateRestriction) -> Self {
        self.restriction = restriction;
        self
    }

    /// Restrict the range to some days of the week
    pub fn with_only_on_days(mut self, days: DayOfWeekMask) -> Self {
        self.restriction = self.restriction.with_only_on_days(days);
        self
    }

    /// Exclude some dates
    pub fn with_except_dates<I: IntoIterator<Item = Date>>(mut self, dates: I) -> Self {
        self.restriction = self.restriction.with_except_dates(dates);
        self
    }

    /// Returns range start
    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    /// Returns range end
    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Returns date restriction
    pub fn restriction(&self) -> &DateRestriction {
        &self.restriction
    }

    /// Returns the position of a time of day relative to the range
    pub fn position_of(&self, time_of_day: TimeOfDay) -> RangePosition {
        if time_of_day < self.start {
            RangePosition::Before
        } else if time_of_day <= self.end {
            RangePosition::Within
        } else {
            RangePosition::After
        }
    }

    /// Returns the elapsed seconds from the range start to the range end on the current local date
    ///
    /// An end not after the start lies on the next day. Both ends are converted separately, so a DST
    /// transition within the range shortens or lengthens the span.
    pub fn time_span(&self, conv: &LocalTimeConvert) -> i64 {
        let date = conv.local_date();
        let end_date = match self.end <= self.start {
            true => date.add_days(1),
            false => date,
        };

        conv.local_to_utc(&end_date, self.end) - conv.local_to_utc(&date, self.start)
    }
}

impl Default for TimeOfDayRange {
    fn default() -> Self {
        Self::new(TimeOfDay::MIDNIGHT, TimeOfDay::END_OF_DAY)
    }
}
