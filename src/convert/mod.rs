//! Conversion between Unix times and local time, and local calendar navigation.

mod format;

pub use format::{TIME_FORMAT_DEFAULT, TIME_FORMAT_ISO8601_FULL};

use crate::datetime::{days_since_unix_epoch, last_day_of_month, CalendarTime, Date, TimeOfDay};
use crate::schedule::{Schedule, TimeOfDayRange};
use crate::timezone::{Position, PosixTimezone};
use crate::{Error, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

#[cfg(test)]
mod tests;

/// Maximum number of week day steps when looking for an ordinal week day
const MAX_WEEK_DAY_ORDINAL_TRIES: usize = 52;

/// Local time of a Unix time under a time zone
///
/// All the derived fields are recomputed whenever the Unix time changes. Values are cheap to copy, so
/// a copy can be navigated to probe a candidate without touching the original.
#[derive(Debug, Copy, Clone)]
pub struct LocalTimeConvert<'a> {
    /// Time zone
    timezone: &'a PosixTimezone,
    /// Unix time in seconds
    time: i64,
    /// Position relative to the transitions of the year
    position: Position,
    /// DST start Unix time of the year, `0` without DST
    dst_start: i64,
    /// Standard time start Unix time of the year, `0` without DST
    standard_start: i64,
    /// UTC calendar breakdown of the DST start
    dst_start_fields: CalendarTime,
    /// UTC calendar breakdown of the standard time start
    standard_start_fields: CalendarTime,
    /// Local calendar breakdown
    local: CalendarTime,
}

impl<'a> LocalTimeConvert<'a> {
    /// Construct the local time of a Unix time in seconds
    pub fn new(timezone: &'a PosixTimezone, time: i64) -> Self {
        let epoch = CalendarTime::from_unix_time(0);

        let mut conv = Self {
            timezone,
            time,
            position: Position::NoDst,
            dst_start: 0,
            standard_start: 0,
            dst_start_fields: epoch,
            standard_start_fields: epoch,
            local: epoch,
        };
        conv.convert();
        conv
    }

    /// Returns the same time zone at another Unix time
    pub fn with_time(&self, time: i64) -> Self {
        let mut conv = *self;
        conv.set_time(time);
        conv
    }

    /// Move to a Unix time in seconds
    pub fn set_time(&mut self, time: i64) {
        self.time = time;
        self.convert();
    }

    /// Recompute the DST position, the transitions and the local calendar breakdown
    pub fn convert(&mut self) {
        let (position, transitions) = self.timezone.position_at(self.time);
        let (dst_start, standard_start) = transitions.unwrap_or((0, 0));

        self.position = position;
        self.dst_start = dst_start;
        self.standard_start = standard_start;
        self.dst_start_fields = CalendarTime::from_unix_time(dst_start);
        self.standard_start_fields = CalendarTime::from_unix_time(standard_start);

        let offset = self.timezone.offset(position.is_dst()).to_seconds();
        self.local = CalendarTime::from_unix_time(self.time - offset);
    }

    /// Returns time zone
    pub fn timezone(&self) -> &'a PosixTimezone {
        self.timezone
    }

    /// Returns Unix time in seconds
    pub fn time(&self) -> i64 {
        self.time
    }

    /// Returns position relative to the transitions of the year
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns DST start Unix time of the year, `0` without DST
    pub fn dst_start(&self) -> i64 {
        self.dst_start
    }

    /// Returns standard time start Unix time of the year, `0` without DST
    pub fn standard_start(&self) -> i64 {
        self.standard_start
    }

    /// Returns UTC calendar breakdown of the DST start
    pub fn dst_start_fields(&self) -> &CalendarTime {
        &self.dst_start_fields
    }

    /// Returns UTC calendar breakdown of the standard time start
    pub fn standard_start_fields(&self) -> &CalendarTime {
        &self.standard_start_fields
    }

    /// Returns local calendar breakdown
    pub fn local_time(&self) -> &CalendarTime {
        &self.local
    }

    /// Returns local date
    pub fn local_date(&self) -> Date {
        self.local.date()
    }

    /// Returns local time of day
    pub fn local_time_of_day(&self) -> TimeOfDay {
        self.local.time_of_day()
    }

    /// Returns `true` if DST is in effect
    pub fn is_dst(&self) -> bool {
        self.position.is_dst()
    }

    /// Returns `true` if standard time is in effect
    pub fn is_standard_time(&self) -> bool {
        !self.is_dst()
    }

    /// Returns the zone designation in effect, or `Z` for UTC
    pub fn zone_name(&self) -> &'a str {
        if self.timezone.is_z() {
            return "Z";
        }
        self.timezone.zone_name(self.is_dst())
    }

    /// Returns the number of days in the local month
    pub fn last_day_of_month(&self) -> u8 {
        last_day_of_month(self.local.year, self.local.month as u8)
    }

    /// Returns the Unix time of a local date and time of day
    pub(crate) fn local_to_utc(&self, date: &Date, time_of_day: TimeOfDay) -> i64 {
        let mut fields = CalendarTime::from_date(date);
        fields.set_time_of_day(Some(time_of_day));
        self.timezone.local_to_utc(&fields)
    }

    /// Move to a local date, at the provided time of day or at the current one
    fn move_to_local(&mut self, date: &Date, time_of_day: Option<TimeOfDay>) {
        let mut fields = self.local;
        fields.set_date(date);
        fields.set_time_of_day(time_of_day);
        self.set_time(self.timezone.local_to_utc(&fields));
    }

    /// Move to a time of day on the first local date from `date` lying strictly after `start`
    ///
    /// A time of day skipped at the very start of a date resolves to the first instant of that date.
    fn move_to_local_after(&mut self, start: i64, mut date: Date, time_of_day: Option<TimeOfDay>) {
        let time_of_day = time_of_day.unwrap_or_else(|| self.local_time_of_day());

        loop {
            self.move_to_local(&date, Some(time_of_day));

            if self.local_date() < date && self.timezone.has_dst() {
                let first = self.with_time(self.dst_start);
                if first.local_date() == date {
                    *self = first;
                }
            }

            if self.time > start {
                return;
            }
            date = date.add_days(1);
        }
    }

    /// Move by a number of seconds
    pub fn add_seconds(&mut self, seconds: i64) {
        self.set_time(self.time + seconds);
    }

    /// Move to the provided time of day on the current local date
    ///
    /// The result may be earlier than the current time. Nothing changes for `None`.
    pub fn at_local_time(&mut self, time_of_day: Option<TimeOfDay>) {
        if time_of_day.is_some() {
            let date = self.local_date();
            self.move_to_local(&date, time_of_day);
        }
    }

    /// Move to the next occurrence of the provided local time of day, rolling over to the next day if
    /// it is not after the current time
    pub fn next_local_time(&mut self, time_of_day: TimeOfDay) {
        let start = self.time;
        self.at_local_time(Some(time_of_day));

        if self.time <= start {
            self.set_time(start);
            self.next_day(Some(time_of_day));
        }
    }

    /// Move to the next occurrence of the provided local time of day, adding a whole day to the
    /// instant if it is not after the current time
    pub fn next_time(&mut self, time_of_day: TimeOfDay) {
        let start = self.time;
        self.at_local_time(Some(time_of_day));

        if self.time <= start {
            self.add_seconds(SECONDS_PER_DAY);
            let date = self.local_date();
            self.move_to_local_after(start, date, Some(time_of_day));
        }
    }

    /// Move to the earliest next occurrence of a list of local times of day within the next day
    ///
    /// Returns `false` without moving if there is none.
    pub fn next_time_list(&mut self, times_of_day: &[TimeOfDay]) -> bool {
        let limit = self.time + SECONDS_PER_DAY;

        let next = times_of_day
            .iter()
            .map(|&time_of_day| {
                let mut conv = *self;
                conv.next_time(time_of_day);
                conv.time
            })
            .filter(|&time| time <= limit)
            .min();

        match next {
            Some(time) => {
                self.set_time(time);
                true
            }
            None => false,
        }
    }

    /// Move to the next local day, at the provided time of day or at the current one
    ///
    /// The result is always after the current time.
    pub fn next_day(&mut self, time_of_day: Option<TimeOfDay>) {
        let date = self.local_date().add_days(1);
        self.move_to_local_after(self.time, date, time_of_day);
    }

    /// Move to the next local midnight
    pub fn next_day_midnight(&mut self) {
        self.next_day(Some(TimeOfDay::MIDNIGHT));
    }

    /// Move to the next local day like [`LocalTimeConvert::next_day`], stopping at a DST transition
    /// lying strictly in between
    pub fn next_day_or_time_change(&mut self, time_of_day: Option<TimeOfDay>) {
        let start = *self;
        self.next_day(time_of_day);

        for transition in [start.dst_start, start.standard_start] {
            if start.timezone.has_dst() && start.time < transition && transition < self.time {
                self.set_time(transition);
            }
        }
    }

    /// Move to the next occurrence of a day of the week in `[0, 6]` from Sunday, at least one day later
    pub fn next_day_of_week(
        &mut self,
        week_day: u8,
        time_of_day: Option<TimeOfDay>,
    ) -> Result<(), Error> {
        if week_day > 6 {
            return Err(Error::OutOfRange("invalid week day"));
        }

        let days = match (week_day as i64 - self.local.week_day as i64).rem_euclid(7) {
            0 => 7,
            days => days,
        };

        let date = self.local_date().add_days(days);
        self.move_to_local_after(self.time, date, time_of_day);
        Ok(())
    }

    /// Move to the next day from Monday to Friday
    pub fn next_weekday(&mut self, time_of_day: Option<TimeOfDay>) {
        self.next_day(time_of_day);
        while !(1..=5).contains(&self.local.week_day) {
            self.next_day(time_of_day);
        }
    }

    /// Move to the next Saturday or Sunday
    pub fn next_weekend_day(&mut self, time_of_day: Option<TimeOfDay>) {
        self.next_day(time_of_day);
        while (1..=5).contains(&self.local.week_day) {
            self.next_day(time_of_day);
        }
    }

    /// Move to a day of the current local month, or of the next one if it is not after the current time
    ///
    /// A positive `month_day` counts from the start of the month, and is clamped to its last day. Zero
    /// or a negative `month_day` counts from the end of the month, `0` being the last day.
    pub fn next_day_of_month(&mut self, month_day: i32, time_of_day: Option<TimeOfDay>) {
        let start = *self;

        let (year, month) = (self.local.year, self.local.month as u8);
        self.move_to_local(&month_date(year, month, month_day), time_of_day);

        if self.time <= start.time {
            *self = start;
            self.next_day_of_next_month(month_day, time_of_day);
        }
    }

    /// Move to a day of the next local month, counted like [`LocalTimeConvert::next_day_of_month`]
    pub fn next_day_of_next_month(&mut self, month_day: i32, time_of_day: Option<TimeOfDay>) {
        let (year, month) = match self.local.month {
            12 => (self.local.year + 1, 1),
            month => (self.local.year, month as u8 + 1),
        };
        self.move_to_local(&month_date(year, month, month_day), time_of_day);
    }

    /// Move to the next day of the week whose occurrence in its month is `ordinal`
    ///
    /// A negative `ordinal` counts from the end of the month, `-1` being the last occurrence. Returns
    /// `false` without moving if no match is found within a year.
    pub fn next_day_of_week_ordinal(
        &mut self,
        week_day: u8,
        ordinal: i32,
        time_of_day: Option<TimeOfDay>,
    ) -> Result<bool, Error> {
        if week_day > 6 {
            return Err(Error::OutOfRange("invalid week day"));
        }
        if ordinal == 0 {
            return Err(Error::OutOfRange("invalid week day ordinal"));
        }

        let start = *self;

        for _ in 0..MAX_WEEK_DAY_ORDINAL_TRIES {
            self.next_day_of_week(week_day, time_of_day)?;

            let matches = if ordinal > 0 {
                self.local.ordinal() == ordinal
            } else {
                let days_to_month_end = self.last_day_of_month() as i32 - self.local.month_day;
                -(days_to_month_end / 7 + 1) == ordinal
            };

            if matches {
                return Ok(true);
            }
        }

        *self = start;
        Ok(false)
    }

    /// Move forward `minutes` minutes, then back to the latest local minute congruent to
    /// `starting_modulo` modulo `minutes`, with zero seconds
    pub fn next_minute_multiple(&mut self, minutes: u32, starting_modulo: u32) -> Result<(), Error> {
        if minutes == 0 {
            return Err(Error::OutOfRange("invalid minute multiple"));
        }

        self.advance_minute_multiple(minutes as i64, starting_modulo as i64);
        Ok(())
    }

    fn advance_minute_multiple(&mut self, minutes: i64, starting_modulo: i64) {
        self.add_seconds(minutes * SECONDS_PER_MINUTE);

        let extra_minutes = (self.local.minute as i64 - starting_modulo).rem_euclid(minutes);
        self.add_seconds(-(extra_minutes * SECONDS_PER_MINUTE + self.local.second as i64));
    }

    /// Move to the next whole local minute
    pub fn next_minute(&mut self) {
        self.advance_minute_multiple(1, 0);
    }

    /// Move to the next whole local hour
    pub fn next_hour(&mut self) {
        self.advance_minute_multiple(SECONDS_PER_HOUR / SECONDS_PER_MINUTE, 0);
    }

    /// Returns `true` if the current time lies within the range on the current local date
    pub fn in_local_time_range(&self, range: &TimeOfDayRange) -> bool {
        let date = self.local_date();
        let start = self.local_to_utc(&date, range.start());
        let end = self.local_to_utc(&date, range.end());
        start <= self.time && self.time <= end
    }

    /// Returns `true` if the current time is before the range start on the current local date
    pub fn before_local_time_range(&self, range: &TimeOfDayRange) -> bool {
        self.time < self.local_to_utc(&self.local_date(), range.start())
    }

    /// Move to the next scheduled time, returning `false` without moving if there is none
    pub fn next_schedule(&mut self, schedule: &Schedule) -> bool {
        match schedule.next_scheduled_time(self) {
            Some(time) => {
                self.set_time(time);
                true
            }
            None => false,
        }
    }
}

/// Resolve a day of a month, counted from the end of the month if not positive
fn month_date(year: i32, month: u8, month_day: i32) -> Date {
    let last_day = last_day_of_month(year, month) as i32;

    let month_day = match month_day {
        day if day > 0 => day.min(last_day),
        day => (last_day + day).max(1),
    };

    Date::from_days_since_unix_epoch(days_since_unix_epoch(year, month as usize, month_day as i64))
}
