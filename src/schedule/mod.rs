//! Recurring schedules in local time.

mod json;
mod range;
mod rule;

pub use range::{RangePosition, TimeOfDayRange};
pub use rule::ScheduleRule;

use crate::config::DEFAULT_LOOKAHEAD_DAYS;
use crate::convert::LocalTimeConvert;
use crate::datetime::TimeOfDay;
use crate::Error;


/// Set of schedule rules, occurring whenever one of its rules does
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Schedule {
    /// Rules, in declaration order
    rules: Vec<ScheduleRule>,
    /// Number of days scanned after the starting date
    lookahead_days: u32,
}

impl Schedule {
    /// Construct an empty schedule
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of days scanned after the starting date
    pub fn with_lookahead_days(mut self, lookahead_days: u32) -> Self {
        self.lookahead_days = lookahead_days;
        self
    }

    /// Add a rule occurring every `increment` minutes within each local hour of the range
    pub fn with_minute_multiple(self, increment: u32, range: TimeOfDayRange) -> Result<Self, Error> {
        self.with_rule(ScheduleRule::MinuteOfHour { increment, range })
    }

    /// Add a rule occurring every `increment` hours from the range start
    pub fn with_hour_multiple(self, increment: u32, range: TimeOfDayRange) -> Result<Self, Error> {
        self.with_rule(ScheduleRule::HourOfDay { increment, range })
    }

    /// Add a rule occurring on the `ordinal`-th `week_day` of each month, at the range start
    pub fn with_day_of_week_of_month(
        self,
        week_day: u8,
        ordinal: i32,
        range: TimeOfDayRange,
    ) -> Result<Self, Error> {
        self.with_rule(ScheduleRule::DayOfWeekOfMonth { week_day, ordinal, range })
    }

    /// Add a rule occurring on a day of each month, at the range start
    pub fn with_day_of_month(self, day: i32, range: TimeOfDayRange) -> Result<Self, Error> {
        self.with_rule(ScheduleRule::DayOfMonth { day, range })
    }

    /// Add a rule occurring every allowed day at the range start
    pub fn with_time(mut self, range: TimeOfDayRange) -> Self {
        self.rules.push(ScheduleRule::Time { range });
        self
    }

    /// Add one daily rule per time of day
    pub fn with_times(mut self, times_of_day: &[TimeOfDay]) -> Self {
        for &time_of_day in times_of_day {
            self = self.with_time(TimeOfDayRange::starting_at(time_of_day));
        }
        self
    }

    fn with_rule(mut self, rule: ScheduleRule) -> Result<Self, Error> {
        self.add_rule(rule)?;
        Ok(self)
    }

    /// Add a rule after checking it
    pub fn add_rule(&mut self, rule: ScheduleRule) -> Result<(), Error> {
        rule.validate()?;
        self.rules.push(rule);
        Ok(())
    }

    /// Returns rules
    pub fn rules(&self) -> &[ScheduleRule] {
        &self.rules
    }

    /// Returns the number of days scanned after the starting date
    pub fn lookahead_days(&self) -> u32 {
        self.lookahead_days
    }

    /// Returns the earliest next time of all rules, strictly after the current time of `conv`
    pub fn next_scheduled_time(&self, conv: &LocalTimeConvert) -> Option<i64> {
        self.next_scheduled_rule(conv).map(|(time, _)| time)
    }

    /// Returns the earliest next time of the rules accepted by `filter`
    pub fn next_scheduled_time_filtered<F>(&self, conv: &LocalTimeConvert, filter: F) -> Option<i64>
    where
        F: Fn(&ScheduleRule) -> bool,
    {
        self.next_rule_filtered(conv, filter).map(|(time, _)| time)
    }

    /// Returns the earliest next time of all rules, with the rule producing it
    ///
    /// Every rule starts from the same time. When several rules produce the same time, a repeating rule
    /// with the shortest range wins over wider ranges and single occurrences. Remaining ties go to the
    /// first declared rule.
    pub fn next_scheduled_rule(&self, conv: &LocalTimeConvert) -> Option<(i64, &ScheduleRule)> {
        self.next_rule_filtered(conv, |_| true)
    }

    fn next_rule_filtered<F>(&self, conv: &LocalTimeConvert, filter: F) -> Option<(i64, &ScheduleRule)>
    where
        F: Fn(&ScheduleRule) -> bool,
    {
        self.rules
            .iter()
            .filter(|&rule| filter(rule))
            .filter_map(|rule| Some((rule.next_scheduled_time(conv, self.lookahead_days)?, rule)))
            .min_by_key(|&(time, rule)| {
                let span = match rule.is_multiple() {
                    true => rule.range().time_span(conv),
                    false => i64::MAX,
                };
                (time, span)
            })
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self { rules: Vec::new(), lookahead_days: DEFAULT_LOOKAHEAD_DAYS }
    }
}

/// Named schedules
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ScheduleManager {
    schedules: Vec<(String, Schedule)>,
}

impl ScheduleManager {
    /// Construct an empty schedule manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schedule, replacing any schedule with the same name
    pub fn add_schedule(&mut self, name: &str, schedule: Schedule) {
        match self.schedules.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing)) => *existing = schedule,
            None => self.schedules.push((name.to_owned(), schedule)),
        }
    }

    /// Returns the schedule with the provided name
    pub fn schedule_by_name(&self, name: &str) -> Option<&Schedule> {
        self.schedules.iter().find(|(existing, _)| existing == name).map(|(_, schedule)| schedule)
    }

    /// Returns schedule names, in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schedules.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the next time of the schedule with the provided name
    pub fn next_time_by_name(&self, name: &str, conv: &LocalTimeConvert) -> Option<i64> {
        self.schedule_by_name(name)?.next_scheduled_time(conv)
    }

    /// Returns the earliest next time of all schedules, with the name of its schedule
    pub fn next_time(&self, conv: &LocalTimeConvert) -> Option<(&str, i64)> {
        self.schedules
            .iter()
            .filter_map(|(name, schedule)| Some((name.as_str(), schedule.next_scheduled_time(conv)?)))
            .min_by_key(|&(_, time)| time)
    }
}
