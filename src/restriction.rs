//! Day of week masks and date restrictions.

use crate::datetime::Date;

use std::ops::BitOr;

/// Bit mask of the days of the week, bit `n` representing week day `n` from Sunday
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct DayOfWeekMask(u8);

impl DayOfWeekMask {
    /// No day
    pub const NONE: Self = Self(0);
    /// Sunday
    pub const SUNDAY: Self = Self(1 << 0);
    /// Monday
    pub const MONDAY: Self = Self(1 << 1);
    /// Tuesday
    pub const TUESDAY: Self = Self(1 << 2);
    /// Wednesday
    pub const WEDNESDAY: Self = Self(1 << 3);
    /// Thursday
    pub const THURSDAY: Self = Self(1 << 4);
    /// Friday
    pub const FRIDAY: Self = Self(1 << 5);
    /// Saturday
    pub const SATURDAY: Self = Self(1 << 6);
    /// Monday to Friday
    pub const WEEKDAY: Self = Self(0b0011_1110);
    /// Saturday and Sunday
    pub const WEEKEND: Self = Self(0b0100_0001);
    /// Every day
    pub const ALL: Self = Self(0b0111_1111);

    /// Construct a mask from its bits, ignoring the eighth bit
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Construct a mask containing a single day of the week in `[0, 6]` from Sunday
    pub fn from_week_day(week_day: u8) -> Self {
        match week_day {
            0..=6 => Self(1 << week_day),
            _ => Self::NONE,
        }
    }

    /// Returns the bits of the mask
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Returns `true` if the day of the week in `[0, 6]` from Sunday is set
    pub fn is_set(&self, week_day: u8) -> bool {
        week_day < 7 && self.0 & (1 << week_day) != 0
    }

    /// Returns `true` if no day is set
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for DayOfWeekMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Dates on which something is allowed to happen
///
/// A date is valid if it is not an exception, and either its day of the week is in the mask or the
/// date is explicitly listed. An empty restriction matches no date.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct DateRestriction {
    days: DayOfWeekMask,
    only_on: Vec<Date>,
    except: Vec<Date>,
}

impl DateRestriction {
    /// Construct a restriction matching every date
    pub fn all() -> Self {
        Self { days: DayOfWeekMask::ALL, ..Self::default() }
    }

    /// Set the days of the week
    pub fn with_only_on_days(mut self, days: DayOfWeekMask) -> Self {
        self.days = days;
        self
    }

    /// Add explicitly allowed dates
    pub fn with_only_on_dates<I: IntoIterator<Item = Date>>(mut self, dates: I) -> Self {
        self.only_on.extend(dates);
        self
    }

    /// Add excluded dates
    pub fn with_except_dates<I: IntoIterator<Item = Date>>(mut self, dates: I) -> Self {
        self.except.extend(dates);
        self
    }

    /// Returns the days of the week
    pub fn days(&self) -> DayOfWeekMask {
        self.days
    }

    /// Returns the explicitly allowed dates
    pub fn only_on_dates(&self) -> &[Date] {
        &self.only_on
    }

    /// Returns the excluded dates
    pub fn except_dates(&self) -> &[Date] {
        &self.except
    }

    /// Returns `true` if nothing was set, in which case no date is valid
    pub fn is_empty(&self) -> bool {
        self.days.is_empty() && self.only_on.is_empty() && self.except.is_empty()
    }

    /// Returns `true` if something may happen on the provided date
    pub fn is_valid(&self, date: &Date) -> bool {
        !self.except.contains(date)
            && (self.days.is_set(date.day_of_week()) || self.only_on.contains(date))
    }

    /// Returns the last allowed date, for a restriction listing its dates without days of the week
    pub fn expiration_date(&self) -> Option<Date> {
        match self.days.is_empty() {
            true => self.only_on.iter().max().copied(),
            false => None,
        }
    }
}
