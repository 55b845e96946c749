//! `strftime`-like formatting of a local time.

use super::LocalTimeConvert;
use crate::Error;

use std::fmt::Write;

use chrono::NaiveDate;

/// Human-readable format, like `Fri Jan  1 05:00:00 2021`
pub const TIME_FORMAT_DEFAULT: &str = "%a %b %e %H:%M:%S %Y";

/// Full ISO 8601 format with a numeric offset, like `2021-04-01T12:00:00-04:00`
pub const TIME_FORMAT_ISO8601_FULL: &str = "%Y-%m-%dT%H:%M:%S%z";

impl LocalTimeConvert<'_> {
    /// Format the local time with `strftime` specifiers
    ///
    /// `%Z` expands to the zone designation in effect, and `%z` to a `±HH:MM` offset, or `Z` for UTC.
    pub fn format(&self, pattern: &str) -> Result<String, Error> {
        let local = self.local_time();

        let date_time = NaiveDate::from_ymd_opt(local.year, local.month as u32, local.month_day as u32)
            .and_then(|date| {
                date.and_hms_opt(local.hour as u32, local.minute as u32, local.second as u32)
            })
            .ok_or(Error::OutOfRange("local time out of range"))?;

        let pattern = self.expand_zone_specifiers(pattern);

        let mut output = String::new();
        write!(output, "{}", date_time.format(&pattern))
            .map_err(|_| Error::Format("invalid format specifier"))?;
        Ok(output)
    }

    /// Format the local time with [`TIME_FORMAT_DEFAULT`]
    pub fn time_str(&self) -> Result<String, Error> {
        self.format(TIME_FORMAT_DEFAULT)
    }

    /// Returns the UTC offset in effect as `±HH:MM`, or `Z` for UTC
    fn offset_str(&self) -> String {
        if self.timezone().is_z() {
            return "Z".to_owned();
        }

        // Offsets are stored positive west of UTC
        let east = -self.timezone().offset(self.is_dst()).to_seconds();
        let sign = if east < 0 { '-' } else { '+' };
        let minutes = east.abs() / 60;

        format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
    }

    /// Replace `%z` and `%Z` with literal text, escaping it for chrono
    fn expand_zone_specifiers(&self, pattern: &str) -> String {
        let mut expanded = String::with_capacity(pattern.len());
        let mut chars = pattern.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                expanded.push(c);
                continue;
            }

            match chars.next() {
                Some('z') => expanded.push_str(&self.offset_str().replace('%', "%%")),
                Some('Z') => expanded.push_str(&self.zone_name().replace('%', "%%")),
                Some(other) => {
                    expanded.push('%');
                    expanded.push(other);
                }
                None => expanded.push('%'),
            }
        }

        expanded
    }
}
