//! Functions used for parsing time of day, date and date time strings.

use super::Cursor;
use crate::datetime::{CalendarTime, Date, TimeOfDay};
use crate::Error;

/// Parse signed hours, with optional minutes and seconds
pub(super) fn parse_signed_time_of_day(cursor: &mut Cursor) -> Result<TimeOfDay, Error> {
    let sign = cursor.read_sign()?;
    let hour: i32 = cursor.read_int()?;

    let mut minute = 0;
    let mut second = 0;

    if cursor.read_optional_tag(b":")? {
        minute = cursor.read_int()?;

        if cursor.read_optional_tag(b":")? {
            second = cursor.read_int()?;
        }
    }

    let hour = i16::try_from(sign * hour).map_err(|_| Error::TimeOfDay("invalid hour"))?;
    TimeOfDay::new(hour, minute, second)
}

/// Parse a complete `H`, `H:MM` or `H:MM:SS` string, where the hour may be negative
pub(crate) fn parse_time_of_day(s: &str) -> Result<TimeOfDay, Error> {
    let mut cursor = Cursor::new(s.trim().as_bytes());
    let time_of_day = parse_signed_time_of_day(&mut cursor)?;

    if !cursor.is_empty() {
        return Err(Error::TimeOfDay("remaining data after parsing time of day"));
    }

    Ok(time_of_day)
}

/// Parse year, month and day separated by dashes
fn parse_ymd(cursor: &mut Cursor) -> Result<Date, Error> {
    let year = cursor.read_int()?;
    cursor.read_tag(b"-")?;
    let month = cursor.read_int()?;
    cursor.read_tag(b"-")?;
    let month_day = cursor.read_int()?;

    Date::new(year, month, month_day)
}

/// Parse a complete `YYYY-MM-DD` string
pub(crate) fn parse_date(s: &str) -> Result<Date, Error> {
    let mut cursor = Cursor::new(s.trim().as_bytes());
    let date = parse_ymd(&mut cursor)?;

    if !cursor.is_empty() {
        return Err(Error::Date("remaining data after parsing date"));
    }

    Ok(date)
}

/// Parse a `YYYY-MM-DD HH:MM:SS` string, with any single character separating the date and the time
pub(crate) fn parse_utc_date_time(s: &str) -> Result<CalendarTime, Error> {
    let mut cursor = Cursor::new(s.trim().as_bytes());
    let date = parse_ymd(&mut cursor)?;
    cursor.read_exact(1)?;

    let hour = cursor.read_int()?;
    cursor.read_tag(b":")?;
    let minute = cursor.read_int()?;
    cursor.read_tag(b":")?;
    let second = cursor.read_int()?;

    if !cursor.is_empty() {
        return Err(Error::Date("remaining data after parsing date time"));
    }

    if !(0..=23).contains(&hour) || !(0..=59).contains(&minute) || !(0..=59).contains(&second) {
        return Err(Error::TimeOfDay("time out of range"));
    }

    let mut fields = CalendarTime::from_date(&date);
    fields.hour = hour;
    fields.minute = minute;
    fields.second = second;
    Ok(fields)
}
