//! Functions used for parsing a TZ string.

use super::value::parse_signed_time_of_day;
use super::Cursor;
use crate::datetime::TimeOfDay;
use crate::timezone::{PosixTimezone, TransitionRule};
use crate::Error;

use std::str;

use tracing::warn;

/// Parse time zone designation
fn parse_time_zone_designation<'a>(cursor: &mut Cursor<'a>) -> Result<&'a [u8], Error> {
    match cursor.peek() {
        Some(b'<') => {}
        _ => return Ok(cursor.read_while(u8::is_ascii_alphabetic)?),
    }

    cursor.read_exact(1)?;
    let unquoted = cursor.read_until(|&x| x == b'>')?;
    cursor.read_exact(1)?;
    Ok(unquoted)
}

/// Parse time zone offset
fn parse_offset(cursor: &mut Cursor) -> Result<TimeOfDay, Error> {
    let offset = parse_signed_time_of_day(cursor)?;

    if !(-24..=24).contains(&offset.hour()) {
        return Err(Error::InvalidTzString("invalid offset hour"));
    }

    Ok(offset)
}

/// Parse transition rule time, which may be negative or exceed 24 hours
fn parse_rule_time(cursor: &mut Cursor) -> Result<TimeOfDay, Error> {
    let time = parse_signed_time_of_day(cursor)?;

    if !(-167..=167).contains(&time.hour()) {
        return Err(Error::TransitionRule("invalid day time hour"));
    }

    Ok(time)
}

/// Parse a transition rule of the form `Mm.w.d[/time]`
///
/// The time of the change defaults to midnight when omitted.
pub(crate) fn parse_transition_rule(cursor: &mut Cursor) -> Result<TransitionRule, Error> {
    if cursor.peek() != Some(&b'M') {
        return Err(Error::TransitionRule("only the Mm.w.d form is supported"));
    }

    cursor.read_exact(1)?;
    let month = cursor.read_int()?;
    cursor.read_tag(b".")?;
    let week = cursor.read_int()?;
    cursor.read_tag(b".")?;
    let week_day = cursor.read_int()?;

    let time = match cursor.read_optional_tag(b"/")? {
        true => parse_rule_time(cursor)?,
        false => TimeOfDay::MIDNIGHT,
    };

    TransitionRule::new(month, week, week_day, time)
}

/// Parse a POSIX TZ string containing a time zone description, as described in [the POSIX documentation of the `TZ` environment variable](https://pubs.opengroup.org/onlinepubs/9699919799/basedefs/V1_chap08.html).
///
/// Only `Mm.w.d` transition rules are accepted. A DST start rule without a standard time start rule
/// yields a zone without DST, flagged as not valid.
pub(crate) fn parse_posix_tz(tz_string: &[u8]) -> Result<PosixTimezone, Error> {
    let mut cursor = Cursor::new(tz_string);

    let standard_name = parse_time_zone_designation(&mut cursor)?;
    if standard_name.is_empty() {
        return Err(Error::InvalidTzString("missing standard time zone name"));
    }

    let standard_offset = match cursor.peek() {
        None | Some(b',') => TimeOfDay::MIDNIGHT,
        Some(_) => parse_offset(&mut cursor)?,
    };

    let mut dst_name: &[u8] = b"";
    let mut dst_offset = standard_offset.earlier_by_one_hour();

    if !cursor.is_empty() && cursor.peek() != Some(&b',') {
        dst_name = parse_time_zone_designation(&mut cursor)?;
        if dst_name.is_empty() {
            return Err(Error::InvalidTzString("invalid DST time zone name"));
        }

        if let Some(&c) = cursor.peek() {
            if c != b',' {
                dst_offset = parse_offset(&mut cursor)?;
            }
        }
    }

    let mut dst_start = None;
    let mut standard_start = None;

    if cursor.read_optional_tag(b",")? {
        dst_start = Some(parse_transition_rule(&mut cursor)?);

        if cursor.read_optional_tag(b",")? {
            standard_start = Some(parse_transition_rule(&mut cursor)?);
        }
    }

    if !cursor.is_empty() {
        return Err(Error::InvalidTzString("remaining data after parsing TZ string"));
    }

    let mut valid = true;
    if dst_start.is_some() && standard_start.is_none() {
        warn!(
            tz_string = %String::from_utf8_lossy(tz_string),
            "DST start rule without a standard time start rule, ignoring DST"
        );
        dst_start = None;
        valid = false;
    }

    Ok(PosixTimezone::from_parts(
        str::from_utf8(standard_name)?.to_owned(),
        standard_offset,
        str::from_utf8(dst_name)?.to_owned(),
        dst_offset,
        dst_start.zip(standard_start),
        valid,
    ))
}
