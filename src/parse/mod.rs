//! Parsing functions.

mod tz_string;
mod value;

pub(crate) use tz_string::{parse_posix_tz, parse_transition_rule};
pub(crate) use value::{parse_date, parse_time_of_day, parse_utc_date_time};

use std::io::{Error, ErrorKind};
use std::num::ParseIntError;
use std::str::{self, FromStr};

/// Reader over the bytes of a string being parsed
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Cursor<'a> {
    /// Bytes not read yet
    remaining: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(remaining: &'a [u8]) -> Self {
        Self { remaining }
    }

    pub(crate) fn peek(&self) -> Option<&u8> {
        self.remaining.first()
    }

    /// Returns `true` once everything is read
    pub(crate) fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Read exactly `count` bytes
    pub(crate) fn read_exact(&mut self, count: usize) -> Result<&'a [u8], Error> {
        if count > self.remaining.len() {
            return Err(Error::from(ErrorKind::UnexpectedEof));
        }

        let (result, remaining) = self.remaining.split_at(count);
        self.remaining = remaining;
        Ok(result)
    }

    /// Read bytes and compare them to the provided tag
    pub(crate) fn read_tag(&mut self, tag: &[u8]) -> Result<(), Error> {
        if self.read_exact(tag.len())? == tag {
            Ok(())
        } else {
            Err(Error::from(ErrorKind::InvalidData))
        }
    }

    /// Read bytes if the remaining data is prefixed by the provided tag
    pub(crate) fn read_optional_tag(&mut self, tag: &[u8]) -> Result<bool, Error> {
        if self.remaining.starts_with(tag) {
            self.read_exact(tag.len())?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Read bytes as long as the provided predicate is true
    pub(crate) fn read_while<F: Fn(&u8) -> bool>(&mut self, f: F) -> Result<&'a [u8], Error> {
        match self.remaining.iter().position(|x| !f(x)) {
            None => self.read_exact(self.remaining.len()),
            Some(position) => self.read_exact(position),
        }
    }

    /// Read bytes until the provided predicate is true
    pub(crate) fn read_until<F: Fn(&u8) -> bool>(&mut self, f: F) -> Result<&'a [u8], Error> {
        match self.remaining.iter().position(f) {
            None => self.read_exact(self.remaining.len()),
            Some(position) => self.read_exact(position),
        }
    }

    // Parse an integer out of the ASCII digits
    pub(crate) fn read_int<T: FromStr<Err = ParseIntError>>(
        &mut self,
    ) -> Result<T, crate::Error> {
        let bytes = self.read_while(u8::is_ascii_digit)?;
        Ok(str::from_utf8(bytes)?.parse()?)
    }

    /// Read an optional `+` or `-` sign, returning `-1` for a minus sign and `1` otherwise
    pub(crate) fn read_sign(&mut self) -> Result<i32, Error> {
        match self.peek() {
            Some(b'-') => {
                self.read_exact(1)?;
                Ok(-1)
            }
            Some(b'+') => {
                self.read_exact(1)?;
                Ok(1)
            }
            _ => Ok(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;
    use crate::Error;

    #[test]
    fn test_cursor() -> Result<(), Error> {
        let mut cursor = Cursor::new(b"-12:30xyz");
        assert_eq!(cursor.read_sign()?, -1);
        assert_eq!(cursor.read_int::<i32>()?, 12);
        assert!(cursor.read_optional_tag(b":")?);
        assert!(!cursor.read_optional_tag(b":")?);
        assert_eq!(cursor.read_int::<u8>()?, 30);
        assert_eq!(cursor.peek(), Some(&b'x'));
        assert_eq!(cursor.read_until(|&x| x == b'z')?, b"xy");
        assert!(cursor.read_tag(b"zz").is_err());

        let mut cursor = Cursor::new(b"");
        assert!(cursor.is_empty());
        assert!(matches!(cursor.read_int::<u8>(), Err(Error::ParseInt(_))));
        Ok(())
    }
}
