use super::*;
use crate::parse_utc_time;

const NEW_YORK: &str = "EST5EDT,M3.2.0/2:00:00,M11.1.0/2:00:00";

fn new_york() -> Result<PosixTimezone, Error> {
    NEW_YORK.parse()
}

fn tod(s: &str) -> Result<TimeOfDay, Error> {
    s.parse()
}

fn at<'a>(tz: &'a PosixTimezone, s: &str) -> Result<LocalTimeConvert<'a>, Error> {
    Ok(LocalTimeConvert::new(tz, parse_utc_time(s)?))
}

fn assert_utc(conv: &LocalTimeConvert, s: &str) -> Result<(), Error> {
    assert_eq!(crate::format_utc_time(conv.time(), ' '), s);
    Ok(())
}

#[test]
fn test_convert() -> Result<(), Error> {
    let tz = new_york()?;

    let conv = LocalTimeConvert::new(&tz, 1622743852);
    assert_eq!(conv.position(), Position::InDst);
    assert_eq!(conv.dst_start(), 1615705200);
    assert_eq!(conv.standard_start(), 1636264800);
    assert_eq!(conv.dst_start_fields().to_string(), "2021-03-14 07:00:00");
    assert_eq!(conv.standard_start_fields().to_string(), "2021-11-07 06:00:00");
    assert_eq!(conv.local_time().to_string(), "2021-06-03 14:10:52");
    assert_eq!(conv.local_date(), Date::new(2021, 6, 3)?);
    assert_eq!(conv.local_time_of_day(), TimeOfDay::new(14, 10, 52)?);
    assert!(conv.is_dst());
    assert!(!conv.is_standard_time());
    assert_eq!(conv.zone_name(), "EDT");
    assert_eq!(conv.last_day_of_month(), 30);

    let conv = conv.with_time(1612393852);
    assert_eq!(conv.position(), Position::BeforeDst);
    assert_eq!(conv.zone_name(), "EST");
    assert_eq!(conv.local_time().to_string(), "2021-02-03 18:10:52");
    assert_eq!(conv.last_day_of_month(), 28);

    let conv = conv.with_time(1638573052);
    assert_eq!(conv.position(), Position::AfterDst);
    assert!(conv.is_standard_time());
    assert_eq!(conv.local_time().to_string(), "2021-12-03 18:10:52");

    let utc = PosixTimezone::utc();
    let conv = LocalTimeConvert::new(&utc, 1622743852);
    assert_eq!(conv.position(), Position::NoDst);
    assert_eq!((conv.dst_start(), conv.standard_start()), (0, 0));
    assert_eq!(conv.local_time().to_string(), "2021-06-03 18:10:52");
    Ok(())
}

#[test]
fn test_at_local_time() -> Result<(), Error> {
    let tz = new_york()?;

    let mut conv = LocalTimeConvert::new(&tz, 1622743852);
    conv.at_local_time(Some(tod("2:00")?));
    assert_utc(&conv, "2021-06-03 06:00:00")?;

    let mut conv = LocalTimeConvert::new(&tz, 1622743852);
    conv.at_local_time(Some(tod("14:00")?));
    assert_utc(&conv, "2021-06-03 18:00:00")?;

    conv.at_local_time(None);
    assert_utc(&conv, "2021-06-03 18:00:00")?;

    let mut conv = LocalTimeConvert::new(&tz, 1638591052);
    conv.at_local_time(Some(tod("2:00")?));
    assert_utc(&conv, "2021-12-03 07:00:00")?;

    let mut conv = LocalTimeConvert::new(&tz, 1638591052);
    conv.at_local_time(Some(tod("23:00")?));
    assert_utc(&conv, "2021-12-04 04:00:00")?;
    Ok(())
}

#[test]
fn test_next_local_time() -> Result<(), Error> {
    let tz = new_york()?;

    let mut conv = LocalTimeConvert::new(&tz, 1622743852);
    conv.next_local_time(tod("14:00")?);
    assert_utc(&conv, "2021-06-04 18:00:00")?;

    let mut conv = LocalTimeConvert::new(&tz, 1622743852);
    conv.next_local_time(tod("15:00")?);
    assert_utc(&conv, "2021-06-03 19:00:00")?;

    let mut conv = at(&tz, "2021-12-04 04:10:52")?;
    conv.next_local_time(tod("23:00")?);
    assert_utc(&conv, "2021-12-05 04:00:00")?;

    // Skipped local time
    let mut conv = at(&tz, "2021-03-14 06:40:52")?;
    conv.next_local_time(tod("02:30")?);
    assert_utc(&conv, "2021-03-15 06:30:00")?;

    // Repeated local time
    let mut conv = at(&tz, "2021-11-07 05:40:52")?;
    conv.next_local_time(tod("01:30")?);
    assert_utc(&conv, "2021-11-07 06:30:00")?;
    Ok(())
}

#[test]
fn test_forward_progress() -> Result<(), Error> {
    let tz = new_york()?;

    let starts = ["2021-03-14 06:30:00", "2021-03-14 06:59:59", "2021-11-07 05:30:00", "2021-11-07 06:30:00"];
    let times = ["0:00", "1:00", "1:30", "2:00", "2:30", "3:00", "23:59:59"];

    for start in starts {
        for time in times {
            let mut conv = at(&tz, start)?;
            conv.next_local_time(tod(time)?);
            assert!(conv.time() > parse_utc_time(start)?, "{} {}", start, time);

            let mut conv = at(&tz, start)?;
            conv.next_time(tod(time)?);
            assert!(conv.time() > parse_utc_time(start)?, "{} {}", start, time);
        }
    }
    Ok(())
}

#[test]
fn test_next_day() -> Result<(), Error> {
    let tz = new_york()?;

    let mut conv = LocalTimeConvert::new(&tz, 1622743852);
    conv.next_day(None);
    assert_utc(&conv, "2021-06-04 18:10:52")?;

    let mut conv = LocalTimeConvert::new(&tz, 1622743852);
    conv.next_day(Some(tod("2:00")?));
    assert_utc(&conv, "2021-06-04 06:00:00")?;

    conv.next_day_midnight();
    assert_utc(&conv, "2021-06-05 04:00:00")?;
    Ok(())
}

#[test]
fn test_next_day_midnight_gap() -> Result<(), Error> {
    // DST starts at local midnight, so 00:00 to 00:59:59 is skipped on 2021-10-03
    let tz: PosixTimezone = "AAA4BBB,M10.1.0/0,M3.1.0/0".parse()?;
    let half_past = Some(tod("00:30")?);

    let mut conv = at(&tz, "2021-10-03 03:30:00")?;
    assert_eq!(conv.local_time().to_string(), "2021-10-02 23:30:00");
    conv.next_day(half_past);
    assert_utc(&conv, "2021-10-03 04:00:00")?;
    assert_eq!(conv.local_time().to_string(), "2021-10-03 01:00:00");
    conv.next_day(half_past);
    assert_utc(&conv, "2021-10-04 03:30:00")?;

    let mut conv = at(&tz, "2021-10-01 16:00:00")?;
    conv.next_weekday(half_past);
    assert_utc(&conv, "2021-10-04 03:30:00")?;

    let mut conv = at(&tz, "2021-10-02 16:00:00")?;
    conv.next_weekend_day(half_past);
    assert_utc(&conv, "2021-10-03 04:00:00")?;

    let mut conv = at(&tz, "2021-10-02 16:00:00")?;
    conv.next_day_of_week(0, half_past)?;
    assert_utc(&conv, "2021-10-03 04:00:00")?;

    let mut conv = at(&tz, "2021-10-03 03:30:00")?;
    conv.next_time(tod("00:30")?);
    assert_utc(&conv, "2021-10-03 04:00:00")?;
    Ok(())
}

#[test]
fn test_next_day_or_time_change() -> Result<(), Error> {
    let tz = new_york()?;
    let three = Some(tod("03:00")?);

    let mut conv = at(&tz, "2021-02-01 06:40:52")?;
    conv.next_day_or_time_change(three);
    assert_utc(&conv, "2021-02-02 08:00:00")?;

    let mut conv = at(&tz, "2021-03-14 01:40:52")?;
    for expected in ["2021-03-14 07:00:00", "2021-03-15 07:00:00", "2021-03-16 07:00:00"] {
        conv.next_day_or_time_change(three);
        assert_utc(&conv, expected)?;
    }

    let mut conv = at(&tz, "2021-11-05 06:40:52")?;
    for expected in ["2021-11-06 07:00:00", "2021-11-07 06:00:00", "2021-11-08 08:00:00"] {
        conv.next_day_or_time_change(three);
        assert_utc(&conv, expected)?;
    }
    Ok(())
}

#[test]
fn test_next_day_of_week() -> Result<(), Error> {
    let tz = new_york()?;
    let fifteen = Some(tod("15:00")?);

    let expected = [
        (5, "2021-06-04 19:00:00"),
        (6, "2021-06-05 19:00:00"),
        (0, "2021-06-06 19:00:00"),
        (1, "2021-06-07 19:00:00"),
        (4, "2021-06-10 19:00:00"),
    ];
    for (week_day, expected) in expected {
        let mut conv = LocalTimeConvert::new(&tz, 1622743852);
        conv.next_day_of_week(week_day, fifteen)?;
        assert_utc(&conv, expected)?;
    }

    let mut conv = LocalTimeConvert::new(&tz, 1622743852);
    assert!(matches!(conv.next_day_of_week(7, fifteen), Err(Error::OutOfRange(_))));
    assert_eq!(conv.time(), 1622743852);

    let mut conv = LocalTimeConvert::new(&tz, 1622743852);
    for expected in ["2021-06-04 19:00:00", "2021-06-07 19:00:00", "2021-06-08 19:00:00"] {
        conv.next_weekday(fifteen);
        assert_utc(&conv, expected)?;
    }

    let mut conv = LocalTimeConvert::new(&tz, 1622743852);
    for expected in ["2021-06-05 19:00:00", "2021-06-06 19:00:00", "2021-06-12 19:00:00"] {
        conv.next_weekend_day(fifteen);
        assert_utc(&conv, expected)?;
    }
    Ok(())
}

#[test]
fn test_next_day_of_week_ordinal() -> Result<(), Error> {
    let tz = new_york()?;
    let seven = Some(tod("07:00")?);

    let mut conv = at(&tz, "2021-06-04 10:10:52")?;
    assert!(conv.next_day_of_week_ordinal(6, 1, None)?);
    assert_utc(&conv, "2021-06-05 10:10:52")?;

    let expected = [
        (1, "2021-06-05 11:00:00"),
        (2, "2021-06-12 11:00:00"),
        (3, "2021-06-19 11:00:00"),
        (4, "2021-06-26 11:00:00"),
        (5, "2021-07-31 11:00:00"),
        (-1, "2021-06-26 11:00:00"),
        (-5, "2021-07-03 11:00:00"),
    ];
    for (ordinal, expected) in expected {
        let mut conv = at(&tz, "2021-06-04 10:10:52")?;
        assert!(conv.next_day_of_week_ordinal(6, ordinal, seven)?);
        assert_utc(&conv, expected)?;
    }

    let mut conv = at(&tz, "2021-06-04 10:10:52")?;
    assert!(!conv.next_day_of_week_ordinal(6, 6, seven)?);
    assert_utc(&conv, "2021-06-04 10:10:52")?;

    assert!(matches!(conv.next_day_of_week_ordinal(6, 0, seven), Err(Error::OutOfRange(_))));
    assert!(matches!(conv.next_day_of_week_ordinal(9, 1, seven), Err(Error::OutOfRange(_))));
    Ok(())
}

#[test]
fn test_next_day_of_month() -> Result<(), Error> {
    let tz = new_york()?;
    let five = Some(tod("05:00")?);

    let mut conv = at(&tz, "2021-12-04 05:10:52")?;
    conv.next_day_of_month(4, five);
    assert_utc(&conv, "2021-12-04 10:00:00")?;

    let mut conv = at(&tz, "2021-12-04 02:10:52")?;
    conv.next_day_of_month(0, five);
    assert_utc(&conv, "2021-12-31 10:00:00")?;

    let mut conv = at(&tz, "2021-12-04 02:10:52")?;
    conv.next_day_of_month(-1, five);
    assert_utc(&conv, "2021-12-30 10:00:00")?;

    let mut conv = at(&tz, "2021-12-31 02:10:52")?;
    conv.next_day_of_month(-1, five);
    assert_utc(&conv, "2022-01-30 10:00:00")?;

    let mut conv = at(&tz, "2021-02-04 02:10:52")?;
    conv.next_day_of_month(0, five);
    assert_utc(&conv, "2021-02-28 10:00:00")?;

    let mut conv = at(&tz, "2021-02-04 02:10:52")?;
    conv.next_day_of_month(0, Some(tod("23:00")?));
    assert_utc(&conv, "2021-03-01 04:00:00")?;

    // Past days of the month roll over to the next month
    let mut conv = at(&tz, "2021-12-04 12:00:00")?;
    conv.next_day_of_month(1, five);
    assert_utc(&conv, "2022-01-01 10:00:00")?;

    // Days beyond the end of the month are clamped
    let mut conv = at(&tz, "2021-02-04 12:00:00")?;
    conv.next_day_of_month(31, five);
    assert_utc(&conv, "2021-02-28 10:00:00")?;

    let mut conv = at(&tz, "2021-12-04 05:10:52")?;
    conv.next_day_of_next_month(4, five);
    assert_utc(&conv, "2022-01-04 10:00:00")?;

    let mut conv = LocalTimeConvert::new(&tz, 1622743852);
    conv.next_day_of_next_month(1, Some(tod("15:00")?));
    assert_utc(&conv, "2021-07-01 19:00:00")?;
    Ok(())
}

#[test]
fn test_next_minute_multiple() -> Result<(), Error> {
    let tz = new_york()?;

    for start in ["2021-12-04 10:10:52", "2021-12-04 10:10:00", "2021-12-04 10:14:49"] {
        let mut conv = at(&tz, start)?;
        conv.next_minute_multiple(5, 0)?;
        assert_utc(&conv, "2021-12-04 10:15:00")?;
    }

    let expected = [
        ("2021-12-05 23:14:49", "2021-12-05 23:15:00"),
        ("2021-12-05 23:15:00", "2021-12-05 23:30:00"),
        ("2021-12-05 23:56:49", "2021-12-06 00:00:00"),
    ];
    for (start, expected) in expected {
        let mut conv = at(&tz, start)?;
        conv.next_minute_multiple(15, 0)?;
        assert_utc(&conv, expected)?;
    }

    let mut conv = at(&tz, "2021-12-04 10:10:52")?;
    conv.next_minute_multiple(15, 5)?;
    assert_utc(&conv, "2021-12-04 10:20:00")?;

    assert!(matches!(conv.next_minute_multiple(0, 0), Err(Error::OutOfRange(_))));

    let mut conv = at(&tz, "2021-12-04 10:10:52")?;
    conv.next_minute();
    assert_utc(&conv, "2021-12-04 10:11:00")?;
    conv.next_hour();
    assert_utc(&conv, "2021-12-04 11:00:00")?;
    conv.add_seconds(90);
    assert_utc(&conv, "2021-12-04 11:01:30")?;

    // Hours are local hours
    let adelaide: PosixTimezone = "ACST-9:30".parse()?;
    let mut conv = at(&adelaide, "2021-07-08 09:22:00")?;
    conv.next_hour();
    assert_utc(&conv, "2021-07-08 09:30:00")?;
    Ok(())
}

#[test]
fn test_next_time() -> Result<(), Error> {
    let tz = new_york()?;

    let expected = [
        ("2021-12-04 10:10:52", "06:00", "2021-12-04 11:00:00"),
        ("2021-12-04 10:10:52", "05:00", "2021-12-05 10:00:00"),
        ("2022-03-13 06:10:52", "03:00", "2022-03-13 07:00:00"),
        ("2022-03-13 19:10:52", "04:00", "2022-03-14 08:00:00"),
        ("2022-03-12 19:10:52", "02:00", "2022-03-13 06:00:00"),
        ("2021-11-07 05:30:00", "00:00", "2021-11-08 05:00:00"),
        ("2021-11-07 06:30:00", "01:30", "2021-11-08 06:30:00"),
    ];
    for (start, time, expected) in expected {
        let mut conv = at(&tz, start)?;
        conv.next_time(tod(time)?);
        assert_utc(&conv, expected)?;
    }
    Ok(())
}

#[test]
fn test_next_time_list() -> Result<(), Error> {
    let tz = new_york()?;

    let mut conv = at(&tz, "2021-12-04 10:10:52")?;
    assert!(conv.next_time_list(&[tod("04:00")?, tod("08:00")?]));
    assert_utc(&conv, "2021-12-04 13:00:00")?;

    let midnight_noon = [tod("00:00")?, tod("12:00")?];

    let mut conv = at(&tz, "2021-12-04 03:10:52")?;
    assert!(conv.next_time_list(&midnight_noon));
    assert_utc(&conv, "2021-12-04 05:00:00")?;

    let mut conv = at(&tz, "2021-12-04 16:10:52")?;
    assert!(conv.next_time_list(&midnight_noon));
    assert_utc(&conv, "2021-12-04 17:00:00")?;

    let mut conv = at(&tz, "2021-12-04 16:10:52")?;
    assert!(conv.next_time_list(&[tod("00:15:30")?, tod("12:15:30")?]));
    assert_utc(&conv, "2021-12-04 17:15:30")?;

    assert!(!conv.next_time_list(&[]));
    assert_utc(&conv, "2021-12-04 17:15:30")?;
    Ok(())
}

#[test]
fn test_local_time_range() -> Result<(), Error> {
    let tz = new_york()?;
    let range = TimeOfDayRange::new(tod("09:00")?, tod("17:00")?);

    let conv = at(&tz, "2021-12-04 14:00:00")?;
    assert!(conv.in_local_time_range(&range));
    assert!(!conv.before_local_time_range(&range));

    let conv = at(&tz, "2021-12-04 13:59:59")?;
    assert!(!conv.in_local_time_range(&range));
    assert!(conv.before_local_time_range(&range));

    let conv = at(&tz, "2021-12-04 22:00:00")?;
    assert!(conv.in_local_time_range(&range));

    let conv = at(&tz, "2021-12-04 22:00:01")?;
    assert!(!conv.in_local_time_range(&range));
    assert!(!conv.before_local_time_range(&range));
    Ok(())
}

#[test]
fn test_format() -> Result<(), Error> {
    let tz = new_york()?;

    let conv = at(&tz, "2021-01-01 10:00:00")?;
    assert_eq!(conv.time_str()?, "Fri Jan  1 05:00:00 2021");
    assert_eq!(conv.format(TIME_FORMAT_DEFAULT)?, "Fri Jan  1 05:00:00 2021");
    assert_eq!(conv.format("%Y-%m-%d %H:%M:%S %z")?, "2021-01-01 05:00:00 -05:00");
    assert_eq!(conv.format("%Z")?, "EST");
    assert_eq!(conv.format("100%% %Z")?, "100% EST");

    let conv = at(&tz, "2021-06-01 10:00:00")?;
    assert_eq!(conv.format("%H:%M %Z")?, "06:00 EDT");

    let expected = [
        ("2021-01-01 05:00:00", "12:00 AM"),
        ("2021-01-01 11:00:00", "06:00 AM"),
        ("2021-01-01 17:00:00", "12:00 PM"),
    ];
    for (time, expected) in expected {
        assert_eq!(at(&tz, time)?.format("%I:%M %p")?, expected);
    }

    let conv = at(&tz, "2021-04-01 16:00:00")?;
    assert_eq!(conv.format(TIME_FORMAT_ISO8601_FULL)?, "2021-04-01T12:00:00-04:00");

    let utc = PosixTimezone::utc();
    let conv = at(&utc, "2021-04-01 16:00:00")?;
    assert_eq!(conv.format(TIME_FORMAT_ISO8601_FULL)?, "2021-04-01T16:00:00Z");
    assert_eq!(conv.zone_name(), "Z");
    assert_eq!(conv.format("%H:%M %Z")?, "16:00 Z");

    let adelaide: PosixTimezone = "ACST-9:30".parse()?;
    let conv = at(&adelaide, "2021-07-08 09:22:00")?;
    assert_eq!(conv.format("%Y-%m-%d %H:%M:%S")?, "2021-07-08 18:52:00");
    assert_eq!(conv.format("%z %Z")?, "+09:30 ACST");

    assert!(matches!(conv.format("%Q"), Err(Error::Format(_))));
    Ok(())
}
