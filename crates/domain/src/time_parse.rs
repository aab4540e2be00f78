use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TimeParseError {
    #[error("Invalid time format. Use a time like 9:00 AM or 21:00")]
    InvalidFormat,
    #[error("The time {0} does not exist on that day in the reminder time zone")]
    NonexistentLocalTime(NaiveDateTime),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Meridiem {
    Am,
    Pm,
}

impl FromStr for Meridiem {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "am" => Ok(Self::Am),
            "pm" => Ok(Self::Pm),
            _ => Err(TimeParseError::InvalidFormat),
        }
    }
}

fn parse_clock_component(s: &str) -> Result<u32, TimeParseError> {
    if s.is_empty() || s.len() > 2 || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(TimeParseError::InvalidFormat);
    }
    s.parse().map_err(|_| TimeParseError::InvalidFormat)
}

/// Parses the clock portion of a reminder time into a wall clock time.
///
/// With a meridiem the hour is on the 12 hour clock (1-12). Without one the
/// input is read as a 24 hour clock time (0-23).
fn parse_clock(input: &str) -> Result<NaiveTime, TimeParseError> {
    let mut tokens = input.split_whitespace();
    let clock = tokens.next().ok_or(TimeParseError::InvalidFormat)?;
    let meridiem = tokens.next().map(Meridiem::from_str).transpose()?;
    if tokens.next().is_some() {
        return Err(TimeParseError::InvalidFormat);
    }

    let (hour, minute) = clock.split_once(':').ok_or(TimeParseError::InvalidFormat)?;
    let hour = parse_clock_component(hour)?;
    let minute = parse_clock_component(minute)?;

    let hour = match meridiem {
        Some(_) if !(1..=12).contains(&hour) => return Err(TimeParseError::InvalidFormat),
        Some(Meridiem::Pm) if hour < 12 => hour + 12,
        Some(Meridiem::Am) if hour == 12 => 0,
        _ => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(TimeParseError::InvalidFormat)
}

fn localize<Tz: TimeZone>(
    tz: &Tz,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<DateTime<Tz>, TimeParseError> {
    let naive = date.and_time(time);
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or(TimeParseError::NonexistentLocalTime(naive))
}

/// Converts a user entered time like "9:00 AM" into the next instant that
/// wall clock time occurs, relative to `now` and in the time zone of `now`.
///
/// The returned instant is always strictly after `now`: a time that has
/// already passed today is moved to the same time tomorrow.
pub fn parse_reminder_time<Tz: TimeZone>(
    input: &str,
    now: &DateTime<Tz>,
) -> Result<DateTime<Tz>, TimeParseError> {
    let time = parse_clock(input)?;
    let tz = now.timezone();
    let today = now.date_naive();

    let candidate = localize(&tz, today, time)?;
    if candidate > *now {
        return Ok(candidate);
    }

    let tomorrow = today.succ_opt().ok_or(TimeParseError::InvalidFormat)?;
    localize(&tz, tomorrow, time)
}

/// Formats an instant the way users enter reminder times, e.g. "9:05 PM"
pub fn format_reminder_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Timelike, Utc};
    use chrono_tz::Europe::Oslo;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn morning_time_after_it_passed_moves_to_tomorrow() {
        let now = utc(2024, 5, 1, 10, 0);
        let res = parse_reminder_time("9:00 AM", &now).unwrap();
        assert_eq!(res, utc(2024, 5, 2, 9, 0));
    }

    #[test]
    fn later_time_stays_today() {
        let now = utc(2024, 5, 1, 10, 0);
        assert_eq!(
            parse_reminder_time("9:30 PM", &now).unwrap(),
            utc(2024, 5, 1, 21, 30)
        );
        assert_eq!(
            parse_reminder_time("10:01 am", &now).unwrap(),
            utc(2024, 5, 1, 10, 1)
        );
    }

    #[test]
    fn time_equal_to_now_moves_to_tomorrow() {
        let now = utc(2024, 5, 1, 10, 0);
        assert_eq!(
            parse_reminder_time("10:00 AM", &now).unwrap(),
            utc(2024, 5, 2, 10, 0)
        );
    }

    #[test]
    fn seconds_are_zeroed() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 59, 42).unwrap();
        let res = parse_reminder_time("9:00 AM", &now).unwrap();
        assert_eq!(res.second(), 0);
        assert_eq!(res.nanosecond(), 0);
        assert_eq!(res, utc(2024, 5, 1, 9, 0));
    }

    #[test]
    fn normalizes_twelve_hour_clock() {
        let now = utc(2024, 5, 1, 0, 0);
        assert_eq!(
            parse_reminder_time("12:00 AM", &now).unwrap(),
            utc(2024, 5, 2, 0, 0)
        );
        assert_eq!(
            parse_reminder_time("12:15 AM", &now).unwrap(),
            utc(2024, 5, 1, 0, 15)
        );
        assert_eq!(
            parse_reminder_time("12:30 PM", &now).unwrap(),
            utc(2024, 5, 1, 12, 30)
        );
        assert_eq!(
            parse_reminder_time("1:05 PM", &now).unwrap(),
            utc(2024, 5, 1, 13, 5)
        );
    }

    #[test]
    fn missing_meridiem_reads_as_24_hour_clock() {
        let now = utc(2024, 5, 1, 10, 0);
        assert_eq!(
            parse_reminder_time("21:45", &now).unwrap(),
            utc(2024, 5, 1, 21, 45)
        );
        assert_eq!(
            parse_reminder_time("0:30", &now).unwrap(),
            utc(2024, 5, 2, 0, 30)
        );
        assert_eq!(
            parse_reminder_time("  9:00  ", &now).unwrap(),
            utc(2024, 5, 2, 9, 0)
        );
    }

    #[test]
    fn rejects_malformed_input() {
        let now = utc(2024, 5, 1, 10, 0);
        for input in [
            "13:99",
            "",
            "   ",
            "9",
            "9:",
            ":30",
            "nine:thirty",
            "9:00 XM",
            "9:00 AM extra",
            "13:00 PM",
            "0:30 AM",
            "24:00",
            "-1:30",
            "+9:30",
            "9:005",
            "9.30 AM",
        ] {
            assert_eq!(
                parse_reminder_time(input, &now),
                Err(TimeParseError::InvalidFormat),
                "input: {:?}",
                input
            );
        }
    }

    #[test]
    fn valid_inputs_are_always_in_the_future() {
        let nows = [
            utc(2024, 5, 1, 0, 0),
            utc(2024, 5, 1, 11, 59),
            utc(2024, 5, 1, 12, 0),
            utc(2024, 12, 31, 23, 59),
        ];
        for now in nows {
            for hour in 1..=12 {
                for minute in [0, 1, 30, 59] {
                    for meridiem in ["AM", "PM"] {
                        let input = format!("{}:{:02} {}", hour, minute, meridiem);
                        let res = parse_reminder_time(&input, &now).unwrap();
                        assert!(res > now, "{} at {}", input, now);
                        assert!(res <= now + Duration::days(1));
                    }
                }
            }
        }
    }

    #[test]
    fn uses_the_wall_clock_of_the_given_time_zone() {
        // 10:00 in Oslo (CEST, UTC+2)
        let now = utc(2024, 5, 1, 8, 0).with_timezone(&Oslo);
        let res = parse_reminder_time("9:00 AM", &now).unwrap();
        assert_eq!(res.with_timezone(&Utc), utc(2024, 5, 2, 7, 0));
    }

    #[test]
    fn rejects_times_skipped_by_daylight_saving() {
        // 01:00 in Oslo on the night clocks jump from 02:00 to 03:00
        let now = utc(2024, 3, 31, 0, 0).with_timezone(&Oslo);
        assert!(matches!(
            parse_reminder_time("2:30 AM", &now),
            Err(TimeParseError::NonexistentLocalTime(_))
        ));
    }

    #[test]
    fn formats_like_user_input() {
        assert_eq!(format_reminder_time(&utc(2024, 5, 1, 21, 5)), "9:05 PM");
        assert_eq!(format_reminder_time(&utc(2024, 5, 1, 0, 30)), "12:30 AM");
    }
}
