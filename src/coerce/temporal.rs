//! Canonical text formats for temporal categories
//!
//! - date: `YYYY-MM-DD`
//! - date-time: `YYYY-MM-DDTHH:MM:SS[.f]` (space separator and date-only accepted)
//! - date-time with offset: RFC 3339
//! - time: `HH:MM:SS[.f]` or `HH:MM`
//! - time span: `[-][d.]hh:mm[:ss[.fffffffff]]`, or a bare day count

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Largest day count a time span may carry
const MAX_SPAN_DAYS: i64 = 10_675_199;

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| parse_date(text).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

pub fn parse_date_time_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .ok()
}

pub fn parse_time(text: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
}

/// Parses a time span in `[-][d.]hh:mm[:ss[.fraction]]` form.
///
/// A bare integer is a number of days.
pub fn parse_time_span(text: &str) -> Option<TimeDelta> {
    let text = text.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if body.is_empty() {
        return None;
    }

    let parts: Vec<&str> = body.split(':').collect();
    let (days, hours, minutes, seconds, nanos) = match parts.as_slice() {
        [days] => (parse_digits(days)?, 0, 0, 0, 0),
        [head, minutes] => {
            let (days, hours) = split_days(head)?;
            (days, hours, parse_digits(minutes)?, 0, 0)
        }
        [head, minutes, seconds] => {
            let (days, hours) = split_days(head)?;
            let (seconds, nanos) = split_fraction(seconds)?;
            (days, hours, parse_digits(minutes)?, seconds, nanos)
        }
        _ => return None,
    };

    if days > MAX_SPAN_DAYS || hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }

    let span = TimeDelta::days(days)
        + TimeDelta::hours(hours)
        + TimeDelta::minutes(minutes)
        + TimeDelta::seconds(seconds)
        + TimeDelta::nanoseconds(nanos);

    Some(if negative { -span } else { span })
}

/// Formats a time span in `[-][d.]hh:mm:ss[.fraction]` form
pub fn format_time_span(span: &TimeDelta) -> String {
    let negative = *span < TimeDelta::zero();
    let magnitude = if negative { -*span } else { *span };

    let total_seconds = magnitude.num_seconds();
    let nanos = (magnitude - TimeDelta::seconds(total_seconds))
        .num_nanoseconds()
        .unwrap_or(0);

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{}.", days));
    }
    out.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
    if nanos > 0 {
        let fraction = format!("{:09}", nanos);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

fn parse_digits(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn split_days(head: &str) -> Option<(i64, i64)> {
    match head.split_once('.') {
        Some((days, hours)) => Some((parse_digits(days)?, parse_digits(hours)?)),
        None => Some((0, parse_digits(head)?)),
    }
}

fn split_fraction(seconds: &str) -> Option<(i64, i64)> {
    match seconds.split_once('.') {
        Some((whole, fraction)) => {
            if fraction.is_empty() || fraction.len() > 9 {
                return None;
            }
            let scale = 10i64.pow(9 - fraction.len() as u32);
            Some((parse_digits(whole)?, parse_digits(fraction)? * scale))
        }
        None => Some((parse_digits(seconds)?, 0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_span_forms() {
        assert_eq!(
            parse_time_span("01:30"),
            Some(TimeDelta::hours(1) + TimeDelta::minutes(30))
        );
        assert_eq!(
            parse_time_span("2.03:04:05"),
            Some(
                TimeDelta::days(2)
                    + TimeDelta::hours(3)
                    + TimeDelta::minutes(4)
                    + TimeDelta::seconds(5)
            )
        );
        assert_eq!(
            parse_time_span("00:00:01.5"),
            Some(TimeDelta::milliseconds(1500))
        );
        assert_eq!(parse_time_span("3"), Some(TimeDelta::days(3)));
        assert_eq!(parse_time_span("-00:10:00"), Some(-TimeDelta::minutes(10)));
    }

    #[test]
    fn test_parse_time_span_rejects_out_of_range() {
        assert_eq!(parse_time_span("24:00:00"), None);
        assert_eq!(parse_time_span("00:60"), None);
        assert_eq!(parse_time_span("1:2:3:4"), None);
        assert_eq!(parse_time_span("abc"), None);
        assert_eq!(parse_time_span(""), None);
        assert_eq!(parse_time_span("99999999"), None);
    }

    #[test]
    fn test_format_time_span() {
        let span = TimeDelta::days(1) + TimeDelta::hours(2) + TimeDelta::milliseconds(250);
        assert_eq!(format_time_span(&span), "1.02:00:00.25");
        assert_eq!(format_time_span(&-TimeDelta::minutes(5)), "-00:05:00");
    }

    #[test]
    fn test_format_then_parse_preserves_span() {
        let span = TimeDelta::days(4) + TimeDelta::seconds(59) + TimeDelta::nanoseconds(7);
        assert_eq!(parse_time_span(&format_time_span(&span)), Some(span));
    }

    #[test]
    fn test_parse_date_time_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(13, 45, 0)
            .unwrap();
        assert_eq!(parse_date_time("2024-05-01T13:45:00"), Some(expected));
        assert_eq!(parse_date_time("2024-05-01 13:45"), Some(expected));
        assert_eq!(
            parse_date_time("2024-05-01"),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_date_time("05/01/2024"), None);
    }

    #[test]
    fn test_parse_offset_and_time() {
        let dt = parse_date_time_offset("2024-05-01T13:45:00+02:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 7200);
        assert_eq!(parse_time("08:15"), NaiveTime::from_hms_opt(8, 15, 0));
        assert_eq!(parse_time("8 o'clock"), None);
    }
}
