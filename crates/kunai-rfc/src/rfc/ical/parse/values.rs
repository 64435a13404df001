//! Value type parsers for iCalendar (RFC 5545 §3.3).

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{Date, DateTime, DateTimeForm, Duration, UtcOffset};

fn digits<T: std::str::FromStr>(
    s: &str,
    kind: ParseErrorKind,
    line: usize,
    col: usize,
) -> ParseResult<T> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(kind, line, col));
    }
    s.parse::<T>()
        .map_err(|_err| ParseError::new(kind, line, col))
}

/// Parses a DATE value (RFC 5545 §3.3.4).
///
/// Format: YYYYMMDD (e.g., "19970714")
///
/// ## Errors
/// Returns an error if the string is not a valid 8-digit date.
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<Date> {
    let kind = ParseErrorKind::InvalidDate;
    if s.len() != 8 || !s.is_ascii() {
        return Err(ParseError::new(kind, line, col));
    }

    let year = digits::<u16>(&s[0..4], kind, line, col)?;
    let month = digits::<u8>(&s[4..6], kind, line, col)?;
    let day = digits::<u8>(&s[6..8], kind, line, col)?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(ParseError::new(kind, line, col));
    }

    Ok(Date { year, month, day })
}

/// Parses a TIME value into `(hour, minute, second, is_utc)` (RFC 5545 §3.3.12).
fn parse_time(s: &str, line: usize, col: usize) -> ParseResult<(u8, u8, u8, bool)> {
    let kind = ParseErrorKind::InvalidTime;
    let (time, is_utc) = match s.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (s, false),
    };

    if time.len() != 6 || !time.is_ascii() {
        return Err(ParseError::new(kind, line, col));
    }

    let hour = digits::<u8>(&time[0..2], kind, line, col)?;
    let minute = digits::<u8>(&time[2..4], kind, line, col)?;
    let second = digits::<u8>(&time[4..6], kind, line, col)?;

    // 60 allows for leap seconds
    if hour > 23 || minute > 59 || second > 60 {
        return Err(ParseError::new(kind, line, col));
    }

    Ok((hour, minute, second, is_utc))
}

/// Parses a DATE-TIME value (RFC 5545 §3.3.5).
///
/// Format: YYYYMMDD"T"HHMMSS[Z] (e.g., "19970714T133000Z"). The TZID comes
/// from the property parameter; a trailing `Z` takes precedence over it.
///
/// ## Errors
/// Returns an error if the string is not a valid datetime format.
pub fn parse_datetime(
    s: &str,
    tzid: Option<&str>,
    line: usize,
    col: usize,
) -> ParseResult<DateTime> {
    let (date_str, time_str) = s
        .split_once('T')
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidDateTime, line, col))?;

    let date = parse_date(date_str, line, col)?;
    let (hour, minute, second, is_utc) = parse_time(time_str, line, col + date_str.len() + 1)?;

    let form = match (is_utc, tzid) {
        (true, _) => DateTimeForm::Utc,
        (false, Some(tz)) => DateTimeForm::Zoned {
            tzid: tz.to_string(),
        },
        (false, None) => DateTimeForm::Floating,
    };

    Ok(DateTime {
        year: date.year,
        month: date.month,
        day: date.day,
        hour,
        minute,
        second,
        form,
    })
}

/// Parses a UTC-OFFSET value (RFC 5545 §3.3.14).
///
/// Format: (+|-)HHMM[SS] (e.g., "+0530", "-0800")
///
/// ## Errors
/// Returns an error if the string is not a valid UTC offset format.
pub fn parse_utc_offset(s: &str, line: usize, col: usize) -> ParseResult<UtcOffset> {
    let kind = ParseErrorKind::InvalidUtcOffset;
    if !s.is_ascii() || !(s.len() == 5 || s.len() == 7) {
        return Err(ParseError::new(kind, line, col));
    }

    let sign = match &s[..1] {
        "+" => 1,
        "-" => -1,
        _ => return Err(ParseError::new(kind, line, col)),
    };

    let hours = digits::<i32>(&s[1..3], kind, line, col)?;
    let minutes = digits::<i32>(&s[3..5], kind, line, col)?;
    let seconds = if s.len() == 7 {
        digits::<i32>(&s[5..7], kind, line, col)?
    } else {
        0
    };

    Ok(UtcOffset::from_seconds(
        sign * (hours * 3600 + minutes * 60 + seconds),
    ))
}

/// Parses a DURATION value (RFC 5545 §3.3.6).
///
/// Format: [+|-]P[nW] or [+|-]P[nD][T[nH][nM][nS]]
///
/// ## Errors
/// Returns an error if the string is not a valid duration format.
pub fn parse_duration(s: &str, line: usize, col: usize) -> ParseResult<Duration> {
    let invalid = || ParseError::new(ParseErrorKind::InvalidDuration, line, col);

    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let body = rest.strip_prefix('P').ok_or_else(invalid)?;
    if body.is_empty() {
        return Err(invalid());
    }

    let mut dur = Duration {
        negative,
        ..Duration::zero()
    };
    let mut in_time = false;
    let mut number = String::new();

    for c in body.chars() {
        if c.is_ascii_digit() {
            number.push(c);
            continue;
        }
        if c == 'T' {
            if in_time || !number.is_empty() {
                return Err(invalid());
            }
            in_time = true;
            continue;
        }
        let n: u32 = number.parse().map_err(|_err| invalid())?;
        number.clear();
        match (c, in_time) {
            ('W', false) => dur.weeks = n,
            ('D', false) => dur.days = n,
            ('H', true) => dur.hours = n,
            ('M', true) => dur.minutes = n,
            ('S', true) => dur.seconds = n,
            _ => return Err(invalid()),
        }
    }

    if !number.is_empty() {
        return Err(invalid());
    }

    Ok(dur)
}

/// Validates a RECUR value (RFC 5545 §3.3.10) and returns it unchanged.
///
/// ## Errors
/// Returns an error if the rule does not parse as a recurrence rule.
pub fn parse_rrule(s: &str, line: usize, col: usize) -> ParseResult<String> {
    s.parse::<rrule::RRule<rrule::Unvalidated>>()
        .map(|_rule| s.to_string())
        .map_err(|e| {
            ParseError::new(ParseErrorKind::InvalidRRule, line, col).with_context(e.to_string())
        })
}

/// Unescapes text values (RFC 5545 §3.3.11).
///
/// Escape sequences: \\ \, \; \n \N
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(',') => result.push(','),
            Some(';') => result.push(';'),
            Some('\\') | None => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
        }
    }

    result
}

/// Parses a BOOLEAN value (RFC 5545 §3.3.2).
///
/// ## Errors
/// Returns an error if the string is not "TRUE" or "FALSE".
pub fn parse_boolean(s: &str, line: usize, col: usize) -> ParseResult<bool> {
    match s.to_ascii_uppercase().as_str() {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        _ => Err(ParseError::new(ParseErrorKind::InvalidBoolean, line, col)),
    }
}

/// Parses an INTEGER value (RFC 5545 §3.3.8).
///
/// ## Errors
/// Returns an error if the string is not a valid integer.
pub fn parse_integer(s: &str, line: usize, col: usize) -> ParseResult<i32> {
    s.trim()
        .parse()
        .map_err(|_err| ParseError::new(ParseErrorKind::InvalidInteger, line, col))
}
