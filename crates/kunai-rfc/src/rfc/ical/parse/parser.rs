//! iCalendar document parser (RFC 5545).
//!
//! Parses complete iCalendar documents into typed structures.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{parse_content_line, split_lines};
use super::values::{
    parse_boolean, parse_date, parse_datetime, parse_duration, parse_integer, parse_rrule,
    parse_utc_offset, unescape_text,
};
use crate::rfc::ical::core::{Component, ContentLine, ICalendar, Property, PropertyName, Value};

/// Parses an iCalendar document from a string.
///
/// ## Errors
///
/// Returns an error if the input is not valid iCalendar.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    tracing::debug!("Parsing iCalendar document");

    let lines = split_lines(input);

    let content_lines: Vec<(usize, ContentLine)> = lines
        .into_iter()
        .map(|(line_num, line)| parse_content_line(&line, line_num).map(|cl| (line_num, cl)))
        .collect::<ParseResult<_>>()?;

    tracing::trace!(count = content_lines.len(), "Parsed content lines");

    let mut iter = content_lines.into_iter();
    let (line_num, begin) = iter.next().ok_or_else(|| {
        tracing::warn!("Empty iCalendar input");
        ParseError::new(ParseErrorKind::MissingBegin, 1, 1)
    })?;

    if begin.name != "BEGIN" || !begin.raw_value.eq_ignore_ascii_case("VCALENDAR") {
        tracing::warn!("Root component is not VCALENDAR");
        return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
            .with_context("expected BEGIN:VCALENDAR"));
    }

    let root = parse_component(&mut iter, line_num, "VCALENDAR")?;

    if let Some((trailing, _)) = iter.next() {
        tracing::debug!(line = trailing, "Ignoring content after END:VCALENDAR");
    }

    tracing::debug!(
        components = root.children.len(),
        "iCalendar document parsed successfully"
    );

    Ok(ICalendar { root })
}

/// Parses the body of a component whose BEGIN line has been consumed.
fn parse_component(
    iter: &mut impl Iterator<Item = (usize, ContentLine)>,
    begin_line_num: usize,
    component_name: &str,
) -> ParseResult<Component> {
    let mut component = Component::custom(component_name);
    let mut last_line_num = begin_line_num;

    loop {
        let Some((line_num, content_line)) = iter.next() else {
            return Err(
                ParseError::new(ParseErrorKind::MissingEnd, last_line_num, 1)
                    .with_context(format!("missing END:{component_name}")),
            );
        };
        last_line_num = line_num;

        match content_line.name.as_str() {
            "BEGIN" => {
                let nested_name = content_line.raw_value.to_ascii_uppercase();
                let nested = parse_component(iter, line_num, &nested_name)?;
                component.children.push(nested);
            }
            "END" => {
                let end_name = content_line.raw_value.to_ascii_uppercase();
                if end_name != component_name {
                    return Err(
                        ParseError::new(ParseErrorKind::MismatchedComponent, line_num, 1)
                            .with_context(format!(
                                "expected END:{component_name}, got END:{end_name}"
                            )),
                    );
                }
                return Ok(component);
            }
            _ => {
                let property = parse_property(content_line, line_num)?;
                component.properties.push(property);
            }
        }
    }
}

/// Parses a property from a content line, resolving the value type.
fn parse_property(cl: ContentLine, line_num: usize) -> ParseResult<Property> {
    let value_type = determine_value_type(&cl);
    let col = cl.name.len() + 2;
    let value = parse_value(&cl.raw_value, value_type, cl.tzid(), line_num, col)?;

    Ok(Property {
        name: cl.name,
        params: cl.params,
        value,
        raw_value: cl.raw_value,
    })
}

/// Internal enum for value type handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueType {
    Boolean,
    CalAddress,
    Date,
    DateTime,
    Duration,
    Integer,
    Recur,
    Text,
    Uri,
    UtcOffset,
    Unknown,
}

impl ValueType {
    fn from_param(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "BOOLEAN" => Self::Boolean,
            "CAL-ADDRESS" => Self::CalAddress,
            "DATE" => Self::Date,
            "DATE-TIME" => Self::DateTime,
            "DURATION" => Self::Duration,
            "INTEGER" => Self::Integer,
            "RECUR" => Self::Recur,
            "TEXT" => Self::Text,
            "URI" => Self::Uri,
            "UTC-OFFSET" => Self::UtcOffset,
            // BINARY, FLOAT, PERIOD, TIME and extensions are kept raw
            _ => Self::Unknown,
        }
    }

    /// DATE-TIME unless the raw value is a bare date.
    fn date_or_datetime(raw: &str) -> Self {
        if raw.contains('T') {
            Self::DateTime
        } else {
            Self::Date
        }
    }
}

/// Determines the value type for a property.
fn determine_value_type(cl: &ContentLine) -> ValueType {
    if let Some(value_type) = cl.value_type() {
        return ValueType::from_param(value_type);
    }

    match PropertyName::parse(&cl.name) {
        PropertyName::Dtstart
        | PropertyName::Dtend
        | PropertyName::Due
        | PropertyName::RecurrenceId
        | PropertyName::Dtstamp
        | PropertyName::Created
        | PropertyName::LastModified
        | PropertyName::Completed => ValueType::date_or_datetime(&cl.raw_value),

        PropertyName::Exdate | PropertyName::Rdate if cl.raw_value.contains('/') => {
            ValueType::Unknown
        }
        PropertyName::Exdate | PropertyName::Rdate => ValueType::date_or_datetime(&cl.raw_value),

        PropertyName::Duration => ValueType::Duration,
        PropertyName::Trigger => {
            if cl.raw_value.contains('P') {
                ValueType::Duration
            } else {
                ValueType::DateTime
            }
        }

        PropertyName::PercentComplete
        | PropertyName::Priority
        | PropertyName::Repeat
        | PropertyName::Sequence => ValueType::Integer,

        PropertyName::Rrule | PropertyName::Exrule => ValueType::Recur,

        PropertyName::Tzoffsetfrom | PropertyName::Tzoffsetto => ValueType::UtcOffset,

        PropertyName::Url | PropertyName::Tzurl => ValueType::Uri,

        PropertyName::Attendee | PropertyName::Organizer => ValueType::CalAddress,

        PropertyName::Freebusy => ValueType::Unknown,

        _ => ValueType::Text,
    }
}

/// Parses a raw value string into a typed Value.
fn parse_value(
    raw: &str,
    value_type: ValueType,
    tzid: Option<&str>,
    line_num: usize,
    col: usize,
) -> ParseResult<Value> {
    let value = match value_type {
        ValueType::Text => Value::Text(unescape_text(raw)),
        ValueType::DateTime if raw.contains(',') => Value::DateTimeList(
            raw.split(',')
                .map(|s| parse_datetime(s.trim(), tzid, line_num, col))
                .collect::<ParseResult<_>>()?,
        ),
        ValueType::DateTime => Value::DateTime(parse_datetime(raw, tzid, line_num, col)?),
        ValueType::Date if raw.contains(',') => Value::DateList(
            raw.split(',')
                .map(|s| parse_date(s.trim(), line_num, col))
                .collect::<ParseResult<_>>()?,
        ),
        ValueType::Date => Value::Date(parse_date(raw, line_num, col)?),
        ValueType::Duration => Value::Duration(parse_duration(raw, line_num, col)?),
        ValueType::Integer => Value::Integer(parse_integer(raw, line_num, col)?),
        ValueType::Boolean => Value::Boolean(parse_boolean(raw, line_num, col)?),
        ValueType::Recur => Value::Recur(parse_rrule(raw, line_num, col)?),
        ValueType::UtcOffset => Value::UtcOffset(parse_utc_offset(raw, line_num, col)?),
        ValueType::CalAddress => Value::CalAddress(raw.to_string()),
        ValueType::Uri => Value::Uri(raw.to_string()),
        ValueType::Unknown => Value::Unknown(raw.to_string()),
    };
    Ok(value)
}
