//! iCalendar DATE value and typed property values (RFC 5545 §3.3).

use std::fmt;

use chrono::{Datelike, NaiveDate};

use super::{DateTime, Duration, UtcOffset};

/// DATE value (RFC 5545 §3.3.4).
///
/// A calendar date without time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    /// Year (e.g., 2026).
    pub year: u16,
    /// Month (1-12).
    pub month: u8,
    /// Day of month (1-31).
    pub day: u8,
}

impl Date {
    /// Creates a new date.
    #[must_use]
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Returns the chrono date, or `None` for an impossible calendar date.
    #[must_use]
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
    }

    /// Builds a DATE from a chrono date within the four-digit year range.
    #[must_use]
    pub fn from_naive(date: NaiveDate) -> Option<Self> {
        Some(Self {
            year: u16::try_from(date.year()).ok().filter(|y| *y <= 9999)?,
            month: u8::try_from(date.month()).ok()?,
            day: u8::try_from(date.day()).ok()?,
        })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// Value types (RFC 5545 §3.3).
///
/// This enum represents the parsed value of a property. The raw string
/// is preserved separately on the property and is what identity uses.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// BOOLEAN value.
    Boolean(bool),
    /// CAL-ADDRESS value (typically mailto: URI).
    CalAddress(String),
    /// DATE value.
    Date(Date),
    /// Comma-separated DATE values (EXDATE/RDATE).
    DateList(Vec<Date>),
    /// DATE-TIME value.
    DateTime(DateTime),
    /// Comma-separated DATE-TIME values (EXDATE/RDATE).
    DateTimeList(Vec<DateTime>),
    /// DURATION value.
    Duration(Duration),
    /// INTEGER value.
    Integer(i32),
    /// RECUR value, kept as the validated rule text.
    Recur(String),
    /// TEXT value (unescaped).
    Text(String),
    /// URI value.
    Uri(String),
    /// UTC-OFFSET value.
    UtcOffset(UtcOffset),
    /// Unknown or unparsed value. Preserved for round-trip.
    Unknown(String),
}

impl Value {
    /// Returns this value as text, if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the string form of text-like values (TEXT, CAL-ADDRESS, URI, unknown).
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::CalAddress(s) | Self::Uri(s) | Self::Unknown(s) => Some(s),
            _ => None,
        }
    }

    /// Returns this value as an integer, if it is an integer value.
    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns this value as a date-time, if it is a date-time value.
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns this value as a date, if it is a date value.
    #[must_use]
    pub fn as_date(&self) -> Option<&Date> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the date-times of a single or list DATE-TIME value.
    #[must_use]
    pub fn as_datetime_list(&self) -> Option<Vec<&DateTime>> {
        match self {
            Self::DateTime(dt) => Some(vec![dt]),
            Self::DateTimeList(dts) => Some(dts.iter().collect()),
            _ => None,
        }
    }

    /// Returns the dates of a single or list DATE value.
    #[must_use]
    pub fn as_date_list(&self) -> Option<Vec<&Date>> {
        match self {
            Self::Date(d) => Some(vec![d]),
            Self::DateList(ds) => Some(ds.iter().collect()),
            _ => None,
        }
    }

    /// Returns this value as a duration, if it is a duration value.
    #[must_use]
    pub fn as_duration(&self) -> Option<&Duration> {
        match self {
            Self::Duration(d) => Some(d),
            _ => None,
        }
    }

    /// Returns this value as a recurrence rule, if it is a recur value.
    #[must_use]
    pub fn as_recur(&self) -> Option<&str> {
        match self {
            Self::Recur(r) => Some(r),
            _ => None,
        }
    }

    /// Returns whether this is an unknown/unparsed value.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}
