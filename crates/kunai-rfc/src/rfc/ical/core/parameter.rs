//! iCalendar parameter types (RFC 5545 §3.2).

use std::fmt;

/// A single iCalendar property parameter.
///
/// Parameters modify or provide metadata for a property value.
/// For example: `DTSTART;TZID=America/New_York:20260123T120000`
///
/// The `TZID` is a parameter with name `TZID` and value `America/New_York`.
/// Ordering and hashing are by name, then values, so parameter lists can be
/// compared as sets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Parameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values. Most parameters have one value, but some
    /// (like MEMBER) can have multiple comma-separated values.
    pub values: Vec<String>,
}

impl Parameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a new parameter with multiple values.
    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first (and usually only) value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    /// Creates a TZID parameter.
    #[must_use]
    pub fn tzid(tzid: impl Into<String>) -> Self {
        Self::new(names::TZID, tzid)
    }

    /// Creates a VALUE parameter.
    #[must_use]
    pub fn value_type(value_type: impl Into<String>) -> Self {
        Self::new(names::VALUE, value_type)
    }

    /// Creates a CN (common name) parameter.
    #[must_use]
    pub fn cn(name: impl Into<String>) -> Self {
        Self::new(names::CN, name)
    }

    /// Creates a PARTSTAT (participation status) parameter.
    #[must_use]
    pub fn partstat(status: impl Into<String>) -> Self {
        Self::new(names::PARTSTAT, status)
    }

    /// Creates a ROLE parameter.
    #[must_use]
    pub fn role(role: impl Into<String>) -> Self {
        Self::new(names::ROLE, role)
    }

    /// Creates an RSVP parameter.
    #[must_use]
    pub fn rsvp(rsvp: bool) -> Self {
        Self::new(names::RSVP, if rsvp { "TRUE" } else { "FALSE" })
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.values.is_empty() {
            write!(f, "=")?;
            for (i, value) in self.values.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                if needs_quoting(value) {
                    write!(f, "\"{value}\"")?;
                } else {
                    write!(f, "{value}")?;
                }
            }
        }
        Ok(())
    }
}

/// Checks if a parameter value needs quoting.
fn needs_quoting(s: &str) -> bool {
    s.chars().any(|c| matches!(c, ':' | ';' | ','))
}

/// Common parameter names as constants.
pub mod names {
    /// Common name.
    pub const CN: &str = "CN";
    /// Participation status.
    pub const PARTSTAT: &str = "PARTSTAT";
    /// Participation role.
    pub const ROLE: &str = "ROLE";
    /// RSVP expectation.
    pub const RSVP: &str = "RSVP";
    /// Time zone identifier.
    pub const TZID: &str = "TZID";
    /// Value data type.
    pub const VALUE: &str = "VALUE";
    /// Who handles scheduling for a calendar user (RFC 6638).
    pub const SCHEDULE_AGENT: &str = "SCHEDULE-AGENT";
    /// Delivery status of the last scheduling message (RFC 6638).
    pub const SCHEDULE_STATUS: &str = "SCHEDULE-STATUS";
    /// Forces a scheduling message to be sent (RFC 6638).
    pub const SCHEDULE_FORCE_SEND: &str = "SCHEDULE-FORCE-SEND";
}
