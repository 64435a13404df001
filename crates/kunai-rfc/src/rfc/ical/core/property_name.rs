//! Property name enumeration (RFC 5545 §3.7-3.8, RFC 5546).
//!
//! Comparison rules in the scheduling layer are expressed as lists of
//! `PropertyName`s rather than free-form strings.

use std::fmt;

/// A property name, either one of the well-known RFC 5545 names or an
/// IANA token / x-name kept verbatim (uppercased).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyName {
    /// `CALSCALE`
    Calscale,
    /// `METHOD`
    Method,
    /// `PRODID`
    Prodid,
    /// `VERSION`
    Version,
    /// `ATTACH`
    Attach,
    /// `CATEGORIES`
    Categories,
    /// `CLASS`
    Class,
    /// `COMMENT`
    Comment,
    /// `DESCRIPTION`
    Description,
    /// `GEO`
    Geo,
    /// `LOCATION`
    Location,
    /// `PERCENT-COMPLETE`
    PercentComplete,
    /// `PRIORITY`
    Priority,
    /// `RESOURCES`
    Resources,
    /// `STATUS`
    Status,
    /// `SUMMARY`
    Summary,
    /// `COMPLETED`
    Completed,
    /// `DTEND`
    Dtend,
    /// `DUE`
    Due,
    /// `DTSTART`
    Dtstart,
    /// `DURATION`
    Duration,
    /// `FREEBUSY`
    Freebusy,
    /// `TRANSP`
    Transp,
    /// `TZID`
    Tzid,
    /// `TZNAME`
    Tzname,
    /// `TZOFFSETFROM`
    Tzoffsetfrom,
    /// `TZOFFSETTO`
    Tzoffsetto,
    /// `TZURL`
    Tzurl,
    /// `ATTENDEE`
    Attendee,
    /// `CONTACT`
    Contact,
    /// `ORGANIZER`
    Organizer,
    /// `RECURRENCE-ID`
    RecurrenceId,
    /// `RELATED-TO`
    RelatedTo,
    /// `URL`
    Url,
    /// `UID`
    Uid,
    /// `EXDATE`
    Exdate,
    /// `EXRULE`
    Exrule,
    /// `RDATE`
    Rdate,
    /// `RRULE`
    Rrule,
    /// `ACTION`
    Action,
    /// `REPEAT`
    Repeat,
    /// `TRIGGER`
    Trigger,
    /// `CREATED`
    Created,
    /// `DTSTAMP`
    Dtstamp,
    /// `LAST-MODIFIED`
    LastModified,
    /// `SEQUENCE`
    Sequence,
    /// `REQUEST-STATUS`
    RequestStatus,
    /// Any other IANA token or `X-` name.
    Other(String),
}

impl PropertyName {
    /// Returns the wire name for this property.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Calscale => "CALSCALE",
            Self::Method => "METHOD",
            Self::Prodid => "PRODID",
            Self::Version => "VERSION",
            Self::Attach => "ATTACH",
            Self::Categories => "CATEGORIES",
            Self::Class => "CLASS",
            Self::Comment => "COMMENT",
            Self::Description => "DESCRIPTION",
            Self::Geo => "GEO",
            Self::Location => "LOCATION",
            Self::PercentComplete => "PERCENT-COMPLETE",
            Self::Priority => "PRIORITY",
            Self::Resources => "RESOURCES",
            Self::Status => "STATUS",
            Self::Summary => "SUMMARY",
            Self::Completed => "COMPLETED",
            Self::Dtend => "DTEND",
            Self::Due => "DUE",
            Self::Dtstart => "DTSTART",
            Self::Duration => "DURATION",
            Self::Freebusy => "FREEBUSY",
            Self::Transp => "TRANSP",
            Self::Tzid => "TZID",
            Self::Tzname => "TZNAME",
            Self::Tzoffsetfrom => "TZOFFSETFROM",
            Self::Tzoffsetto => "TZOFFSETTO",
            Self::Tzurl => "TZURL",
            Self::Attendee => "ATTENDEE",
            Self::Contact => "CONTACT",
            Self::Organizer => "ORGANIZER",
            Self::RecurrenceId => "RECURRENCE-ID",
            Self::RelatedTo => "RELATED-TO",
            Self::Url => "URL",
            Self::Uid => "UID",
            Self::Exdate => "EXDATE",
            Self::Exrule => "EXRULE",
            Self::Rdate => "RDATE",
            Self::Rrule => "RRULE",
            Self::Action => "ACTION",
            Self::Repeat => "REPEAT",
            Self::Trigger => "TRIGGER",
            Self::Created => "CREATED",
            Self::Dtstamp => "DTSTAMP",
            Self::LastModified => "LAST-MODIFIED",
            Self::Sequence => "SEQUENCE",
            Self::RequestStatus => "REQUEST-STATUS",
            Self::Other(name) => name,
        }
    }

    /// Parses a property name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let upper = s.to_ascii_uppercase();
        match upper.as_str() {
            "CALSCALE" => Self::Calscale,
            "METHOD" => Self::Method,
            "PRODID" => Self::Prodid,
            "VERSION" => Self::Version,
            "ATTACH" => Self::Attach,
            "CATEGORIES" => Self::Categories,
            "CLASS" => Self::Class,
            "COMMENT" => Self::Comment,
            "DESCRIPTION" => Self::Description,
            "GEO" => Self::Geo,
            "LOCATION" => Self::Location,
            "PERCENT-COMPLETE" => Self::PercentComplete,
            "PRIORITY" => Self::Priority,
            "RESOURCES" => Self::Resources,
            "STATUS" => Self::Status,
            "SUMMARY" => Self::Summary,
            "COMPLETED" => Self::Completed,
            "DTEND" => Self::Dtend,
            "DUE" => Self::Due,
            "DTSTART" => Self::Dtstart,
            "DURATION" => Self::Duration,
            "FREEBUSY" => Self::Freebusy,
            "TRANSP" => Self::Transp,
            "TZID" => Self::Tzid,
            "TZNAME" => Self::Tzname,
            "TZOFFSETFROM" => Self::Tzoffsetfrom,
            "TZOFFSETTO" => Self::Tzoffsetto,
            "TZURL" => Self::Tzurl,
            "ATTENDEE" => Self::Attendee,
            "CONTACT" => Self::Contact,
            "ORGANIZER" => Self::Organizer,
            "RECURRENCE-ID" => Self::RecurrenceId,
            "RELATED-TO" => Self::RelatedTo,
            "URL" => Self::Url,
            "UID" => Self::Uid,
            "EXDATE" => Self::Exdate,
            "EXRULE" => Self::Exrule,
            "RDATE" => Self::Rdate,
            "RRULE" => Self::Rrule,
            "ACTION" => Self::Action,
            "REPEAT" => Self::Repeat,
            "TRIGGER" => Self::Trigger,
            "CREATED" => Self::Created,
            "DTSTAMP" => Self::Dtstamp,
            "LAST-MODIFIED" => Self::LastModified,
            "SEQUENCE" => Self::Sequence,
            "REQUEST-STATUS" => Self::RequestStatus,
            _ => Self::Other(upper),
        }
    }

    /// Returns whether this is a non-standard `X-` property.
    #[must_use]
    pub fn is_extension(&self) -> bool {
        matches!(self, Self::Other(name) if name.starts_with("X-"))
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PropertyName {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}
