//! Organizer/attendee diff engine for iTIP scheduling.
//!
//! Two checks are offered on a pair of documents:
//! - [`ICalDiff::organizer_diff`]: are the documents equal once alarms are
//!   removed?
//! - [`ICalDiff::attendee_merge`]: is an attendee's copy an acceptable
//!   edit of the organizer's, and did the attendee change anything?
//!
//! The inputs are never mutated; every check works on private copies.

mod calendar;
mod component;
mod matcher;
mod report;


use std::fmt;

use chrono::{DateTime, Utc};
use kunai_rfc::rfc::ical::core::{Component, ICalendar, PropertyName};
use kunai_rfc::rfc::ical::expand::TimeZoneResolver;
use serde::Serialize;

pub use report::{DiffReport, Difference};

use super::itip::prepare_scheduling_message;

/// Top-level properties that only identify the producing software.
pub const IGNORED_CALENDAR_PROPERTIES: &[PropertyName] =
    &[PropertyName::Prodid, PropertyName::Calscale];

/// Component properties that are bookkeeping and may drift freely.
pub const VOLATILE_COMPONENT_PROPERTIES: &[PropertyName] = &[
    PropertyName::Transp,
    PropertyName::Dtstamp,
    PropertyName::Created,
    PropertyName::LastModified,
    PropertyName::Sequence,
];

/// ## Summary
/// Result of an attendee merge check.
///
/// `acceptable` says whether the attendee's copy may replace the organizer's
/// view. `attendee_unchanged` is `true` when nothing differed at all, and
/// `false` when the attendee's own ATTENDEE property changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MergeOutcome {
    pub acceptable: bool,
    pub attendee_unchanged: bool,
}

impl MergeOutcome {
    /// The documents are identical after normalization.
    pub const IDENTICAL: Self = Self {
        acceptable: true,
        attendee_unchanged: true,
    };

    /// The attendee's copy changes something they may not change.
    pub const REJECTED: Self = Self {
        acceptable: false,
        attendee_unchanged: false,
    };

    #[must_use]
    pub const fn accepted(attendee_unchanged: bool) -> Self {
        Self {
            acceptable: true,
            attendee_unchanged,
        }
    }

    /// Combines two per-component outcomes; any rejection wins.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        if self.acceptable && other.acceptable {
            Self::accepted(self.attendee_unchanged && other.attendee_unchanged)
        } else {
            Self::REJECTED
        }
    }
}

impl fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.acceptable, self.attendee_unchanged) {
            (false, _) => write!(f, "rejected"),
            (true, true) => write!(f, "accepted (unchanged)"),
            (true, false) => write!(f, "accepted (attendee changed)"),
        }
    }
}

/// ## Summary
/// Identity of a component within a document: type name, UID and the
/// recurrence identifier as a UTC instant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ComponentKey {
    pub kind_name: String,
    pub uid: String,
    pub recurrence_id: Option<DateTime<Utc>>,
}

impl ComponentKey {
    /// Builds the key of `component`, resolving its RECURRENCE-ID to UTC.
    #[must_use]
    pub fn of(component: &Component, resolver: &mut TimeZoneResolver) -> Self {
        Self {
            kind_name: component.name.clone(),
            uid: component.uid().unwrap_or_default().to_string(),
            recurrence_id: component.recurrence_id_utc(resolver),
        }
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind_name, self.uid)?;
        if let Some(rid) = self.recurrence_id {
            write!(f, "@{}", rid.format("%Y%m%dT%H%M%SZ"))?;
        }
        Ok(())
    }
}

/// ## Summary
/// One attendee merge: the two normalized documents and the attendee
/// whose changes are permitted.
#[derive(Debug, Clone, Copy)]
pub struct DiffRequest<'a> {
    /// The organizer's document without the components `attendee` is not in.
    pub organizer: &'a ICalendar,
    /// The attendee's submitted document.
    pub attendee_copy: &'a ICalendar,
    /// Calendar address of the attendee under test.
    pub attendee: &'a str,
}

impl DiffRequest<'_> {
    /// ## Summary
    /// Runs the document checks and then the component matcher, stopping at
    /// the first rejection.
    pub fn reconcile(&self, report: &mut DiffReport) -> MergeOutcome {
        if !calendar::properties_match(self, report) {
            return MergeOutcome::REJECTED;
        }
        if !calendar::timezones_match(self, report) {
            return MergeOutcome::REJECTED;
        }
        let mut resolver = TimeZoneResolver::default();
        matcher::match_components(self, &mut resolver, report)
    }
}

/// ## Summary
/// Compares two versions of a scheduling object.
///
/// `first` is the organizer's version and `second` the copy it is checked
/// against.
#[derive(Debug, Clone, Copy)]
pub struct ICalDiff<'a> {
    first: &'a ICalendar,
    second: &'a ICalendar,
}

impl<'a> ICalDiff<'a> {
    #[must_use]
    pub const fn new(first: &'a ICalendar, second: &'a ICalendar) -> Self {
        Self { first, second }
    }

    /// ## Summary
    /// Returns `true` when the documents are equal once every alarm is
    /// removed from both.
    #[must_use]
    #[tracing::instrument(skip(self))]
    pub fn organizer_diff(&self) -> bool {
        let mut first = self.first.clone();
        first.remove_alarms();
        let mut second = self.second.clone();
        second.remove_alarms();

        let equal = first == second;
        tracing::debug!(equal, "Organizer diff complete");
        equal
    }

    /// ## Summary
    /// Checks whether `second` is an acceptable attendee edit of `first`.
    ///
    /// See [`MergeOutcome`] for the meaning of the result.
    #[must_use]
    pub fn attendee_merge(&self, attendee: &str) -> MergeOutcome {
        self.attendee_merge_with_report(attendee).0
    }

    /// ## Summary
    /// Same as [`Self::attendee_merge`], also returning what differed.
    #[must_use]
    #[tracing::instrument(skip(self))]
    pub fn attendee_merge_with_report(&self, attendee: &str) -> (MergeOutcome, DiffReport) {
        let mut organizer = self.first.clone();
        organizer.remove_x_properties();
        organizer.attendees_view(&[attendee]);
        prepare_scheduling_message(&mut organizer);

        let mut attendee_copy = self.second.clone();
        attendee_copy.remove_x_properties();
        prepare_scheduling_message(&mut attendee_copy);

        let mut report = DiffReport::default();
        if organizer == attendee_copy {
            tracing::debug!("Normalized documents are identical");
            return (MergeOutcome::IDENTICAL, report);
        }

        let request = DiffRequest {
            organizer: &organizer,
            attendee_copy: &attendee_copy,
            attendee,
        };
        let outcome = request.reconcile(&mut report);
        tracing::debug!(%outcome, differences = report.differences.len(), "Attendee merge complete");
        (outcome, report)
    }
}
