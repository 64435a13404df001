//! Document-level checks: top-level properties and timezone identifiers.

use kunai_rfc::rfc::ical::core::Property;

use super::{DiffReport, DiffRequest, Difference, IGNORED_CALENDAR_PROPERTIES};

/// ## Summary
/// Compares the top-level calendar properties, ignoring the ones that
/// only identify the producer.
pub(super) fn properties_match(request: &DiffRequest<'_>, report: &mut DiffReport) -> bool {
    let organizer = request.organizer.root.property_set();
    let attendee = request.attendee_copy.root.property_set();

    let differing: Vec<&Property> = organizer
        .symmetric_difference(&attendee)
        .copied()
        .filter(|p| !IGNORED_CALENDAR_PROPERTIES.contains(&p.property_name()))
        .collect();

    if differing.is_empty() {
        return true;
    }
    report.record(Difference::CalendarProperties {
        properties: differing.iter().map(ToString::to_string).collect(),
    });
    false
}

/// ## Summary
/// Compares the sets of VTIMEZONE identifiers.
///
/// Only presence is checked. Two VTIMEZONEs with the same TZID and
/// different rules are treated as the same zone.
pub(super) fn timezones_match(request: &DiffRequest<'_>, report: &mut DiffReport) -> bool {
    let organizer = request.organizer.timezone_ids();
    let attendee = request.attendee_copy.timezone_ids();

    if organizer == attendee {
        return true;
    }
    report.record(Difference::Timezones {
        only_in_organizer: organizer.difference(&attendee).map(ToString::to_string).collect(),
        only_in_attendee: attendee.difference(&organizer).map(ToString::to_string).collect(),
    });
    false
}
