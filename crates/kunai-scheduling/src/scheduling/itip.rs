//! iTIP (RFC 5546) scheduling message preparation.

use kunai_rfc::rfc::ical::core::{ComponentKind, ICalendar, PropertyName, param_names};
use kunai_rfc::rfc::ical::parse;

use crate::error::{SchedulingError, SchedulingResult};

/// ATTENDEE parameters that only describe message delivery (RFC 6638).
pub const ATTENDEE_TRANSPORT_PARAMS: &[&str] = &[
    param_names::SCHEDULE_AGENT,
    param_names::SCHEDULE_STATUS,
    param_names::SCHEDULE_FORCE_SEND,
];

/// ORGANIZER parameters that only describe message delivery (RFC 6638).
pub const ORGANIZER_TRANSPORT_PARAMS: &[&str] =
    &[param_names::SCHEDULE_AGENT, param_names::SCHEDULE_STATUS];

/// ## Summary
/// Normalizes a calendar in place into the form sent in an iTIP message.
///
/// Alarms and `X-` properties are removed, along with the delivery-only
/// parameters of ATTENDEE and ORGANIZER.
#[tracing::instrument(skip(ical))]
pub fn prepare_scheduling_message(ical: &mut ICalendar) {
    ical.remove_alarms();
    ical.remove_x_properties();
    ical.remove_property_parameters(&PropertyName::Attendee, ATTENDEE_TRANSPORT_PARAMS);
    ical.remove_property_parameters(&PropertyName::Organizer, ORGANIZER_TRANSPORT_PARAMS);
}

/// ## Summary
/// Parses a scheduling object resource: a calendar holding at least one
/// event, to-do or journal, all sharing one UID.
///
/// ## Errors
/// Returns an error if the text does not parse or the calendar is not a
/// single scheduling object.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn load_scheduling_object(input: &str) -> SchedulingResult<ICalendar> {
    let ical = parse(input)?;

    let schedulable: Vec<_> = ical
        .components()
        .iter()
        .filter(|c| c.kind.is_some_and(ComponentKind::is_schedulable))
        .collect();

    if schedulable.is_empty() {
        return Err(SchedulingError::InvalidDocument(
            "no VEVENT, VTODO or VJOURNAL component".to_string(),
        ));
    }

    let uids = ical.uids();
    if uids.len() > 1 || schedulable.iter().any(|c| c.uid().is_none()) {
        return Err(SchedulingError::InvalidDocument(format!(
            "expected a single UID, found {}",
            uids.len()
        )));
    }

    tracing::debug!(components = schedulable.len(), "Loaded scheduling object");
    Ok(ical)
}
