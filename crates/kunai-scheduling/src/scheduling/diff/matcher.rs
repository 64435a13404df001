//! Pairs up the components of two documents by key.

use std::collections::BTreeMap;

use kunai_rfc::rfc::ical::core::{Component, ComponentKind, ICalendar};
use kunai_rfc::rfc::ical::expand::TimeZoneResolver;

use super::component::compare_components;
use super::report::keys_to_strings;
use super::{ComponentKey, DiffReport, DiffRequest, Difference, MergeOutcome};

/// Keys every component except VTIMEZONE. Later duplicates of a key win.
fn keyed_components<'c>(
    ical: &'c ICalendar,
    resolver: &mut TimeZoneResolver,
) -> BTreeMap<ComponentKey, &'c Component> {
    ical.components()
        .iter()
        .filter(|c| !c.is_kind(ComponentKind::Timezone))
        .map(|c| (ComponentKey::of(c, resolver), c))
        .collect()
}

/// ## Summary
/// Matches the organizer's components against the attendee's.
///
/// Every organizer component must be present in the attendee's copy.
/// Overrides only the attendee has are compared with the instance derived
/// from the organizer's recurring master.
pub(super) fn match_components(
    request: &DiffRequest<'_>,
    resolver: &mut TimeZoneResolver,
    report: &mut DiffReport,
) -> MergeOutcome {
    let organizer = keyed_components(request.organizer, resolver);
    let attendee = keyed_components(request.attendee_copy, resolver);

    let missing: Vec<&ComponentKey> = organizer
        .keys()
        .filter(|key| !attendee.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        report.record(Difference::MissingComponents {
            keys: keys_to_strings(missing),
        });
        return MergeOutcome::REJECTED;
    }

    let mut outcome = MergeOutcome::IDENTICAL;

    for (key, organizer_component) in &organizer {
        let Some(attendee_component) = attendee.get(key) else {
            continue;
        };
        tracing::trace!(%key, "Comparing matched components");
        outcome = outcome.and(compare_components(
            request,
            key,
            organizer_component,
            attendee_component,
            report,
        ));
        if !outcome.acceptable {
            return outcome;
        }
    }

    for (key, attendee_component) in attendee.iter().filter(|(k, _)| !organizer.contains_key(*k)) {
        let derived = key
            .recurrence_id
            .and_then(|rid| request.organizer.derive_instance(rid, resolver));
        let Some(derived) = derived else {
            tracing::warn!(%key, "Attendee override has no derivable organizer instance");
            report.record(Difference::UnderivableInstance {
                key: key.to_string(),
            });
            return MergeOutcome::REJECTED;
        };
        tracing::trace!(%key, "Comparing attendee override with derived instance");
        outcome = outcome.and(compare_components(
            request,
            key,
            &derived,
            attendee_component,
            report,
        ));
        if !outcome.acceptable {
            return outcome;
        }
    }

    outcome
}
