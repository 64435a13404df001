//! Comparison of two components that share a key.

use kunai_rfc::rfc::ical::build::serialize_component;
use kunai_rfc::rfc::ical::core::{Component, Property, PropertyName};

use super::{
    ComponentKey, DiffReport, DiffRequest, Difference, MergeOutcome, VOLATILE_COMPONENT_PROPERTIES,
};

/// ## Summary
/// Compares the organizer's and the attendee's version of one component.
///
/// Volatile properties are ignored. The tested attendee's own ATTENDEE
/// property may differ; such a difference keeps the pair acceptable but
/// marks it as changed. Sub-components must match exactly.
pub(super) fn compare_components(
    request: &DiffRequest<'_>,
    key: &ComponentKey,
    organizer: &Component,
    attendee: &Component,
    report: &mut DiffReport,
) -> MergeOutcome {
    if organizer.name != attendee.name {
        report.record(Difference::ComponentName {
            key: key.to_string(),
            organizer: organizer.name.clone(),
            attendee: attendee.name.clone(),
        });
        return MergeOutcome::REJECTED;
    }

    let organizer_props = organizer.property_set();
    let attendee_props = attendee.property_set();
    let differing: Vec<&Property> = organizer_props
        .symmetric_difference(&attendee_props)
        .copied()
        .filter(|p| !VOLATILE_COMPONENT_PROPERTIES.contains(&p.property_name()))
        .collect();

    let forbidden: Vec<&Property> = differing
        .iter()
        .copied()
        .filter(|p| !is_own_attendee(p, request.attendee))
        .collect();
    if !forbidden.is_empty() {
        report.record(Difference::ComponentProperties {
            key: key.to_string(),
            properties: forbidden.iter().map(ToString::to_string).collect(),
        });
        return MergeOutcome::REJECTED;
    }

    let organizer_children = organizer.child_set();
    let attendee_children = attendee.child_set();
    if organizer_children != attendee_children {
        report.record(Difference::SubComponents {
            key: key.to_string(),
            components: organizer_children
                .symmetric_difference(&attendee_children)
                .map(|c| child_label(c))
                .collect(),
        });
        return MergeOutcome::REJECTED;
    }

    tracing::trace!(%key, attendee_changed = !differing.is_empty(), "Components match");
    MergeOutcome::accepted(differing.is_empty())
}

fn is_own_attendee(prop: &Property, attendee: &str) -> bool {
    prop.is(&PropertyName::Attendee) && prop.raw_value == attendee
}

fn child_label(component: &Component) -> String {
    match component.uid() {
        Some(uid) => format!("{}:{uid}", component.name),
        None => serialize_component(component)
            .lines()
            .take(3)
            .collect::<Vec<_>>()
            .join(" "),
    }
}
