//! iCalendar serializer (RFC 5545).
//!
//! Output is deterministic: properties, parameters and sub-components are
//! written in a canonical order so that equal documents serialize equally.

use std::cmp::Ordering;

use super::escape::{escape_param_value, escape_text};
use super::fold::fold_line;
use crate::rfc::ical::core::{Component, ComponentKind, ICalendar, Parameter, Property, Value};

const CALENDAR_ORDER: &[&str] = &["VERSION", "PRODID", "CALSCALE", "METHOD"];

const SCHEDULABLE_ORDER: &[&str] = &[
    "UID",
    "DTSTAMP",
    "RECURRENCE-ID",
    "DTSTART",
    "DTEND",
    "DUE",
    "DURATION",
    "RRULE",
    "RDATE",
    "EXDATE",
    "SUMMARY",
    "DESCRIPTION",
    "LOCATION",
    "STATUS",
    "TRANSP",
    "SEQUENCE",
    "ORGANIZER",
    "ATTENDEE",
];

const TIMEZONE_ORDER: &[&str] = &["TZID", "DTSTART", "TZOFFSETFROM", "TZOFFSETTO", "RRULE"];

const ALARM_ORDER: &[&str] = &["ACTION", "TRIGGER", "DESCRIPTION"];

const PARAM_ORDER: &[&str] = &["VALUE", "TZID", "CN", "CUTYPE", "ROLE", "PARTSTAT", "RSVP"];

/// Serializes an iCalendar document to a string.
#[must_use]
pub fn serialize(ical: &ICalendar) -> String {
    serialize_component(&ical.root)
}

/// Serializes a component to a string.
#[must_use]
pub fn serialize_component(component: &Component) -> String {
    let mut result = fold_line(&format!("BEGIN:{}", component.name));

    let order = property_order(component.kind);
    let mut properties: Vec<&Property> = component.properties.iter().collect();
    properties.sort_by_key(|p| rank(order, &p.name));
    for prop in properties {
        result.push_str(&serialize_property(prop));
    }

    let mut children: Vec<&Component> = component.children.iter().collect();
    children.sort_by(|a, b| cmp_components(a, b));
    for child in children {
        result.push_str(&serialize_component(child));
    }

    result.push_str(&fold_line(&format!("END:{}", component.name)));
    result
}

/// Serializes a property to a folded content line.
#[must_use]
pub fn serialize_property(prop: &Property) -> String {
    let mut line = prop.name.clone();

    let mut params: Vec<&Parameter> = prop.params.iter().collect();
    params.sort_by_key(|p| rank(PARAM_ORDER, &p.name));
    for param in params {
        line.push(';');
        line.push_str(&serialize_parameter(param));
    }

    line.push(':');
    match &prop.value {
        Value::Text(text) => line.push_str(&escape_text(text)),
        _ => line.push_str(&prop.raw_value),
    }

    fold_line(&line)
}

/// Serializes a parameter to a string.
#[must_use]
pub fn serialize_parameter(param: &Parameter) -> String {
    let values: Vec<String> = param.values.iter().map(|v| escape_param_value(v)).collect();
    format!("{}={}", param.name, values.join(","))
}

fn property_order(kind: Option<ComponentKind>) -> &'static [&'static str] {
    match kind {
        Some(ComponentKind::Calendar) => CALENDAR_ORDER,
        Some(k) if k.is_schedulable() => SCHEDULABLE_ORDER,
        Some(ComponentKind::Timezone | ComponentKind::Standard | ComponentKind::Daylight) => {
            TIMEZONE_ORDER
        }
        Some(ComponentKind::Alarm) => ALARM_ORDER,
        _ => &[],
    }
}

/// Position in `order`, with unlisted names after all listed ones.
/// The sorts using this are stable, so unlisted names keep document order.
fn rank(order: &[&str], name: &str) -> usize {
    order
        .iter()
        .position(|n| n.eq_ignore_ascii_case(name))
        .unwrap_or(order.len())
}

/// Timezones first, then schedulable components by UID and RECURRENCE-ID.
fn cmp_components(a: &Component, b: &Component) -> Ordering {
    let group = |c: &Component| match c.kind {
        Some(ComponentKind::Timezone) => 0,
        Some(k) if k.is_schedulable() => 1,
        _ => 2,
    };
    let recurrence_id = |c: &Component| {
        c.get_property("RECURRENCE-ID")
            .map_or(String::new(), |p| p.raw_value.clone())
    };

    group(a).cmp(&group(b)).then_with(|| {
        if group(a) == 1 {
            a.uid()
                .cmp(&b.uid())
                .then_with(|| recurrence_id(a).cmp(&recurrence_id(b)))
        } else {
            Ordering::Equal
        }
    })
}
