//! Top-level iCalendar object and document-wide operations.

use std::collections::BTreeSet;

use super::{Component, ComponentKind, Property, PropertyName};

/// Top-level iCalendar object.
///
/// This is a convenience wrapper around a VCALENDAR component
/// with helper methods for common operations. Equality is the
/// structural, order-free equality of the root component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ICalendar {
    /// The root VCALENDAR component.
    pub root: Component,
}

impl ICalendar {
    /// Creates a new empty iCalendar with required properties.
    #[must_use]
    pub fn new(prodid: impl Into<String>) -> Self {
        let mut root = Component::calendar();
        root.add_property(Property::text("VERSION", "2.0"));
        root.add_property(Property::text("PRODID", prodid));
        Self { root }
    }

    /// Returns the PRODID value.
    #[must_use]
    pub fn prodid(&self) -> Option<&str> {
        self.root.property_value("PRODID")
    }

    /// Returns the VERSION value.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.root.property_value("VERSION")
    }

    /// Returns the CALSCALE value (defaults to "GREGORIAN").
    #[must_use]
    pub fn calscale(&self) -> &str {
        self.root.property_value("CALSCALE").unwrap_or("GREGORIAN")
    }

    /// Returns the top-level properties.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.root.properties
    }

    /// Returns the direct sub-components of the VCALENDAR.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.root.children
    }

    /// Adds a VEVENT component.
    pub fn add_event(&mut self, event: Component) {
        self.root.add_child(event);
    }

    /// Adds a VTODO component.
    pub fn add_todo(&mut self, todo: Component) {
        self.root.add_child(todo);
    }

    /// Adds a VTIMEZONE component.
    pub fn add_timezone(&mut self, tz: Component) {
        self.root.add_child(tz);
    }

    /// Returns all VEVENT components.
    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.root.children_of_kind(ComponentKind::Event)
    }

    /// Returns all VTODO components.
    #[must_use]
    pub fn todos(&self) -> Vec<&Component> {
        self.root.children_of_kind(ComponentKind::Todo)
    }

    /// Returns all VTIMEZONE components.
    #[must_use]
    pub fn timezones(&self) -> Vec<&Component> {
        self.root.children_of_kind(ComponentKind::Timezone)
    }

    /// Returns the TZIDs of all VTIMEZONE components.
    #[must_use]
    pub fn timezone_ids(&self) -> BTreeSet<&str> {
        self.timezones()
            .into_iter()
            .filter_map(|tz| tz.property_value("TZID"))
            .collect()
    }

    /// Returns all unique UIDs in this calendar.
    #[must_use]
    pub fn uids(&self) -> Vec<&str> {
        let mut uids: Vec<&str> = self.root.children.iter().filter_map(Component::uid).collect();
        uids.sort_unstable();
        uids.dedup();
        uids
    }

    /// ## Summary
    /// Returns the recurrence master: the first schedulable component
    /// without a RECURRENCE-ID.
    #[must_use]
    pub fn master_component(&self) -> Option<&Component> {
        self.root.children.iter().find(|c| {
            c.kind.is_some_and(ComponentKind::is_schedulable)
                && !c.has_property(&PropertyName::RecurrenceId)
        })
    }

    /// ## Summary
    /// Removes every VALARM in the document, at any depth.
    pub fn remove_alarms(&mut self) {
        self.root.remove_alarms();
    }

    /// ## Summary
    /// Removes every `X-` property in the document, top-level and nested.
    pub fn remove_x_properties(&mut self) {
        self.root.remove_x_properties();
    }

    /// ## Summary
    /// Removes the named parameters from every occurrence of `property`.
    pub fn remove_property_parameters(&mut self, property: &PropertyName, params: &[&str]) {
        self.root.remove_property_parameters(property, params);
    }

    /// ## Summary
    /// Restricts the document to what the given attendees can see.
    ///
    /// Schedulable components in which none of `attendees` appear are removed;
    /// when such a component is an override and the master survives, its
    /// RECURRENCE-ID is added to the master as an EXDATE. ATTENDEE properties
    /// of the remaining components are left as they are.
    #[tracing::instrument(skip(self), fields(components = self.root.children.len()))]
    pub fn attendees_view(&mut self, attendees: &[&str]) {
        let mut excluded: Vec<Property> = Vec::new();
        let mut master_removed = false;

        self.root.children.retain(|component| {
            if !component.kind.is_some_and(ComponentKind::is_schedulable) {
                return true;
            }
            let visible = attendees
                .iter()
                .any(|a| component.attendee_property(a).is_some());
            if visible {
                return true;
            }
            match component.get_property("RECURRENCE-ID") {
                Some(rid) => {
                    let mut exdate = rid.clone();
                    exdate.name = PropertyName::Exdate.as_str().to_string();
                    excluded.push(exdate);
                }
                None => master_removed = true,
            }
            tracing::trace!(uid = ?component.uid(), "Removing component not visible to attendees");
            false
        });

        if !master_removed && !excluded.is_empty() {
            let master = self.root.children.iter_mut().find(|c| {
                c.kind.is_some_and(ComponentKind::is_schedulable)
                    && !c.has_property(&PropertyName::RecurrenceId)
            });
            if let Some(master) = master {
                master.properties.extend(excluded);
            }
        }
    }
}

impl Default for ICalendar {
    fn default() -> Self {
        Self::new(kunai_core::constants::PRODID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendee(address: &str) -> Property {
        Property::cal_address("ATTENDEE", address)
    }

    fn meeting(uid: &str, rid: Option<&str>, attendees: &[&str]) -> Component {
        let mut event = Component::event();
        event.add_property(Property::text("UID", uid));
        if let Some(rid) = rid {
            event.add_property(Property::text("RECURRENCE-ID", rid));
        }
        event.add_property(Property::cal_address("ORGANIZER", "mailto:org@example.com"));
        for a in attendees {
            event.add_property(attendee(a));
        }
        event
    }

    #[test]
    fn icalendar_new() {
        let ical = ICalendar::new("-//Test//Test//EN");
        assert_eq!(ical.version(), Some("2.0"));
        assert_eq!(ical.prodid(), Some("-//Test//Test//EN"));
        assert_eq!(ical.calscale(), "GREGORIAN");
    }

    #[test]
    fn icalendar_events() {
        let mut ical = ICalendar::default();
        ical.add_event(meeting("event1", None, &[]));
        ical.add_event(meeting("event2", None, &[]));

        assert_eq!(ical.events().len(), 2);
        assert_eq!(ical.uids(), vec!["event1", "event2"]);
    }

    #[test]
    fn timezone_ids_collects_tzids() {
        let mut ical = ICalendar::default();
        for tzid in ["Europe/Paris", "America/New_York"] {
            let mut tz = Component::timezone();
            tz.add_property(Property::text("TZID", tzid));
            ical.add_timezone(tz);
        }
        let ids: Vec<&str> = ical.timezone_ids().into_iter().collect();
        assert_eq!(ids, vec!["America/New_York", "Europe/Paris"]);
    }

    #[test]
    fn master_component_skips_overrides() {
        let mut ical = ICalendar::default();
        ical.add_event(meeting("1", Some("20260107T100000Z"), &[]));
        ical.add_event(meeting("1", None, &[]));

        let master = ical.master_component().unwrap();
        assert!(master.get_property("RECURRENCE-ID").is_none());
    }

    #[test]
    fn attendees_view_keeps_other_attendees_of_visible_components() {
        let mut ical = ICalendar::default();
        ical.add_event(meeting(
            "1",
            None,
            &["mailto:a@example.com", "mailto:b@example.com"],
        ));
        let before = ical.clone();

        ical.attendees_view(&["mailto:a@example.com"]);

        let event = ical.events()[0];
        assert_eq!(event.get_properties("ATTENDEE").len(), 2);
        assert!(event.get_property("ORGANIZER").is_some());
        assert_eq!(ical, before);
    }

    #[test]
    fn attendees_view_exdates_invisible_overrides() {
        let mut ical = ICalendar::default();
        ical.add_event(meeting("1", None, &["mailto:a@example.com"]));
        ical.add_event(meeting("1", Some("20260107T100000Z"), &["mailto:b@example.com"]));

        ical.attendees_view(&["mailto:a@example.com"]);

        assert_eq!(ical.events().len(), 1);
        let master = ical.master_component().unwrap();
        let exdate = master.get_property("EXDATE").unwrap();
        assert_eq!(exdate.raw_value, "20260107T100000Z");
    }

    #[test]
    fn attendees_view_keeps_timezones() {
        let mut ical = ICalendar::default();
        let mut tz = Component::timezone();
        tz.add_property(Property::text("TZID", "Europe/Paris"));
        ical.add_timezone(tz);
        ical.add_event(meeting("1", None, &["mailto:b@example.com"]));

        ical.attendees_view(&["mailto:a@example.com"]);

        assert_eq!(ical.timezones().len(), 1);
        assert!(ical.events().is_empty());
    }

    #[test]
    fn calendar_equality_is_order_free() {
        let mut a = ICalendar::new("-//A//EN");
        a.add_event(meeting("1", None, &[]));
        a.add_event(meeting("2", None, &[]));

        let mut b = ICalendar::new("-//A//EN");
        b.add_event(meeting("2", None, &[]));
        b.add_event(meeting("1", None, &[]));

        assert_eq!(a, b);
    }
}
