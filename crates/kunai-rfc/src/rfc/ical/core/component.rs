//! iCalendar component types (RFC 5545 §3.4-3.6).

use std::collections::{BTreeSet, HashSet};
use std::hash::{Hash, Hasher};

use super::{Property, PropertyName};

/// Component kind for iCalendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    /// VEVENT component.
    Event,
    /// VTODO component.
    Todo,
    /// VJOURNAL component.
    Journal,
    /// VFREEBUSY component.
    FreeBusy,
    /// VTIMEZONE component.
    Timezone,
    /// VALARM component (nested within VEVENT/VTODO).
    Alarm,
    /// STANDARD sub-component of VTIMEZONE.
    Standard,
    /// DAYLIGHT sub-component of VTIMEZONE.
    Daylight,
    /// Unknown/X-component.
    Unknown,
}

impl ComponentKind {
    /// Returns the string name for this component kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
            Self::Todo => "VTODO",
            Self::Journal => "VJOURNAL",
            Self::FreeBusy => "VFREEBUSY",
            Self::Timezone => "VTIMEZONE",
            Self::Alarm => "VALARM",
            Self::Standard => "STANDARD",
            Self::Daylight => "DAYLIGHT",
            Self::Unknown => "X-UNKNOWN",
        }
    }

    /// Parses a component kind from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "VCALENDAR" => Self::Calendar,
            "VEVENT" => Self::Event,
            "VTODO" => Self::Todo,
            "VJOURNAL" => Self::Journal,
            "VFREEBUSY" => Self::FreeBusy,
            "VTIMEZONE" => Self::Timezone,
            "VALARM" => Self::Alarm,
            "STANDARD" => Self::Standard,
            "DAYLIGHT" => Self::Daylight,
            _ => Self::Unknown,
        }
    }

    /// Returns whether this is a schedulable component (VEVENT, VTODO, VJOURNAL).
    #[must_use]
    pub const fn is_schedulable(self) -> bool {
        matches!(self, Self::Event | Self::Todo | Self::Journal)
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An iCalendar component.
///
/// Components can contain properties and nested sub-components.
/// For example, a VCALENDAR contains VEVENTs, which may contain VALARMs.
///
/// Equality is structural and order-free: two components are equal when they
/// have the same name, the same set of properties, and (recursively) the same
/// set of sub-components.
#[derive(Debug, Clone, Default)]
pub struct Component {
    /// Component type/name.
    pub kind: Option<ComponentKind>,
    /// Original component name (preserved for X-components).
    pub name: String,
    /// Properties in order of appearance.
    pub properties: Vec<Property>,
    /// Nested sub-components.
    pub children: Vec<Component>,
}

impl Component {
    /// Creates a new component with the given kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind: Some(kind),
            name: kind.as_str().to_string(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a new component with a custom name (for X-components).
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        let name = name.into().to_ascii_uppercase();
        let kind = ComponentKind::parse(&name);
        Self {
            kind: Some(kind),
            name,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a VCALENDAR component.
    #[must_use]
    pub fn calendar() -> Self {
        Self::new(ComponentKind::Calendar)
    }

    /// Creates a VEVENT component.
    #[must_use]
    pub fn event() -> Self {
        Self::new(ComponentKind::Event)
    }

    /// Creates a VTODO component.
    #[must_use]
    pub fn todo() -> Self {
        Self::new(ComponentKind::Todo)
    }

    /// Creates a VTIMEZONE component.
    #[must_use]
    pub fn timezone() -> Self {
        Self::new(ComponentKind::Timezone)
    }

    /// Creates a VALARM component.
    #[must_use]
    pub fn alarm() -> Self {
        Self::new(ComponentKind::Alarm)
    }

    /// Adds a property to this component.
    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    /// Adds a child component.
    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Returns whether this component is of the given kind.
    #[must_use]
    pub fn is_kind(&self, kind: ComponentKind) -> bool {
        self.kind == Some(kind)
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        let name_upper = name.to_ascii_uppercase();
        self.properties.iter().find(|p| p.name == name_upper)
    }

    /// Returns all properties with the given name.
    #[must_use]
    pub fn get_properties(&self, name: &str) -> Vec<&Property> {
        let name_upper = name.to_ascii_uppercase();
        self.properties
            .iter()
            .filter(|p| p.name == name_upper)
            .collect()
    }

    /// Returns whether a property with the given name is present.
    #[must_use]
    pub fn has_property(&self, name: &PropertyName) -> bool {
        self.properties.iter().any(|p| p.is(name))
    }

    /// Removes every property with the given name.
    pub fn remove_properties(&mut self, name: &PropertyName) {
        self.properties.retain(|p| !p.is(name));
    }

    /// Replaces all properties of this name with `prop`.
    pub fn replace_property(&mut self, prop: Property) {
        self.properties.retain(|p| p.name != prop.name);
        self.properties.push(prop);
    }

    /// ## Summary
    /// Returns the string value of the first property with the given name.
    ///
    /// Text, calendar address, and URI values are returned unescaped; other
    /// value types are returned in their raw form.
    #[must_use]
    pub fn property_value(&self, name: &str) -> Option<&str> {
        let prop = self.get_property(name)?;
        Some(prop.value.as_str().unwrap_or(&prop.raw_value))
    }

    /// Returns the UID property value if present.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.property_value("UID")
    }

    /// Returns the SUMMARY property value if present.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.property_value("SUMMARY")
    }

    /// Returns the ATTENDEE property whose value matches `attendee`, if any.
    #[must_use]
    pub fn attendee_property(&self, attendee: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.is(&PropertyName::Attendee) && p.raw_value == attendee)
    }

    /// Returns children of a specific kind.
    #[must_use]
    pub fn children_of_kind(&self, kind: ComponentKind) -> Vec<&Component> {
        self.children.iter().filter(|c| c.is_kind(kind)).collect()
    }

    /// Returns all VALARM children.
    #[must_use]
    pub fn alarms(&self) -> Vec<&Component> {
        self.children_of_kind(ComponentKind::Alarm)
    }

    /// ## Summary
    /// Removes VALARM components from this component and all descendants.
    pub fn remove_alarms(&mut self) {
        self.children.retain(|c| !c.is_kind(ComponentKind::Alarm));
        for child in &mut self.children {
            child.remove_alarms();
        }
    }

    /// ## Summary
    /// Removes `X-` properties from this component and all descendants.
    pub fn remove_x_properties(&mut self) {
        self.properties.retain(|p| !p.property_name().is_extension());
        for child in &mut self.children {
            child.remove_x_properties();
        }
    }

    /// ## Summary
    /// Removes the named parameters from every `property` in this component
    /// and all descendants.
    pub fn remove_property_parameters(&mut self, property: &PropertyName, params: &[&str]) {
        for prop in self.properties.iter_mut().filter(|p| p.is(property)) {
            prop.remove_params(params);
        }
        for child in &mut self.children {
            child.remove_property_parameters(property, params);
        }
    }

    /// The order-free view of this component's properties.
    #[must_use]
    pub fn property_set(&self) -> BTreeSet<&Property> {
        self.properties.iter().collect()
    }

    /// The order-free view of this component's sub-components.
    #[must_use]
    pub fn child_set(&self) -> HashSet<&Component> {
        self.children.iter().collect()
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.property_set() == other.property_set()
            && self.child_set() == other.child_set()
    }
}

impl Eq for Component {}

impl Hash for Component {
    // Children are left out; equal components still hash equally.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        for prop in self.property_set() {
            prop.hash(state);
        }
    }
}
