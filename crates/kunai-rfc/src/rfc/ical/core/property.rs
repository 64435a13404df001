//! iCalendar property and content line types (RFC 5545 §3.1, §3.8).

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::{Date, DateTime, Duration, Parameter, PropertyName, Value};
use crate::rfc::ical::build::escape_text;

/// A raw content line as parsed from iCalendar text.
///
/// This is the low-level representation before value type resolution.
/// Preserves the original raw value for round-trip fidelity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Raw value string (after unfolding, before unescaping).
    pub raw_value: String,
}

impl ContentLine {
    /// Creates a new content line.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            raw_value: value.into(),
        }
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        let name_upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name == name_upper)?.value()
    }

    /// Returns the VALUE parameter if present.
    #[must_use]
    pub fn value_type(&self) -> Option<&str> {
        self.get_param_value("VALUE")
    }

    /// Returns the TZID parameter if present.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.get_param_value("TZID")
    }
}

/// A fully parsed iCalendar property.
///
/// Contains the parsed value along with the original raw value.
///
/// Identity is by content: two properties are equal when they have the same
/// name, the same raw value, and the same set of parameters in any order.
/// The parsed `value` is derived from `raw_value` and takes no part in it.
#[derive(Debug, Clone)]
pub struct Property {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Parsed value.
    pub value: Value,
    /// Original raw value string (for round-trip and identity).
    pub raw_value: String,
}

impl Property {
    /// Creates a property with a text value.
    ///
    /// The raw value is the escaped form, matching what the parser keeps.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value_str = value.into();
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            raw_value: escape_text(&value_str),
            value: Value::Text(value_str),
        }
    }

    /// Creates a property with an integer value.
    #[must_use]
    pub fn integer(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: Value::Integer(value),
            raw_value: value.to_string(),
        }
    }

    /// Creates a property with a calendar user address value.
    #[must_use]
    pub fn cal_address(name: impl Into<String>, address: impl Into<String>) -> Self {
        let address = address.into();
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: Value::CalAddress(address.clone()),
            raw_value: address,
        }
    }

    /// Creates a property with a datetime value.
    ///
    /// Zoned values carry their `TZID` parameter, as they would when parsed.
    #[must_use]
    pub fn datetime(name: impl Into<String>, dt: DateTime) -> Self {
        let raw = dt.to_string();
        let params = dt.tzid().map(Parameter::tzid).into_iter().collect();
        Self {
            name: name.into().to_ascii_uppercase(),
            params,
            value: Value::DateTime(dt),
            raw_value: raw,
        }
    }

    /// Creates a property with a date value.
    #[must_use]
    pub fn date(name: impl Into<String>, d: Date) -> Self {
        let raw = d.to_string();
        Self {
            name: name.into().to_ascii_uppercase(),
            params: vec![Parameter::value_type("DATE")],
            value: Value::Date(d),
            raw_value: raw,
        }
    }

    /// Creates a property with a duration value.
    #[must_use]
    pub fn duration(name: impl Into<String>, d: Duration) -> Self {
        let raw = d.to_string();
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: Value::Duration(d),
            raw_value: raw,
        }
    }

    /// Creates a recurrence rule property from rule text such as `FREQ=DAILY;COUNT=5`.
    #[must_use]
    pub fn recur(name: impl Into<String>, rule: impl Into<String>) -> Self {
        let rule = rule.into();
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: Value::Recur(rule.clone()),
            raw_value: rule,
        }
    }

    /// Returns this property with an extra parameter.
    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.set_param(param);
        self
    }

    /// Returns the typed name of this property.
    #[must_use]
    pub fn property_name(&self) -> PropertyName {
        PropertyName::parse(&self.name)
    }

    /// Returns whether this property has the given name.
    #[must_use]
    pub fn is(&self, name: &PropertyName) -> bool {
        self.name == name.as_str()
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        let name_upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name == name_upper)
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name)?.value()
    }

    /// Sets a parameter, replacing any existing parameter with the same name.
    pub fn set_param(&mut self, param: Parameter) {
        self.params.retain(|p| p.name != param.name);
        self.params.push(param);
    }

    /// Removes every parameter whose name is in `names` (case-insensitive).
    pub fn remove_params(&mut self, names: &[&str]) {
        self.params
            .retain(|p| !names.iter().any(|n| p.name.eq_ignore_ascii_case(n)));
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }

    /// Returns the value as an integer if it is an integer value.
    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        self.value.as_integer()
    }

    /// Returns the value as a datetime if it is a datetime value.
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime> {
        self.value.as_datetime()
    }

    /// Returns the value as a date if it is a date value.
    #[must_use]
    pub fn as_date(&self) -> Option<&Date> {
        self.value.as_date()
    }

    /// Returns the value as a duration if it is a duration value.
    #[must_use]
    pub fn as_duration(&self) -> Option<&Duration> {
        self.value.as_duration()
    }

    /// Parameters sorted by name then values, the order-free view used for identity.
    fn sorted_params(&self) -> Vec<&Parameter> {
        let mut params: Vec<&Parameter> = self.params.iter().collect();
        params.sort();
        params
    }

    fn identity(&self) -> (&str, &str, Vec<&Parameter>) {
        (&self.name, &self.raw_value, self.sorted_params())
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Property {}

impl PartialOrd for Property {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Property {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl Hash for Property {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for param in self.sorted_params() {
            write!(f, ";{param}")?;
        }
        write!(f, ":{}", self.raw_value)
    }
}
