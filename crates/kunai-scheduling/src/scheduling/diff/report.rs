//! Diagnostic detail for a rejected or changed comparison.

use std::fmt;

use serde::Serialize;

use super::ComponentKey;

/// One reason two documents were found to differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Difference {
    /// Top-level calendar properties outside the ignore list differ.
    CalendarProperties { properties: Vec<String> },
    /// The VTIMEZONE identifier sets differ.
    Timezones {
        only_in_organizer: Vec<String>,
        only_in_attendee: Vec<String>,
    },
    /// Components in the organizer's copy have no counterpart in the attendee's.
    MissingComponents { keys: Vec<String> },
    /// An override in the attendee's copy could not be derived from the master.
    UnderivableInstance { key: String },
    /// Matched components have different type names.
    ComponentName {
        key: String,
        organizer: String,
        attendee: String,
    },
    /// Matched components differ in properties the attendee may not change.
    ComponentProperties { key: String, properties: Vec<String> },
    /// Matched components differ in their sub-components.
    SubComponents { key: String, components: Vec<String> },
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CalendarProperties { properties } => {
                write!(f, "calendar properties differ: {}", properties.join(", "))
            }
            Self::Timezones {
                only_in_organizer,
                only_in_attendee,
            } => write!(
                f,
                "timezones differ: organizer only [{}], attendee only [{}]",
                only_in_organizer.join(", "),
                only_in_attendee.join(", ")
            ),
            Self::MissingComponents { keys } => {
                write!(f, "components missing from attendee copy: {}", keys.join(", "))
            }
            Self::UnderivableInstance { key } => {
                write!(f, "{key}: no recurring master instance to compare against")
            }
            Self::ComponentName {
                key,
                organizer,
                attendee,
            } => write!(f, "{key}: component name {organizer} != {attendee}"),
            Self::ComponentProperties { key, properties } => {
                write!(f, "{key}: properties differ: {}", properties.join(", "))
            }
            Self::SubComponents { key, components } => {
                write!(f, "{key}: sub-components differ: {}", components.join(", "))
            }
        }
    }
}

/// ## Summary
/// Collected differences from one comparison.
///
/// Recording never changes the outcome of the comparison; the report only
/// explains it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    pub differences: Vec<Difference>,
}

impl DiffReport {
    /// Records a difference and emits it as a debug event.
    pub fn record(&mut self, difference: Difference) {
        tracing::debug!(%difference, "Recorded difference");
        self.differences.push(difference);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Difference> {
        self.differences.iter()
    }
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for difference in &self.differences {
            writeln!(f, "{difference}")?;
        }
        Ok(())
    }
}

pub(super) fn keys_to_strings<'k>(keys: impl IntoIterator<Item = &'k ComponentKey>) -> Vec<String> {
    keys.into_iter().map(ToString::to_string).collect()
}
