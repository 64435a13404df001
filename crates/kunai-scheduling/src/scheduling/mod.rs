//! iTIP scheduling support: outbound message normalization and the
//! organizer/attendee diff engine.

pub mod diff;
pub mod itip;

pub use diff::{
    ComponentKey, DiffReport, DiffRequest, Difference, ICalDiff, MergeOutcome,
    IGNORED_CALENDAR_PROPERTIES, VOLATILE_COMPONENT_PROPERTIES,
};
pub use itip::{load_scheduling_object, prepare_scheduling_message};
