//! iCalendar core models (RFC 5545).
//!
//! This module defines the core data structures for representing iCalendar
//! content. These types are designed for:
//! - Round-trip fidelity: preserving unknown properties and parameters
//! - Content identity: properties and components compare as unordered sets
//! - Type safety: leveraging Rust's type system for value validation

mod calendar;
mod component;
mod datetime;
mod duration;
mod parameter;
mod property;
mod property_name;
mod value;

pub use calendar::ICalendar;
pub use component::{Component, ComponentKind};
pub use datetime::{DateTime, DateTimeForm, UtcOffset};
pub use duration::{Duration, DurationBuilder};
pub use parameter::{Parameter, names as param_names};
pub use property::{ContentLine, Property};
pub use property_name::PropertyName;
pub use value::{Date, Value};
