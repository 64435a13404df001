//! iCalendar RFC 5545 implementation.
//!
//! - `core`: object model with content-based equality
//! - `parse`: text parser
//! - `build`: serializer
//! - `expand`: time zone resolution and recurrence instance derivation
//!
//! ## Example
//!
//! ```rust
//! use kunai_rfc::rfc::ical::{build, core::*, parse};
//!
//! let mut ical = ICalendar::new("-//My App//EN");
//! let mut event = Component::event();
//! event.add_property(Property::text("UID", "my-event-1"));
//! event.add_property(Property::text("SUMMARY", "Team Meeting"));
//! ical.add_event(event);
//!
//! let output = build::serialize(&ical);
//! assert_eq!(parse::parse(&output).unwrap(), ical);
//! ```

pub mod build;
pub mod core;
pub mod expand;
pub mod parse;


pub use build::serialize;
pub use core::{Component, ComponentKind, ICalendar, Parameter, Property, PropertyName};
pub use parse::{ParseError, ParseResult, parse};
