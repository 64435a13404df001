//! Time zone resolution and recurrence instance derivation.

mod instance;
mod timezone;

pub use instance::value_to_utc;
pub use timezone::{ConversionError, TimeZoneResolver, convert_to_utc, convert_to_utc_lenient};
