//! Integration tests for the organizer/attendee diff engine.

mod attendee_merge;
mod helpers;
mod organizer_diff;
