#![allow(dead_code, clippy::expect_used)]
//! Shared fixtures and helpers for diff engine tests.
//!
//! Fixtures are complete scheduling documents. Variants are produced by
//! replacing single lines so each test changes exactly one thing.

use kunai_rfc::rfc::ical::{ICalendar, parse};
use kunai_scheduling::scheduling::{DiffReport, ICalDiff, MergeOutcome};

pub const ALEX: &str = "mailto:alex@example.com";
pub const SAM: &str = "mailto:sam@example.com";

/// Single meeting as stored by the organizer, with three attendees.
pub const ORGANIZER_MEETING: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Organizer Client//EN\r\n\
BEGIN:VEVENT\r\n\
UID:planning@example.com\r\n\
DTSTAMP:20260101T120000Z\r\n\
DTSTART:20260105T140000Z\r\n\
DTEND:20260105T150000Z\r\n\
SUMMARY:Planning\r\n\
LOCATION:Room 1\r\n\
SEQUENCE:0\r\n\
X-MOZ-GENERATION:1\r\n\
ORGANIZER;CN=Olivia:mailto:olivia@example.com\r\n\
ATTENDEE;CN=Olivia;PARTSTAT=ACCEPTED:mailto:olivia@example.com\r\n\
ATTENDEE;CN=Alex;PARTSTAT=NEEDS-ACTION;RSVP=TRUE:mailto:alex@example.com\r\n\
ATTENDEE;CN=Sam;PARTSTAT=NEEDS-ACTION;RSVP=TRUE:mailto:sam@example.com\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER:-PT15M\r\n\
DESCRIPTION:Planning\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// Alex's copy of [`ORGANIZER_MEETING`] as their client stores it.
pub const ALEX_MEETING: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Attendee Client//EN\r\n\
CALSCALE:GREGORIAN\r\n\
X-WR-CALNAME:Alex\r\n\
BEGIN:VEVENT\r\n\
UID:planning@example.com\r\n\
DTSTAMP:20260102T080000Z\r\n\
DTSTART:20260105T140000Z\r\n\
DTEND:20260105T150000Z\r\n\
SUMMARY:Planning\r\n\
LOCATION:Room 1\r\n\
SEQUENCE:0\r\n\
TRANSP:OPAQUE\r\n\
ORGANIZER;CN=Olivia;SCHEDULE-STATUS=1.2:mailto:olivia@example.com\r\n\
ATTENDEE;CN=Olivia;PARTSTAT=ACCEPTED:mailto:olivia@example.com\r\n\
ATTENDEE;CN=Alex;PARTSTAT=NEEDS-ACTION;RSVP=TRUE;SCHEDULE-STATUS=2.0:mailto:alex@example.com\r\n\
ATTENDEE;CN=Sam;PARTSTAT=NEEDS-ACTION;RSVP=TRUE:mailto:sam@example.com\r\n\
BEGIN:VALARM\r\n\
ACTION:AUDIO\r\n\
TRIGGER:-PT5M\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// Weekly meeting in New York time. The override on 12 January does not
/// include Alex.
pub const ORGANIZER_WEEKLY: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Organizer Client//EN\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:America/New_York\r\n\
BEGIN:STANDARD\r\n\
DTSTART:20071104T020000\r\n\
TZOFFSETFROM:-0400\r\n\
TZOFFSETTO:-0500\r\n\
RRULE:FREQ=YEARLY;BYMONTH=11;BYDAY=1SU\r\n\
TZNAME:EST\r\n\
END:STANDARD\r\n\
BEGIN:DAYLIGHT\r\n\
DTSTART:20070311T020000\r\n\
TZOFFSETFROM:-0500\r\n\
TZOFFSETTO:-0400\r\n\
RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=2SU\r\n\
TZNAME:EDT\r\n\
END:DAYLIGHT\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:weekly@example.com\r\n\
DTSTAMP:20260101T120000Z\r\n\
DTSTART;TZID=America/New_York:20260105T090000\r\n\
DTEND;TZID=America/New_York:20260105T093000\r\n\
RRULE:FREQ=WEEKLY;BYDAY=MO;COUNT=10\r\n\
SUMMARY:Weekly sync\r\n\
ORGANIZER;CN=Olivia:mailto:olivia@example.com\r\n\
ATTENDEE;CN=Alex;PARTSTAT=NEEDS-ACTION:mailto:alex@example.com\r\n\
ATTENDEE;CN=Sam;PARTSTAT=NEEDS-ACTION:mailto:sam@example.com\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:weekly@example.com\r\n\
RECURRENCE-ID;TZID=America/New_York:20260112T090000\r\n\
DTSTAMP:20260101T120000Z\r\n\
DTSTART;TZID=America/New_York:20260112T110000\r\n\
DTEND;TZID=America/New_York:20260112T113000\r\n\
SUMMARY:Weekly sync (Sam only)\r\n\
ORGANIZER;CN=Olivia:mailto:olivia@example.com\r\n\
ATTENDEE;CN=Sam;PARTSTAT=NEEDS-ACTION:mailto:sam@example.com\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// Alex's copy of [`ORGANIZER_WEEKLY`]: the 12 January occurrence Alex
/// was not invited to is excluded and the zone carries the pre-2007 US rules.
pub const ALEX_WEEKLY: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Attendee Client//EN\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:America/New_York\r\n\
BEGIN:STANDARD\r\n\
DTSTART:19671029T020000\r\n\
TZOFFSETFROM:-0400\r\n\
TZOFFSETTO:-0500\r\n\
RRULE:FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU\r\n\
TZNAME:EST\r\n\
END:STANDARD\r\n\
BEGIN:DAYLIGHT\r\n\
DTSTART:19870405T020000\r\n\
TZOFFSETFROM:-0500\r\n\
TZOFFSETTO:-0400\r\n\
RRULE:FREQ=YEARLY;BYMONTH=4;BYDAY=1SU\r\n\
TZNAME:EDT\r\n\
END:DAYLIGHT\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:weekly@example.com\r\n\
DTSTAMP:20260103T090000Z\r\n\
DTSTART;TZID=America/New_York:20260105T090000\r\n\
DTEND;TZID=America/New_York:20260105T093000\r\n\
RRULE:FREQ=WEEKLY;BYDAY=MO;COUNT=10\r\n\
EXDATE;TZID=America/New_York:20260112T090000\r\n\
SUMMARY:Weekly sync\r\n\
ORGANIZER;CN=Olivia:mailto:olivia@example.com\r\n\
ATTENDEE;CN=Alex;PARTSTAT=NEEDS-ACTION:mailto:alex@example.com\r\n\
ATTENDEE;CN=Sam;PARTSTAT=NEEDS-ACTION:mailto:sam@example.com\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// Override Alex's client adds to [`ALEX_WEEKLY`] for one occurrence.
pub fn alex_weekly_override(recurrence_id: &str, partstat: &str) -> String {
    let date = &recurrence_id[..8];
    let override_component = format!(
        "BEGIN:VEVENT\r\n\
UID:weekly@example.com\r\n\
RECURRENCE-ID;TZID=America/New_York:{recurrence_id}\r\n\
DTSTAMP:20260103T090000Z\r\n\
DTSTART;TZID=America/New_York:{recurrence_id}\r\n\
DTEND;TZID=America/New_York:{date}T093000\r\n\
SUMMARY:Weekly sync\r\n\
ORGANIZER;CN=Olivia:mailto:olivia@example.com\r\n\
ATTENDEE;CN=Alex;PARTSTAT={partstat}:mailto:alex@example.com\r\n\
ATTENDEE;CN=Sam;PARTSTAT=NEEDS-ACTION:mailto:sam@example.com\r\n\
END:VEVENT\r\n"
    );
    ALEX_WEEKLY.replace("END:VCALENDAR\r\n", &format!("{override_component}END:VCALENDAR\r\n"))
}

/// Returns `fixture` with exactly one line replaced.
pub fn with_line(fixture: &str, from: &str, to: &str) -> String {
    assert!(fixture.contains(from), "fixture has no line {from:?}");
    fixture.replacen(from, to, 1)
}

pub fn load(text: &str) -> ICalendar {
    parse(text).expect("fixture parses")
}

pub fn merge(organizer: &str, attendee_copy: &str, attendee: &str) -> MergeOutcome {
    merge_with_report(organizer, attendee_copy, attendee).0
}

pub fn merge_with_report(
    organizer: &str,
    attendee_copy: &str,
    attendee: &str,
) -> (MergeOutcome, DiffReport) {
    let (organizer, attendee_copy) = (load(organizer), load(attendee_copy));
    ICalDiff::new(&organizer, &attendee_copy).attendee_merge_with_report(attendee)
}

pub fn organizer_diff(first: &str, second: &str) -> bool {
    let (first, second) = (load(first), load(second));
    ICalDiff::new(&first, &second).organizer_diff()
}
