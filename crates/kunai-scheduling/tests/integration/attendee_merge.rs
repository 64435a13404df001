//! Attendee change reconciliation against the organizer's copy.

use kunai_scheduling::scheduling::{Difference, MergeOutcome};

use super::helpers::*;

fn alex_accepts(fixture: &str) -> String {
    with_line(
        fixture,
        "PARTSTAT=NEEDS-ACTION;RSVP=TRUE;SCHEDULE-STATUS=2.0:mailto:alex",
        "PARTSTAT=ACCEPTED;RSVP=TRUE;SCHEDULE-STATUS=2.0:mailto:alex",
    )
}

#[test_log::test]
fn identical_attendee_view_is_unchanged() {
    assert_eq!(merge(ALEX_MEETING, ALEX_MEETING, ALEX), MergeOutcome::IDENTICAL);
    assert_eq!(merge(ALEX_WEEKLY, ALEX_WEEKLY, ALEX), MergeOutcome::IDENTICAL);
}

#[test_log::test]
fn client_artifacts_are_not_changes() {
    let (outcome, report) = merge_with_report(ORGANIZER_MEETING, ALEX_MEETING, ALEX);
    assert_eq!(outcome, MergeOutcome::IDENTICAL);
    assert!(report.is_empty());
}

#[test_log::test]
fn organizer_copy_merges_with_itself() {
    assert_eq!(
        merge(ORGANIZER_MEETING, ORGANIZER_MEETING, ALEX),
        MergeOutcome::IDENTICAL
    );
    assert_eq!(
        merge(ORGANIZER_MEETING, ORGANIZER_MEETING, SAM),
        MergeOutcome::IDENTICAL
    );
}

#[test_log::test]
fn partstat_change_in_full_copy_is_accepted_as_change() {
    let accepted = with_line(
        ORGANIZER_MEETING,
        "PARTSTAT=NEEDS-ACTION;RSVP=TRUE:mailto:alex",
        "PARTSTAT=ACCEPTED;RSVP=TRUE:mailto:alex",
    );
    assert_eq!(
        merge(ORGANIZER_MEETING, &accepted, ALEX),
        MergeOutcome::accepted(false)
    );
}

#[test_log::test]
fn partstat_change_is_accepted_as_change() {
    let outcome = merge(ORGANIZER_MEETING, &alex_accepts(ALEX_MEETING), ALEX);
    assert_eq!(outcome, MergeOutcome::accepted(false));
    assert!(outcome.acceptable);
    assert!(!outcome.attendee_unchanged);
}

#[test_log::test]
fn location_change_is_rejected() {
    let moved = with_line(ALEX_MEETING, "LOCATION:Room 1\r\n", "LOCATION:Room 2\r\n");
    let (outcome, report) = merge_with_report(ORGANIZER_MEETING, &moved, ALEX);

    assert_eq!(outcome, MergeOutcome::REJECTED);
    let [Difference::ComponentProperties { key, properties }] = &report.differences[..] else {
        panic!("unexpected report {report}");
    };
    assert_eq!(key, "VEVENT:planning@example.com");
    assert_eq!(properties, &["LOCATION:Room 1", "LOCATION:Room 2"]);
}

#[test_log::test]
fn partstat_change_with_time_change_is_rejected() {
    let rescheduled = with_line(
        &alex_accepts(ALEX_MEETING),
        "DTSTART:20260105T140000Z\r\n",
        "DTSTART:20260105T150000Z\r\n",
    );
    assert_eq!(merge(ORGANIZER_MEETING, &rescheduled, ALEX), MergeOutcome::REJECTED);
}

#[test_log::test]
fn volatile_properties_never_change_the_outcome() {
    let edits = [
        ("SEQUENCE:0\r\n", "SEQUENCE:7\r\n"),
        ("TRANSP:OPAQUE\r\n", "TRANSP:TRANSPARENT\r\n"),
        ("DTSTAMP:20260102T080000Z\r\n", "DTSTAMP:20260301T000000Z\r\n"),
        ("SEQUENCE:0\r\n", "SEQUENCE:0\r\nCREATED:20251220T100000Z\r\n"),
        ("SEQUENCE:0\r\n", "SEQUENCE:0\r\nLAST-MODIFIED:20260102T080000Z\r\n"),
        ("SEQUENCE:0\r\nTRANSP:OPAQUE\r\n", ""),
    ];
    for (from, to) in edits {
        let edited = with_line(ALEX_MEETING, from, to);
        assert_eq!(merge(ORGANIZER_MEETING, &edited, ALEX), MergeOutcome::IDENTICAL, "{to:?}");

        let accepted = alex_accepts(&edited);
        assert_eq!(
            merge(ORGANIZER_MEETING, &accepted, ALEX),
            MergeOutcome::accepted(false),
            "{to:?}"
        );
    }
}

#[test_log::test]
fn changing_another_attendee_is_rejected() {
    let sam_declines = |fixture: &str| {
        with_line(
            fixture,
            "PARTSTAT=NEEDS-ACTION;RSVP=TRUE:mailto:sam",
            "PARTSTAT=DECLINED;RSVP=TRUE:mailto:sam",
        )
    };
    assert_eq!(
        merge(ORGANIZER_MEETING, &sam_declines(ORGANIZER_MEETING), ALEX),
        MergeOutcome::REJECTED
    );
    assert_eq!(
        merge(ORGANIZER_MEETING, &sam_declines(ALEX_MEETING), ALEX),
        MergeOutcome::REJECTED
    );
}

#[test_log::test]
fn dropping_another_attendee_is_rejected() {
    let without_sam = with_line(
        ALEX_MEETING,
        "ATTENDEE;CN=Sam;PARTSTAT=NEEDS-ACTION;RSVP=TRUE:mailto:sam@example.com\r\n",
        "",
    );
    assert_eq!(merge(ORGANIZER_MEETING, &without_sam, ALEX), MergeOutcome::REJECTED);
}

#[test_log::test]
fn merge_is_scoped_to_the_named_attendee() {
    let accepted = alex_accepts(ALEX_MEETING);
    assert_eq!(merge(ORGANIZER_MEETING, &accepted, SAM), MergeOutcome::REJECTED);
}

#[test_log::test]
fn uninvited_attendee_is_rejected() {
    let (outcome, report) =
        merge_with_report(ORGANIZER_MEETING, ALEX_MEETING, "mailto:mallory@example.com");
    assert_eq!(outcome, MergeOutcome::REJECTED);
    assert!(matches!(
        &report.differences[..],
        [Difference::UnderivableInstance { .. }]
    ));
}

#[test_log::test]
fn calendar_level_change_is_rejected() {
    let reply = with_line(ALEX_MEETING, "CALSCALE:GREGORIAN\r\n", "METHOD:REPLY\r\n");
    let (outcome, report) = merge_with_report(ORGANIZER_MEETING, &reply, ALEX);
    assert_eq!(outcome, MergeOutcome::REJECTED);
    assert_eq!(
        report.differences,
        vec![Difference::CalendarProperties {
            properties: vec!["METHOD:REPLY".to_string()]
        }]
    );
}

#[test_log::test]
fn timezone_rules_are_not_compared() {
    // Alex's copy carries the pre-2007 rules for the same TZID.
    assert_eq!(merge(ORGANIZER_WEEKLY, ALEX_WEEKLY, ALEX), MergeOutcome::IDENTICAL);
}

#[test_log::test]
fn missing_timezone_is_rejected() {
    let floating = ALEX_WEEKLY
        .split_once("BEGIN:VTIMEZONE")
        .and_then(|(head, rest)| {
            rest.split_once("END:VTIMEZONE\r\n")
                .map(|(_, tail)| format!("{head}{tail}"))
        })
        .expect("fixture has a timezone");

    let (outcome, report) = merge_with_report(ORGANIZER_WEEKLY, &floating, ALEX);
    assert_eq!(outcome, MergeOutcome::REJECTED);
    assert_eq!(
        report.differences,
        vec![Difference::Timezones {
            only_in_organizer: vec!["America/New_York".to_string()],
            only_in_attendee: Vec::new(),
        }]
    );
}

#[test_log::test]
fn missing_component_is_rejected() {
    let alex_invited = with_line(
        ORGANIZER_WEEKLY,
        "SUMMARY:Weekly sync (Sam only)\r\n",
        "SUMMARY:Weekly sync (moved)\r\nATTENDEE;CN=Alex;PARTSTAT=NEEDS-ACTION:mailto:alex@example.com\r\n",
    );
    let (outcome, report) = merge_with_report(&alex_invited, ALEX_WEEKLY, ALEX);

    assert_eq!(outcome, MergeOutcome::REJECTED);
    assert_eq!(
        report.differences,
        vec![Difference::MissingComponents {
            keys: vec!["VEVENT:weekly@example.com@20260112T140000Z".to_string()]
        }]
    );
}

#[test_log::test]
fn new_override_is_compared_with_derived_instance() {
    let accepted_once = alex_weekly_override("20260119T090000", "ACCEPTED");
    assert_eq!(
        merge(ORGANIZER_WEEKLY, &accepted_once, ALEX),
        MergeOutcome::accepted(false)
    );

    let unchanged_once = alex_weekly_override("20260126T090000", "NEEDS-ACTION");
    assert_eq!(
        merge(ORGANIZER_WEEKLY, &unchanged_once, ALEX),
        MergeOutcome::IDENTICAL
    );
}

#[test_log::test]
fn override_for_excluded_occurrence_is_rejected() {
    let excluded = alex_weekly_override("20260112T090000", "ACCEPTED");
    let (outcome, report) = merge_with_report(ORGANIZER_WEEKLY, &excluded, ALEX);

    assert_eq!(outcome, MergeOutcome::REJECTED);
    assert_eq!(
        report.differences,
        vec![Difference::UnderivableInstance {
            key: "VEVENT:weekly@example.com@20260112T140000Z".to_string()
        }]
    );
}

#[test_log::test]
fn override_that_moves_the_occurrence_is_rejected() {
    let moved = with_line(
        &alex_weekly_override("20260119T090000", "ACCEPTED"),
        "DTEND;TZID=America/New_York:20260119T093000\r\n",
        "DTEND;TZID=America/New_York:20260119T100000\r\n",
    );
    assert_eq!(merge(ORGANIZER_WEEKLY, &moved, ALEX), MergeOutcome::REJECTED);
}

#[test_log::test]
fn report_serializes_to_json() {
    let moved = with_line(ALEX_MEETING, "LOCATION:Room 1\r\n", "LOCATION:Room 2\r\n");
    let (outcome, report) = merge_with_report(ORGANIZER_MEETING, &moved, ALEX);

    let json = serde_json::json!({ "outcome": outcome, "report": report });
    assert_eq!(json["outcome"]["acceptable"], false);
    assert_eq!(json["report"]["differences"][0]["kind"], "component_properties");
}
