//! Organizer change detection: equality once alarms are removed.

use super::helpers::*;

#[test_log::test]
fn identical_documents_are_equal() {
    for fixture in [ORGANIZER_MEETING, ALEX_MEETING, ORGANIZER_WEEKLY, ALEX_WEEKLY] {
        assert!(organizer_diff(fixture, fixture));
    }
}

#[test_log::test]
fn alarm_only_difference_is_ignored() {
    let without_alarm = with_line(
        ORGANIZER_MEETING,
        "BEGIN:VALARM\r\nACTION:DISPLAY\r\nTRIGGER:-PT15M\r\nDESCRIPTION:Planning\r\nEND:VALARM\r\n",
        "",
    );
    assert!(organizer_diff(ORGANIZER_MEETING, &without_alarm));
    assert!(organizer_diff(&without_alarm, ORGANIZER_MEETING));
}

#[test_log::test]
fn changed_alarm_is_ignored() {
    let earlier = with_line(ORGANIZER_MEETING, "TRIGGER:-PT15M\r\n", "TRIGGER:-PT1H\r\n");
    assert!(organizer_diff(ORGANIZER_MEETING, &earlier));
}

#[test_log::test]
fn property_order_is_ignored() {
    let reordered = with_line(
        ORGANIZER_MEETING,
        "SUMMARY:Planning\r\nLOCATION:Room 1\r\n",
        "LOCATION:Room 1\r\nSUMMARY:Planning\r\n",
    );
    assert!(organizer_diff(ORGANIZER_MEETING, &reordered));
}

#[test_log::test]
fn summary_change_is_detected() {
    let renamed = with_line(ORGANIZER_MEETING, "SUMMARY:Planning\r\n", "SUMMARY:Roadmap\r\n");
    assert!(!organizer_diff(ORGANIZER_MEETING, &renamed));
}

#[test_log::test]
fn attendee_status_change_is_detected() {
    let accepted = with_line(
        ORGANIZER_MEETING,
        "PARTSTAT=NEEDS-ACTION;RSVP=TRUE:mailto:sam",
        "PARTSTAT=ACCEPTED;RSVP=TRUE:mailto:sam",
    );
    assert!(!organizer_diff(ORGANIZER_MEETING, &accepted));
}

#[test_log::test]
fn extension_properties_count() {
    let bumped = with_line(ORGANIZER_MEETING, "X-MOZ-GENERATION:1\r\n", "X-MOZ-GENERATION:2\r\n");
    assert!(!organizer_diff(ORGANIZER_MEETING, &bumped));
}

#[test_log::test]
fn removed_override_is_detected() {
    let master_only = ORGANIZER_WEEKLY
        .split_once("BEGIN:VEVENT\r\nUID:weekly@example.com\r\nRECURRENCE-ID")
        .map(|(head, _)| format!("{head}END:VCALENDAR\r\n"))
        .expect("fixture has an override");
    assert!(!organizer_diff(ORGANIZER_WEEKLY, &master_only));
}

#[test_log::test]
fn inputs_are_left_untouched() {
    let (first, second) = (load(ORGANIZER_MEETING), load(ALEX_MEETING));
    let (first_before, second_before) = (first.clone(), second.clone());

    let diff = kunai_scheduling::scheduling::ICalDiff::new(&first, &second);
    let _ = diff.organizer_diff();
    let _ = diff.attendee_merge(ALEX);

    assert_eq!(first, first_before);
    assert_eq!(second, second_before);
    assert_eq!(first.events()[0].alarms().len(), 1);
}
