//! End-to-end parsing behaviour on small documents.

use almanac_test::component::ical::{
    ComponentKind, EventProperty, PartStat, Role, TodoProperty, parse,
};

use super::helpers::*;

/// ## Summary
/// The minimal VEVENT parses and survives a round trip.
#[test_log::test]
fn minimal_event_round_trips() {
    let calendar = parse_one(SCENARIO);
    assert_eq!(calendar.version().as_deref(), Some("2.0"));

    let events = calendar.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].uid().as_deref(), Some("abc-1"));
    assert_eq!(events[0].summary().as_deref(), Some("Test"));

    assert_round_trip(&calendar);
}

#[test_log::test]
fn empty_input_has_no_calendars() {
    assert!(parse("").expect("empty input parses").is_empty());
    assert!(parse("\r\n\r\n").expect("blank input parses").is_empty());
}

#[test_log::test]
fn text_outside_calendars_is_ignored() {
    let input = format!("garbage before\r\n{SCENARIO}\r\nMORE:after\r\n{SCENARIO}");
    let calendars = parse(&input).expect("input should parse");
    assert_eq!(calendars.len(), 2);
    assert!(calendars[0].property("MORE").is_none());
}

/// ## Summary
/// Properties of a child never show up on its parent.
#[test_log::test]
fn nested_properties_stay_in_their_component() {
    let calendar = parse_one(
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VTODO\r\n\
UID:todo-1\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER:-PT5M\r\n\
DESCRIPTION:Alarm text\r\n\
END:VALARM\r\n\
SUMMARY:Todo summary\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n",
    );

    assert!(calendar.property("UID").is_none());
    assert!(calendar.property("DESCRIPTION").is_none());

    let todo = calendar.todos()[0].clone();
    assert_eq!(todo.uid().as_deref(), Some("todo-1"));
    assert_eq!(todo.summary().as_deref(), Some("Todo summary"));
    assert!(todo.property(TodoProperty::Description).is_none());

    let alarm = todo.alarms()[0].clone();
    assert_eq!(alarm.kind(), ComponentKind::Alarm);
    assert_eq!(alarm.description().as_deref(), Some("Alarm text"));
    assert!(alarm.property("SUMMARY").is_none());
}

#[test_log::test]
fn extensions_survive_parse_and_serialize() {
    let calendar = parse_one(
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
X-WR-CALNAME:Team\r\n\
BEGIN:VEVENT\r\n\
UID:x-1\r\n\
X-APPLE-TRAVEL-ADVISORY-BEHAVIOR;X-SOURCE=app:AUTOMATIC\r\n\
IANA-COLOR:teal\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n",
    );

    let text = assert_round_trip(&calendar);
    assert!(text.contains("X-WR-CALNAME:Team\r\n"));
    assert!(text.contains("X-APPLE-TRAVEL-ADVISORY-BEHAVIOR;X-SOURCE=app:AUTOMATIC\r\n"));
    assert!(text.contains("IANA-COLOR:teal\r\n"));
}

#[test_log::test]
fn unregistered_properties_are_dropped() {
    let calendar = parse_one(&event_calendar(&["UID:u-1", "BOGUS:value"]));
    let event = calendar.events()[0].clone();
    assert!(event.property("BOGUS").is_none());
    assert_eq!(event.all_properties().len(), 1);
}

/// ## Summary
/// A singleton keeps its first occurrence; repeatable properties keep all of them.
#[test_log::test]
fn cardinality_is_enforced_on_parse() {
    let calendar = parse_one(&event_calendar(&[
        "UID:first",
        "UID:second",
        "ATTENDEE;ROLE=CHAIR:mailto:a@example.com",
        "ATTENDEE;PARTSTAT=DECLINED:mailto:b@example.com",
        "COMMENT:one",
        "COMMENT:two",
    ]));
    let event = calendar.events()[0].clone();

    assert_eq!(event.properties(EventProperty::Uid).len(), 1);
    assert_eq!(event.uid().as_deref(), Some("first"));

    let attendees = event.properties(EventProperty::Attendee);
    assert_eq!(attendees.len(), 2);
    assert_eq!(attendees[0].role(), Some(Role::Chair));
    assert_eq!(attendees[1].partstat(), Some(PartStat::Declined));
    assert_eq!(event.properties(EventProperty::Comment).len(), 2);
}

#[test_log::test]
fn names_and_tags_are_case_insensitive() {
    let calendar = parse_one(
        "begin:vcalendar\r\n\
version:2.0\r\n\
Begin:VEvent\r\n\
uid:lower-1\r\n\
Summary;language=en:Mixed\r\n\
end:vevent\r\n\
END:VCALENDAR\r\n",
    );
    let event = calendar.events()[0].clone();

    assert_eq!(event.uid().as_deref(), Some("lower-1"));
    let summary = event.property("summary").expect("summary is present");
    assert_eq!(summary.name(), "SUMMARY");
    assert_eq!(summary.param_value("LANGUAGE"), Some("en"));
    assert!(event.property("SuMmArY").is_some());
}

#[test_log::test]
fn unknown_components_are_discarded_with_their_content() {
    let calendar = parse_one(
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VAVAILABILITY\r\n\
UID:hidden\r\n\
BEGIN:AVAILABLE\r\n\
SUMMARY:hidden too\r\n\
END:AVAILABLE\r\n\
END:VAVAILABILITY\r\n\
BEGIN:VEVENT\r\n\
UID:kept\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n",
    );

    assert_eq!(calendar.all_children().len(), 1);
    assert_eq!(calendar.events()[0].uid().as_deref(), Some("kept"));
    assert!(calendar.property("UID").is_none());
}

/// ## Summary
/// A quoted `:` inside a parameter value does not end the parameter list.
#[test_log::test]
fn quoted_colon_in_delegated_to() {
    let calendar = parse_one(&event_calendar(&[
        "UID:d-1",
        "ATTENDEE;DELEGATED-TO=\"mailto:jdoe@example.com\",\"mailto:jqpublic@example.com\";CN=John Smith:mailto:jsmith@example.com",
    ]));
    let attendee = calendar.events()[0]
        .property(EventProperty::Attendee)
        .expect("attendee is present");

    assert_eq!(attendee.value(), "mailto:jsmith@example.com");
    let delegated = attendee.param("DELEGATED-TO").expect("delegation is present");
    assert_eq!(
        delegated.values,
        vec!["mailto:jdoe@example.com", "mailto:jqpublic@example.com"]
    );
    assert_eq!(attendee.param_value("CN"), Some("John Smith"));
}
