//! Building and editing trees through the component API.

use std::sync::Arc;

use almanac_test::component::constants::DEFAULT_PRODID;
use almanac_test::component::ical::{
    CalendarProperty, Component, ComponentKind, CuType, DateTimeValue, EventProperty,
    Parameter, PartStat, Property, RfcError, Role, Rsvp,
};
use chrono::{TimeZone, Utc};

use super::helpers::*;

#[test_log::test]
fn built_calendar_round_trips() -> Result<(), RfcError> {
    let calendar = Component::default_calendar();
    assert_eq!(calendar.prodid().as_deref(), Some(DEFAULT_PRODID));

    let start = DateTimeValue::Utc(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
    let event = calendar.add_child(Component::event())?;
    event
        .set(EventProperty::Uid, [Property::unnamed("built-2")])?
        .set(EventProperty::DtStart, [Property::date_time("", &start)])?
        .add(
            EventProperty::Attendee,
            [
                Property::attendee("mailto:chair@example.com").with_role(Role::Chair),
                Property::attendee("mailto:room@example.com")
                    .with_cutype(CuType::Room)
                    .with_partstat(PartStat::Accepted)
                    .with_rsvp(Rsvp::False),
            ],
        )?
        .add("X-PRIORITY-LABEL", [Property::unnamed("high")])?;

    let text = assert_round_trip(&calendar);
    assert!(text.contains("DTSTART:20240301T093000Z\r\n"));
    assert!(text.contains("ATTENDEE;ROLE=CHAIR:mailto:chair@example.com\r\n"));

    let reparsed = parse_one(&text).events()[0].clone();
    let attendees = reparsed.properties(EventProperty::Attendee);
    assert_eq!(attendees[1].cutype(), Some(CuType::Room));
    assert_eq!(attendees[1].rsvp(), Some(Rsvp::False));
    assert_eq!(
        reparsed
            .property(EventProperty::DtStart)
            .and_then(|p| p.as_date_time()),
        Some(start)
    );
    Ok(())
}

#[test_log::test]
fn set_and_add_follow_cardinality() -> Result<(), RfcError> {
    let event = Component::event();
    event.set(
        EventProperty::Summary,
        [Property::unnamed("one"), Property::unnamed("two")],
    )?;
    assert_eq!(event.summary().as_deref(), Some("one"));

    event.add(
        EventProperty::Summary,
        [Property::unnamed("three"), Property::unnamed("four")],
    )?;
    assert_eq!(event.properties(EventProperty::Summary).len(), 1);
    assert_eq!(event.summary().as_deref(), Some("three"));

    event
        .add(EventProperty::Categories, [Property::unnamed("A")])?
        .add(EventProperty::Categories, [Property::unnamed("B")])?;
    assert_eq!(event.properties(EventProperty::Categories).len(), 2);

    event.set(EventProperty::Categories, [Property::unnamed("C")])?;
    assert_eq!(event.properties(EventProperty::Categories).len(), 1);

    event.set(EventProperty::Categories, Vec::<Property>::new())?;
    assert!(event.property(EventProperty::Categories).is_none());

    event.remove_all(EventProperty::Summary);
    assert!(event.summary().is_none());
    Ok(())
}

/// ## Summary
/// Names outside an object's registry are refused up front instead of being dropped by the
/// next parse; extension names are kept and survive a round trip.
#[test_log::test]
fn unregistered_names_never_reach_the_text() -> Result<(), RfcError> {
    let calendar = parse_one(&event_calendar(&["UID:color-1"]));
    let event = calendar.events()[0].clone();

    let err = event
        .set("COLOR", [Property::unnamed("red")])
        .unwrap_err();
    assert!(matches!(err, RfcError::Validation(_)));
    assert!(event.property("COLOR").is_none());

    event.set("X-COLOR", [Property::unnamed("red")])?;
    let text = assert_round_trip(&calendar);
    assert!(text.contains("X-COLOR:red\r\n"));
    assert!(!text.contains("\r\nCOLOR:"));
    Ok(())
}

#[test_log::test]
fn mutators_rename_to_the_key() {
    let calendar = Component::calendar();
    calendar
        .set(
            CalendarProperty::Method,
            [Property::new("WRONG", "PUBLISH").with_param(Parameter::new("X-HINT", "1"))],
        )
        .expect("METHOD is a calendar property");
    let method = calendar.property("METHOD").expect("method is present");
    assert_eq!(method.name(), "METHOD");
    assert_eq!(method.value(), "PUBLISH");
    assert!(calendar.property("WRONG").is_none());
}

#[test_log::test]
fn children_are_checked_against_their_parent() {
    let calendar = Component::calendar();
    let err = calendar.add_child(Component::alarm()).unwrap_err();
    assert!(matches!(err, RfcError::Validation(_)));

    let event = calendar.add_child(Component::event()).expect("events are allowed");
    assert!(event.add_child(Component::todo()).is_err());
    let alarm = event.add_child(Component::alarm()).expect("alarms are allowed");
    assert_eq!(alarm.kind(), ComponentKind::Alarm);

    assert!(event.remove_child(&alarm));
    assert!(!event.remove_child(&alarm));
    assert!(event.alarms().is_empty());

    calendar.add_child(Component::event()).expect("events are allowed");
    let removed = calendar.remove_children(ComponentKind::Event);
    assert_eq!(removed.len(), 2);
    assert!(removed.iter().any(|e| Arc::ptr_eq(e, &event)));
    assert!(calendar.all_children().is_empty());
}

#[test_log::test]
fn clones_are_independent() {
    let calendar = parse_one(SCENARIO);
    let copy = calendar.clone();
    assert_eq!(copy, calendar);

    copy.events()[0]
        .set(EventProperty::Summary, [Property::text("", "Changed")])
        .expect("SUMMARY is an event property");
    assert_ne!(copy, calendar);
    assert_eq!(calendar.events()[0].summary().as_deref(), Some("Test"));
}

/// ## Summary
/// Floating times pick up the calendar's VTIMEZONE; explicit TZIDs and UTC values win.
#[test_log::test]
fn date_times_resolve_against_the_calendar_zone() {
    let calendar = parse_one(
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Europe/Berlin\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:tz-1\r\n\
DTSTART:20240115T100000\r\n\
DTEND;TZID=America/New_York:20240115T100000\r\n\
DTSTAMP:20240101T000000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n",
    );
    let event = calendar.events()[0].clone();
    let utc = |key: EventProperty| {
        event
            .property(key)
            .and_then(|p| calendar.resolve_date_time(&p))
            .and_then(|v| v.to_utc())
    };

    assert_eq!(
        utc(EventProperty::DtStart),
        Some(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap())
    );
    assert_eq!(
        utc(EventProperty::DtEnd),
        Some(Utc.with_ymd_and_hms(2024, 1, 15, 15, 0, 0).unwrap())
    );
    assert_eq!(
        utc(EventProperty::DtStamp),
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    );
}

#[test_log::test]
fn parsed_text_is_unescaped_on_read() {
    let calendar = parse_one(&event_calendar(&[
        "UID:esc-1",
        "SUMMARY:Lunch\\, then coffee\\; maybe",
    ]));
    let event = calendar.events()[0].clone();
    assert_eq!(event.summary().as_deref(), Some("Lunch, then coffee; maybe"));
    assert_eq!(
        event.property(EventProperty::Summary).map(|p| p.value().to_string()),
        Some("Lunch\\, then coffee\\; maybe".to_string())
    );
    assert_round_trip(&calendar);
}
