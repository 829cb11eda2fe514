//! Shared inputs and small wrappers for integration tests.

use almanac_test::component::ical::{Component, parse, serialize};

/// The minimal calendar every part of the pipeline must accept.
pub const SCENARIO: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nUID:abc-1\r\nDTSTAMP:20210101T000000Z\r\nSUMMARY:Test\r\nEND:VEVENT\r\nEND:VCALENDAR";

/// Wraps content lines in a VCALENDAR with a single VEVENT.
pub fn event_calendar(lines: &[&str]) -> String {
    let mut text = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\n");
    for line in lines {
        text.push_str(line);
        text.push_str("\r\n");
    }
    text.push_str("END:VEVENT\r\nEND:VCALENDAR\r\n");
    text
}

/// Parses input that must hold exactly one calendar.
pub fn parse_one(input: &str) -> Component {
    let mut calendars = parse(input).expect("input should parse");
    assert_eq!(calendars.len(), 1, "expected exactly one calendar");
    calendars.remove(0)
}

/// Serializes and re-parses, asserting the tree survives unchanged.
pub fn assert_round_trip(calendar: &Component) -> String {
    let text = serialize(std::slice::from_ref(calendar));
    let reparsed = parse_one(&text);
    assert_eq!(&reparsed, calendar, "tree changed through serialization:\n{text}");
    text
}
