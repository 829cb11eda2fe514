//! Failure reporting for malformed input.

use almanac_test::component::ical::{
    Document, ErrorCategory, ParseErrorKind, RfcError, parse, parse_bytes,
};

use super::helpers::*;

#[test_log::test]
fn unterminated_calendar_is_structural() {
    let err = parse("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingEnd);
    assert_eq!(err.category(), ErrorCategory::Structural);
    assert_eq!(err.line, 1);
}

#[test_log::test]
fn end_without_begin_is_structural() {
    let err = parse("VERSION:2.0\r\nEND:VCALENDAR\r\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingBegin);
    assert_eq!(err.line, 2);
}

#[test_log::test]
fn interleaved_blocks_are_structural() {
    let err = parse(
        "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
BEGIN:VALARM\r\n\
END:VEVENT\r\n\
END:VALARM\r\n\
END:VCALENDAR\r\n",
    )
    .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Structural);
}

#[test_log::test]
fn stray_end_inside_event_is_structural() {
    let err = parse(&event_calendar(&["UID:s-1", "END:VTODO"])).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MismatchedComponent);
    assert_eq!(err.line, 5);
}

/// ## Summary
/// Property errors point at the logical line of the broken record.
#[test_log::test]
fn malformed_property_reports_its_line() {
    let err = parse(&event_calendar(&["UID:p-1", "SUMMARY"])).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingValue);
    assert_eq!(err.category(), ErrorCategory::PropertyFormat);
    assert_eq!(err.line, 5);
    assert!(err.to_string().starts_with("line 5"));
}

#[test_log::test]
fn property_format_errors_by_kind() {
    let cases = [
        (":no-name", ParseErrorKind::MissingName),
        ("SUM MARY:x", ParseErrorKind::InvalidPropertyName),
        ("ATTENDEE;CN:mailto:a@example.com", ParseErrorKind::MalformedParameter),
        ("ATTENDEE;CN=\"Jane:mailto:a@example.com", ParseErrorKind::UnclosedQuote),
    ];
    for (line, kind) in cases {
        let err = parse(&event_calendar(&[line])).unwrap_err();
        assert_eq!(err.kind, kind, "for {line:?}");
        assert_eq!(err.category(), ErrorCategory::PropertyFormat);
    }
}

#[test_log::test]
fn folded_lines_count_as_one_logical_line() {
    let err = parse(&event_calendar(&["DESCRIPTION:one\r\n  two", "BROKEN"])).unwrap_err();
    assert_eq!(err.line, 5);
}

#[test_log::test]
fn invalid_utf8_is_an_encoding_error() {
    let err = parse_bytes(b"BEGIN:VCALENDAR\r\nSUMMARY:\xff\r\nEND:VCALENDAR\r\n").unwrap_err();
    assert!(matches!(err, RfcError::Encoding(_)));

    let err = Document::from_bytes(b"BEGIN:VCALENDAR\r\n").unwrap_err();
    assert!(matches!(err, RfcError::Parse(_)));
}
