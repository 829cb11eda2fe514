//! The multi-calendar document wrapper.

use almanac_test::component::ical::{Component, Document, RfcError};

use super::helpers::*;

#[test_log::test]
fn document_parses_and_displays() -> anyhow::Result<()> {
    let input = format!("{SCENARIO}\r\n{SCENARIO}\r\n");
    let document: Document = input.parse()?;
    assert_eq!(document.calendars().len(), 2);

    let reparsed: Document = document.to_string().parse()?;
    assert_eq!(reparsed, document);
    Ok(())
}

#[test_log::test]
fn document_accepts_only_calendars() {
    let mut document = Document::new();
    assert!(document.is_empty());

    let err = document.push(Component::event()).unwrap_err();
    assert!(matches!(err, RfcError::Validation(_)));
    assert!(document.is_empty());

    document
        .push(Component::default_calendar())
        .expect("calendars are accepted");
    assert_eq!(document.into_calendars().len(), 1);
}

#[test_log::test]
fn document_from_bytes_skips_bom() -> anyhow::Result<()> {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(SCENARIO.as_bytes());
    let document = Document::from_bytes(&bytes)?;
    assert_eq!(document.calendars()[0].events()[0].uid().as_deref(), Some("abc-1"));
    Ok(())
}
