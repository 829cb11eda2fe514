//! iCalendar document parser (RFC 5545).
//!
//! Builds component trees top-down: every child block is extracted from a component's
//! records before the component's own properties are read, so nested properties never
//! leak into their parent.

use super::error::ParseResult;
use super::extract::{Record, ensure_no_boundaries, extract, extract_unknown, records};
use super::lexer::parse_property;
use super::preprocess::preprocess;
use crate::error::RfcResult;
use crate::rfc::ical::core::{Cardinality, Component, ComponentKind, Property, grammar};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parses every VCALENDAR object in `input`.
///
/// Empty input yields an empty list. Text outside VCALENDAR blocks is ignored.
///
/// ## Errors
///
/// Returns an error on unbalanced component boundaries or a malformed content line.
/// No partial result is returned.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<Vec<Component>> {
    tracing::debug!("Parsing iCalendar text");

    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let text = preprocess(input);
    let records = records(&text);
    tracing::trace!(count = records.len(), "Split records");

    let extraction = extract(ComponentKind::Calendar.as_str(), &records)?;
    if !extraction.remaining.is_empty() {
        tracing::debug!(
            count = extraction.remaining.len(),
            "Ignoring records outside VCALENDAR"
        );
    }

    let calendars = extraction
        .matches
        .iter()
        .map(|inner| build(ComponentKind::Calendar, inner))
        .collect::<ParseResult<Vec<_>>>()?;

    tracing::debug!(count = calendars.len(), "iCalendar text parsed successfully");

    Ok(calendars)
}

/// Parses UTF-8 bytes, skipping a leading byte order mark.
///
/// ## Errors
///
/// Returns [`RfcError::Encoding`](crate::error::RfcError::Encoding) for invalid UTF-8 and
/// [`RfcError::Parse`](crate::error::RfcError::Parse) for malformed calendar text.
pub fn parse_bytes(bytes: &[u8]) -> RfcResult<Vec<Component>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes)?;
    Ok(parse(text)?)
}

/// Builds one component from the records between its `BEGIN` and `END`.
fn build(kind: ComponentKind, records: &[Record<'_>]) -> ParseResult<Component> {
    let mut remaining = records.to_vec();
    let mut children = Vec::new();

    for child_kind in kind.children() {
        let extraction = extract(child_kind.as_str(), &remaining)?;
        for inner in &extraction.matches {
            children.push(build(*child_kind, inner)?);
        }
        remaining = extraction.remaining;
    }

    let known: Vec<&str> = kind.children().iter().map(|k| k.as_str()).collect();
    let (discarded, remaining) = extract_unknown(&known, &remaining)?;
    for tag in &discarded {
        tracing::warn!(parent = %kind, component = %tag, "Discarding unsupported component");
    }
    ensure_no_boundaries(kind.as_str(), &remaining)?;

    let properties = harvest(kind, &remaining)?;
    tracing::trace!(
        component = %kind,
        properties = properties.len(),
        children = children.len(),
        "Built component"
    );

    Ok(Component::from_parts(kind, properties, children))
}

/// Reads a component's own records into properties, in registry order followed by
/// extensions in source order.
fn harvest(kind: ComponentKind, records: &[Record<'_>]) -> ParseResult<Vec<Property>> {
    let mut slots = records
        .iter()
        .map(|r| parse_property(r.text, r.line, None).map(|p| (r.line, Some(p))))
        .collect::<ParseResult<Vec<_>>>()?;

    let mut properties = Vec::with_capacity(slots.len());
    for entry in grammar(kind) {
        let mut matches = slots
            .iter_mut()
            .filter(|(_, slot)| slot.as_ref().is_some_and(|p| p.is_named(entry.name)));

        match entry.cardinality {
            Cardinality::Singleton => {
                if let Some((_, slot)) = matches.next() {
                    properties.extend(slot.take());
                }
                for (line, slot) in matches {
                    if let Some(duplicate) = slot.take() {
                        tracing::debug!(
                            line = *line,
                            component = %kind,
                            property = duplicate.name(),
                            "Dropping duplicate singleton property"
                        );
                    }
                }
            }
            Cardinality::Repeatable => {
                properties.extend(matches.filter_map(|(_, slot)| slot.take()));
            }
        }
    }

    for (line, slot) in &mut slots {
        let Some(property) = slot.take() else {
            continue;
        };
        if property.is_extension() {
            properties.push(property);
        } else {
            tracing::debug!(
                line = *line,
                component = %kind,
                property = property.name(),
                "Dropping unregistered property"
            );
        }
    }

    Ok(properties)
}
