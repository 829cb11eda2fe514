//! iCalendar implementation (RFC 5545).
//!
//! This module converts between iCalendar text and a mutable component tree.
//!
//! ## Overview
//!
//! Parsing preprocesses the text (unfolding, line normalization), extracts nested
//! `BEGIN`/`END` blocks, and reads each component's properties through a per-kind
//! registry that fixes cardinality and order. Serialization walks the tree back into
//! folded, CRLF-terminated text.
//!
//! ## Usage
//!
//! ```rust
//! use almanac_rfc::rfc::ical::{Component, EventProperty, Property, parse, serialize};
//!
//! let calendar = Component::default_calendar();
//! let event = calendar.add_child(Component::event())?;
//! event
//!     .set(EventProperty::Uid, [Property::unnamed("abc-1")])?
//!     .set(EventProperty::Summary, [Property::text("", "Lunch, then coffee")])?;
//!
//! let text = serialize(&[calendar]);
//! assert!(text.contains("SUMMARY:Lunch\\, then coffee\r\n"));
//!
//! let parsed = parse(&text).unwrap();
//! assert_eq!(parsed[0].events()[0].summary().as_deref(), Some("Lunch, then coffee"));
//! # Ok::<(), almanac_rfc::error::RfcError>(())
//! ```
//!
//! ## Submodules
//!
//! - [`core`](self::core) - Component tree, properties, parameters and the property registry
//! - [`parse`] - Preprocessor, extractor, lexer and parser
//! - [`build`] - Escaping, folding and serialization

pub mod build;
pub mod core;
pub mod parse;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use self::build::{SerializeOptions, serialize, serialize_with};
pub use self::core::{
    AlarmProperty, CalendarProperty, Cardinality, Component, ComponentKind, CuType,
    DateTimeValue, Document, EventProperty, FreeBusyProperty, JournalProperty,
    ObservanceProperty, Parameter, PartStat, Property, Role, Rsvp, TimezoneProperty,
    TodoProperty,
};
pub use self::parse::{ErrorCategory, ParseError, ParseErrorKind, ParseResult, parse, parse_bytes};
