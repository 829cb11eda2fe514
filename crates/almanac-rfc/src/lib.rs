//! RFC 5545 iCalendar parsing, document model and serialization.
//!
//! ```rust
//! use almanac_rfc::rfc::ical::{parse, serialize};
//!
//! let input = "\
//! BEGIN:VCALENDAR\r\n\
//! VERSION:2.0\r\n\
//! BEGIN:VEVENT\r\n\
//! UID:abc-1\r\n\
//! SUMMARY:Test\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//!
//! let calendars = parse(input).unwrap();
//! assert_eq!(calendars[0].events()[0].uid().as_deref(), Some("abc-1"));
//! assert!(serialize(&calendars).contains("SUMMARY:Test\r\n"));
//! ```

pub mod error;
pub mod rfc;
