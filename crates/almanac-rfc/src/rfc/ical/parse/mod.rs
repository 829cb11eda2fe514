//! iCalendar parsing (RFC 5545).
//!
//! The pipeline runs in four stages:
//!
//! - Preprocess: normalize line endings, unfold continuations, bound every line
//! - Extract: split `BEGIN`/`END` blocks recursively, innermost content first
//! - Lex: tokenize each remaining record into name, parameters and value
//! - Harvest: keep registry properties in table order, then extensions
//!
//! ## Usage
//!
//! ```rust
//! use almanac_rfc::rfc::ical::parse;
//!
//! let input = "\
//! BEGIN:VCALENDAR\r\n\
//! VERSION:2.0\r\n\
//! BEGIN:VTODO\r\n\
//! UID:todo-1\r\n\
//! SUMMARY:Buy milk\r\n\
//! END:VTODO\r\n\
//! END:VCALENDAR\r\n";
//!
//! let calendars = parse::parse(input).unwrap();
//! assert_eq!(calendars[0].todos()[0].summary().as_deref(), Some("Buy milk"));
//! ```

mod error;
mod extract;
mod lexer;
mod parser;
mod preprocess;
mod values;

pub use error::{ErrorCategory, ParseError, ParseErrorKind, ParseResult};
pub use extract::{Extraction, Record, ensure_no_boundaries, extract, extract_unknown, records};
pub use lexer::parse_property;
pub use parser::{parse, parse_bytes};
pub use preprocess::{CRLF, preprocess, unfold};
pub use values::unescape_text;
