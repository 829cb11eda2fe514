//! A parsed iCalendar stream: one or more VCALENDAR objects.

use std::fmt;
use std::str::FromStr;

use super::{Component, ComponentKind};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::build::serialize;
use crate::rfc::ical::parse::{parse, parse_bytes};

/// Ordered list of calendars read from (or written to) one text blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    calendars: Vec<Component>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document from UTF-8 bytes.
    ///
    /// ## Errors
    /// Returns [`RfcError::Encoding`] for invalid UTF-8 and [`RfcError::Parse`] for
    /// malformed calendar text.
    pub fn from_bytes(bytes: &[u8]) -> RfcResult<Self> {
        Ok(Self {
            calendars: parse_bytes(bytes)?,
        })
    }

    /// Returns the calendars in document order.
    #[must_use]
    pub fn calendars(&self) -> &[Component] {
        &self.calendars
    }

    /// Appends a calendar.
    ///
    /// ## Errors
    /// Returns [`RfcError::Validation`] if `calendar` is not a VCALENDAR.
    pub fn push(&mut self, calendar: Component) -> RfcResult<()> {
        if calendar.kind() != ComponentKind::Calendar {
            return Err(RfcError::Validation(format!(
                "a document holds VCALENDAR objects, not {}",
                calendar.kind()
            )));
        }
        self.calendars.push(calendar);
        Ok(())
    }

    #[must_use]
    pub fn into_calendars(self) -> Vec<Component> {
        self.calendars
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }
}

impl FromStr for Document {
    type Err = RfcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            calendars: parse(s)?,
        })
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(&self.calendars))
    }
}
