//! iCalendar core models (RFC 5545).
//!
//! A document is a tree of [`Component`]s, each holding an ordered list of
//! [`Property`] values and its child components. The per-kind registry decides the
//! cardinality and canonical order of well-known properties.

mod component;
mod document;
mod parameter;
mod property;
mod registry;
mod value;

pub use component::{Component, ComponentKind};
pub use document::Document;
pub use parameter::{CuType, Parameter, PartStat, Role, Rsvp, names as param_names};
pub use property::Property;
pub use registry::{
    AlarmProperty, CalendarProperty, Cardinality, Entry, EventProperty, FreeBusyProperty,
    JournalProperty, ObservanceProperty, TimezoneProperty, TodoProperty, cardinality_of,
    grammar, is_extension,
};
pub use value::{DateTimeValue, lookup_tz};
