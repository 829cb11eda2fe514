//! Per-component property registry (RFC 5545 §3.6).
//!
//! Each component kind has an ordered table of well-known property names with their
//! cardinality. Parsing harvests properties in table order, and the mutators on
//! [`Component`](super::Component) consult the table to decide between replace and append.

use std::fmt;
use std::str::FromStr;

use super::component::ComponentKind;
use crate::error::RfcError;

/// How many instances of a property a component may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// At most one instance.
    Singleton,
    /// Any number of instances, kept in insertion order.
    Repeatable,
}

/// One row of a registry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub name: &'static str,
    pub cardinality: Cardinality,
}

/// Declares the closed set of well-known property names of one component kind.
macro_rules! property_keys {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $text:literal : $card:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every key, in registry order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            const GRAMMAR: &'static [Entry] = &[
                $(Entry { name: $text, cardinality: Cardinality::$card },)+
            ];

            /// Returns the property name.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Returns the cardinality of this property.
            #[must_use]
            pub const fn cardinality(self) -> Cardinality {
                match self {
                    $(Self::$variant => Cardinality::$card,)+
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = RfcError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|key| key.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| {
                        RfcError::Validation(format!(
                            "'{s}' is not a {} property",
                            stringify!($name)
                        ))
                    })
            }
        }
    };
}

property_keys! {
    /// Well-known `VCALENDAR` properties.
    CalendarProperty {
        ProdId => "PRODID": Singleton,
        Version => "VERSION": Singleton,
        CalScale => "CALSCALE": Singleton,
        Method => "METHOD": Singleton,
    }
}

property_keys! {
    /// Well-known `VEVENT` properties.
    EventProperty {
        DtStamp => "DTSTAMP": Singleton,
        Uid => "UID": Singleton,
        DtStart => "DTSTART": Singleton,
        RRule => "RRULE": Singleton,
        DtEnd => "DTEND": Singleton,
        Duration => "DURATION": Singleton,
        Class => "CLASS": Singleton,
        Created => "CREATED": Singleton,
        Description => "DESCRIPTION": Singleton,
        Geo => "GEO": Singleton,
        LastModified => "LAST-MODIFIED": Singleton,
        Location => "LOCATION": Singleton,
        Priority => "PRIORITY": Singleton,
        Sequence => "SEQUENCE": Singleton,
        Status => "STATUS": Singleton,
        Summary => "SUMMARY": Singleton,
        Transp => "TRANSP": Singleton,
        Url => "URL": Singleton,
        RecurrenceId => "RECURRENCE-ID": Singleton,
        Organizer => "ORGANIZER": Singleton,
        Attach => "ATTACH": Repeatable,
        Attendee => "ATTENDEE": Repeatable,
        Categories => "CATEGORIES": Repeatable,
        Comment => "COMMENT": Repeatable,
        Contact => "CONTACT": Repeatable,
        ExDate => "EXDATE": Repeatable,
        RequestStatus => "REQUEST-STATUS": Repeatable,
        RelatedTo => "RELATED-TO": Repeatable,
        Resources => "RESOURCES": Repeatable,
        RDate => "RDATE": Repeatable,
    }
}

property_keys! {
    /// Well-known `VTODO` properties.
    TodoProperty {
        DtStamp => "DTSTAMP": Singleton,
        Uid => "UID": Singleton,
        Class => "CLASS": Singleton,
        Completed => "COMPLETED": Singleton,
        Created => "CREATED": Singleton,
        Description => "DESCRIPTION": Singleton,
        DtStart => "DTSTART": Singleton,
        Geo => "GEO": Singleton,
        LastModified => "LAST-MODIFIED": Singleton,
        Location => "LOCATION": Singleton,
        Organizer => "ORGANIZER": Singleton,
        PercentComplete => "PERCENT-COMPLETE": Singleton,
        Priority => "PRIORITY": Singleton,
        RecurrenceId => "RECURRENCE-ID": Singleton,
        Sequence => "SEQUENCE": Singleton,
        Status => "STATUS": Singleton,
        Summary => "SUMMARY": Singleton,
        Url => "URL": Singleton,
        RRule => "RRULE": Singleton,
        Due => "DUE": Singleton,
        Duration => "DURATION": Singleton,
        Attach => "ATTACH": Repeatable,
        Attendee => "ATTENDEE": Repeatable,
        Categories => "CATEGORIES": Repeatable,
        Comment => "COMMENT": Repeatable,
        Contact => "CONTACT": Repeatable,
        ExDate => "EXDATE": Repeatable,
        RequestStatus => "REQUEST-STATUS": Repeatable,
        RelatedTo => "RELATED-TO": Repeatable,
        Resources => "RESOURCES": Repeatable,
        RDate => "RDATE": Repeatable,
    }
}

property_keys! {
    /// Well-known `VJOURNAL` properties.
    JournalProperty {
        DtStamp => "DTSTAMP": Singleton,
        Uid => "UID": Singleton,
        Class => "CLASS": Singleton,
        Created => "CREATED": Singleton,
        DtStart => "DTSTART": Singleton,
        LastModified => "LAST-MODIFIED": Singleton,
        Organizer => "ORGANIZER": Singleton,
        RecurrenceId => "RECURRENCE-ID": Singleton,
        Sequence => "SEQUENCE": Singleton,
        Status => "STATUS": Singleton,
        Summary => "SUMMARY": Singleton,
        Url => "URL": Singleton,
        RRule => "RRULE": Singleton,
        Attach => "ATTACH": Repeatable,
        Attendee => "ATTENDEE": Repeatable,
        Categories => "CATEGORIES": Repeatable,
        Comment => "COMMENT": Repeatable,
        Contact => "CONTACT": Repeatable,
        Description => "DESCRIPTION": Repeatable,
        ExDate => "EXDATE": Repeatable,
        RelatedTo => "RELATED-TO": Repeatable,
        RDate => "RDATE": Repeatable,
        RequestStatus => "REQUEST-STATUS": Repeatable,
    }
}

property_keys! {
    /// Well-known `VFREEBUSY` properties.
    FreeBusyProperty {
        DtStamp => "DTSTAMP": Singleton,
        Uid => "UID": Singleton,
        Contact => "CONTACT": Singleton,
        DtStart => "DTSTART": Singleton,
        DtEnd => "DTEND": Singleton,
        Organizer => "ORGANIZER": Singleton,
        Url => "URL": Singleton,
        Attendee => "ATTENDEE": Repeatable,
        Comment => "COMMENT": Repeatable,
        FreeBusy => "FREEBUSY": Repeatable,
        RequestStatus => "REQUEST-STATUS": Repeatable,
    }
}

property_keys! {
    /// Well-known `VTIMEZONE` properties.
    TimezoneProperty {
        TzId => "TZID": Singleton,
        LastModified => "LAST-MODIFIED": Singleton,
        TzUrl => "TZURL": Singleton,
    }
}

property_keys! {
    /// Well-known `STANDARD` / `DAYLIGHT` properties.
    ObservanceProperty {
        DtStart => "DTSTART": Singleton,
        TzOffsetTo => "TZOFFSETTO": Singleton,
        TzOffsetFrom => "TZOFFSETFROM": Singleton,
        RRule => "RRULE": Singleton,
        Comment => "COMMENT": Repeatable,
        RDate => "RDATE": Repeatable,
        TzName => "TZNAME": Repeatable,
    }
}

property_keys! {
    /// Well-known `VALARM` properties.
    AlarmProperty {
        Action => "ACTION": Singleton,
        Trigger => "TRIGGER": Singleton,
        Duration => "DURATION": Singleton,
        Repeat => "REPEAT": Singleton,
        Description => "DESCRIPTION": Singleton,
        Summary => "SUMMARY": Singleton,
        Attach => "ATTACH": Repeatable,
        Attendee => "ATTENDEE": Repeatable,
    }
}

/// Returns the registry table of a component kind, in parse order.
#[must_use]
pub const fn grammar(kind: ComponentKind) -> &'static [Entry] {
    match kind {
        ComponentKind::Calendar => CalendarProperty::GRAMMAR,
        ComponentKind::Event => EventProperty::GRAMMAR,
        ComponentKind::Todo => TodoProperty::GRAMMAR,
        ComponentKind::Journal => JournalProperty::GRAMMAR,
        ComponentKind::FreeBusy => FreeBusyProperty::GRAMMAR,
        ComponentKind::Timezone => TimezoneProperty::GRAMMAR,
        ComponentKind::Standard | ComponentKind::Daylight => ObservanceProperty::GRAMMAR,
        ComponentKind::Alarm => AlarmProperty::GRAMMAR,
    }
}

/// Returns whether `name` is an `X-` or `IANA-` extension name.
#[must_use]
pub fn is_extension(name: &str) -> bool {
    has_prefix(name, "X-") || has_prefix(name, "IANA-")
}

fn has_prefix(name: &str, prefix: &str) -> bool {
    name.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Returns the registry position of `name` within `kind`, if registered.
#[must_use]
pub fn position(kind: ComponentKind, name: &str) -> Option<usize> {
    grammar(kind)
        .iter()
        .position(|entry| entry.name.eq_ignore_ascii_case(name))
}

/// Returns the cardinality of `name` within `kind`.
///
/// Extensions are always repeatable; names outside the table are treated as singletons.
#[must_use]
pub fn cardinality_of(kind: ComponentKind, name: &str) -> Cardinality {
    if is_extension(name) {
        return Cardinality::Repeatable;
    }
    position(kind, name).map_or(Cardinality::Singleton, |i| grammar(kind)[i].cardinality)
}

/// Sort rank of a property name within `kind`: registry entries first, then other
/// names, then extensions.
pub(crate) fn rank(kind: ComponentKind, name: &str) -> usize {
    let table = grammar(kind);
    if is_extension(name) {
        table.len() + 1
    } else {
        position(kind, name).unwrap_or(table.len())
    }
}
