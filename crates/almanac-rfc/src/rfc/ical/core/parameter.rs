//! iCalendar property parameters (RFC 5545 §3.2).

use std::fmt;
use std::str::FromStr;

use crate::error::RfcError;

/// A property parameter.
///
/// Parameters can carry a comma-separated list of values (e.g. `MEMBER="a","b"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values, unquoted and caret-decoded.
    pub values: Vec<String>,
}

impl Parameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    ///
    /// An empty list becomes a single empty value, which is what `NAME=` reads back as.
    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        let mut param = Self {
            name: name.into().to_ascii_uppercase(),
            values,
        };
        param.normalize();
        param
    }

    pub(crate) fn normalize(&mut self) {
        if self.values.is_empty() {
            self.values.push(String::new());
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    /// Returns whether this parameter has the given name (case-insensitive).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Creates a TZID parameter.
    #[must_use]
    pub fn tzid(tzid: impl Into<String>) -> Self {
        Self::new(names::TZID, tzid)
    }

    /// Creates a VALUE parameter specifying the value type.
    #[must_use]
    pub fn value_type(type_name: impl Into<String>) -> Self {
        Self::new(names::VALUE, type_name)
    }

    /// Creates a CN parameter.
    #[must_use]
    pub fn common_name(name: impl Into<String>) -> Self {
        Self::new(names::CN, name)
    }
}

/// Common parameter names as constants.
pub mod names {
    pub const ALTREP: &str = "ALTREP";
    pub const CN: &str = "CN";
    pub const CUTYPE: &str = "CUTYPE";
    pub const DELEGATED_FROM: &str = "DELEGATED-FROM";
    pub const DELEGATED_TO: &str = "DELEGATED-TO";
    pub const DIR: &str = "DIR";
    pub const ENCODING: &str = "ENCODING";
    pub const FMTTYPE: &str = "FMTTYPE";
    pub const LANGUAGE: &str = "LANGUAGE";
    pub const MEMBER: &str = "MEMBER";
    pub const PARTSTAT: &str = "PARTSTAT";
    pub const ROLE: &str = "ROLE";
    pub const RSVP: &str = "RSVP";
    pub const SENT_BY: &str = "SENT-BY";
    pub const TZID: &str = "TZID";
    pub const VALUE: &str = "VALUE";
}

/// Declares a closed parameter value set with its wire spelling.
macro_rules! parameter_values {
    (
        $(#[$meta:meta])*
        $name:ident ($param:expr) default $default:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Parameter name this value set belongs to.
            pub const PARAMETER: &'static str = $param;

            /// Returns the wire spelling of this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = RfcError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($text) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(RfcError::Validation(format!(
                    "unknown {} value '{s}'",
                    Self::PARAMETER
                )))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for Parameter {
            fn from(value: $name) -> Self {
                Parameter::new($name::PARAMETER, value.as_str())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }
    };
}

parameter_values! {
    /// Calendar user type (`CUTYPE`). Defaults to `INDIVIDUAL`.
    CuType (names::CUTYPE) default Individual {
        /// An individual.
        Individual => "INDIVIDUAL",
        /// A group of individuals.
        Group => "GROUP",
        /// A physical resource.
        Resource => "RESOURCE",
        /// A room resource.
        Room => "ROOM",
        /// Otherwise not known.
        Unknown => "UNKNOWN",
    }
}

parameter_values! {
    /// Participation status (`PARTSTAT`). Defaults to `NEEDS-ACTION`.
    PartStat (names::PARTSTAT) default NeedsAction {
        NeedsAction => "NEEDS-ACTION",
        Accepted => "ACCEPTED",
        Declined => "DECLINED",
        Tentative => "TENTATIVE",
        Delegated => "DELEGATED",
        /// To-do completed.
        Completed => "COMPLETED",
        /// To-do in process of being completed.
        InProcess => "IN-PROCESS",
    }
}

parameter_values! {
    /// Participation role (`ROLE`). Defaults to `REQ-PARTICIPANT`.
    Role (names::ROLE) default ReqParticipant {
        /// Chair of the calendar entity.
        Chair => "CHAIR",
        /// Participation is required.
        ReqParticipant => "REQ-PARTICIPANT",
        /// Participation is optional.
        OptParticipant => "OPT-PARTICIPANT",
        /// Copied for information.
        NonParticipant => "NON-PARTICIPANT",
    }
}

parameter_values! {
    /// Reply expectation (`RSVP`). Defaults to `FALSE`.
    Rsvp (names::RSVP) default False {
        True => "TRUE",
        False => "FALSE",
    }
}

impl From<bool> for Rsvp {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}
