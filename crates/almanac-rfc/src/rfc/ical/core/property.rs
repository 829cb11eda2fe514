//! iCalendar properties (RFC 5545 §3.1, §3.8).

use super::parameter::{CuType, Parameter, PartStat, Role, Rsvp, names};
use super::registry;
use crate::rfc::ical::build::escape_text;
use crate::rfc::ical::parse::unescape_text;

/// A single `NAME[;PARAM=VALUE]*:VALUE` property.
///
/// The value is kept in its escaped wire form and never contains a raw line terminator.
/// Parameter names are unique within a property.
#[derive(Debug, Clone, Default)]
pub struct Property {
    name: String,
    params: Vec<Parameter>,
    value: String,
}

impl Property {
    /// Creates a property from a name and an already-escaped value.
    ///
    /// Raw line breaks in `value` are turned into the `\n` escape.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: normalize_line_breaks(value.into()),
        }
    }

    /// Creates a property without a name.
    ///
    /// Component mutators name it after the key it is stored under.
    #[must_use]
    pub fn unnamed(value: impl Into<String>) -> Self {
        Self::new(String::new(), value)
    }

    /// Creates a property from plain text, escaping `\`, `;`, `,` and line breaks.
    #[must_use]
    pub fn text(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, escape_text(text))
    }

    /// Creates an `ATTENDEE` property for a calendar address (e.g. `mailto:a@example.com`).
    ///
    /// Combine with [`Property::with_cutype`], [`Property::with_partstat`],
    /// [`Property::with_role`] and [`Property::with_rsvp`].
    #[must_use]
    pub fn attendee(address: impl Into<String>) -> Self {
        Self::new("ATTENDEE", address)
    }

    /// Adds or replaces a parameter, builder style.
    #[must_use]
    pub fn with_param(mut self, param: impl Into<Parameter>) -> Self {
        self.set_param(param.into());
        self
    }

    #[must_use]
    pub fn with_cutype(self, cutype: CuType) -> Self {
        self.with_param(cutype)
    }

    #[must_use]
    pub fn with_partstat(self, partstat: PartStat) -> Self {
        self.with_param(partstat)
    }

    #[must_use]
    pub fn with_role(self, role: Role) -> Self {
        self.with_param(role)
    }

    #[must_use]
    pub fn with_rsvp(self, rsvp: Rsvp) -> Self {
        self.with_param(rsvp)
    }

    /// Returns the property name (uppercase; empty for unnamed properties).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether this property has the given name (case-insensitive).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns whether this property has no name yet.
    #[must_use]
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }

    /// Returns whether this is an `X-` or `IANA-` extension property.
    #[must_use]
    pub fn is_extension(&self) -> bool {
        registry::is_extension(&self.name)
    }

    pub(crate) fn rename(&mut self, name: &str) {
        if !self.is_named(name) {
            self.name = name.to_ascii_uppercase();
        }
    }

    /// Returns the escaped wire value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the escaped wire value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = normalize_line_breaks(value.into());
    }

    /// Returns the value with TEXT escapes resolved.
    #[must_use]
    pub fn as_text(&self) -> String {
        unescape_text(&self.value)
    }

    /// Returns the parameters in order of appearance.
    #[must_use]
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Returns the parameter with the given name (case-insensitive).
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.is_named(name))
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.param(name)?.value()
    }

    /// Sets a parameter, replacing an existing one of the same name in place.
    pub fn set_param(&mut self, mut param: Parameter) {
        param.normalize();
        match self.params.iter_mut().find(|p| p.is_named(&param.name)) {
            Some(existing) => *existing = param,
            None => self.params.push(param),
        }
    }

    /// Removes a parameter, returning it if present.
    pub fn remove_param(&mut self, name: &str) -> Option<Parameter> {
        let index = self.params.iter().position(|p| p.is_named(name))?;
        Some(self.params.remove(index))
    }

    /// Returns the TZID parameter if present.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.param_value(names::TZID)
    }

    /// Returns the VALUE parameter if present.
    #[must_use]
    pub fn value_type(&self) -> Option<&str> {
        self.param_value(names::VALUE)
    }

    /// Returns the CUTYPE parameter, if present and recognized.
    #[must_use]
    pub fn cutype(&self) -> Option<CuType> {
        self.param_value(names::CUTYPE)?.parse().ok()
    }

    /// Returns the PARTSTAT parameter, if present and recognized.
    #[must_use]
    pub fn partstat(&self) -> Option<PartStat> {
        self.param_value(names::PARTSTAT)?.parse().ok()
    }

    /// Returns the ROLE parameter, if present and recognized.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.param_value(names::ROLE)?.parse().ok()
    }

    /// Returns the RSVP parameter, if present and recognized.
    #[must_use]
    pub fn rsvp(&self) -> Option<Rsvp> {
        self.param_value(names::RSVP)?.parse().ok()
    }
}

/// Parameters form a mapping, so their order does not take part in equality.
impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.value == other.value
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .all(|p| other.param(&p.name).is_some_and(|o| o.values == p.values))
    }
}

impl Eq for Property {}

fn normalize_line_breaks(value: String) -> String {
    if !value.contains(['\r', '\n']) {
        return value;
    }
    value
        .replace("\r\n", "\\n")
        .replace(['\r', '\n'], "\\n")
}
