//! iCalendar document serialization.
//!
//! Output is deterministic: properties in stored order, children grouped by kind in the
//! parent's declared order, and every line terminated by CRLF.

use almanac_core::config::{ParameterOrder, SerializerConfig};

use super::escape::escape_param_value;
use super::fold::fold_line;
use crate::rfc::ical::core::{Component, Parameter, Property};
use crate::rfc::ical::parse::CRLF;

/// Output options for the serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Fold content lines longer than 75 octets.
    pub fold_lines: bool,
    /// Order in which parameters are written.
    pub parameter_order: ParameterOrder,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            fold_lines: true,
            parameter_order: ParameterOrder::Source,
        }
    }
}

impl From<&SerializerConfig> for SerializeOptions {
    fn from(config: &SerializerConfig) -> Self {
        Self {
            fold_lines: config.fold_lines,
            parameter_order: config.parameter_order,
        }
    }
}

/// Serializes calendars with the default options.
#[must_use]
pub fn serialize(calendars: &[Component]) -> String {
    serialize_with(calendars, &SerializeOptions::default())
}

/// Serializes calendars, one `BEGIN:VCALENDAR` … `END:VCALENDAR` block each.
#[must_use]
pub fn serialize_with(calendars: &[Component], options: &SerializeOptions) -> String {
    tracing::debug!(
        calendars = calendars.len(),
        fold_lines = options.fold_lines,
        parameter_order = ?options.parameter_order,
        "Serializing iCalendar text"
    );

    let mut output = String::new();
    for calendar in calendars {
        write_component(&mut output, calendar, options);
    }
    output
}

/// Serializes a single component and its children.
#[must_use]
pub fn serialize_component(component: &Component, options: &SerializeOptions) -> String {
    let mut output = String::new();
    write_component(&mut output, component, options);
    output
}

fn write_component(output: &mut String, component: &Component, options: &SerializeOptions) {
    let kind = component.kind();
    // Snapshot so no lock is held while children are visited.
    let (properties, children) = component.snapshot();

    push_line(output, &format!("BEGIN:{kind}"));
    for property in &properties {
        push_line(output, &serialize_property(property, options));
    }
    for child_kind in kind.children() {
        for child in children.iter().filter(|c| c.kind() == *child_kind) {
            write_component(output, child, options);
        }
    }
    push_line(output, &format!("END:{kind}"));
}

fn push_line(output: &mut String, line: &str) {
    output.push_str(line);
    output.push_str(CRLF);
}

/// Serializes one property as a content line, folded if enabled, without the trailing
/// line break.
#[must_use]
pub fn serialize_property(property: &Property, options: &SerializeOptions) -> String {
    let mut line = String::with_capacity(property.name().len() + property.value().len() + 16);
    line.push_str(property.name());

    for param in ordered_params(property.params(), options.parameter_order) {
        let values: Vec<String> = param
            .values
            .iter()
            .map(String::as_str)
            .map(escape_param_value)
            .collect();
        line.push(';');
        line.push_str(&param.name);
        line.push('=');
        line.push_str(&values.join(","));
    }

    line.push(':');
    line.push_str(property.value());

    if options.fold_lines {
        fold_line(&line)
    } else {
        line
    }
}

/// Legacy order: parameters whose value contains `:` first, then the rest; each group by
/// descending name.
fn ordered_params(params: &[Parameter], order: ParameterOrder) -> Vec<&Parameter> {
    let mut ordered: Vec<&Parameter> = params.iter().collect();
    if order == ParameterOrder::Legacy {
        ordered.sort_by(|a, b| {
            has_colon(b)
                .cmp(&has_colon(a))
                .then_with(|| b.name.cmp(&a.name))
        });
    }
    ordered
}

fn has_colon(param: &Parameter) -> bool {
    param.values.iter().any(|v| v.contains(':'))
}
