//! Content line tokenization (RFC 5545 §3.1, RFC 6868).

use std::iter::Peekable;
use std::str::CharIndices;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{Parameter, Property};

type Chars<'a> = Peekable<CharIndices<'a>>;

/// Parses one unfolded content line.
///
/// Format: `name *(";" param) ":" value`
///
/// The parameter list ends at the first `:` outside double quotes, so quoted values such
/// as `DELEGATED-TO="mailto:a@example.com"` never split the line early. When `expected`
/// is given, the name must match it (case-insensitive).
///
/// ## Errors
/// Returns an error if the line has no name or value, if the name contains invalid
/// characters, or if a parameter is malformed or leaves a quote open.
pub fn parse_property(line: &str, line_num: usize, expected: Option<&str>) -> ParseResult<Property> {
    let mut chars = line.char_indices().peekable();
    let mut name_end = None;

    // Find the property name (ends at ';' or ':')
    while let Some(&(i, c)) = chars.peek() {
        if c == ';' || c == ':' {
            name_end = Some(i);
            break;
        }
        chars.next();
    }

    let Some(name_end) = name_end else {
        return Err(ParseError::new(ParseErrorKind::MissingValue, line_num, line.len().max(1))
            .with_context("no ':' separating name and value"));
    };
    if name_end == 0 {
        return Err(ParseError::new(ParseErrorKind::MissingName, line_num, 1));
    }

    let name = &line[..name_end];
    if let Some((i, c)) = name
        .char_indices()
        .find(|&(_, c)| !c.is_ascii_alphanumeric() && c != '-')
    {
        return Err(
            ParseError::new(ParseErrorKind::InvalidPropertyName, line_num, i + 1)
                .with_context(format!("unexpected character '{c}' in '{name}'")),
        );
    }
    if let Some(expected) = expected
        && !name.eq_ignore_ascii_case(expected)
    {
        return Err(
            ParseError::new(ParseErrorKind::UnexpectedName, line_num, 1)
                .with_context(format!("expected {expected}, found {name}")),
        );
    }

    let mut property = Property::new(name, String::new());

    // Parse parameters if we stopped at ';'
    let mut separator = chars.next();
    while let Some((_, ';')) = separator {
        let (param, next) = parse_parameter(&mut chars, line, line_num)?;
        property.set_param(param);
        separator = next;
    }

    let Some((colon, ':')) = separator else {
        return Err(ParseError::new(ParseErrorKind::MissingValue, line_num, line.len().max(1))
            .with_context("parameters are not followed by ':'"));
    };

    property.set_value(&line[colon + 1..]);
    Ok(property)
}

/// Parses a single `NAME=VALUE[,VALUE]*` parameter.
///
/// Returns the parameter and the delimiter that ended it (`;` or `:`), or `None` at the
/// end of the line.
fn parse_parameter(
    chars: &mut Chars<'_>,
    line: &str,
    line_num: usize,
) -> ParseResult<(Parameter, Option<(usize, char)>)> {
    let start = chars.peek().map_or(line.len(), |&(i, _)| i);

    // Parameter name (up to '=')
    let mut name_end = None;
    while let Some(&(i, c)) = chars.peek() {
        match c {
            '=' => {
                name_end = Some(i);
                chars.next();
                break;
            }
            ';' | ':' | '"' => break,
            _ if c.is_ascii_alphanumeric() || c == '-' => {
                chars.next();
            }
            _ => {
                return Err(
                    ParseError::new(ParseErrorKind::MalformedParameter, line_num, i + 1)
                        .with_context(format!("unexpected character '{c}' in parameter name")),
                );
            }
        }
    }

    let Some(name_end) = name_end else {
        return Err(
            ParseError::new(ParseErrorKind::MalformedParameter, line_num, start + 1)
                .with_context("parameter lacks '='"),
        );
    };
    if name_end == start {
        return Err(
            ParseError::new(ParseErrorKind::MalformedParameter, line_num, start + 1)
                .with_context("empty parameter name"),
        );
    }
    let name = &line[start..name_end];

    // Parameter values (comma-separated, may be quoted)
    let mut values = Vec::new();
    loop {
        values.push(parse_param_value(chars, line, line_num)?);

        match chars.next() {
            Some((_, ',')) => {}
            Some(delimiter @ (_, ';' | ':')) => {
                return Ok((Parameter::with_values(name, values), Some(delimiter)));
            }
            Some((i, c)) => {
                return Err(
                    ParseError::new(ParseErrorKind::MalformedParameter, line_num, i + 1)
                        .with_context(format!("unexpected character '{c}' after {name} value")),
                );
            }
            None => return Ok((Parameter::with_values(name, values), None)),
        }
    }
}

/// Parses a parameter value (possibly quoted), resolving RFC 6868 caret escapes.
fn parse_param_value(chars: &mut Chars<'_>, line: &str, line_num: usize) -> ParseResult<String> {
    let Some(&(start, first)) = chars.peek() else {
        return Ok(String::new());
    };

    let mut raw = String::new();
    if first == '"' {
        chars.next(); // opening quote
        let mut closed = false;
        for (_, c) in chars.by_ref() {
            if c == '"' {
                closed = true;
                break;
            }
            raw.push(c);
        }
        if !closed {
            return Err(
                ParseError::new(ParseErrorKind::UnclosedQuote, line_num, start + 1)
                    .with_context(format!("quoted value starting at '{}'", &line[start..])),
            );
        }
    } else {
        // Unquoted value (ends at ',' ';' or ':')
        while let Some(&(_, c)) = chars.peek() {
            if matches!(c, ',' | ';' | ':') {
                break;
            }
            if c == '"' {
                break;
            }
            raw.push(c);
            chars.next();
        }
    }

    Ok(decode_caret(&raw))
}

/// Resolves `^^`, `^n` and `^'`; any other caret is kept literally.
fn decode_caret(raw: &str) -> String {
    if !raw.contains('^') {
        return raw.to_string();
    }

    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '^' {
            value.push(c);
            continue;
        }
        match chars.peek() {
            Some('^') => value.push('^'),
            Some('n' | 'N') => value.push('\n'),
            Some('\'') => value.push('"'),
            _ => {
                value.push('^');
                continue;
            }
        }
        chars.next();
    }
    value
}
