//! iCalendar value escaping (RFC 5545 §3.3.11, RFC 6868).

/// Escapes a TEXT value: backslash, semicolon, comma and line breaks.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' => result.push_str("\\,"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push_str("\\n");
            }
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }

    result
}

/// Encodes a parameter value for output.
///
/// Applies RFC 6868 caret encoding (`^`, line breaks, `"`) and wraps the value in double
/// quotes when it contains `:`, `;` or `,`.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len() + 2);
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '^' => encoded.push_str("^^"),
            '"' => encoded.push_str("^'"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                encoded.push_str("^n");
            }
            '\n' => encoded.push_str("^n"),
            _ => encoded.push(c),
        }
    }

    if needs_quoting(&encoded) {
        format!("\"{encoded}\"")
    } else {
        encoded
    }
}

fn needs_quoting(s: &str) -> bool {
    s.contains([':', ';', ','])
}
