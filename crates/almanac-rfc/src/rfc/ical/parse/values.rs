//! TEXT value unescaping (RFC 5545 §3.3.11).

/// Resolves `\\`, `\;`, `\,` and `\n`/`\N` in a TEXT value.
///
/// Unknown escapes keep the character after the backslash; a trailing lone backslash is
/// kept as-is.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    if !s.contains('\\') {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}
