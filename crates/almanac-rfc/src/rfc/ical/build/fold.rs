//! iCalendar line folding (RFC 5545 §3.1).

/// Maximum line length in octets, excluding the line break.
const MAX_LINE_OCTETS: usize = 75;

/// Folds a content line to at most 75 octets per physical line.
///
/// Continuations are introduced by CRLF + space and split only on UTF-8 character
/// boundaries. A continuation does not start with a space: unfolding consumes exactly one
/// whitespace and the parser collapses space runs, so a leading space would be lost. The
/// only exception is a space run longer than a whole physical line, which the parser
/// collapses anyway; it is split at the octet limit.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut result = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut rest = line;
    // The first physical line has no continuation prefix.
    let mut limit = MAX_LINE_OCTETS;

    while rest.len() > limit {
        let split = split_point(rest, limit);
        result.push_str(&rest[..split]);
        result.push_str("\r\n ");
        rest = &rest[split..];
        limit = MAX_LINE_OCTETS - 1;
    }
    result.push_str(rest);

    result
}

/// Picks a non-empty prefix length of at most `limit` octets whose remainder does not
/// start with a space, falling back to the limit itself.
fn split_point(rest: &str, limit: usize) -> usize {
    let hard = floor_boundary(rest, limit);
    let mut split = hard;
    while split > 0 && rest[split..].starts_with(' ') {
        split = floor_boundary(rest, split - 1);
    }
    if split == 0 { hard } else { split }
}

/// Largest char boundary of `s` that is `<= index`.
fn floor_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}
