//! Text normalization ahead of component extraction (RFC 5545 §3.1).
//!
//! Produces a canonical form in which every logical content line is bounded by a CRLF
//! on both sides:
//!
//! ```text
//! \r\nLINE-1\r\n\r\nLINE-2\r\n ... \r\nLINE-N\r\n
//! ```

/// Canonical line terminator.
pub const CRLF: &str = "\r\n";

/// Normalizes raw calendar text.
///
/// Steps, in order:
/// 1. line endings (CRLF, bare LF, bare CR) become CRLF;
/// 2. runs of spaces collapse to a single space;
/// 3. fold sequences (CRLF followed by one SPACE or HTAB) are deleted;
/// 4. blank lines are dropped;
/// 5. each remaining line is wrapped in a leading and trailing CRLF.
///
/// Steps 2 and 3 are repeated until neither changes the text, so the function is
/// idempotent. A backslash-escaped `\n` inside a value is ordinary text and is left alone.
#[must_use]
pub fn preprocess(input: &str) -> String {
    let mut text = normalize_line_endings(input);

    loop {
        let next = unfold(&collapse_spaces(&text));
        if next == text {
            break;
        }
        text = next;
    }

    let mut result = String::with_capacity(text.len() * 2);
    let mut first = true;
    for line in text.split(CRLF) {
        // Only the first line can start with whitespace; any other would have been a fold.
        let line = if first { line.trim_start() } else { line };
        first = false;
        if line.is_empty() {
            continue;
        }
        result.push_str(CRLF);
        result.push_str(line);
        result.push_str(CRLF);
    }

    result
}

fn normalize_line_endings(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push_str(CRLF);
            }
            '\n' => result.push_str(CRLF),
            _ => result.push(c),
        }
    }

    result
}

fn collapse_spaces(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut previous_space = false;

    for c in input.chars() {
        if c == ' ' {
            if !previous_space {
                result.push(c);
            }
            previous_space = true;
        } else {
            result.push(c);
            previous_space = false;
        }
    }

    result
}

/// Removes CRLF + single whitespace fold sequences.
///
/// Expects CRLF-normalized input. Exactly one whitespace character is consumed per fold.
#[must_use]
pub fn unfold(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    let mut copied = 0;

    while i < len {
        if bytes[i] == b'\r'
            && i + 2 < len
            && bytes[i + 1] == b'\n'
            && (bytes[i + 2] == b' ' || bytes[i + 2] == b'\t')
        {
            result.push_str(&input[copied..i]);
            i += 3;
            copied = i;
        } else {
            i += 1;
        }
    }
    result.push_str(&input[copied..]);

    result
}
