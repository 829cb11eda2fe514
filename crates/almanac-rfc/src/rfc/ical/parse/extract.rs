//! Component extraction over preprocessed records.
//!
//! A component block is the run of records from `BEGIN:<TAG>` to the first `END:<TAG>`
//! that closes it. Extraction removes whole blocks from a record list and hands back the
//! inner records of each, so a parent never sees the properties of its children.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::preprocess::CRLF;

/// One logical content line of preprocessed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// 1-based index of the logical line.
    pub line: usize,
    /// Line content without terminators.
    pub text: &'a str,
}

impl<'a> Record<'a> {
    /// Returns the component tag if this record is `BEGIN:<TAG>`.
    #[must_use]
    pub fn begin_tag(&self) -> Option<&'a str> {
        boundary_tag(self.text, "BEGIN")
    }

    /// Returns the component tag if this record is `END:<TAG>`.
    #[must_use]
    pub fn end_tag(&self) -> Option<&'a str> {
        boundary_tag(self.text, "END")
    }

    fn is_begin_of(&self, tag: &str) -> bool {
        self.begin_tag().is_some_and(|t| t.eq_ignore_ascii_case(tag))
    }

    fn is_end_of(&self, tag: &str) -> bool {
        self.end_tag().is_some_and(|t| t.eq_ignore_ascii_case(tag))
    }
}

fn boundary_tag<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let (name, tag) = text.split_once(':')?;
    if name.trim().eq_ignore_ascii_case(keyword) {
        Some(tag.trim())
    } else {
        None
    }
}

/// Splits preprocessed text into records.
#[must_use]
pub fn records(text: &str) -> Vec<Record<'_>> {
    text.split(CRLF)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, text)| Record { line: i + 1, text })
        .collect()
}

/// The outcome of extracting one component tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<'a> {
    /// Inner records of each matched block, in source order.
    pub matches: Vec<Vec<Record<'a>>>,
    /// Records outside every matched block, in source order.
    pub remaining: Vec<Record<'a>>,
}

/// Extracts every `BEGIN:<tag>` … `END:<tag>` block (case-insensitive).
///
/// Blocks of other tags nested inside a match travel with it untouched. A tag that does
/// not occur yields no matches.
///
/// ## Errors
/// - [`ParseErrorKind::MissingEnd`] if a block is never closed.
/// - [`ParseErrorKind::MissingBegin`] if `END:<tag>` appears outside any block.
/// - [`ParseErrorKind::MismatchedComponent`] if a block of the same tag opens before the
///   current one closes, which makes the span boundary ambiguous.
pub fn extract<'a>(tag: &str, records: &[Record<'a>]) -> ParseResult<Extraction<'a>> {
    let mut matches = Vec::new();
    let mut remaining = Vec::with_capacity(records.len());
    let mut iter = records.iter();

    while let Some(record) = iter.next() {
        if record.is_end_of(tag) {
            return Err(
                ParseError::new(ParseErrorKind::MissingBegin, record.line, 1)
                    .with_context(format!("END:{} without BEGIN", tag.to_ascii_uppercase())),
            );
        }
        if !record.is_begin_of(tag) {
            remaining.push(*record);
            continue;
        }

        let mut inner = Vec::new();
        let mut closed = false;
        for candidate in iter.by_ref() {
            if candidate.is_end_of(tag) {
                closed = true;
                break;
            }
            if candidate.is_begin_of(tag) {
                return Err(
                    ParseError::new(ParseErrorKind::MismatchedComponent, candidate.line, 1)
                        .with_context(format!(
                            "BEGIN:{} opened inside an unclosed block from line {}",
                            tag.to_ascii_uppercase(),
                            record.line
                        )),
                );
            }
            inner.push(*candidate);
        }

        if !closed {
            return Err(ParseError::new(ParseErrorKind::MissingEnd, record.line, 1)
                .with_context(format!("missing END:{}", tag.to_ascii_uppercase())));
        }

        tracing::trace!(tag, line = record.line, records = inner.len(), "Extracted block");
        matches.push(inner);
    }

    Ok(Extraction { matches, remaining })
}

/// Extracts every block whose tag is not in `known`, regardless of its name.
///
/// Returns the discarded tags alongside the records that remain.
///
/// ## Errors
/// Same as [`extract`].
pub fn extract_unknown<'a>(
    known: &[&str],
    records: &[Record<'a>],
) -> ParseResult<(Vec<String>, Vec<Record<'a>>)> {
    let mut discarded = Vec::new();
    let mut remaining = records.to_vec();

    while let Some(tag) = first_unknown_tag(known, &remaining) {
        let extraction = extract(&tag, &remaining)?;
        discarded.push(tag);
        remaining = extraction.remaining;
    }

    Ok((discarded, remaining))
}

fn first_unknown_tag(known: &[&str], records: &[Record<'_>]) -> Option<String> {
    records
        .iter()
        .filter_map(Record::begin_tag)
        .find(|tag| !known.iter().any(|k| k.eq_ignore_ascii_case(tag)))
        .map(str::to_ascii_uppercase)
}

/// Fails if any `BEGIN:`/`END:` record survived extraction.
///
/// ## Errors
/// Returns [`ParseErrorKind::MismatchedComponent`] naming the stray boundary.
pub fn ensure_no_boundaries(parent: &str, records: &[Record<'_>]) -> ParseResult<()> {
    for record in records {
        let boundary = if let Some(tag) = record.begin_tag() {
            format!("BEGIN:{tag}")
        } else if let Some(tag) = record.end_tag() {
            format!("END:{tag}")
        } else {
            continue;
        };
        return Err(
            ParseError::new(ParseErrorKind::MismatchedComponent, record.line, 1)
                .with_context(format!("unbalanced {boundary} inside {parent}")),
        );
    }
    Ok(())
}
