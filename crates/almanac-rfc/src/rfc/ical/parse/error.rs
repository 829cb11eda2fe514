//! iCalendar parse error types.

/// Result type for iCalendar parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while parsing iCalendar text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: {kind}{}", context_suffix(.context.as_deref()))]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Logical (unfolded) line where the error occurred, 1-based.
    pub line: usize,
    /// Column within the logical line, 1-based.
    pub column: usize,
    /// Additional context.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            line,
            column,
            context: None,
        }
    }

    /// Attaches a human-readable description of the failure.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Returns the broad category of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

fn context_suffix(context: Option<&str>) -> String {
    context.map_or_else(String::new, |c| format!(" ({c})"))
}

/// Broad error classes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Unterminated or mismatched component boundaries.
    Structural,
    /// Unparseable property name, value or parameter.
    PropertyFormat,
}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// `END:<TAG>` without a preceding `BEGIN:<TAG>`.
    #[error("missing BEGIN")]
    MissingBegin,
    /// `BEGIN:<TAG>` never closed.
    #[error("missing END")]
    MissingEnd,
    /// Component boundaries overlap or close in the wrong order.
    #[error("mismatched component")]
    MismatchedComponent,
    /// The property name could not be isolated.
    #[error("missing property name")]
    MissingName,
    /// The property name contains characters outside `[A-Za-z0-9-]`.
    #[error("invalid property name")]
    InvalidPropertyName,
    /// The record names a different property than the one requested.
    #[error("unexpected property name")]
    UnexpectedName,
    /// No unquoted `:` separates the value.
    #[error("missing property value")]
    MissingValue,
    /// A parameter segment lacks `=` or a name.
    #[error("malformed parameter")]
    MalformedParameter,
    /// A quoted parameter value is not closed.
    #[error("unclosed quote")]
    UnclosedQuote,
}

impl ParseErrorKind {
    /// Returns the broad category of this error kind.
    #[must_use]
    pub const fn category(self) -> ErrorCategory {
        match self {
            Self::MissingBegin | Self::MissingEnd | Self::MismatchedComponent => {
                ErrorCategory::Structural
            }
            Self::MissingName
            | Self::InvalidPropertyName
            | Self::UnexpectedName
            | Self::MissingValue
            | Self::MalformedParameter
            | Self::UnclosedQuote => ErrorCategory::PropertyFormat,
        }
    }
}
