//! iCalendar parsing error types.

use std::fmt;

/// Result type for iCalendar parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Error type for iCalendar parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Kind of error.
    pub kind: ParseErrorKind,
    /// Line number where the error occurred (1-based).
    pub line: usize,
    /// Column number where the error occurred (1-based).
    pub column: usize,
    /// Additional context about the error.
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

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}, column {}", self.kind, self.line, self.column)?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {ctx}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Kinds of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("missing property name")]
    MissingPropertyName,
    #[error("invalid property name")]
    InvalidPropertyName,
    #[error("missing colon separator")]
    MissingColon,
    #[error("invalid parameter format")]
    InvalidParameter,
    #[error("unclosed quoted string")]
    UnclosedQuote,
    #[error("invalid date format")]
    InvalidDate,
    #[error("invalid time format")]
    InvalidTime,
    #[error("invalid date-time format")]
    InvalidDateTime,
    #[error("invalid duration format")]
    InvalidDuration,
    #[error("invalid recurrence rule")]
    InvalidRRule,
    #[error("invalid UTC offset format")]
    InvalidUtcOffset,
    #[error("invalid boolean value")]
    InvalidBoolean,
    #[error("invalid integer value")]
    InvalidInteger,
    #[error("missing BEGIN line")]
    MissingBegin,
    #[error("missing END line")]
    MissingEnd,
    #[error("mismatched BEGIN/END")]
    MismatchedComponent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position() {
        let err = ParseError::new(ParseErrorKind::MissingColon, 3, 14);
        assert_eq!(err.to_string(), "missing colon separator at line 3, column 14");
    }

    #[test]
    fn display_includes_context() {
        let err = ParseError::new(ParseErrorKind::MismatchedComponent, 7, 1)
            .with_context("expected END:VEVENT, got END:VTODO");
        assert_eq!(
            err.to_string(),
            "mismatched BEGIN/END at line 7, column 1: expected END:VEVENT, got END:VTODO"
        );
    }
}
