//! Content line lexer for iCalendar (RFC 5545 §3.1).
//!
//! Handles line unfolding and tokenization of content lines.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{ContentLine, Parameter};

/// Unfolds content lines by removing line breaks followed by whitespace.
///
/// Per RFC 5545 §3.1 a fold is CRLF followed by a single SPACE or HTAB;
/// unfolding removes both. Bare LF is accepted and normalized to CRLF.
#[must_use]
pub fn unfold(input: &str) -> String {
    let normalized = input.replace("\r\n", "\n");
    let mut result = String::with_capacity(normalized.len());
    let mut chars = normalized.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\n' {
            result.push(c);
            continue;
        }
        if matches!(chars.peek(), Some(' ' | '\t')) {
            chars.next();
        } else {
            result.push_str("\r\n");
        }
    }

    result
}

/// Splits input into numbered content lines, merging folded continuations.
///
/// Handles both CRLF and bare LF line endings. Blank lines are skipped.
/// Only lines starting with a space or tab are continuations.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let continuation = line.strip_prefix([' ', '\t']);

        match (continuation, lines.last_mut()) {
            (Some(rest), Some((_, prev))) => prev.push_str(rest),
            (Some(rest), None) => lines.push((i + 1, rest.to_string())),
            (None, _) => lines.push((i + 1, line.to_string())),
        }
    }

    lines
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// Parses a single content line.
///
/// Format: `name *(";" param) ":" value`
///
/// ## Errors
/// Returns an error if the line is malformed or contains invalid characters.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let name_end = line.find([';', ':']).ok_or_else(|| {
        ParseError::new(ParseErrorKind::MissingColon, line_num, line.len().max(1))
    })?;

    if name_end == 0 {
        return Err(ParseError::new(
            ParseErrorKind::MissingPropertyName,
            line_num,
            1,
        ));
    }
    if let Some((i, _)) = line[..name_end].char_indices().find(|&(_, c)| !is_name_char(c)) {
        return Err(ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line_num,
            i + 1,
        ));
    }

    let mut cursor = Cursor {
        line,
        pos: name_end,
        line_num,
    };
    let mut params = Vec::new();

    while cursor.peek() == Some(';') {
        cursor.pos += 1;
        params.push(cursor.parameter()?);
    }

    if cursor.peek() != Some(':') {
        return Err(ParseError::new(
            ParseErrorKind::MissingColon,
            line_num,
            cursor.pos + 1,
        ));
    }

    Ok(ContentLine {
        name: line[..name_end].to_ascii_uppercase(),
        params,
        raw_value: line[cursor.pos + 1..].to_string(),
    })
}

/// Position within a content line while reading parameters.
struct Cursor<'a> {
    line: &'a str,
    pos: usize,
    line_num: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.line_num, self.pos + 1)
    }

    /// Reads `name=value[,value...]`, leaving the cursor on the delimiter.
    fn parameter(&mut self) -> ParseResult<Parameter> {
        let rest = &self.line[self.pos..];
        let eq = rest
            .find('=')
            .ok_or_else(|| self.error(ParseErrorKind::InvalidParameter))?;
        let name = &rest[..eq];
        if name.is_empty() || !name.chars().all(is_name_char) {
            return Err(self.error(ParseErrorKind::InvalidParameter));
        }
        self.pos += eq + 1;

        let mut values = vec![self.param_value()?];
        while self.peek() == Some(',') {
            self.pos += 1;
            values.push(self.param_value()?);
        }

        match self.peek() {
            Some(';' | ':') => Ok(Parameter::with_values(name.to_ascii_uppercase(), values)),
            Some(c) => Err(self
                .error(ParseErrorKind::InvalidParameter)
                .with_context(format!("unexpected character '{c}'"))),
            None => Err(self.error(ParseErrorKind::MissingColon)),
        }
    }

    /// Reads a parameter value, decoding RFC 6868 caret escapes in quoted values.
    fn param_value(&mut self) -> ParseResult<String> {
        let rest = &self.line[self.pos..];

        let Some(quoted) = rest.strip_prefix('"') else {
            let end = rest.find([',', ';', ':']).unwrap_or(rest.len());
            self.pos += end;
            return Ok(rest[..end].to_string());
        };

        let close = quoted
            .find('"')
            .ok_or_else(|| self.error(ParseErrorKind::UnclosedQuote))?;
        self.pos += close + 2;

        let mut value = String::with_capacity(close);
        let mut chars = quoted[..close].chars().peekable();
        while let Some(c) = chars.next() {
            if c != '^' {
                value.push(c);
                continue;
            }
            match chars.peek() {
                Some('^') => value.push('^'),
                Some('n') => value.push('\n'),
                Some('\'') => value.push('"'),
                _ => {
                    value.push('^');
                    continue;
                }
            }
            chars.next();
        }

        Ok(value)
    }
}
