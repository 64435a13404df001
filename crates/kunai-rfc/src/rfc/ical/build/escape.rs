//! iCalendar text escaping utilities.

/// Escapes text for iCalendar TEXT values (RFC 5545 §3.3.11).
///
/// Escapes backslash, comma, semicolon and newlines. Bare CR is dropped.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\n' => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Escapes a parameter value, quoting it when it contains delimiters.
///
/// Quoted values use RFC 6868 caret encoding.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    if !s.contains([':', ';', ',', '"', '\n']) {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len() + 8);
    result.push('"');
    for c in s.chars() {
        match c {
            '^' => result.push_str("^^"),
            '\n' => result.push_str("^n"),
            '"' => result.push_str("^'"),
            _ => result.push(c),
        }
    }
    result.push('"');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_text_basic() {
        assert_eq!(escape_text("hello, world"), "hello\\, world");
        assert_eq!(escape_text("line1\r\nline2"), "line1\\nline2");
        assert_eq!(escape_text("back\\slash;"), "back\\\\slash\\;");
    }

    #[test]
    fn escape_param_value_quotes_delimiters() {
        assert_eq!(escape_param_value("Simple"), "Simple");
        assert_eq!(escape_param_value("Doe, Jane"), "\"Doe, Jane\"");
        assert_eq!(escape_param_value("mailto:a@b"), "\"mailto:a@b\"");
    }

    #[test]
    fn escape_param_value_caret() {
        assert_eq!(escape_param_value("Line1\nLine2"), "\"Line1^nLine2\"");
        assert_eq!(escape_param_value("Has\"quote"), "\"Has^'quote\"");
    }
}
