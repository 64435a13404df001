//! Content line folding for iCalendar (RFC 5545 §3.1).

/// Maximum line length in octets (not including CRLF).
const MAX_LINE_OCTETS: usize = 75;

/// Folds a content line to the 75-octet limit and terminates it with CRLF.
///
/// Continuation lines start with a single space, which counts toward their
/// limit. Breaks only fall on UTF-8 character boundaries.
#[must_use]
pub fn fold_line(line: &str) -> String {
    let mut result = String::with_capacity(line.len() + (line.len() / MAX_LINE_OCTETS + 1) * 3);
    let mut segment_len = 0;
    let mut limit = MAX_LINE_OCTETS;

    for c in line.chars() {
        let width = c.len_utf8();
        if segment_len + width > limit {
            result.push_str("\r\n ");
            segment_len = 1;
            limit = MAX_LINE_OCTETS;
        }
        result.push(c);
        segment_len += width;
    }

    result.push_str("\r\n");
    result
}
