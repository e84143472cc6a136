//! Tag extraction grammar for the SGML container format
//!
//! Three independent extraction modes, each a pure function over a text
//! span. A missing tag never fails: it yields `None`, an empty list, or `""`.

use memchr::memmem;

/// Value after the first `<TAG>` on its line, trimmed.
pub fn single_line<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let needle = format!("<{}>", tag);
    let found = memmem::find(text.as_bytes(), needle.as_bytes())?;
    let (value, _) = line_value(text, found + needle.len());
    Some(value)
}

/// Every `<TAG>value` occurrence, in source order
pub fn single_line_all<'a>(text: &'a str, tag: &str) -> Vec<&'a str> {
    let needle = format!("<{}>", tag);
    let finder = memmem::Finder::new(needle.as_bytes());
    let bytes = text.as_bytes();

    let mut values = Vec::new();
    let mut pos = 0;
    while let Some(found) = finder.find(&bytes[pos..]) {
        let (value, value_end) = line_value(text, pos + found + needle.len());
        values.push(value);
        pos = value_end;
    }
    values
}

/// Trimmed rest of the line starting at `start`, and the offset of its end
fn line_value(text: &str, start: usize) -> (&str, usize) {
    let end = memchr::memchr(b'\n', &text.as_bytes()[start..])
        .map(|offset| start + offset)
        .unwrap_or(text.len());
    (text[start..end].trim(), end)
}

/// Every `<OPEN>` ... `</CLOSE>` block.
///
/// The captured value is the complete lines between the line holding the
/// open tag and a close tag that starts a line. At least one line must sit
/// between them, otherwise the scan moves on to a later close tag.
pub fn multi_line_blocks<'a>(text: &'a str, open: &str, close: &str) -> Vec<&'a str> {
    let open_needle = format!("<{}>", open);
    let close_needle = format!("</{}>", close);
    let open_finder = memmem::Finder::new(open_needle.as_bytes());
    let close_finder = memmem::Finder::new(close_needle.as_bytes());
    let bytes = text.as_bytes();

    let mut blocks = Vec::new();
    let mut pos = 0;
    while let Some(found) = open_finder.find(&bytes[pos..]) {
        let open_start = pos + found;
        let Some(line_end) = memchr::memchr(b'\n', &bytes[open_start..]) else {
            break;
        };
        let content_start = open_start + line_end + 1;

        let Some(close_start) = find_line_start(&close_finder, bytes, content_start) else {
            break;
        };

        blocks.push(&text[content_start..close_start]);
        pos = close_start + close_needle.len();
    }
    blocks
}

/// First block of [`multi_line_blocks`]
pub fn multi_line_block<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    multi_line_blocks(text, open, close).into_iter().next()
}

/// Close tag after `from` that begins a line and leaves a non-empty body
fn find_line_start(finder: &memmem::Finder, bytes: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(found) = finder.find(&bytes[pos..]) {
        let candidate = pos + found;
        if candidate > from && bytes[candidate - 1] == b'\n' {
            return Some(candidate);
        }
        pos = candidate + 1;
    }
    None
}

/// Value of the first `KEY:value` line, trimmed; `""` when absent.
///
/// The key is matched case-sensitively at the start of a line, ignoring
/// leading indentation.
pub fn key_value<'a>(text: &'a str, key: &str) -> &'a str {
    for line in text.lines() {
        let line = line.trim_start();
        if let Some(rest) = line.strip_prefix(key) {
            if let Some(value) = rest.strip_prefix(':') {
                return value.trim();
            }
        }
    }
    ""
}
