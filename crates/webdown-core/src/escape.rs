//! Escaping of raw text and the un-escape pass.
//!
//! Text nodes are written with every potentially special character preceded
//! by [`MARKER_ESCAPING`]. Once the whole document is rendered, the registered
//! un-escapers decide which of those characters stay raw; the rest get a
//! backslash.

use crate::marker::{MARKER_ESCAPING, MARKER_LINE_BREAK};
use crate::writer::Writer;

/// Characters that receive a backslash unless an un-escaper claims them
pub const ESCAPABLE: &[char] = &['\\', '*', '_', '`', '[', '!'];

/// Write `text` with escapable characters marked
pub fn escape_text(text: &str, out: &mut dyn Writer) {
    for c in text.chars() {
        match c {
            MARKER_ESCAPING | MARKER_LINE_BREAK => {}
            c if ESCAPABLE.contains(&c) => {
                out.write_char(MARKER_ESCAPING);
                out.write_char(c);
            }
            c => out.write_char(c),
        }
    }
}

/// Write `text` unchanged apart from dropping reserved marker characters
pub fn write_raw_text(text: &str, out: &mut dyn Writer) {
    for c in text.chars().filter(|c| !matches!(*c, MARKER_ESCAPING | MARKER_LINE_BREAK)) {
        out.write_char(c);
    }
}

/// Resolve escaping markers.
///
/// `matcher` sees the text with all markers removed and the byte index of a
/// marked character. `Some(len)` keeps `len` bytes from there unescaped.
pub fn unescape_content<F>(content: &str, matcher: F) -> String
where
    F: Fn(&[u8], usize) -> Option<usize>,
{
    if !content.contains(MARKER_ESCAPING) {
        return content.to_string();
    }

    let mut plain = String::with_capacity(content.len());
    let mut marked = Vec::new();
    for c in content.chars() {
        if c == MARKER_ESCAPING {
            marked.push(plain.len());
        } else {
            plain.push(c);
        }
    }

    let bytes = plain.as_bytes();
    let mut out = String::with_capacity(plain.len() + marked.len());
    let mut last = 0;
    let mut raw_until = 0;

    for &index in marked.iter().filter(|&&index| index < plain.len()) {
        out.push_str(&plain[last..index]);
        last = index;

        if index < raw_until {
            continue;
        }
        match matcher(bytes, index) {
            Some(len) => raw_until = index + len.max(1),
            None => out.push('\\'),
        }
    }
    out.push_str(&plain[last..]);

    out
}
