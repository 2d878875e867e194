//! Internal marker characters.
//!
//! Markers are private-use code points written into intermediate output and
//! resolved by the converter before the final Markdown is returned.

/// Placed in front of every escapable character of raw text. The un-escape
/// pass turns it into a backslash or drops it.
pub const MARKER_ESCAPING: char = '\u{E000}';

/// A forced line break (`<br>`). Treated like `\n` by newline handling and
/// rendered with the configured hard break at the end of a conversion.
pub const MARKER_LINE_BREAK: char = '\u{E001}';

/// `\n` or the hard line break marker.
pub fn is_line_break(c: char) -> bool {
    c == '\n' || c == MARKER_LINE_BREAK
}

/// Unicode whitespace or the hard line break marker.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || c == MARKER_LINE_BREAK
}
