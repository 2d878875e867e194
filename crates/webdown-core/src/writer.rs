//! Append-only output sink handed to renderers.

/// Where renderers write their Markdown.
///
/// Renderers never know where bytes end up: the converter hands them either
/// the document buffer or a scratch buffer for child content.
pub trait Writer {
    /// Append a single character
    fn write_char(&mut self, c: char);

    /// Append a string slice
    fn write_str(&mut self, s: &str);

    /// Append raw bytes. Invalid UTF-8 is replaced, never dropped.
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_str(&String::from_utf8_lossy(bytes));
    }
}

impl Writer for String {
    fn write_char(&mut self, c: char) {
        self.push(c);
    }

    fn write_str(&mut self, s: &str) {
        self.push_str(s);
    }
}
