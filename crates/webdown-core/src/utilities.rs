//! Utility functions and constants for HTML processing.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas",
    "center", "dd", "dir", "div", "dl", "dt", "fieldset", "figcaption",
    "figure", "footer", "form", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "html", "isindex", "li", "main", "menu",
    "nav", "noframes", "noscript", "ol", "output", "p", "pre", "section",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Elements whose content never reaches the Markdown output
pub const REMOVED_ELEMENTS: &[&str] = &["head", "script", "style", "noscript", "template"];

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t\n\r\x0C]+").expect("WHITESPACE_RUN: hardcoded regex is valid")
});

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag is dropped together with its content
pub fn is_removed(tag: &str) -> bool {
    REMOVED_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Collapse runs of HTML whitespace into a single space
pub fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    WHITESPACE_RUN.replace_all(text, " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_block() {
        assert!(is_block("div"));
        assert!(is_block("p"));
        assert!(is_block("DIV"));
        assert!(!is_block("span"));
        assert!(!is_block("a"));
    }

    #[test]
    fn test_is_removed() {
        assert!(is_removed("script"));
        assert!(is_removed("HEAD"));
        assert!(!is_removed("img"));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a \n\t b"), "a b");
        assert_eq!(collapse_whitespace("\n lead"), " lead");
        assert_eq!(collapse_whitespace("a\u{a0}\u{a0}b"), "a\u{a0}\u{a0}b");
        assert!(matches!(collapse_whitespace("none"), Cow::Borrowed(_)));
    }
}
