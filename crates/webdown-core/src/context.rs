//! Per-conversion render context.

use std::borrow::Cow;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::converter::Converter;
use crate::node::Node;
use crate::writer::Writer;
use crate::Result;

/// Context key set while the children of an `<a>` are rendered
pub const IS_INSIDE_LINK: &str = "is_inside_link";

static SCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("SCHEME: hardcoded regex is valid")
});

/// Value stored under a context key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValue {
    Bool(bool),
    Text(String),
}

/// State for one conversion.
///
/// Created by the [`Converter`] for every call and dropped when it returns,
/// so nothing here is shared between documents converted in parallel.
#[derive(Clone)]
pub struct Context<'c> {
    converter: &'c Converter,
    base_url: String,
    values: IndexMap<String, ContextValue>,
}

impl<'c> Context<'c> {
    pub(crate) fn new(converter: &'c Converter, base_url: &str) -> Self {
        Self {
            converter,
            base_url: base_url.trim().to_string(),
            values: IndexMap::new(),
        }
    }

    /// URL of the page being converted, empty if unknown
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn value(&self, key: &str) -> Option<&ContextValue> {
        self.values.get(key)
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: ContextValue) {
        self.values.insert(key.into(), value);
    }

    /// Derive a context carrying one more value. The original is untouched,
    /// which scopes the value to whatever is rendered with the copy.
    pub fn with_value(&self, key: impl Into<String>, value: ContextValue) -> Context<'c> {
        let mut derived = self.clone();
        derived.set_value(key, value);
        derived
    }

    /// Whether an enclosing `<a>` is currently being rendered
    pub fn is_inside_link(&self) -> bool {
        matches!(self.value(IS_INSIDE_LINK), Some(ContextValue::Bool(true)))
    }

    /// Turn the raw `src`/`href` of `element` into an absolute URL where
    /// possible.
    ///
    /// Empty values, fragment-only references and URLs with a scheme are
    /// kept. Everything else is joined against the base URL. When there is
    /// no usable base URL the value comes back unchanged, so root-relative
    /// paths still start with `/`.
    pub fn assemble_absolute_url(&self, element: &str, raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with('#') || raw.starts_with("data:") {
            return raw.to_string();
        }

        let raw = encode_whitespace(raw);
        if SCHEME.is_match(&raw) || self.base_url.is_empty() {
            return raw.into_owned();
        }

        let base = match Url::parse(&self.base_url) {
            Ok(base) => base,
            Err(e) => {
                tracing::warn!(base_url = %self.base_url, error = %e, "invalid base URL, keeping {element} URL as is");
                return raw.into_owned();
            }
        };

        match base.join(&raw) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::warn!(url = %raw, base_url = %self.base_url, error = %e, "failed to resolve {element} URL");
                raw.into_owned()
            }
        }
    }

    /// Render the children of `node` through the converter
    pub fn render_child_nodes(&mut self, writer: &mut dyn Writer, node: &Node) -> Result<()> {
        let converter = self.converter;
        converter.render_children(self, writer, node)
    }
}

// Whitespace would end a Markdown link destination early.
fn encode_whitespace(url: &str) -> Cow<'_, str> {
    if !url.contains(char::is_whitespace) {
        return Cow::Borrowed(url);
    }

    let mut encoded = String::with_capacity(url.len() + 8);
    for c in url.chars() {
        match c {
            ' ' => encoded.push_str("%20"),
            '\t' => encoded.push_str("%09"),
            '\n' => encoded.push_str("%0A"),
            '\r' => encoded.push_str("%0D"),
            c if c.is_whitespace() => {}
            c => encoded.push(c),
        }
    }
    Cow::Owned(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{Converter, ConverterOptions};

    fn assemble(base_url: &str, raw: &str) -> String {
        let converter = Converter::new(ConverterOptions::default());
        let ctx = Context::new(&converter, base_url);
        ctx.assemble_absolute_url("a", raw)
    }

    #[test]
    fn test_joins_against_base() {
        assert_eq!(assemble("https://x.com/page", "/about"), "https://x.com/about");
        assert_eq!(assemble("https://x.com/dir/", "/p.png"), "https://x.com/p.png");
        assert_eq!(assemble("https://x.com/dir/", "p.png"), "https://x.com/dir/p.png");
        assert_eq!(assemble("https://x.com/a/b", "../c"), "https://x.com/c");
    }

    #[test]
    fn test_keeps_absolute_and_special_urls() {
        assert_eq!(assemble("https://x.com/", "https://y.org/z"), "https://y.org/z");
        assert_eq!(assemble("https://x.com/", "mailto:a@b.c"), "mailto:a@b.c");
        assert_eq!(assemble("https://x.com/", "#top"), "#top");
        assert_eq!(assemble("https://x.com/", "  "), "");
        assert_eq!(assemble("https://x.com/", "data:image/png;base64,AA BB"), "data:image/png;base64,AA BB");
    }

    #[test]
    fn test_without_base_keeps_relative() {
        assert_eq!(assemble("", "/about"), "/about");
        assert_eq!(assemble("", " page.html "), "page.html");
        assert_eq!(assemble("not a url", "/about"), "/about");
    }

    #[test]
    fn test_encodes_whitespace() {
        assert_eq!(assemble("", "/my file.png"), "/my%20file.png");
        assert_eq!(assemble("https://x.com/", "/a b"), "https://x.com/a%20b");
    }

    #[test]
    fn test_values_are_scoped_to_derived_context() {
        let converter = Converter::new(ConverterOptions::default());
        let ctx = Context::new(&converter, "https://x.com");
        assert!(!ctx.is_inside_link());

        let inner = ctx.with_value(IS_INSIDE_LINK, ContextValue::Bool(true));
        assert!(inner.is_inside_link());
        assert_eq!(inner.base_url(), "https://x.com");
        assert!(!ctx.is_inside_link());
    }

    #[test]
    fn test_set_base_url() {
        let converter = Converter::new(ConverterOptions::default());
        let mut ctx = Context::new(&converter, "");
        ctx.set_base_url("https://x.com/");
        ctx.set_value("lang", ContextValue::Text("en".to_string()));
        assert_eq!(ctx.base_url(), "https://x.com/");
        assert_eq!(ctx.value("lang"), Some(&ContextValue::Text("en".to_string())));
    }
}
