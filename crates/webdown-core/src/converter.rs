//! Converter - the main entry point for DOM to Markdown conversion.

use indexmap::IndexMap;

use crate::base::BasePlugin;
use crate::context::Context;
use crate::escape::{escape_text, unescape_content, write_raw_text};
use crate::marker::{is_line_break, MARKER_LINE_BREAK};
use crate::node::{Node, NodeType};
use crate::register::{Plugin, Register, RenderStatus};
use crate::utilities::collapse_whitespace;
use crate::writer::Writer;
use crate::{ConvertError, Result};

/// How special characters in text are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// Escape characters that could be read as Markdown, unless an
    /// un-escaper claims them
    #[default]
    Smart,
    /// Write text as is
    Disabled,
}

/// How whitespace inside text nodes is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhitespaceMode {
    /// Collapse runs of whitespace into one space, like a browser does
    #[default]
    Collapse,
    /// Keep whitespace exactly as in the source
    Preserve,
}

/// Options for the Converter
#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// Escaping of special characters in text
    pub escape_mode: EscapeMode,

    /// Whitespace handling in text nodes
    pub whitespace: WhitespaceMode,

    /// Markdown written for a hard line break (`<br>`)
    pub hard_break: String,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            escape_mode: EscapeMode::Smart,
            whitespace: WhitespaceMode::Collapse,
            hard_break: "  \n".to_string(),
        }
    }
}

/// Walks a DOM tree and dispatches every element to the registered
/// renderers.
///
/// A converter holds no per-document state: every call builds its own
/// [`Context`], so one instance can serve many conversions, sequentially or
/// from several threads.
pub struct Converter {
    options: ConverterOptions,
    plugins: IndexMap<String, Box<dyn Plugin>>,
    register: Register,
}

impl Converter {
    /// Create a Converter with the base plugin only
    pub fn new(options: ConverterOptions) -> Self {
        let mut plugins: IndexMap<String, Box<dyn Plugin>> = IndexMap::new();
        plugins.insert(BasePlugin::NAME.to_string(), Box::new(BasePlugin));

        let mut register = Register::new();
        BasePlugin::register_rules(&mut register);

        Self {
            options,
            plugins,
            register,
        }
    }

    /// Create a Converter with the base plugin plus `plugins`
    pub fn with_plugins(options: ConverterOptions, plugins: Vec<Box<dyn Plugin>>) -> Result<Self> {
        let mut converter = Self::new(options);
        for plugin in plugins {
            converter.plugins.insert(plugin.name().to_string(), plugin);
        }
        converter.rebuild()?;
        Ok(converter)
    }

    /// Register a plugin, replacing any plugin with the same name
    pub fn register<P: Plugin + 'static>(&mut self, plugin: P) -> Result<&mut Self> {
        self.plugins.insert(plugin.name().to_string(), Box::new(plugin));
        self.rebuild()?;
        Ok(self)
    }

    /// Names of the registered plugins, in registration order
    pub fn plugin_names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    /// Get the current options
    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ConverterOptions {
        &mut self.options
    }

    /// Convert a Node tree to Markdown.
    ///
    /// `base_url` is the address of the page the tree came from, used to
    /// resolve relative links. Pass an empty string when it is unknown.
    pub fn convert_node(&self, node: &Node, base_url: &str) -> Result<String> {
        let _span = tracing::debug_span!("convert", base_url).entered();

        let mut ctx = Context::new(self, base_url);
        let mut output = String::new();
        self.render_node(&mut ctx, &mut output, node)?;

        let markdown = self.post_process(&output);
        tracing::debug!(bytes = markdown.len(), "converted node tree to markdown");
        Ok(markdown)
    }

    /// Parse an HTML document and convert it to Markdown
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str, base_url: &str) -> Result<String> {
        tracing::debug!(bytes = html.len(), "parsing html");
        let node = crate::html::parse_html(html);
        self.convert_node(&node, base_url)
    }

    /// Render a single node, offering elements to each renderer in priority
    /// order. Elements nobody handles are replaced by their children.
    pub fn render_node(&self, ctx: &mut Context<'_>, w: &mut dyn Writer, node: &Node) -> Result<()> {
        match node.node_type() {
            NodeType::Text => {
                let text = node.value().unwrap_or("");
                let text = match self.options.whitespace {
                    WhitespaceMode::Collapse => collapse_whitespace(text),
                    WhitespaceMode::Preserve => text.into(),
                };
                match self.options.escape_mode {
                    EscapeMode::Smart => escape_text(&text, w),
                    EscapeMode::Disabled => write_raw_text(&text, w),
                }
                Ok(())
            }
            NodeType::Comment => Ok(()),
            NodeType::Element => {
                for renderer in self.register.renderers() {
                    if renderer(&mut *ctx, &mut *w, node)? == RenderStatus::Success {
                        return Ok(());
                    }
                }
                tracing::trace!(tag = %node.tag_name(), "no renderer handled element");
                self.render_children(ctx, w, node)
            }
            NodeType::Document | NodeType::DocumentFragment => self.render_children(ctx, w, node),
        }
    }

    /// Render all children of `node` in order
    pub fn render_children(&self, ctx: &mut Context<'_>, w: &mut dyn Writer, node: &Node) -> Result<()> {
        for child in node.children() {
            self.render_node(ctx, w, child)?;
        }
        Ok(())
    }

    fn rebuild(&mut self) -> Result<()> {
        let mut register = Register::new();
        for plugin in self.plugins.values() {
            plugin.init(&mut register).map_err(|e| ConvertError::Plugin {
                name: plugin.name().to_string(),
                message: e.to_string(),
            })?;
        }
        self.register = register;
        Ok(())
    }

    /// Resolve markers and tidy up blank lines
    fn post_process(&self, output: &str) -> String {
        let unescaped = unescape_content(output, |bytes, index| {
            self.register.unescapers().find_map(|unescaper| unescaper(bytes, index))
        });

        // Trim spaces around every line, remembering which line ends were
        // hard breaks
        let mut lines = String::with_capacity(unescaped.len());
        let mut rest = unescaped.as_str();
        while let Some(end) = rest.find(is_line_break) {
            lines.push_str(rest[..end].trim_matches(' '));
            if rest[end..].starts_with(MARKER_LINE_BREAK) {
                lines.push_str(&self.options.hard_break);
                rest = &rest[end + MARKER_LINE_BREAK.len_utf8()..];
            } else {
                lines.push('\n');
                rest = &rest[end + 1..];
            }
        }
        lines.push_str(rest.trim_matches(' '));

        // Replace multiple consecutive newlines with max 2
        let mut newline_count = 0;
        let mut processed = String::with_capacity(lines.len());
        for c in lines.chars() {
            if c == '\n' {
                newline_count += 1;
                if newline_count <= 2 {
                    processed.push(c);
                }
            } else if c == ' ' && newline_count > 0 {
                // spaces of a hard break directly after a newline
                continue;
            } else {
                newline_count = 0;
                processed.push(c);
            }
        }

        processed.trim().to_string()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConverterOptions::default())
    }
}
