//! # webdown-core
//!
//! Plugin-driven conversion of DOM trees to Markdown.
//!
//! The [`Converter`] walks a [`Node`] tree. Every element is offered
//! to the registered renderers in [`Priority`] order until one reports
//! [`RenderStatus::Success`]; elements nobody handles are replaced by their
//! children. Text is escaped on the way out, and registered un-escapers get
//! the final say over which characters keep their backslash.
//!
//! Renderers come from [`Plugin`]s. The [`BasePlugin`] is always present and
//! only takes care of document structure; everything else (links, images,
//! ...) is contributed by other crates.
//!
//! ## Example
//!
//! ```rust
//! use webdown_core::{Converter, Node};
//!
//! let converter = Converter::default();
//!
//! let p = Node::element("p").with_child(Node::text("Hello *World*"));
//!
//! let markdown = converter.convert_node(&p, "").unwrap();
//! assert_eq!(markdown, r"Hello \*World\*");
//! ```

mod base;
mod context;
mod converter;
pub mod escape;
#[cfg(feature = "html")]
pub mod html;
pub mod marker;
pub mod node;
mod register;
mod utilities;
mod writer;

pub use base::BasePlugin;
pub use context::{Context, ContextValue, IS_INSIDE_LINK};
pub use converter::{Converter, ConverterOptions, EscapeMode, WhitespaceMode};
#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{Attribute, Node, NodeType};
pub use register::{Plugin, Priority, Register, RenderFn, RenderStatus, UnEscapeFn};
pub use utilities::*;
pub use writer::Writer;

/// Error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Render error: {0}")]
    Render(String),

    #[error("Plugin {name} failed to initialize: {message}")]
    Plugin { name: String, message: String },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
