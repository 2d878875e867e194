//! # webdown-link
//!
//! Link and image support for [`webdown_core`].
//!
//! [`LinkPlugin`] renders `<a>` as `[content](href "title")` and `<img>` as
//! `![alt](src "title")`. Relative URLs are resolved against the base URL of
//! the conversion, falling back to the one the plugin was created with. The
//! plugin also registers an un-escaper so that brackets in plain text which
//! would not form a link stay readable.
//!
//! ## Example
//!
//! ```rust
//! use webdown_core::{Converter, ConverterOptions, Node};
//! use webdown_link::LinkPlugin;
//!
//! let converter = Converter::with_plugins(
//!     ConverterOptions::default(),
//!     vec![Box::new(LinkPlugin::new(""))],
//! )
//! .unwrap();
//!
//! let a = Node::element_with_attrs("a", vec![("href", "/about")])
//!     .with_child(Node::text("About"));
//!
//! let markdown = converter.convert_node(&a, "https://x.com/page").unwrap();
//! assert_eq!(markdown, "[About](https://x.com/about)");
//! ```

mod render;
mod resolve;
mod text;
mod unescape;

pub use render::{render_node, LinkPlugin};
pub use resolve::resolve_url;
pub use text::{
    collapse_consecutive_newlines, escape_brackets_for_alt_text, escape_multiline_content,
    extract_surrounding_whitespace, surround_with_matching_quote,
};
pub use unescape::match_potential_link_or_image;
