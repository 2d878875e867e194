//! Rendering of `<a>` and `<img>` elements.

use webdown_core::marker::is_space;
use webdown_core::{
    Context, ContextValue, Node, Plugin, Priority, Register, RenderStatus, Result, Writer,
    IS_INSIDE_LINK,
};

use crate::resolve::resolve_url;
use crate::text::{
    escape_brackets_for_alt_text, escape_multiline_content, extract_surrounding_whitespace,
    surround_with_matching_quote,
};
use crate::unescape::match_potential_link_or_image;

/// Renders links and images as inline Markdown.
///
/// The base URL given here is used for conversions that do not supply their
/// own. The plugin itself is immutable, so a single instance can back any
/// number of conversions.
#[derive(Debug, Clone, Default)]
pub struct LinkPlugin {
    base_url: String,
}

impl LinkPlugin {
    pub const NAME: &'static str = "link";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Plugin for LinkPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn init(&self, register: &mut Register) -> Result<()> {
        register.unescaper(match_potential_link_or_image, Priority::EARLY);

        let base_url = self.base_url.clone();
        register.renderer(
            move |ctx, w, node| {
                if ctx.base_url().is_empty() && !base_url.is_empty() {
                    ctx.set_base_url(base_url.as_str());
                }
                render_node(ctx, w, node)
            },
            Priority::EARLY,
        );
        Ok(())
    }
}

/// Render `<img>` and `<a>`; every other element is left to the next
/// renderer.
pub fn render_node(ctx: &mut Context<'_>, w: &mut dyn Writer, node: &Node) -> Result<RenderStatus> {
    match node.tag_name() {
        "img" => Ok(render_image(ctx, w, node)),
        "a" => render_anchor(ctx, w, node),
        _ => Ok(RenderStatus::TryNext),
    }
}

fn render_image(ctx: &Context<'_>, w: &mut dyn Writer, node: &Node) -> RenderStatus {
    let src = node.attr_or("src", "").trim();
    if src.is_empty() {
        tracing::trace!("img without src, trying next renderer");
        return RenderStatus::TryNext;
    }
    let src = resolve(ctx, "img", src);

    let title = single_line(node.attr_or("title", ""));

    // alt ends up between `[` and `]`
    let alt = escape_brackets_for_alt_text(&single_line(node.attr_or("alt", "")));

    w.write_str("![");
    w.write_str(&alt);
    w.write_char(']');
    write_destination(w, &src, &title);

    RenderStatus::Success
}

fn render_anchor(ctx: &Context<'_>, w: &mut dyn Writer, node: &Node) -> Result<RenderStatus> {
    let mut ctx = ctx.with_value(IS_INSIDE_LINK, ContextValue::Bool(true));

    let href = ctx.assemble_absolute_url("a", node.attr_or("href", "").trim());
    let title = single_line(node.attr_or("title", ""));

    let mut rendered = String::new();
    ctx.render_child_nodes(&mut rendered, node)?;

    let content = if is_blank(&rendered) {
        title.as_str()
    } else {
        rendered.as_str()
    };
    if is_blank(content) {
        return Ok(RenderStatus::Success);
    }

    LinkParts::new(href, &title, content, ctx.base_url()).write_inline(w);
    Ok(RenderStatus::Success)
}

/// The pieces of one anchor, ready to be written.
struct LinkParts<'a> {
    href: String,
    title: String,
    before: &'a str,
    content: String,
    after: &'a str,
}

impl<'a> LinkParts<'a> {
    fn new(href: String, title: &str, content: &'a str, base_url: &str) -> Self {
        // `[text]()` is valid, `[text]( "title")` is not
        let title = if href.is_empty() {
            String::new()
        } else {
            title.to_string()
        };
        let href = resolve_url(&href, base_url).into_owned();

        let (before, core, after) = extract_surrounding_whitespace(content);

        Self {
            href,
            title,
            before,
            content: escape_multiline_content(core),
            after,
        }
    }

    fn write_inline(&self, w: &mut dyn Writer) {
        w.write_str(self.before);
        w.write_char('[');
        w.write_str(&self.content);
        w.write_char(']');
        write_destination(w, &self.href, &self.title);
        w.write_str(self.after);
    }
}

fn write_destination(w: &mut dyn Writer, url: &str, title: &str) {
    w.write_char('(');
    w.write_str(url);
    if !title.is_empty() {
        // destination and title are separated by a space
        w.write_char(' ');
        w.write_str(&surround_with_matching_quote(title));
    }
    w.write_char(')');
}

fn resolve(ctx: &Context<'_>, element: &str, raw: &str) -> String {
    let assembled = ctx.assemble_absolute_url(element, raw);
    resolve_url(&assembled, ctx.base_url()).into_owned()
}

fn single_line(text: &str) -> String {
    text.replace('\n', " ")
}

fn is_blank(text: &str) -> bool {
    text.trim_matches(is_space).is_empty()
}
