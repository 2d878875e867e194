//! HTML parsing support.
//!
//! Parses HTML strings with scraper and converts them to the
//! [`Node`] tree the converter walks.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML document into a Node tree.
///
/// The returned node is a document holding the `<html>` element.
/// Comments, doctypes and processing instructions are dropped.
///
/// # Example
///
/// ```rust
/// use webdown_core::parse_html;
///
/// let root = parse_html("<p>Hello <a href=\"/x\">World</a></p>");
/// assert_eq!(root.text_content(), "Hello World");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_document(html);

    let mut root = Node::document();
    root.add_child(element_to_node(document.root_element()));
    root
}

fn element_to_node(element: ElementRef) -> Node {
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(element.value().name(), attrs);

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => node.add_child(Node::text(&text.text)),
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(element_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(node: &'a Node, tag: &str) -> Option<&'a Node> {
        if node.is_element() && node.tag_name() == tag {
            return Some(node);
        }
        node.children().find_map(|child| find(child, tag))
    }

    #[test]
    fn test_parse_document_structure() {
        let root = parse_html("<p>Hello World</p>");
        assert_eq!(root.node_type(), crate::node::NodeType::Document);
        let html = root.children().next().unwrap();
        assert_eq!(html.tag_name(), "html");
        assert!(find(&root, "body").is_some());
        assert_eq!(find(&root, "p").unwrap().text_content(), "Hello World");
    }

    #[test]
    fn test_parse_keeps_attributes() {
        let root = parse_html(r#"<img src="/a.png" alt="A" title="T">"#);
        let img = find(&root, "img").unwrap();
        assert_eq!(img.attr("src"), Some("/a.png"));
        assert_eq!(img.attr("alt"), Some("A"));
        assert_eq!(img.attr("title"), Some("T"));
    }

    #[test]
    fn test_parse_drops_comments() {
        let root = parse_html("<div>a<!-- note -->b</div>");
        assert_eq!(find(&root, "div").unwrap().text_content(), "ab");
    }
}
