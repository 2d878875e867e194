//! DOM tree consumed by the converter.
//!
//! Any parser can build this structure (see [`crate::parse_html`] for the
//! scraper-backed one); renderers only ever see it through shared references.

use crate::marker::{MARKER_ESCAPING, MARKER_LINE_BREAK};

/// Kind of a [`Node`]. Discriminants match the DOM `nodeType` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
    DocumentFragment = 11,
}

/// One `name="value"` pair of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A node of the tree being converted.
///
/// Element tags are stored lowercase. Text and comment nodes carry their
/// content in `value`; elements and documents carry children.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeType,
    tag: String,
    value: String,
    attrs: Vec<Attribute>,
    children: Vec<Node>,
}

impl Node {
    fn new(kind: NodeType, tag: String, value: String) -> Self {
        Self {
            kind,
            tag,
            value,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn element(tag_name: &str) -> Self {
        Self::new(NodeType::Element, tag_name.to_ascii_lowercase(), String::new())
    }

    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        attrs
            .into_iter()
            .fold(Self::element(tag_name), |mut node, (name, value)| {
                node.set_attr(name, value);
                node
            })
    }

    pub fn text(content: &str) -> Self {
        Self::new(NodeType::Text, String::new(), content.to_string())
    }

    pub fn comment(content: &str) -> Self {
        Self::new(NodeType::Comment, String::new(), content.to_string())
    }

    pub fn document() -> Self {
        Self::new(NodeType::Document, String::new(), String::new())
    }

    pub fn document_fragment() -> Self {
        Self::new(NodeType::DocumentFragment, String::new(), String::new())
    }

    pub fn node_type(&self) -> NodeType {
        self.kind
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeType::Text
    }

    /// Lowercase tag name, empty for anything but elements
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// Content of a text or comment node
    pub fn value(&self) -> Option<&str> {
        matches!(self.kind, NodeType::Text | NodeType::Comment).then_some(self.value.as_str())
    }

    /// Attribute lookup, ignoring ASCII case of the name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .map(|attr| attr.value.as_str())
    }

    pub fn attr_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attr(name).unwrap_or(default)
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Set an attribute, replacing an existing value of the same name.
    /// Reserved marker characters are dropped from the value.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let value: String = value
            .chars()
            .filter(|c| !matches!(*c, MARKER_ESCAPING | MARKER_LINE_BREAK))
            .collect();

        match self.attrs.iter_mut().find(|attr| attr.name.eq_ignore_ascii_case(name)) {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attribute {
                name: name.to_ascii_lowercase(),
                value,
            }),
        }
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Concatenated text of this node and its descendants. Comments
    /// contribute nothing.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self.kind {
            NodeType::Text => out.push_str(&self.value),
            NodeType::Comment => {}
            _ => self.children.iter().for_each(|child| child.collect_text(out)),
        }
    }
}
