//! Immutable document tree for authored passages.
//!
//! The passage is parsed once with an HTML5 parser and copied into a small
//! owned tree. Everything downstream (tokenizing, rendering, plain-text
//! extraction) walks this tree instead of the parser's DOM.

use kuchikiki::traits::TendrilSink;
use kuchikiki::{NodeData, NodeRef};

/// A single attribute, kept in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    /// Whether the element has no end tag in HTML serialization.
    pub fn is_void(&self) -> bool {
        is_void_element(&self.name)
    }
}

/// A node of the passage tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Decoded character data.
    Text(String),
    /// A `<br>` element.
    LineBreak,
    Element(Element),
}

/// A parsed passage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Parse passage markup. Only the body content is kept; comments,
    /// doctypes and processing instructions are dropped.
    pub fn parse(html: &str) -> Self {
        let root = kuchikiki::parse_html().one(html);
        let body = root
            .descendants()
            .find(|node| node.as_element().is_some_and(|e| &*e.name.local == "body"));

        let nodes = match body {
            Some(body) => convert_children(&body),
            None => Vec::new(),
        };
        Document { nodes }
    }

    /// Build a document from an already constructed tree.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Document { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Visible text of the whole document, line breaks rendered as `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.nodes, &mut out);
        out
    }
}

/// Strip markup from an HTML snippet, keeping only its visible text.
pub fn plain_text(html: &str) -> String {
    Document::parse(html).text()
}

fn convert_children(parent: &NodeRef) -> Vec<Node> {
    parent.children().filter_map(|child| convert(&child)).collect()
}

fn convert(node: &NodeRef) -> Option<Node> {
    match node.data() {
        NodeData::Text(text) => Some(Node::Text(text.borrow().clone())),
        NodeData::Element(data) => {
            let name = data.name.local.to_string();
            if name == "br" {
                return Some(Node::LineBreak);
            }
            let attributes = data
                .attributes
                .borrow()
                .map
                .iter()
                .map(|(key, attr)| Attribute {
                    name: key.local.to_string(),
                    value: attr.value.clone(),
                })
                .collect();
            Some(Node::Element(Element {
                name,
                attributes,
                children: convert_children(node),
            }))
        }
        _ => None,
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::LineBreak => out.push('\n'),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area" | "br" | "col" | "embed" | "hr" | "img" | "input" | "source" | "track" | "wbr"
    )
}

/// Escape character data for HTML output.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value for double-quoted HTML output.
pub fn escape_attribute(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
