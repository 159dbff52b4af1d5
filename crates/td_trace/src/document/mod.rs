//! The document tree produced by one serialization pass.
//!
//! ## Menu
//!
//! - [`Document`]: an immutable tree with a `TraceData` root element.
//! - [`Element`], [`Attribute`], [`Node`]: the tree itself.
//! - [`DocWriter`]: the structured writer the engine writes into.

// -----------------------------------------------------------------------------
// Modules

mod render;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use writer::DocWriter;

use alloc::string::String;
use alloc::vec::Vec;

use crate::TraceError;

/// Name of the root element of every document.
pub const ROOT_NAME: &str = "TraceData";

/// The namespace declarations carried by the root element.
pub const ROOT_NAMESPACES: [(&str, &str); 2] = [
    ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("xmlns:ser", "http://schemas.microsoft.com/2003/10/Serialization/"),
];

// -----------------------------------------------------------------------------
// Attribute

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

// -----------------------------------------------------------------------------
// Node

/// A child node of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Text rendered as a CDATA section.
    CData(String),
}

// -----------------------------------------------------------------------------
// Element

/// An element with its attributes and children, in writing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns the value of the attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Iterates over the child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Returns the first child element named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// Iterates over the child elements named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |element| element.name == name)
    }

    /// Concatenates the direct text and CDATA children.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in &self.children {
            if let Node::Text(part) | Node::CData(part) = node {
                text.push_str(part);
            }
        }
        text
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
    }

    pub(crate) fn push_node(&mut self, node: Node) {
        self.children.push(node);
    }
}

// -----------------------------------------------------------------------------
// Document

/// A fully materialized document.
///
/// Built by exactly one serialization pass and never mutated afterwards, so
/// rendering it twice yields identical text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Creates a document whose root carries the fixed namespace
    /// declarations and the given children.
    pub fn with_children(children: Vec<Node>) -> Self {
        let mut root = Element::new(ROOT_NAME);
        for (name, value) in ROOT_NAMESPACES {
            root.push_attribute(name, value);
        }
        root.children = children;
        Self { root }
    }

    /// The root element.
    #[inline]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Renders the document as indented UTF-8 text.
    pub fn render(&self, indent: usize) -> Result<String, TraceError> {
        render::render_document(self, indent)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::{Document, Element, Node};

    #[test]
    fn root_namespaces() {
        let doc = Document::with_children(vec![]);
        assert_eq!(doc.root().name(), "TraceData");
        assert_eq!(
            doc.root().attribute("xmlns:xsi"),
            Some("http://www.w3.org/2001/XMLSchema-instance")
        );
        assert_eq!(
            doc.root().attribute("xmlns:ser"),
            Some("http://schemas.microsoft.com/2003/10/Serialization/")
        );
    }

    #[test]
    fn element_queries() {
        let mut item = Element::new("Item");
        item.push_node(Node::Text(String::from("a")));
        item.push_node(Node::CData(String::from("b")));
        let mut list = Element::new("List");
        list.push_attribute("type", "demo");
        list.push_node(Node::Element(item.clone()));
        list.push_node(Node::Element(Element::new("Other")));
        list.push_node(Node::Element(item));

        assert_eq!(list.attribute("type"), Some("demo"));
        assert_eq!(list.elements().count(), 3);
        assert_eq!(list.children_named("Item").count(), 2);
        assert_eq!(list.child("Item").map(Element::text).as_deref(), Some("ab"));
        assert!(list.child("Missing").is_none());
    }
}
