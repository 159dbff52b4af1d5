use alloc::string::String;
use alloc::vec::Vec;

use super::{Element, Node};

// -----------------------------------------------------------------------------
// DocWriter

/// A forward-only structured writer that builds a node list.
///
/// Elements are opened with [`start_element`](DocWriter::start_element) and
/// closed with [`end_element`](DocWriter::end_element); attributes and
/// content go to the innermost open element. Completed top-level nodes are
/// collected by [`into_nodes`](DocWriter::into_nodes).
///
/// A writer can serve as a detached fragment: build into a fresh writer,
/// then [`append`](DocWriter::append) its nodes to the real target only
/// if the whole attempt succeeded.
///
/// # Examples
///
/// ```
/// use td_trace::document::{DocWriter, Node};
///
/// let mut out = DocWriter::new();
/// out.start_element("Exception");
/// out.attribute("Type", "demo::Failure");
/// out.element_string("Message", "boom");
/// out.end_element();
///
/// let nodes = out.into_nodes();
/// let Node::Element(element) = &nodes[0] else { unreachable!() };
/// assert_eq!(element.child("Message").map(|m| m.text()).as_deref(), Some("boom"));
/// ```
#[derive(Debug, Default)]
pub struct DocWriter {
    stack: Vec<Element>,
    nodes: Vec<Node>,
}

impl DocWriter {
    /// Creates an empty writer.
    #[inline]
    pub const fn new() -> Self {
        Self {
            stack: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Opens a new element inside the current one.
    pub fn start_element(&mut self, name: impl Into<String>) {
        self.stack.push(Element::new(name));
    }

    /// Adds an attribute to the innermost open element.
    ///
    /// Ignored when no element is open.
    pub fn attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        match self.stack.last_mut() {
            Some(element) => element.push_attribute(name, value),
            None => log::warn!("attribute written outside of an element, ignored"),
        }
    }

    /// Adds a text node.
    pub fn text(&mut self, text: impl Into<String>) {
        self.node(Node::Text(text.into()));
    }

    /// Adds a CDATA node.
    pub fn cdata(&mut self, text: impl Into<String>) {
        self.node(Node::CData(text.into()));
    }

    /// Adds a complete node.
    pub fn node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(element) => element.push_node(node),
            None => self.nodes.push(node),
        }
    }

    /// Adds complete nodes, in order.
    pub fn append(&mut self, nodes: Vec<Node>) {
        match self.stack.last_mut() {
            Some(element) => element.children.extend(nodes),
            None => self.nodes.extend(nodes),
        }
    }

    /// Closes the innermost open element.
    pub fn end_element(&mut self) {
        if let Some(element) = self.stack.pop() {
            self.node(Node::Element(element));
        }
    }

    /// Writes `<name>text</name>`.
    pub fn element_string(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.start_element(name);
        self.text(text);
        self.end_element();
    }

    /// Returns the number of open elements.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Closes every open element and returns the written nodes.
    pub fn into_nodes(mut self) -> Vec<Node> {
        while !self.stack.is_empty() {
            self.end_element();
        }
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::DocWriter;
    use crate::document::Node;

    #[test]
    fn nested_elements() {
        let mut out = DocWriter::new();
        out.start_element("Outer");
        out.start_element("Inner");
        out.attribute("Count", "3");
        out.end_element();
        out.cdata("raw");
        out.end_element();
        assert_eq!(out.depth(), 0);

        let nodes = out.into_nodes();
        assert_eq!(nodes.len(), 1);
        let Node::Element(outer) = &nodes[0] else {
            panic!("expected an element");
        };
        assert_eq!(outer.child("Inner").and_then(|e| e.attribute("Count")), Some("3"));
        assert_eq!(outer.text(), "raw");
    }

    #[test]
    fn unclosed_elements_are_closed() {
        let mut out = DocWriter::new();
        out.start_element("A");
        out.start_element("B");
        let nodes = out.into_nodes();
        let Node::Element(a) = &nodes[0] else {
            panic!("expected an element");
        };
        assert!(a.child("B").is_some());
    }

    #[test]
    fn fragments_commit_in_order() {
        let mut fragment = DocWriter::new();
        fragment.element_string("X", "1");
        fragment.element_string("Y", "2");

        let mut out = DocWriter::new();
        out.start_element("Root");
        out.append(fragment.into_nodes());
        out.end_element();

        let nodes = out.into_nodes();
        let Node::Element(root) = &nodes[0] else {
            panic!("expected an element");
        };
        let names: alloc::vec::Vec<&str> = root.elements().map(|e| e.name()).collect();
        assert_eq!(names, ["X", "Y"]);
    }
}
