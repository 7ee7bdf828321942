//! HTML document tree.
//!
//! A [`Node`] is either a [`LeafNode`] holding text or a [`ParentNode`]
//! owning an ordered list of children. Trees are built once, bottom-up, and
//! rendered with [`Node::to_html`]. Rendering is a pure function of the tree.
//!
//! Text and attribute values are written as-is; nothing is escaped.

use std::fmt::{self, Write};

/// Ordered attribute list, rendered in insertion order.
pub type Attributes = Vec<(String, String)>;

/// Elements that never have content and render as `<tag ... />`.
const VOID_ELEMENTS: &[&str] = &["img", "br", "hr"];

/// A node in the HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Text, optionally wrapped in a single tag.
    Leaf(LeafNode),
    /// Element with child nodes.
    Parent(ParentNode),
}

/// A node without children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    /// Wrapping tag; `None` emits the raw value.
    pub tag: Option<String>,
    /// Text content.
    pub value: String,
    /// Attributes in render order.
    pub attributes: Attributes,
}

/// An element whose content is the concatenation of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentNode {
    /// Element tag.
    pub tag: String,
    /// Owned children in document order.
    pub children: Vec<Node>,
    /// Attributes in render order.
    pub attributes: Attributes,
}

impl Node {
    /// Untagged text.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Leaf(LeafNode {
            tag: None,
            value: value.into(),
            attributes: Vec::new(),
        })
    }

    /// Text wrapped in `tag`.
    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Leaf(LeafNode {
            tag: Some(tag.into()),
            value: value.into(),
            attributes: Vec::new(),
        })
    }

    /// Element `tag` containing `children`.
    pub fn parent(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Parent(ParentNode {
            tag: tag.into(),
            children,
            attributes: Vec::new(),
        })
    }

    /// Append an attribute, keeping insertion order.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes_mut().push((name.into(), value.into()));
        self
    }

    /// The node's tag, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf(leaf) => leaf.tag.as_deref(),
            Node::Parent(parent) => Some(&parent.tag),
        }
    }

    /// The node's attributes.
    pub fn attributes(&self) -> &[(String, String)] {
        match self {
            Node::Leaf(leaf) => &leaf.attributes,
            Node::Parent(parent) => &parent.attributes,
        }
    }

    /// Children of a parent; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Parent(parent) => &parent.children,
        }
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        match self {
            Node::Leaf(leaf) => &mut leaf.attributes,
            Node::Parent(parent) => &mut parent.attributes,
        }
    }

    /// Render the subtree to an HTML string.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Render the subtree, appending to `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Leaf(leaf) => match &leaf.tag {
                None => out.push_str(&leaf.value),
                Some(tag) if leaf.value.is_empty() && is_void_element(tag) => {
                    out.push('<');
                    out.push_str(tag);
                    write_attributes(&leaf.attributes, out);
                    out.push_str(" />");
                }
                Some(tag) => {
                    open_tag(tag, &leaf.attributes, out);
                    out.push_str(&leaf.value);
                    close_tag(tag, out);
                }
            },
            Node::Parent(parent) => {
                open_tag(&parent.tag, &parent.attributes, out);
                for child in &parent.children {
                    child.write_html(out);
                }
                close_tag(&parent.tag, out);
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn open_tag(tag: &str, attributes: &[(String, String)], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    write_attributes(attributes, out);
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_attributes(attributes: &[(String, String)], out: &mut String) {
    for (name, value) in attributes {
        // Writing to a String cannot fail.
        let _ = write!(out, r#" {name}="{value}""#);
    }
}
