//! XML adapter backed by `quick-xml`.
//!
//! The document element is the record; its child elements and attributes
//! are the record's keys. Every scalar is text: numbers are parsed from it
//! and booleans accept `true`, `false`, `1` and `0`. Binary content is
//! base64 text.
//!
//! Sequences are repeated sibling elements, and a lone element read as a
//! sequence is a one-element sequence. An empty sequence writes no
//! elements at all. A sequence nested inside another is one element per
//! inner sequence holding an `<item>` child per value, so `[[1, 2], []]`
//! under `grid` is `<grid><item>1</item><item>2</item></grid><grid/>`.
//! Whether `<item>` children are unwrapped depends only on where the
//! element sits, never on its content.
//!
//! An empty element reads as null where an optional value or a record is
//! expected and as one empty item inside a sequence. Text content is
//! trimmed, so leading and trailing whitespace is not preserved, and
//! `Some(String::new())` reads back as `None`.

mod reader;
mod writer;

use std::borrow::Cow;

use super::{Adapter, Format, Indent};
use crate::document::{Node, NodeKind, Object, decode_base64};
use crate::DocResult;

/// Name of the elements holding the values of a nested sequence.
const ITEM: &str = "item";

/// The XML format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xml;

impl Adapter for Xml {
    const FORMAT: Format = Format::Xml;
    type Document = XmlDocument;

    fn parse(input: &[u8]) -> DocResult<Self::Document> {
        reader::parse(input)
    }

    fn render(root: &Object, root_name: &str, indent: Indent) -> DocResult<Vec<u8>> {
        writer::render(root, root_name, indent).map(String::into_bytes)
    }
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    name: String,
    root: XmlNode,
}

impl XmlDocument {
    /// Name of the document element.
    #[must_use]
    pub fn root_name(&self) -> &str {
        &self.name
    }

    /// The document element.
    #[must_use]
    pub const fn root(&self) -> &XmlNode {
        &self.root
    }
}

/// One element with its attributes, child elements and text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    attributes: Vec<(String, XmlNode)>,
    children: Vec<(String, XmlNode)>,
    text: String,
}

impl XmlElement {
    /// Add a child element. A second child of the same name turns the
    /// entry into a list, preserving document order within the name.
    fn push_child(&mut self, name: String, node: XmlNode) {
        let existing = self
            .children
            .iter_mut()
            .find_map(|(seen, slot)| (*seen == name).then_some(slot));
        match existing {
            Some(XmlNode::List(items)) => items.push(node),
            Some(slot) => {
                let first = std::mem::replace(slot, XmlNode::List(Vec::new()));
                *slot = XmlNode::List(vec![first, node]);
            }
            None => self.children.push((name, node)),
        }
    }

    const fn is_leaf(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }
}

/// A node of a parsed XML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// Attribute value.
    Text(String),
    /// An element.
    Element(XmlElement),
    /// Repeated sibling elements sharing one name.
    List(Vec<XmlNode>),
}

impl XmlNode {
    fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(element) if element.is_leaf() => Some(&element.text),
            _ => None,
        }
    }

    fn parse_text<T: std::str::FromStr>(&self) -> Option<T> {
        self.text()?.parse().ok()
    }
}

impl Node for XmlNode {
    fn kind(&self) -> NodeKind {
        match self {
            Self::Text(_) => NodeKind::String,
            Self::Element(element) if !element.is_leaf() => NodeKind::Object,
            Self::Element(element) if element.text.is_empty() => NodeKind::Null,
            Self::Element(_) => NodeKind::String,
            Self::List(_) => NodeKind::Array,
        }
    }

    fn child(&self, key: &str) -> Option<&dyn Node> {
        let Self::Element(element) = self else {
            return None;
        };
        element
            .children
            .iter()
            .chain(&element.attributes)
            .find_map(|(name, node)| (name == key).then_some(node as &dyn Node))
    }

    fn elements(&self) -> Option<Vec<&dyn Node>> {
        match self {
            Self::List(items) => Some(items.iter().map(|item| item as &dyn Node).collect()),
            Self::Element(_) | Self::Text(_) => Some(vec![self as &dyn Node]),
        }
    }

    fn items(&self) -> Option<Vec<&dyn Node>> {
        let Self::Element(element) = self else {
            return None;
        };
        if !element.attributes.is_empty() || !element.text.is_empty() {
            return None;
        }
        match element.children.as_slice() {
            [] => Some(Vec::new()),
            [(name, values)] if name == ITEM => values.elements(),
            _ => None,
        }
    }

    fn entries(&self) -> Option<Vec<(&str, &dyn Node)>> {
        let Self::Element(element) = self else {
            return None;
        };
        Some(
            element
                .attributes
                .iter()
                .chain(&element.children)
                .map(|(name, node)| (name.as_str(), node as &dyn Node))
                .collect(),
        )
    }

    fn read_bool(&self) -> Option<bool> {
        match self.text()?.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    fn read_i64(&self) -> Option<i64> {
        self.parse_text()
    }

    fn read_u64(&self) -> Option<u64> {
        self.parse_text()
    }

    fn read_f64(&self) -> Option<f64> {
        self.parse_text()
    }

    fn read_str(&self) -> Option<Cow<'_, str>> {
        self.text().map(Cow::Borrowed)
    }

    fn read_bytes(&self) -> Option<Cow<'_, [u8]>> {
        decode_base64(self.text()?).map(Cow::Owned)
    }
}

impl Node for XmlDocument {
    fn kind(&self) -> NodeKind {
        self.root.kind()
    }

    fn child(&self, key: &str) -> Option<&dyn Node> {
        self.root.child(key)
    }

    fn elements(&self) -> Option<Vec<&dyn Node>> {
        self.root.elements()
    }

    fn items(&self) -> Option<Vec<&dyn Node>> {
        self.root.items()
    }

    fn entries(&self) -> Option<Vec<(&str, &dyn Node)>> {
        self.root.entries()
    }

    fn read_bool(&self) -> Option<bool> {
        self.root.read_bool()
    }

    fn read_i64(&self) -> Option<i64> {
        self.root.read_i64()
    }

    fn read_u64(&self) -> Option<u64> {
        self.root.read_u64()
    }

    fn read_f64(&self) -> Option<f64> {
        self.root.read_f64()
    }

    fn read_str(&self) -> Option<Cow<'_, str>> {
        self.root.read_str()
    }

    fn read_bytes(&self) -> Option<Cow<'_, [u8]>> {
        self.root.read_bytes()
    }
}
