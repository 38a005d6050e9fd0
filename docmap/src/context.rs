//! Per-call state threaded through decoding and encoding.

use crate::document::{Node, Object};
use crate::error::DocError;
use crate::format::Format;
use crate::DocResult;

#[derive(Debug, Clone)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Decode state: the active format and the path of the node being read.
///
/// Every error raised through the context carries the current path, so a
/// failure deep inside nested records reports where it happened
/// (`$.addresses[1].city`).
#[derive(Debug, Clone)]
pub struct DecodeContext {
    format: Format,
    segments: Vec<Segment>,
}

impl DecodeContext {
    /// Start at the document root.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self {
            format,
            segments: Vec::new(),
        }
    }

    /// Format of the document being decoded.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Current location in JSONPath-like notation.
    #[must_use]
    pub fn path(&self) -> String {
        let mut path = String::from("$");
        for segment in &self.segments {
            match segment {
                Segment::Key(key) => {
                    path.push('.');
                    path.push_str(key);
                }
                Segment::Index(index) => {
                    path.push('[');
                    path.push_str(&index.to_string());
                    path.push(']');
                }
            }
        }
        path
    }

    /// Whether the node being read is an item of a sequence.
    #[must_use]
    pub fn in_sequence(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Index(_)))
    }

    /// Run `f` one object level deeper, under `key`.
    ///
    /// # Errors
    ///
    /// Propagates whatever `f` returns.
    pub fn with_key<T>(
        &mut self,
        key: &str,
        f: impl FnOnce(&mut Self) -> DocResult<T>,
    ) -> DocResult<T> {
        self.segments.push(Segment::Key(key.to_owned()));
        let result = f(self);
        self.segments.pop();
        result
    }

    /// Run `f` one array level deeper, at `index`.
    ///
    /// # Errors
    ///
    /// Propagates whatever `f` returns.
    pub fn with_index<T>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut Self) -> DocResult<T>,
    ) -> DocResult<T> {
        self.segments.push(Segment::Index(index));
        let result = f(self);
        self.segments.pop();
        result
    }

    /// Child of `node` under `key`, failing when it is absent.
    ///
    /// Use [`Node::has_key`] first when absence is a legal outcome.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::KeyNotFound`] when `node` holds no such key.
    pub fn child<'n>(&self, node: &'n dyn Node, key: &str) -> DocResult<&'n dyn Node> {
        node.child(key).ok_or_else(|| self.key_not_found(key))
    }

    /// A [`DocError::TypeMismatch`] for `node` at the current path.
    #[must_use]
    pub fn mismatch(&self, expected: &'static str, node: &dyn Node) -> DocError {
        DocError::TypeMismatch {
            path: self.path(),
            expected,
            found: node.kind(),
        }
    }

    /// A [`DocError::KeyNotFound`] for `key` at the current path.
    #[must_use]
    pub fn key_not_found(&self, key: &str) -> DocError {
        DocError::KeyNotFound {
            path: self.path(),
            key: key.to_owned(),
        }
    }

    /// A [`DocError::MissingRequiredField`] for `name` at the current path.
    #[must_use]
    pub fn missing(&self, name: &str) -> DocError {
        DocError::MissingRequiredField {
            path: self.path(),
            name: name.to_owned(),
        }
    }
}

/// Encode state: the target format and the writer's context attributes.
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext<'a> {
    format: Format,
    attributes: &'a Object,
}

impl<'a> EncodeContext<'a> {
    /// Context for `format` carrying the given attributes.
    #[must_use]
    pub const fn new(format: Format, attributes: &'a Object) -> Self {
        Self { format, attributes }
    }

    /// Format being written.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Attributes supplied by the writer for condition evaluation.
    #[must_use]
    pub const fn attributes(&self) -> &'a Object {
        self.attributes
    }
}
