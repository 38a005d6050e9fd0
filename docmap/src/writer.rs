//! Incremental construction of an output document.

use std::marker::PhantomData;

use crate::context::EncodeContext;
use crate::document::{Object, Value};
use crate::engine;
use crate::format::{Adapter, Indent};
use crate::record::Record;
use crate::DocResult;

/// Builds a neutral tree for adapter `A` and serializes it.
///
/// # Examples
///
/// ```
/// use docmap::format::json::Json;
/// use docmap::{DocumentWriter, Indent};
///
/// let mut writer = DocumentWriter::<Json>::new(Indent::Compact);
/// writer.set_child("answer", 42_i64);
/// let bytes = writer.to_bytes("").expect("JSON can hold integers");
/// assert_eq!(bytes, br#"{"answer":42}"#);
/// ```
#[derive(Debug)]
pub struct DocumentWriter<A> {
    root: Object,
    attributes: Object,
    indent: Indent,
    adapter: PhantomData<fn() -> A>,
}

impl<A: Adapter> DocumentWriter<A> {
    /// Start an empty document.
    #[must_use]
    pub const fn new(indent: Indent) -> Self {
        Self {
            root: Object::new(),
            attributes: Object::new(),
            indent,
            adapter: PhantomData,
        }
    }

    /// Add a context attribute visible to field conditions.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Append a child to the document root.
    pub fn set_child(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.root.insert(name, value);
    }

    /// Append the fields of `record` to the document root.
    pub fn encode<R: Record>(&mut self, record: &R) {
        let cx = EncodeContext::new(A::FORMAT, &self.attributes);
        for (key, value) in engine::encode_record(record, &cx) {
            self.root.insert(key, value);
        }
    }

    /// The document built so far.
    #[must_use]
    pub const fn root(&self) -> &Object {
        &self.root
    }

    /// Serialize the document, naming or nesting it under `root_name`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocError::Write`] when the format cannot represent
    /// a value in the tree.
    pub fn to_bytes(&self, root_name: &str) -> DocResult<Vec<u8>> {
        A::render(&self.root, root_name, self.indent)
    }
}
