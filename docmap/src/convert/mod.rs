//! Conversions between Rust values and document nodes.
//!
//! [`Decode`] merges a node into an existing value, [`Encode`] produces a
//! neutral [`Value`], and [`Describe`] reports the shape for code
//! generators. Records get all three through blanket impls over
//! [`Record`].

mod collections;
mod scalar;

pub use scalar::Binary;

use crate::context::{DecodeContext, EncodeContext};
use crate::document::{Node, Value};
use crate::engine;
use crate::presence::{PresenceSet, Tracked};
use crate::record::Record;
use crate::schema::{RecordRef, ValueType};
use crate::DocResult;

/// Read a document node into an existing value.
pub trait Decode {
    /// Overwrite `self` (or merge into it, for records) from `node`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocError::TypeMismatch`] when `node` cannot
    /// produce this type, or any error raised by nested records.
    fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()>;
}

/// Produce a neutral document value.
pub trait Encode {
    /// Encode `self` for the format in `cx`.
    fn encode(&self, cx: &EncodeContext<'_>) -> Value;
}

/// Report the document shape of a type.
pub trait Describe {
    /// Shape of values of this type.
    fn describe() -> ValueType;
}

impl<R: Record> Decode for R {
    fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()> {
        let mut presence = PresenceSet::new();
        engine::decode_record(self, node, cx, &mut presence)
    }
}

impl<R: Record> Encode for R {
    fn encode(&self, cx: &EncodeContext<'_>) -> Value {
        Value::Object(engine::encode_record(self, cx))
    }
}

impl<R: Record> Describe for R {
    fn describe() -> ValueType {
        ValueType::Record(RecordRef::of::<R>())
    }
}

impl<R: Record> Decode for Tracked<R> {
    fn decode(&mut self, node: &dyn Node, cx: &mut DecodeContext) -> DocResult<()> {
        let (record, presence) = self.parts_mut();
        engine::decode_record(record, node, cx, presence)
    }
}

impl<R: Record> Encode for Tracked<R> {
    fn encode(&self, cx: &EncodeContext<'_>) -> Value {
        Value::Object(engine::encode_record(&**self, cx))
    }
}

impl<R: Record> Describe for Tracked<R> {
    fn describe() -> ValueType {
        R::describe()
    }
}

#[cfg(test)]
mod tests;
