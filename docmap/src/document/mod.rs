//! Format-neutral document model.
//!
//! Reading goes through [`Node`], which every format adapter implements on
//! its own parsed tree. Writing goes through [`Value`] and [`Object`]: the
//! engine builds a neutral tree in declaration order and the adapter
//! serializes it.

mod value;

pub use value::{Object, Value};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::borrow::Cow;
use std::fmt;

/// Shape of a single document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Keyed children.
    Object,
    /// Ordered children.
    Array,
    /// Text scalar.
    String,
    /// Integer or floating point scalar.
    Number,
    /// Boolean scalar.
    Bool,
    /// Explicit null, or an empty node in formats without a null literal.
    Null,
    /// Raw bytes.
    Binary,
}

impl NodeKind {
    /// Lower-case name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Null => "null",
            Self::Binary => "binary",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of one node in a parsed document.
///
/// Each accessor returns `None` when the node cannot produce the requested
/// shape. Adapters may coerce between scalar representations (for example
/// JSON accepts numeric strings and XML parses every scalar from text); the
/// coercions are documented on each adapter. Callers turn `None` into a
/// [`crate::DocError::TypeMismatch`] carrying the current path.
pub trait Node {
    /// Shape of this node.
    fn kind(&self) -> NodeKind;

    /// Child stored under `key`, when this node is an object holding it.
    fn child(&self, key: &str) -> Option<&dyn Node>;

    /// Whether `key` exists, regardless of the child being null.
    fn has_key(&self, key: &str) -> bool {
        self.child(key).is_some()
    }

    /// Children of an array node, in document order.
    fn elements(&self) -> Option<Vec<&dyn Node>>;

    /// Children of a sequence that is itself an item of a sequence.
    ///
    /// Formats with native arrays read nested ones like any other, so the
    /// default is [`Node::elements`]. XML overrides it because an inner
    /// sequence is written as one element holding `<item>` children.
    fn items(&self) -> Option<Vec<&dyn Node>> {
        self.elements()
    }

    /// Key/child pairs of an object node.
    fn entries(&self) -> Option<Vec<(&str, &dyn Node)>>;

    /// Boolean value of a scalar node.
    fn read_bool(&self) -> Option<bool>;

    /// Signed integer value of a scalar node.
    fn read_i64(&self) -> Option<i64>;

    /// Unsigned integer value of a scalar node.
    fn read_u64(&self) -> Option<u64>;

    /// Floating point value of a scalar node.
    fn read_f64(&self) -> Option<f64>;

    /// Text value of a scalar node.
    fn read_str(&self) -> Option<Cow<'_, str>>;

    /// Byte content of a binary node.
    fn read_bytes(&self) -> Option<Cow<'_, [u8]>>;

    /// Whether the node is null.
    fn is_null(&self) -> bool {
        self.kind() == NodeKind::Null
    }
}

/// Encode bytes for text formats.
pub(crate) fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode bytes carried as text; `None` when `text` is not valid base64.
pub(crate) fn decode_base64(text: &str) -> Option<Vec<u8>> {
    STANDARD.decode(text.trim()).ok()
}

/// Largest magnitude an `f64` holds without losing integer precision.
const F64_EXACT_INT: i64 = 1 << 53;

/// Widen an integer to `f64` when no precision is lost.
#[expect(
    clippy::cast_precision_loss,
    reason = "only integers within the exact f64 range are converted"
)]
pub(crate) fn exact_f64(number: i64) -> Option<f64> {
    (-F64_EXACT_INT..=F64_EXACT_INT)
        .contains(&number)
        .then_some(number as f64)
}
