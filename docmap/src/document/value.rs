//! Write-side document tree.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::borrow::Cow;

use super::{Node, NodeKind, decode_base64, encode_base64};

/// A document node built by the encoder.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value; formats without a null literal drop or empty it.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Text.
    String(String),
    /// Raw bytes.
    Binary(Vec<u8>),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Keyed children in insertion order.
    Object(Object),
}

impl Value {
    /// Shape of this value.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Null => NodeKind::Null,
            Self::Bool(_) => NodeKind::Bool,
            Self::Int(_) | Self::UInt(_) | Self::Float(_) => NodeKind::Number,
            Self::String(_) => NodeKind::String,
            Self::Binary(_) => NodeKind::Binary,
            Self::Array(_) => NodeKind::Array,
            Self::Object(_) => NodeKind::Object,
        }
    }

    /// Borrow the object, if this value is one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

/// Ordered, append-only list of named children.
///
/// [`Object::insert`] never replaces an existing entry, so the order in
/// which the engine writes fields is the order adapters see. When a name is
/// written twice both entries are kept; each adapter decides at
/// serialization time whether to emit both or let the last one win.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    /// Create an empty object.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append `value` under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.push((key.into(), value.into()));
    }

    /// First value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(name, value)| (name == key).then_some(value))
    }

    /// Whether any entry is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == key)
    }

    /// Number of entries, duplicates included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the object has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order, duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Entries with duplicate names collapsed: the last value wins and
    /// keeps the position of the first occurrence.
    #[must_use]
    pub fn deduplicated(&self) -> Vec<(&str, &Value)> {
        let mut out: Vec<(&str, &Value)> = Vec::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            let Some(slot) = out.iter_mut().find(|(seen, _)| *seen == name.as_str()) else {
                out.push((name.as_str(), value));
                continue;
            };
            tracing::warn!(key = %name, "duplicate key overwritten");
            slot.1 = value;
        }
        out
    }

    /// Move `self` under a single key, producing `{ key: self }`.
    #[must_use]
    pub fn nest(self, key: &str) -> Self {
        let mut outer = Self::new();
        outer.insert(key, Value::Object(self));
        outer
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::UInt(value) => serializer.serialize_u64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::Binary(bytes) => serializer.serialize_str(&encode_base64(bytes)),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(object) => object.serialize(serializer),
        }
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The neutral tree is itself readable, which lets callers decode a record
/// from a tree they built by hand or from another record's output.
impl Node for Value {
    fn kind(&self) -> NodeKind {
        Self::kind(self)
    }

    fn child(&self, key: &str) -> Option<&dyn Node> {
        self.as_object()?.get(key).map(|value| value as &dyn Node)
    }

    fn elements(&self) -> Option<Vec<&dyn Node>> {
        match self {
            Self::Array(items) => Some(items.iter().map(|item| item as &dyn Node).collect()),
            _ => None,
        }
    }

    fn entries(&self) -> Option<Vec<(&str, &dyn Node)>> {
        self.as_object().map(|object| {
            object
                .iter()
                .map(|(name, value)| (name, value as &dyn Node))
                .collect()
        })
    }

    fn read_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    fn read_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::UInt(value) => i64::try_from(*value).ok(),
            _ => None,
        }
    }

    fn read_u64(&self) -> Option<u64> {
        match self {
            Self::Int(value) => u64::try_from(*value).ok(),
            Self::UInt(value) => Some(*value),
            _ => None,
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "integers read as floats follow the usual widening semantics"
    )]
    fn read_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            Self::UInt(value) => Some(*value as f64),
            _ => None,
        }
    }

    fn read_str(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::String(value) => Some(Cow::Borrowed(value)),
            _ => None,
        }
    }

    fn read_bytes(&self) -> Option<Cow<'_, [u8]>> {
        match self {
            Self::Binary(bytes) => Some(Cow::Borrowed(bytes)),
            Self::String(text) => decode_base64(text).map(Cow::Owned),
            _ => None,
        }
    }
}
