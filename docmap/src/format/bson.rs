//! BSON adapter backed by the `bson` crate.
//!
//! Int32, Int64 and Double values read as one another when the conversion
//! is lossless. Strings are never coerced to numbers. Binary fields map to
//! generic BSON binary, and object ids read as their hex text. When the
//! engine writes a key twice the last value wins and keeps the first
//! position.

use std::borrow::Cow;

use bson::spec::BinarySubtype;
use bson::{Bson as BsonValue, Document};

use super::{Adapter, Format, Indent};
use crate::document::{Node, NodeKind, Object, Value, exact_f64};
use crate::error::DocError;
use crate::DocResult;

/// The BSON format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bson;

impl Bson {
    /// Parse a document from the first `length` bytes of `data`.
    ///
    /// A `length` of zero reads the document's own length prefix, so
    /// trailing bytes after the document are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Parse`] when `data` is shorter than `length` or
    /// does not hold a valid document.
    pub fn parse_with_length(data: &[u8], length: usize) -> DocResult<Document> {
        let bytes = if length == 0 {
            data
        } else {
            data.get(..length).ok_or_else(|| {
                DocError::parse(
                    Format::Bson,
                    format!("buffer holds {} bytes, {length} requested", data.len()),
                )
            })?
        };
        Document::from_reader(bytes).map_err(|err| DocError::parse(Format::Bson, err))
    }
}

impl Adapter for Bson {
    const FORMAT: Format = Format::Bson;
    type Document = Document;

    fn parse(input: &[u8]) -> DocResult<Self::Document> {
        Self::parse_with_length(input, 0)
    }

    fn render(root: &Object, root_name: &str, _indent: Indent) -> DocResult<Vec<u8>> {
        let mut document = to_document(root)?;
        if !root_name.is_empty() {
            let mut outer = Document::new();
            outer.insert(root_name, document);
            document = outer;
        }
        let mut out = Vec::new();
        document
            .to_writer(&mut out)
            .map_err(|err| DocError::write(Format::Bson, err.to_string()))?;
        Ok(out)
    }
}

fn to_document(object: &Object) -> DocResult<Document> {
    let mut document = Document::new();
    for (key, value) in object.deduplicated() {
        document.insert(key, to_bson(value)?);
    }
    Ok(document)
}

fn to_bson(value: &Value) -> DocResult<BsonValue> {
    Ok(match value {
        Value::Null => BsonValue::Null,
        Value::Bool(flag) => BsonValue::Boolean(*flag),
        Value::Int(number) => integer(*number),
        Value::UInt(number) => i64::try_from(*number).map(integer).map_err(|_| {
            DocError::write(Format::Bson, format!("{number} does not fit a signed 64-bit integer"))
        })?,
        Value::Float(number) => BsonValue::Double(*number),
        Value::String(text) => BsonValue::String(text.clone()),
        Value::Binary(bytes) => BsonValue::Binary(bson::Binary {
            subtype: BinarySubtype::Generic,
            bytes: bytes.clone(),
        }),
        Value::Array(items) => {
            BsonValue::Array(items.iter().map(to_bson).collect::<DocResult<_>>()?)
        }
        Value::Object(object) => BsonValue::Document(to_document(object)?),
    })
}

/// Smallest BSON integer type holding `number`.
fn integer(number: i64) -> BsonValue {
    i32::try_from(number).map_or(BsonValue::Int64(number), BsonValue::Int32)
}

/// `i64::MIN` as a double.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
/// `i64::MAX + 1` as a double, the first value past the range.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

#[expect(
    clippy::cast_possible_truncation,
    reason = "the range and fraction checks make the cast exact"
)]
fn exact_i64(number: f64) -> Option<i64> {
    let in_range = (I64_LOWER..I64_UPPER).contains(&number);
    (in_range && number.fract() == 0.0).then_some(number as i64)
}

impl Node for BsonValue {
    fn kind(&self) -> NodeKind {
        match self {
            Self::Double(_)
            | Self::Int32(_)
            | Self::Int64(_)
            | Self::Decimal128(_)
            | Self::DateTime(_)
            | Self::Timestamp(_) => NodeKind::Number,
            Self::String(_)
            | Self::Symbol(_)
            | Self::ObjectId(_)
            | Self::RegularExpression(_)
            | Self::JavaScriptCode(_) => NodeKind::String,
            Self::Boolean(_) => NodeKind::Bool,
            Self::Array(_) => NodeKind::Array,
            Self::Document(_) | Self::JavaScriptCodeWithScope(_) | Self::DbPointer(_) => {
                NodeKind::Object
            }
            Self::Binary(_) => NodeKind::Binary,
            Self::Null | Self::Undefined | Self::MaxKey | Self::MinKey => NodeKind::Null,
        }
    }

    fn child(&self, key: &str) -> Option<&dyn Node> {
        match self {
            Self::Document(document) => document.child(key),
            _ => None,
        }
    }

    fn elements(&self) -> Option<Vec<&dyn Node>> {
        match self {
            Self::Array(items) => Some(items.iter().map(|item| item as &dyn Node).collect()),
            _ => None,
        }
    }

    fn entries(&self) -> Option<Vec<(&str, &dyn Node)>> {
        match self {
            Self::Document(document) => document.entries(),
            _ => None,
        }
    }

    fn read_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(flag) => Some(*flag),
            _ => None,
        }
    }

    fn read_i64(&self) -> Option<i64> {
        match self {
            Self::Int32(number) => Some(i64::from(*number)),
            Self::Int64(number) => Some(*number),
            Self::Double(number) => exact_i64(*number),
            Self::DateTime(when) => Some(when.timestamp_millis()),
            _ => None,
        }
    }

    fn read_u64(&self) -> Option<u64> {
        self.read_i64().and_then(|number| u64::try_from(number).ok())
    }

    fn read_f64(&self) -> Option<f64> {
        match self {
            Self::Double(number) => Some(*number),
            Self::Int32(number) => Some(f64::from(*number)),
            Self::Int64(number) => exact_f64(*number),
            _ => None,
        }
    }

    fn read_str(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::String(text) | Self::Symbol(text) | Self::JavaScriptCode(text) => {
                Some(Cow::Borrowed(text))
            }
            Self::ObjectId(id) => Some(Cow::Owned(id.to_hex())),
            _ => None,
        }
    }

    fn read_bytes(&self) -> Option<Cow<'_, [u8]>> {
        match self {
            Self::Binary(binary) => Some(Cow::Borrowed(&binary.bytes)),
            _ => None,
        }
    }
}

impl Node for Document {
    fn kind(&self) -> NodeKind {
        NodeKind::Object
    }

    fn child(&self, key: &str) -> Option<&dyn Node> {
        self.get(key).map(|value| value as &dyn Node)
    }

    fn elements(&self) -> Option<Vec<&dyn Node>> {
        None
    }

    fn entries(&self) -> Option<Vec<(&str, &dyn Node)>> {
        Some(
            self.iter()
                .map(|(key, value)| (key.as_str(), value as &dyn Node))
                .collect(),
        )
    }

    fn read_bool(&self) -> Option<bool> {
        None
    }

    fn read_i64(&self) -> Option<i64> {
        None
    }

    fn read_u64(&self) -> Option<u64> {
        None
    }

    fn read_f64(&self) -> Option<f64> {
        None
    }

    fn read_str(&self) -> Option<Cow<'_, str>> {
        None
    }

    fn read_bytes(&self) -> Option<Cow<'_, [u8]>> {
        None
    }
}
