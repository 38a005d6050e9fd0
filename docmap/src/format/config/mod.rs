//! Configuration adapter: TOML loaded through `figment`.
//!
//! Documents are parsed with figment's TOML provider and extracted as a
//! `toml::Value`, so parse and extraction failures surface as the original
//! [`figment::Error`] inside [`DocError::Config`]. A dotted root path
//! selects the sub-table to decode.
//!
//! Integers read as floats when the conversion is exact; strings are never
//! coerced. Binary fields are base64 strings and dates read as their TOML
//! text. TOML has no null, so null entries are left out when writing, and
//! a key written twice keeps only its last value.

mod writer;

use std::borrow::Cow;

use figment::Figment;
use figment::providers::{Format as _, Toml};

use super::{Adapter, Format, Indent};
use crate::document::{Node, NodeKind, Object, decode_base64, exact_f64};
use crate::error::DocError;
use crate::DocResult;

/// The configuration format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config;

impl Config {
    /// Parse `input` and select the table at the dotted path `root`.
    ///
    /// An empty `root` selects the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Parse`] for input that is not UTF-8 and
    /// [`DocError::Config`] when figment rejects the document or the path
    /// does not exist.
    pub fn parse_at(input: &[u8], root: &str) -> DocResult<toml::Value> {
        let text = std::str::from_utf8(input).map_err(|err| DocError::parse(Format::Config, err))?;
        let figment = Figment::from(Toml::string(text));
        let extracted = if root.is_empty() {
            figment.extract::<toml::Value>()
        } else {
            figment.extract_inner::<toml::Value>(root)
        };
        extracted.map_err(|err| DocError::Config(Box::new(err)))
    }
}

impl Adapter for Config {
    const FORMAT: Format = Format::Config;
    type Document = toml::Value;

    fn parse(input: &[u8]) -> DocResult<Self::Document> {
        Self::parse_at(input, "")
    }

    fn render(root: &Object, root_name: &str, indent: Indent) -> DocResult<Vec<u8>> {
        writer::render(root, root_name, indent).map(String::into_bytes)
    }
}

impl Node for toml::Value {
    fn kind(&self) -> NodeKind {
        match self {
            Self::String(_) | Self::Datetime(_) => NodeKind::String,
            Self::Integer(_) | Self::Float(_) => NodeKind::Number,
            Self::Boolean(_) => NodeKind::Bool,
            Self::Array(_) => NodeKind::Array,
            Self::Table(_) => NodeKind::Object,
        }
    }

    fn child(&self, key: &str) -> Option<&dyn Node> {
        self.as_table()?.get(key).map(|value| value as &dyn Node)
    }

    fn elements(&self) -> Option<Vec<&dyn Node>> {
        self.as_array()
            .map(|items| items.iter().map(|item| item as &dyn Node).collect())
    }

    fn entries(&self) -> Option<Vec<(&str, &dyn Node)>> {
        self.as_table().map(|table| {
            table
                .iter()
                .map(|(key, value)| (key.as_str(), value as &dyn Node))
                .collect()
        })
    }

    fn read_bool(&self) -> Option<bool> {
        self.as_bool()
    }

    fn read_i64(&self) -> Option<i64> {
        self.as_integer()
    }

    fn read_u64(&self) -> Option<u64> {
        self.as_integer().and_then(|number| u64::try_from(number).ok())
    }

    fn read_f64(&self) -> Option<f64> {
        match self {
            Self::Float(number) => Some(*number),
            Self::Integer(number) => exact_f64(*number),
            _ => None,
        }
    }

    fn read_str(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::String(text) => Some(Cow::Borrowed(text)),
            Self::Datetime(when) => Some(Cow::Owned(when.to_string())),
            _ => None,
        }
    }

    fn read_bytes(&self) -> Option<Cow<'_, [u8]>> {
        decode_base64(self.as_str()?).map(Cow::Owned)
    }
}
