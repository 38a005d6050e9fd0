//! Top-level entry points, one set per format.
//!
//! `from_*` decode into a fresh `R::default()`, `load_*` merge into an
//! existing [`Tracked`] record, and `to_*` encode a record. All of them
//! are thin wrappers over [`decode`] and [`encode`], which work with any
//! [`Adapter`].

use std::borrow::Cow;

use camino::Utf8Path;

use crate::context::DecodeContext;
use crate::convert::Decode;
use crate::document::Node;
use crate::error::DocError;
use crate::format::{Adapter, Format, Indent};
use crate::presence::Tracked;
use crate::record::Record;
use crate::writer::DocumentWriter;
use crate::DocResult;

/// Where a text document comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    /// The document itself.
    Text(&'a str),
    /// A file holding the document.
    File(&'a Utf8Path),
}

impl<'a> Source<'a> {
    /// Interpret `source` as a path when `is_file` is set, else as text.
    #[must_use]
    pub fn new(source: &'a str, is_file: bool) -> Self {
        if is_file {
            Self::File(Utf8Path::new(source))
        } else {
            Self::Text(source)
        }
    }

    /// Bytes of the document.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Io`] when a file source cannot be read.
    pub fn read(&self) -> DocResult<Cow<'a, [u8]>> {
        match *self {
            Self::Text(text) => Ok(Cow::Borrowed(text.as_bytes())),
            Self::File(path) => std::fs::read(path)
                .map(Cow::Owned)
                .map_err(|source| DocError::Io {
                    path: path.to_path_buf(),
                    source,
                }),
        }
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a Utf8Path> for Source<'a> {
    fn from(path: &'a Utf8Path) -> Self {
        Self::File(path)
    }
}

/// Decode a parsed document into `target`, rebuilding its presence set.
///
/// # Errors
///
/// Returns the first error raised while walking the record's fields.
pub fn decode_document<R: Record>(
    document: &dyn Node,
    format: Format,
    target: &mut Tracked<R>,
) -> DocResult<()> {
    let mut cx = DecodeContext::new(format);
    target.decode(document, &mut cx)
}

/// Parse `input` with adapter `A` and merge it into `target`.
///
/// # Errors
///
/// Returns [`DocError::Parse`] for malformed input, or the first error
/// raised while decoding.
pub fn decode<A: Adapter, R: Record>(input: &[u8], target: &mut Tracked<R>) -> DocResult<()> {
    let document = A::parse(input)?;
    decode_document(&document, A::FORMAT, target)
}

/// Encode `record` with adapter `A`.
///
/// # Errors
///
/// Returns [`DocError::Write`] when the format cannot represent a value.
pub fn encode<A: Adapter, R: Record>(
    record: &R,
    root_name: &str,
    indent: Indent,
) -> DocResult<Vec<u8>> {
    let mut writer = DocumentWriter::<A>::new(indent);
    writer.encode(record);
    writer.to_bytes(root_name)
}

#[cfg(any(feature = "json", feature = "xml", feature = "config"))]
fn into_text(format: Format, bytes: Vec<u8>) -> DocResult<String> {
    String::from_utf8(bytes).map_err(|err| DocError::write(format, err.to_string()))
}

#[cfg(any(feature = "json", feature = "xml", feature = "config"))]
fn fresh<R: Record>(load: impl FnOnce(&mut Tracked<R>) -> DocResult<()>) -> DocResult<Tracked<R>> {
    let mut target = Tracked::new(R::default());
    load(&mut target)?;
    Ok(target)
}

#[cfg(feature = "json")]
mod json_api {
    use super::*;
    use crate::format::json::Json;

    /// Decode a JSON document into a new record.
    ///
    /// # Errors
    ///
    /// See [`load_json`].
    pub fn from_json<R: Record>(source: Source<'_>) -> DocResult<Tracked<R>> {
        fresh(|target| load_json(source, target))
    }

    /// Merge a JSON document into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Io`], [`DocError::Parse`], or the first
    /// decoding error.
    pub fn load_json<R: Record>(source: Source<'_>, target: &mut Tracked<R>) -> DocResult<()> {
        decode::<Json, R>(&source.read()?, target)
    }

    /// Encode `record` as JSON, nested under `root_name` when it is not
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Write`] if serialization fails.
    pub fn to_json<R: Record>(record: &R, root_name: &str, indent: Indent) -> DocResult<String> {
        into_text(Format::Json, encode::<Json, R>(record, root_name, indent)?)
    }
}

#[cfg(feature = "xml")]
mod xml_api {
    use super::*;
    use crate::format::xml::Xml;

    /// Decode an XML document into a new record.
    ///
    /// # Errors
    ///
    /// See [`load_xml`].
    pub fn from_xml<R: Record>(source: Source<'_>) -> DocResult<Tracked<R>> {
        fresh(|target| load_xml(source, target))
    }

    /// Merge an XML document into `target`. The document element's name
    /// is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Io`], [`DocError::Parse`], or the first
    /// decoding error.
    pub fn load_xml<R: Record>(source: Source<'_>, target: &mut Tracked<R>) -> DocResult<()> {
        decode::<Xml, R>(&source.read()?, target)
    }

    /// Encode `record` as XML with document element `root_name`, or
    /// [`Record::TYPE_NAME`] when `root_name` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Write`] when a key is not a valid element name.
    pub fn to_xml<R: Record>(record: &R, root_name: &str, indent: Indent) -> DocResult<String> {
        let root = if root_name.is_empty() { R::TYPE_NAME } else { root_name };
        into_text(Format::Xml, encode::<Xml, R>(record, root, indent)?)
    }
}

#[cfg(feature = "bson")]
mod bson_api {
    use super::*;
    use crate::format::bson::Bson;

    /// Decode a BSON document into a new record.
    ///
    /// A `length` of zero reads the length from the document's own prefix.
    ///
    /// # Errors
    ///
    /// See [`load_bson`].
    pub fn from_bson<R: Record>(data: &[u8], length: usize) -> DocResult<Tracked<R>> {
        let mut target = Tracked::new(R::default());
        load_bson(data, length, &mut target)?;
        Ok(target)
    }

    /// Merge a BSON document held in the first `length` bytes of `data`
    /// into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Parse`] for a short or malformed buffer, or the
    /// first decoding error.
    pub fn load_bson<R: Record>(
        data: &[u8],
        length: usize,
        target: &mut Tracked<R>,
    ) -> DocResult<()> {
        let document = Bson::parse_with_length(data, length)?;
        decode_document(&document, Format::Bson, target)
    }

    /// Encode `record` as a BSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Write`] for unsigned values above `i64::MAX`.
    pub fn to_bson<R: Record>(record: &R) -> DocResult<Vec<u8>> {
        encode::<Bson, R>(record, "", Indent::Compact)
    }
}

#[cfg(feature = "config")]
mod config_api {
    use super::*;
    use crate::format::config::Config;

    /// Decode a configuration document into a new record.
    ///
    /// # Errors
    ///
    /// See [`load_config_at`].
    pub fn from_config<R: Record>(source: Source<'_>) -> DocResult<Tracked<R>> {
        from_config_at(source, "")
    }

    /// Decode the table at dotted path `root` into a new record.
    ///
    /// # Errors
    ///
    /// See [`load_config_at`].
    pub fn from_config_at<R: Record>(source: Source<'_>, root: &str) -> DocResult<Tracked<R>> {
        fresh(|target| load_config_at(source, root, target))
    }

    /// Merge a configuration document into `target`.
    ///
    /// # Errors
    ///
    /// See [`load_config_at`].
    pub fn load_config<R: Record>(source: Source<'_>, target: &mut Tracked<R>) -> DocResult<()> {
        load_config_at(source, "", target)
    }

    /// Merge the table at dotted path `root` into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Io`] for unreadable files, [`DocError::Config`]
    /// carrying figment's error for invalid documents or missing paths,
    /// or the first decoding error.
    pub fn load_config_at<R: Record>(
        source: Source<'_>,
        root: &str,
        target: &mut Tracked<R>,
    ) -> DocResult<()> {
        let document = Config::parse_at(&source.read()?, root)?;
        decode_document(&document, Format::Config, target)
    }

    /// Encode `record` as TOML, nested under the dotted path `root_name`.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Write`] for values TOML cannot hold.
    pub fn to_config<R: Record>(record: &R, root_name: &str, indent: Indent) -> DocResult<String> {
        into_text(Format::Config, encode::<Config, R>(record, root_name, indent)?)
    }
}

#[cfg(feature = "bson")]
pub use bson_api::{from_bson, load_bson, to_bson};
#[cfg(feature = "config")]
pub use config_api::{from_config, from_config_at, load_config, load_config_at, to_config};
#[cfg(feature = "json")]
pub use json_api::{from_json, load_json, to_json};
#[cfg(feature = "xml")]
pub use xml_api::{from_xml, load_xml, to_xml};
