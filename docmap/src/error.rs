//! Error types produced while reading and writing documents.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::document::NodeKind;
use crate::format::Format;

/// Errors raised by the adapters and the conversion engine.
///
/// Decoding is fail-fast: the first error stops the traversal and is
/// returned unchanged to the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocError {
    /// The source bytes are not a well-formed document of `format`.
    #[error("failed to parse {format} document: {source}")]
    Parse {
        /// Format whose parser rejected the input.
        format: Format,
        /// Underlying error reported by the parser.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A source file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// File that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A child was requested that the object does not hold.
    #[error("key '{key}' not found at {path}")]
    KeyNotFound {
        /// Location of the object that was searched.
        path: String,
        /// Requested key.
        key: String,
    },

    /// A present node cannot produce the requested shape.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Location of the offending node.
        path: String,
        /// Shape the target type needed.
        expected: &'static str,
        /// Shape the document holds.
        found: NodeKind,
    },

    /// A mandatory field is absent after alias resolution.
    #[error("missing required field '{name}' at {path}")]
    MissingRequiredField {
        /// Location of the object that lacks the field.
        path: String,
        /// Looked-up name: the alias when one is declared.
        name: String,
    },

    /// Configuration loading failed; the figment error is kept intact.
    #[cfg(feature = "config")]
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// The output format cannot represent a value.
    #[error("cannot write {format} document: {message}")]
    Write {
        /// Format that rejected the value.
        format: Format,
        /// Human-readable explanation.
        message: String,
    },
}

/// Result alias used throughout the crate.
pub type DocResult<T> = Result<T, DocError>;

impl DocError {
    /// Construct a [`DocError::Parse`].
    ///
    /// # Examples
    ///
    /// ```
    /// use docmap::{DocError, Format};
    /// let err = DocError::parse(Format::Json, "unexpected end of input");
    /// assert!(matches!(err, DocError::Parse { format: Format::Json, .. }));
    /// ```
    #[must_use]
    pub fn parse(
        format: Format,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Parse {
            format,
            source: source.into(),
        }
    }

    /// Construct a [`DocError::Write`].
    #[must_use]
    pub fn write(format: Format, message: impl Into<String>) -> Self {
        Self::Write {
            format,
            message: message.into(),
        }
    }

    /// Document path attached to the error, when it has one.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::KeyNotFound { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::MissingRequiredField { path, .. } => Some(path),
            _ => None,
        }
    }
}
