//! Format adapters and the options they share.
//!
//! Every adapter implements [`Adapter`]: it parses bytes into a tree that
//! implements [`Node`] and renders a neutral [`Object`] back to bytes.

#[cfg(feature = "bson")]
pub mod bson;
#[cfg(feature = "config")]
pub mod config;
#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "xml")]
pub mod xml;

use std::fmt;

use crate::DocResult;
use crate::document::{Node, Object};

/// The document formats known to the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON text.
    Json,
    /// XML text.
    Xml,
    /// BSON binary documents.
    Bson,
    /// TOML configuration files loaded through figment.
    Config,
}

impl Format {
    /// Every format, in the order tags are emitted by the code generator.
    pub const ALL: [Self; 4] = [Self::Json, Self::Bson, Self::Xml, Self::Config];

    /// Tag used in alias strings (`json:_id`).
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Bson => "bson",
            Self::Config => "config",
        }
    }

    /// Look up a format by its alias tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.tag() == tag)
    }

    /// Name under which an aliased field is read and written.
    ///
    /// JSON and BSON use the alias verbatim. XML falls back to `primary`
    /// when the alias is not a valid element name, and the configuration
    /// dialect does the same for aliases containing the `.` path separator.
    #[must_use]
    pub fn alias_name<'a>(self, primary: &'a str, alias: &'a str) -> &'a str {
        let usable = match self {
            Self::Json | Self::Bson => true,
            Self::Xml => is_xml_name(alias),
            Self::Config => !alias.is_empty() && !alias.contains('.'),
        };
        if usable { alias } else { primary }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "JSON",
            Self::Xml => "XML",
            Self::Bson => "BSON",
            Self::Config => "config",
        })
    }
}

/// Whether `name` can be used as an XML element name.
pub(crate) fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | ':'))
}

/// Layout of rendered text documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    /// Everything on as few lines as the format allows.
    #[default]
    Compact,
    /// One entry per line, nested entries indented by `width` copies of
    /// `ch` per level. A width of zero breaks lines without indenting.
    Pretty {
        /// Repetitions of `ch` per nesting level.
        width: usize,
        /// Indentation character, usually a space or a tab.
        ch: char,
    },
}

impl Indent {
    /// Build from the signed width convention: a negative width means
    /// compact output.
    ///
    /// # Examples
    ///
    /// ```
    /// use docmap::Indent;
    /// assert_eq!(Indent::from_width(-1, ' '), Indent::Compact);
    /// assert_eq!(Indent::from_width(2, '\t'), Indent::Pretty { width: 2, ch: '\t' });
    /// ```
    #[must_use]
    pub fn from_width(width: i32, ch: char) -> Self {
        usize::try_from(width).map_or(Self::Compact, |columns| Self::Pretty {
            width: columns,
            ch,
        })
    }

    /// Pretty output with `width` spaces per level.
    #[must_use]
    pub const fn spaces(width: usize) -> Self {
        Self::Pretty { width, ch: ' ' }
    }

    /// Whether entries go on separate lines.
    #[must_use]
    pub const fn is_pretty(self) -> bool {
        matches!(self, Self::Pretty { .. })
    }

    /// Indentation for one nesting level.
    #[must_use]
    pub fn unit(self) -> String {
        match self {
            Self::Compact => String::new(),
            Self::Pretty { width, ch } => std::iter::repeat_n(ch, width).collect(),
        }
    }

    /// Append the indentation for `depth` levels to `out`.
    pub(crate) fn pad(self, out: &mut String, depth: usize) {
        if let Self::Pretty { width, ch } = self {
            out.extend(std::iter::repeat_n(ch, width.saturating_mul(depth)));
        }
    }
}

/// A pluggable document backend.
///
/// Adapters own the bytes-to-tree and tree-to-bytes steps; the conversion
/// engine only ever sees [`Node`] on the way in and [`Object`] on the way
/// out.
pub trait Adapter {
    /// Format handled by this adapter.
    const FORMAT: Format;

    /// Parsed document root.
    type Document: Node;

    /// Parse a complete document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocError::Parse`] when `input` is malformed.
    fn parse(input: &[u8]) -> DocResult<Self::Document>;

    /// Serialize `root`, naming or nesting it under `root_name` as the
    /// format requires.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocError::Write`] when a value cannot be
    /// represented in this format.
    fn render(root: &Object, root_name: &str, indent: Indent) -> DocResult<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-1, Indent::Compact)]
    #[case(-8, Indent::Compact)]
    #[case(0, Indent::Pretty { width: 0, ch: ' ' })]
    #[case(4, Indent::Pretty { width: 4, ch: ' ' })]
    fn width_sign_selects_layout(#[case] width: i32, #[case] expected: Indent) {
        assert_eq!(Indent::from_width(width, ' '), expected);
    }

    #[rstest]
    fn unit_repeats_the_indent_character() {
        assert_eq!(Indent::from_width(2, '\t').unit(), "\t\t");
        assert_eq!(Indent::Compact.unit(), "");
    }

    #[rstest]
    #[case(Format::Json, "_id", "_id")]
    #[case(Format::Bson, "my id", "my id")]
    #[case(Format::Xml, "_id", "_id")]
    #[case(Format::Xml, "1st", "id")]
    #[case(Format::Xml, "my id", "id")]
    #[case(Format::Config, "identifier", "identifier")]
    #[case(Format::Config, "server.id", "id")]
    #[case(Format::Config, "", "id")]
    fn alias_names_follow_format_rules(
        #[case] format: Format,
        #[case] alias: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(format.alias_name("id", alias), expected);
    }

    #[rstest]
    fn tags_round_trip() {
        for format in Format::ALL {
            assert_eq!(Format::from_tag(format.tag()), Some(format));
        }
        assert_eq!(Format::from_tag("yaml"), None);
    }
}
