//! Alias strings and effective key resolution.
//!
//! An alias string holds whitespace-separated entries of the form
//! `[format:]name[,me]`:
//!
//! * `_id` applies to every format;
//! * `json:_id bson:id` gives each format its own name, a tagged entry
//!   winning over an untagged one;
//! * a trailing `,me` makes the field mandatory for that format, and
//!   `json:,me` does so without renaming the field.
//!
//! Prefixes that are not format tags are part of the name, so `urn:id`
//! is an untagged alias.

use crate::document::Node;
use crate::format::Format;

/// One entry of an alias string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    /// Format the entry is restricted to; `None` applies to all.
    pub format: Option<Format>,
    /// Alternate name; empty when the entry only sets `mandatory`.
    pub name: &'static str,
    /// Whether the field must be present in this format.
    pub mandatory: bool,
}

impl Alias {
    fn parse(entry: &'static str) -> Self {
        let (format, rest) = entry
            .split_once(':')
            .and_then(|(tag, rest)| Format::from_tag(tag).map(|format| (Some(format), rest)))
            .unwrap_or((None, entry));
        let (name, mandatory) = rest.split_once(',').map_or((rest, false), |(head, options)| {
            (head, options.split(',').any(|option| option == "me"))
        });
        Self {
            format,
            name,
            mandatory,
        }
    }
}

/// A parsed alias string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSpec {
    source: &'static str,
    entries: Vec<Alias>,
}

impl AliasSpec {
    /// Parse an alias string.
    ///
    /// # Examples
    ///
    /// ```
    /// use docmap::{AliasSpec, Format};
    ///
    /// let spec = AliasSpec::parse("_id json:id,me");
    /// let json = spec.for_format(Format::Json).expect("json entry");
    /// assert_eq!((json.name, json.mandatory), ("id", true));
    /// let bson = spec.for_format(Format::Bson).expect("untagged entry");
    /// assert_eq!((bson.name, bson.mandatory), ("_id", false));
    /// ```
    #[must_use]
    pub fn parse(source: &'static str) -> Self {
        Self {
            source,
            entries: source.split_whitespace().map(Alias::parse).collect(),
        }
    }

    /// The string the spec was parsed from.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.source
    }

    /// All entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[Alias] {
        &self.entries
    }

    /// Entry that applies to `format`.
    #[must_use]
    pub fn for_format(&self, format: Format) -> Option<&Alias> {
        self.entries
            .iter()
            .find(|alias| alias.format == Some(format))
            .or_else(|| self.entries.iter().find(|alias| alias.format.is_none()))
    }

    /// Name the field uses in `format`, or `None` when the applicable
    /// entry does not rename it.
    #[must_use]
    pub fn name_for(&self, format: Format, primary: &'static str) -> Option<&'static str> {
        let alias = self.for_format(format)?;
        if alias.name.is_empty() {
            return None;
        }
        Some(format.alias_name(primary, alias.name))
    }

    /// Whether the applicable entry marks the field mandatory.
    #[must_use]
    pub fn is_mandatory(&self, format: Format) -> bool {
        self.for_format(format).is_some_and(|alias| alias.mandatory)
    }
}

/// Outcome of looking a field up in an object node.
pub enum Lookup<'n> {
    /// The field is present under `key`.
    Found {
        /// Key the value was found under.
        key: &'static str,
        /// The child node.
        node: &'n dyn Node,
    },
    /// Neither the alias nor the primary name is present.
    Absent {
        /// Name to report: the alias when one applies, else the primary.
        name: &'static str,
        /// Whether the alias entry demands presence.
        mandatory: bool,
    },
}

/// Resolve where a field lives in `object`.
///
/// The alias is consulted first, then the primary name, so an alias takes
/// precedence when both keys are present.
#[must_use]
pub fn resolve_key<'n>(
    object: &'n dyn Node,
    format: Format,
    primary: &'static str,
    alias: Option<&AliasSpec>,
) -> Lookup<'n> {
    let alias_name = alias.and_then(|spec| spec.name_for(format, primary));
    for key in alias_name.into_iter().chain(std::iter::once(primary)) {
        if let Some(node) = object.child(key) {
            return Lookup::Found { key, node };
        }
    }
    Lookup::Absent {
        name: alias_name.unwrap_or(primary),
        mandatory: alias.is_some_and(|spec| spec.is_mandatory(format)),
    }
}

/// Key a field is written under in `format`.
#[must_use]
pub fn write_name(format: Format, primary: &'static str, alias: Option<&AliasSpec>) -> &'static str {
    alias
        .and_then(|spec| spec.name_for(format, primary))
        .unwrap_or(primary)
}
