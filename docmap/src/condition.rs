//! Conditional emission of fields.

use std::fmt;

use crate::document::{Object, Value};

/// What a [`Condition`] can see while a record is being encoded.
///
/// Sibling fields are looked up by their primary names, so a condition
/// reads the same value whatever key the active format writes it under.
#[derive(Debug, Clone, Copy)]
pub struct EncodeScope<'a> {
    attributes: &'a Object,
    names: &'a [&'static str],
    written: &'a Object,
}

impl<'a> EncodeScope<'a> {
    /// Scope over the writer's attributes and the fields written so far.
    ///
    /// `names[i]` is the primary name of the field stored in the `i`th
    /// entry of `written`.
    #[must_use]
    pub const fn new(
        attributes: &'a Object,
        names: &'a [&'static str],
        written: &'a Object,
    ) -> Self {
        Self {
            attributes,
            names,
            written,
        }
    }

    /// Value of the named attribute.
    ///
    /// Writer attributes shadow sibling fields of the same name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'a Value> {
        self.attributes.get(name).or_else(|| self.sibling(name))
    }

    /// Value of the sibling field with primary name `name`, when it has
    /// already been written.
    #[must_use]
    pub fn sibling(&self, name: &str) -> Option<&'a Value> {
        let index = self.names.iter().position(|primary| *primary == name)?;
        self.written.iter().nth(index).map(|(_, value)| value)
    }
}

/// Predicate deciding whether a field is written at all.
///
/// A field whose condition does not hold is skipped: its key is absent
/// from the output, not written as null.
#[derive(Clone)]
pub enum Condition {
    /// Both attributes resolve to equal values.
    AttributesEqual(&'static str, &'static str),
    /// The attribute resolves to the given value.
    AttributeIs(&'static str, Value),
    /// Arbitrary test over the scope.
    Predicate(fn(&EncodeScope<'_>) -> bool),
}

impl Condition {
    /// Evaluate against `scope`.
    #[must_use]
    pub fn holds(&self, scope: &EncodeScope<'_>) -> bool {
        match self {
            Self::AttributesEqual(left, right) => scope
                .attribute(left)
                .zip(scope.attribute(right))
                .is_some_and(|(first, second)| first == second),
            Self::AttributeIs(name, expected) => {
                scope.attribute(name).is_some_and(|value| value == expected)
            }
            Self::Predicate(test) => test(scope),
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttributesEqual(left, right) => f
                .debug_tuple("AttributesEqual")
                .field(left)
                .field(right)
                .finish(),
            Self::AttributeIs(name, value) => {
                f.debug_tuple("AttributeIs").field(name).field(value).finish()
            }
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
