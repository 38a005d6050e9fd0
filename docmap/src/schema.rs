//! Language-neutral description of record types.
//!
//! Built from the field descriptors and consumed by code generators such
//! as [`crate::gocode`].

use std::fmt;

use serde::{Serialize, Serializer};

use crate::alias::{self, AliasSpec};
use crate::format::Format;
use crate::record::Record;

/// Shape of one record type.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecordSchema {
    /// Explicit type name from [`Record::TYPE_NAME`].
    pub type_name: &'static str,
    /// Fields in declaration order.
    pub fields: Vec<FieldSchema>,
}

/// Shape of one field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldSchema {
    /// Primary member name.
    pub name: &'static str,
    /// Declared alias string.
    pub alias: Option<AliasSpec>,
    /// Whether the field was declared mandatory for every format.
    ///
    /// `,me` alias markers make a field mandatory in one format only and
    /// leave this `false`; use [`FieldSchema::required_in`] for the
    /// per-format answer.
    pub required: bool,
    /// Whether emission depends on a condition.
    pub conditional: bool,
    /// Value shape.
    pub value: ValueType,
}

impl FieldSchema {
    /// Key used for this field in `format`.
    #[must_use]
    pub fn key_for(&self, format: Format) -> &'static str {
        alias::write_name(format, self.name, self.alias.as_ref())
    }

    /// Whether `format` requires the field, counting `,me` alias markers.
    #[must_use]
    pub fn required_in(&self, format: Format) -> bool {
        self.required
            || self
                .alias
                .as_ref()
                .is_some_and(|spec| spec.is_mandatory(format))
    }
}

/// Value metadata for code generation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[expect(missing_docs, reason = "variant names are self-describing")]
pub enum ValueType {
    Bool,
    Integer { bits: u8, signed: bool },
    Float { bits: u8 },
    String,
    Bytes,
    Optional { of: Box<ValueType> },
    List { of: Box<ValueType> },
    Map { of: Box<ValueType> },
    Record(RecordRef),
}

/// Lazy reference to a nested record type.
///
/// The nested schema is only built on request, so self-referential types
/// do not recurse while being described.
#[derive(Clone, Copy)]
pub struct RecordRef {
    type_name: &'static str,
    schema: fn() -> RecordSchema,
}

impl RecordRef {
    /// Reference to record type `R`.
    #[must_use]
    pub const fn of<R: Record>() -> Self {
        Self {
            type_name: R::TYPE_NAME,
            schema: R::schema,
        }
    }

    /// Name of the referenced type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Build the referenced type's schema.
    #[must_use]
    pub fn schema(&self) -> RecordSchema {
        (self.schema)()
    }
}

impl PartialEq for RecordRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
    }
}

impl Eq for RecordRef {}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordRef").field(&self.type_name).finish()
    }
}

impl Serialize for RecordRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.type_name)
    }
}

impl Serialize for AliasSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
