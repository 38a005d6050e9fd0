//! Go type definitions generated from record schemas.
//!
//! Every record type becomes one `struct`; nested record types are emitted
//! before the types that use them and only once per run.

use std::collections::BTreeSet;

use crate::format::Format;
use crate::record::Record;
use crate::schema::{FieldSchema, RecordSchema, ValueType};

/// Struct tags to include in generated fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoTags {
    /// Emit `json:"..."` tags.
    pub json: bool,
    /// Emit `bson:"..."` tags.
    pub bson: bool,
    /// Emit `xml:"..."` tags.
    pub xml: bool,
}

impl GoTags {
    /// All three tag kinds.
    pub const ALL: Self = Self {
        json: true,
        bson: true,
        xml: true,
    };

    fn formats(self) -> impl Iterator<Item = Format> {
        [
            (self.json, Format::Json),
            (self.bson, Format::Bson),
            (self.xml, Format::Xml),
        ]
        .into_iter()
        .filter_map(|(enabled, format)| enabled.then_some(format))
    }
}

/// Generate Go definitions for `R` and every record type it contains.
///
/// # Examples
///
/// ```
/// use docmap::gocode::{GoTags, to_go_code};
/// use docmap::{Record, field, fields};
///
/// #[derive(Default)]
/// struct Point {
///     x_pos: i32,
/// }
///
/// impl Record for Point {
///     const TYPE_NAME: &'static str = "Point";
///     fields!(Point => [field!(Point, x_pos).mandatory()]);
/// }
///
/// let code = to_go_code::<Point>(GoTags { json: true, ..GoTags::default() });
/// assert_eq!(code, "type Point struct {\n\tXPos int32 `json:\"x_pos\"`\n}\n");
/// ```
#[must_use]
pub fn to_go_code<R: Record>(tags: GoTags) -> String {
    let mut emitter = GoEmitter::new(tags);
    emitter.emit(&R::schema());
    emitter.finish()
}

/// Accumulates Go struct definitions.
#[derive(Debug)]
pub struct GoEmitter {
    tags: GoTags,
    seen: BTreeSet<&'static str>,
    out: String,
}

impl GoEmitter {
    /// Start an empty output.
    #[must_use]
    pub const fn new(tags: GoTags) -> Self {
        Self {
            tags,
            seen: BTreeSet::new(),
            out: String::new(),
        }
    }

    /// Emit `schema` after any record types it references, skipping types
    /// already emitted.
    pub fn emit(&mut self, schema: &RecordSchema) {
        if !self.seen.insert(schema.type_name) {
            return;
        }
        for field in &schema.fields {
            self.emit_nested(&field.value);
        }
        self.write_struct(schema);
    }

    /// The generated source.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    fn emit_nested(&mut self, value: &ValueType) {
        match value {
            ValueType::Optional { of } | ValueType::List { of } | ValueType::Map { of } => {
                self.emit_nested(of);
            }
            ValueType::Record(nested) => {
                if !self.seen.contains(nested.type_name()) {
                    self.emit(&nested.schema());
                }
            }
            _ => {}
        }
    }

    fn write_struct(&mut self, schema: &RecordSchema) {
        let rows: Vec<(String, String, String)> = schema
            .fields
            .iter()
            .map(|field| (go_name(field.name), go_type(&field.value), self.tag(field)))
            .collect();
        let name_width = rows.iter().map(|(name, _, _)| name.len()).max().unwrap_or(0);
        let type_width = rows.iter().map(|(_, ty, _)| ty.len()).max().unwrap_or(0);

        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str(&format!("type {} struct {{\n", schema.type_name));
        for (name, ty, tag) in rows {
            let line = if tag.is_empty() {
                format!("\t{name:<name_width$} {ty}")
            } else {
                format!("\t{name:<name_width$} {ty:<type_width$} {tag}")
            };
            self.out.push_str(line.trim_end());
            self.out.push('\n');
        }
        self.out.push_str("}\n");
    }

    fn tag(&self, field: &FieldSchema) -> String {
        let parts: Vec<String> = self
            .tags
            .formats()
            .map(|format| {
                let omit = if field.required_in(format) { "" } else { ",omitempty" };
                format!("{}:\"{}{omit}\"", format.tag(), field.key_for(format))
            })
            .collect();
        if parts.is_empty() {
            String::new()
        } else {
            format!("`{}`", parts.join(" "))
        }
    }
}

/// Exported Go identifier for a member name: `first_name` becomes
/// `FirstName`.
fn go_name(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect()
}

fn go_type(value: &ValueType) -> String {
    match value {
        ValueType::Bool => "bool".to_owned(),
        ValueType::Integer { bits, signed } => {
            format!("{}int{bits}", if *signed { "" } else { "u" })
        }
        ValueType::Float { bits } => format!("float{bits}"),
        ValueType::String => "string".to_owned(),
        ValueType::Bytes => "[]byte".to_owned(),
        ValueType::Optional { of } => match of.as_ref() {
            ValueType::List { .. } | ValueType::Map { .. } | ValueType::Bytes => go_type(of),
            _ => format!("*{}", go_type(of)),
        },
        ValueType::List { of } => format!("[]{}", go_type(of)),
        ValueType::Map { of } => format!("map[string]{}", go_type(of)),
        ValueType::Record(nested) => nested.type_name().to_owned(),
    }
}
