//! JSON adapter backed by `serde_json`.
//!
//! Coercions: strings holding a number read as integers and floats, and
//! binary fields accept either base64 text or an array of byte values.
//! Duplicate keys written by the engine are emitted twice, in order.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::{Adapter, Format, Indent};
use crate::document::{Node, NodeKind, Object, decode_base64};
use crate::error::DocError;
use crate::DocResult;

/// The JSON format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Adapter for Json {
    const FORMAT: Format = Format::Json;
    type Document = serde_json::Value;

    fn parse(input: &[u8]) -> DocResult<Self::Document> {
        serde_json::from_slice(input).map_err(|err| DocError::parse(Format::Json, err))
    }

    fn render(root: &Object, root_name: &str, indent: Indent) -> DocResult<Vec<u8>> {
        if root_name.is_empty() {
            return write_json(root, indent);
        }
        write_json(&root.clone().nest(root_name), indent)
    }
}

fn write_json(root: &Object, indent: Indent) -> DocResult<Vec<u8>> {
    let mut out = Vec::new();
    let result = match indent {
        Indent::Compact => serde_json::to_writer(&mut out, root),
        Indent::Pretty { .. } => {
            let unit = indent.unit();
            let mut serializer =
                Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(unit.as_bytes()));
            root.serialize(&mut serializer)
        }
    };
    result.map_err(|err| DocError::write(Format::Json, err.to_string()))?;
    Ok(out)
}

impl Node for serde_json::Value {
    fn kind(&self) -> NodeKind {
        match self {
            Self::Null => NodeKind::Null,
            Self::Bool(_) => NodeKind::Bool,
            Self::Number(_) => NodeKind::Number,
            Self::String(_) => NodeKind::String,
            Self::Array(_) => NodeKind::Array,
            Self::Object(_) => NodeKind::Object,
        }
    }

    fn child(&self, key: &str) -> Option<&dyn Node> {
        self.as_object()?.get(key).map(|value| value as &dyn Node)
    }

    fn elements(&self) -> Option<Vec<&dyn Node>> {
        self.as_array()
            .map(|items| items.iter().map(|item| item as &dyn Node).collect())
    }

    fn entries(&self) -> Option<Vec<(&str, &dyn Node)>> {
        self.as_object().map(|map| {
            map.iter()
                .map(|(key, value)| (key.as_str(), value as &dyn Node))
                .collect()
        })
    }

    fn read_bool(&self) -> Option<bool> {
        self.as_bool()
    }

    fn read_i64(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number.as_i64(),
            Self::String(text) => text.parse().ok(),
            _ => None,
        }
    }

    fn read_u64(&self) -> Option<u64> {
        match self {
            Self::Number(number) => number.as_u64(),
            Self::String(text) => text.parse().ok(),
            _ => None,
        }
    }

    fn read_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64(),
            Self::String(text) => text.parse().ok(),
            _ => None,
        }
    }

    fn read_str(&self) -> Option<Cow<'_, str>> {
        self.as_str().map(Cow::Borrowed)
    }

    fn read_bytes(&self) -> Option<Cow<'_, [u8]>> {
        match self {
            Self::String(text) => decode_base64(text).map(Cow::Owned),
            Self::Array(items) => items
                .iter()
                .map(|item| item.as_u64().and_then(|byte| u8::try_from(byte).ok()))
                .collect::<Option<Vec<u8>>>()
                .map(Cow::Owned),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Value;
    use rstest::{fixture, rstest};

    #[fixture]
    fn sample() -> Object {
        let mut inner = Object::new();
        inner.insert("b", 2_i64);
        let mut object = Object::new();
        object.insert("a", 1_i64);
        object.insert("inner", inner);
        object
    }

    fn render(root: &Object, root_name: &str, indent: Indent) -> String {
        let bytes = Json::render(root, root_name, indent).expect("render succeeds");
        String::from_utf8(bytes).expect("JSON output is UTF-8")
    }

    #[rstest]
    fn compact_output_is_one_line(sample: Object) {
        assert_eq!(render(&sample, "", Indent::Compact), r#"{"a":1,"inner":{"b":2}}"#);
    }

    #[rstest]
    fn pretty_output_uses_the_indent_unit(sample: Object) {
        let text = render(&sample, "", Indent::from_width(1, '\t'));
        assert_eq!(text, "{\n\t\"a\": 1,\n\t\"inner\": {\n\t\t\"b\": 2\n\t}\n}");
    }

    #[rstest]
    fn zero_width_breaks_lines_without_indenting(sample: Object) {
        let text = render(&sample, "", Indent::from_width(0, ' '));
        assert!(text.contains("\n\"a\": 1"));
    }

    #[rstest]
    fn root_name_wraps_the_object(sample: Object) {
        assert!(render(&sample, "person", Indent::Compact).starts_with(r#"{"person":{"a":1"#));
    }

    #[rstest]
    fn duplicate_keys_are_appended() {
        let mut object = Object::new();
        object.insert("k", 1_i64);
        object.insert("k", 2_i64);
        assert_eq!(render(&object, "", Indent::Compact), r#"{"k":1,"k":2}"#);
    }

    #[rstest]
    fn binary_is_written_as_base64() {
        let mut object = Object::new();
        object.insert("data", Value::Binary(vec![0, 1, 2]));
        assert_eq!(render(&object, "", Indent::Compact), r#"{"data":"AAEC"}"#);
    }

    #[rstest]
    #[case(r#""42""#, Some(42))]
    #[case("42", Some(42))]
    #[case("4.5", None)]
    #[case(r#""forty""#, None)]
    fn numeric_strings_coerce(#[case] text: &str, #[case] expected: Option<i64>) {
        let node = Json::parse(text.as_bytes()).expect("valid JSON");
        assert_eq!(node.read_i64(), expected);
    }

    #[rstest]
    fn byte_arrays_are_accepted() {
        let node = Json::parse(b"[1, 2, 255]").expect("valid JSON");
        assert_eq!(node.read_bytes().as_deref(), Some(&[1_u8, 2, 255][..]));
        let overflow = Json::parse(b"[1, 256]").expect("valid JSON");
        assert!(overflow.read_bytes().is_none());
    }

    #[rstest]
    fn malformed_input_is_a_parse_error() {
        let err = Json::parse(b"{\"a\": ").expect_err("truncated");
        assert!(matches!(err, DocError::Parse { format: Format::Json, .. }));
    }

    #[rstest]
    fn null_keys_are_present() {
        let node = Json::parse(br#"{"a": null}"#).expect("valid JSON");
        assert!(node.has_key("a"));
        assert!(node.child("a").is_some_and(Node::is_null));
    }
}
