//! Walks a record's descriptors against a document.

use crate::condition::EncodeScope;
use crate::context::{DecodeContext, EncodeContext};
use crate::document::{Node, NodeKind, Object};
use crate::presence::PresenceSet;
use crate::record::Record;
use crate::DocResult;

/// Decode `node` into `record`, rebuilding `presence`.
///
/// Fields are visited in declaration order and decoding stops at the first
/// error. Fields decoded before the failure keep their new values; decode
/// merges into the record rather than replacing it. A null node reads as
/// an empty object.
///
/// # Errors
///
/// Returns [`crate::DocError::TypeMismatch`] when `node` is not an object,
/// [`crate::DocError::MissingRequiredField`] for an absent mandatory field,
/// or the first error raised while decoding a field.
pub fn decode_record<R: Record>(
    record: &mut R,
    node: &dyn Node,
    cx: &mut DecodeContext,
    presence: &mut PresenceSet,
) -> DocResult<()> {
    presence.clear();
    match node.kind() {
        NodeKind::Object | NodeKind::Null => {}
        _ => return Err(cx.mismatch(R::TYPE_NAME, node)),
    }
    tracing::debug!(record = R::TYPE_NAME, path = %cx.path(), "decoding record");
    R::fields()
        .iter()
        .try_for_each(|field| field.decode(record, node, cx, presence))
}

/// Encode `record` into a new object, fields in declaration order.
///
/// Conditions see the writer's attributes and the fields written before
/// theirs, by primary name.
#[must_use]
pub fn encode_record<R: Record>(record: &R, cx: &EncodeContext<'_>) -> Object {
    tracing::debug!(record = R::TYPE_NAME, format = %cx.format(), "encoding record");
    let mut out = Object::new();
    let mut names = Vec::with_capacity(R::fields().len());
    for field in R::fields() {
        let scope = EncodeScope::new(cx.attributes(), &names, &out);
        if let Some((key, value)) = field.encode(record, &scope, cx) {
            out.insert(key, value);
            names.push(field.name());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::document::Value;
    use crate::error::DocError;
    use crate::format::Format;
    use crate::{field, fields};
    use rstest::{fixture, rstest};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Sample {
        a: i64,
        b: String,
        c: bool,
    }

    impl Record for Sample {
        const TYPE_NAME: &'static str = "Sample";
        fields!(Sample => [
            field!(Sample, a),
            field!(Sample, b),
            field!(Sample, c),
        ]);
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Strict {
        first: i64,
        id: i64,
        last: i64,
    }

    impl Record for Strict {
        const TYPE_NAME: &'static str = "Strict";
        fields!(Strict => [
            field!(Strict, first),
            field!(Strict, id).mandatory().alias("_id"),
            field!(Strict, last),
        ]);
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Shape {
        kind: String,
        radius: f64,
    }

    impl Record for Shape {
        const TYPE_NAME: &'static str = "Shape";
        fields!(Shape => [
            field!(Shape, kind).alias("json:type"),
            field!(Shape, radius).when(Condition::AttributeIs("kind", Value::from("circle"))),
        ]);
    }

    fn object(entries: Vec<(&str, Value)>) -> Value {
        Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value))
                .collect(),
        )
    }

    #[fixture]
    fn cx() -> DecodeContext {
        DecodeContext::new(Format::Json)
    }

    #[rstest]
    fn absent_optional_fields_keep_prior_values(mut cx: DecodeContext) {
        let doc = object(vec![("a", Value::Int(7)), ("c", Value::Bool(true))]);
        let mut record = Sample {
            b: "prior".to_owned(),
            ..Sample::default()
        };
        let mut presence = PresenceSet::new();
        decode_record(&mut record, &doc, &mut cx, &mut presence).expect("decode succeeds");

        assert_eq!(record.a, 7);
        assert_eq!(record.b, "prior");
        assert!(record.c);
        assert!(presence.was_set("a"));
        assert!(!presence.was_set("b"));
        assert!(presence.was_set("c"));
    }

    #[rstest]
    fn presence_is_rebuilt_on_every_decode(mut cx: DecodeContext) {
        let mut record = Sample::default();
        let mut presence = PresenceSet::new();
        decode_record(&mut record, &object(vec![("a", Value::Int(1))]), &mut cx, &mut presence)
            .expect("first decode");
        decode_record(&mut record, &object(vec![("b", "x".into())]), &mut cx, &mut presence)
            .expect("second decode");
        assert!(!presence.was_set("a"));
        assert!(presence.was_set("b"));
        assert_eq!(record.a, 1);
    }

    #[rstest]
    fn missing_mandatory_field_names_the_alias(mut cx: DecodeContext) {
        let doc = object(vec![("first", Value::Int(1)), ("last", Value::Int(3))]);
        let mut record = Strict::default();
        let mut presence = PresenceSet::new();
        let err = decode_record(&mut record, &doc, &mut cx, &mut presence)
            .expect_err("id is mandatory");

        assert!(matches!(err, DocError::MissingRequiredField { ref name, .. } if name == "_id"));
        assert_eq!(record.first, 1);
        assert_eq!(record.last, 0);
    }

    #[rstest]
    fn present_fields_with_the_wrong_shape_are_errors(mut cx: DecodeContext) {
        let doc = object(vec![("a", "seven".into())]);
        let mut presence = PresenceSet::new();
        let err = decode_record(&mut Sample::default(), &doc, &mut cx, &mut presence)
            .expect_err("a is not a number");
        assert!(matches!(
            err,
            DocError::TypeMismatch { ref path, expected: "i64", .. } if path == "$.a"
        ));
    }

    #[rstest]
    fn non_objects_are_rejected(mut cx: DecodeContext) {
        let mut presence = PresenceSet::new();
        let err = decode_record(&mut Sample::default(), &Value::Int(3), &mut cx, &mut presence)
            .expect_err("scalar root");
        assert!(matches!(err, DocError::TypeMismatch { expected: "Sample", .. }));
    }

    #[rstest]
    fn encode_follows_declaration_order() {
        let attributes = Object::new();
        let cx = EncodeContext::new(Format::Json, &attributes);
        let record = Strict {
            first: 1,
            id: 2,
            last: 3,
        };
        let keys: Vec<_> = encode_record(&record, &cx)
            .iter()
            .map(|(key, _)| key.to_owned())
            .collect();
        assert_eq!(keys, ["first", "_id", "last"]);
    }

    #[rstest]
    #[case("circle", true)]
    #[case("square", false)]
    fn conditions_suppress_keys(
        #[case] kind: &str,
        #[case] emitted: bool,
        #[values(Format::Json, Format::Xml, Format::Bson, Format::Config)] format: Format,
    ) {
        let attributes = Object::new();
        let cx = EncodeContext::new(format, &attributes);
        let shape = Shape {
            kind: kind.to_owned(),
            radius: 2.5,
        };
        assert_eq!(encode_record(&shape, &cx).contains_key("radius"), emitted);
    }
}
