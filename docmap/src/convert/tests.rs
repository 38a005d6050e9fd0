use std::collections::{BTreeMap, HashMap};

use rstest::{fixture, rstest};

use super::*;
use crate::document::Object;
use crate::error::DocError;
use crate::format::Format;

#[fixture]
fn cx() -> DecodeContext {
    DecodeContext::new(Format::Json)
}

fn encode<T: Encode>(value: &T) -> Value {
    let attributes = Object::new();
    value.encode(&EncodeContext::new(Format::Json, &attributes))
}

#[rstest]
#[case(Value::Int(255), Some(255))]
#[case(Value::UInt(7), Some(7))]
#[case(Value::Int(300), None)]
#[case(Value::Int(-1), None)]
#[case(Value::from("12"), None)]
fn u8_accepts_only_values_in_range(
    mut cx: DecodeContext,
    #[case] node: Value,
    #[case] expected: Option<u8>,
) {
    let mut out = 0_u8;
    let result = out.decode(&node, &mut cx);
    let Some(value) = expected else {
        assert!(matches!(result, Err(DocError::TypeMismatch { expected: "u8", .. })));
        return;
    };
    assert!(result.is_ok());
    assert_eq!(out, value);
}

#[rstest]
fn floats_accept_integers(mut cx: DecodeContext) {
    let mut out = 0.0_f64;
    out.decode(&Value::Int(3), &mut cx).expect("integer widens");
    assert!((out - 3.0).abs() < f64::EPSILON);
}

#[rstest]
fn option_null_clears_and_values_fill(mut cx: DecodeContext) {
    let mut out = Some(4_i32);
    out.decode(&Value::Null, &mut cx).expect("null clears");
    assert_eq!(out, None);
    out.decode(&Value::Int(9), &mut cx).expect("value fills");
    assert_eq!(out, Some(9));
    assert_eq!(encode(&None::<i32>), Value::Null);
}

#[rstest]
fn sequence_errors_carry_the_index(mut cx: DecodeContext) {
    let node = Value::Array(vec![Value::Int(1), Value::from("two")]);
    let mut out: Vec<i64> = Vec::new();
    let err = out.decode(&node, &mut cx).expect_err("second item is text");
    assert_eq!(err.path(), Some("$[1]"));
}

#[rstest]
fn sequences_are_replaced(mut cx: DecodeContext) {
    let mut out = vec![9_i64, 9, 9];
    out.decode(&Value::Array(vec![Value::Int(1)]), &mut cx)
        .expect("array decodes");
    assert_eq!(out, [1]);
}

#[rstest]
fn maps_decode_every_entry(mut cx: DecodeContext) {
    let node: Object = [
        ("b".to_owned(), Value::Int(2)),
        ("a".to_owned(), Value::Int(1)),
    ]
    .into_iter()
    .collect();
    let mut out: BTreeMap<String, i32> = BTreeMap::new();
    out.decode(&Value::Object(node), &mut cx)
        .expect("object decodes");
    assert_eq!(out.get("a"), Some(&1));
    assert_eq!(out.get("b"), Some(&2));
}

#[rstest]
fn hash_maps_encode_in_key_order() {
    let map: HashMap<String, i32> = [("z", 1), ("a", 2), ("m", 3)]
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect();
    let Value::Object(object) = encode(&map) else {
        panic!("maps encode as objects");
    };
    let keys: Vec<_> = object.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ["a", "m", "z"]);
}

#[rstest]
fn binary_reads_base64_text(mut cx: DecodeContext) {
    let mut out = Binary::default();
    out.decode(&Value::from("AAEC"), &mut cx)
        .expect("valid base64");
    assert_eq!(*out, [0, 1, 2]);
    assert_eq!(encode(&out), Value::Binary(vec![0, 1, 2]));
}

#[rstest]
fn strings_are_not_coerced_from_numbers(mut cx: DecodeContext) {
    let mut out = String::new();
    let err = out.decode(&Value::Int(1), &mut cx).expect_err("number");
    assert!(matches!(err, DocError::TypeMismatch { expected: "string", .. }));
}

#[rstest]
fn describe_reports_nested_shapes() {
    assert_eq!(
        Option::<Vec<u16>>::describe(),
        ValueType::Optional {
            of: Box::new(ValueType::List {
                of: Box::new(ValueType::Integer {
                    bits: 16,
                    signed: false
                })
            })
        }
    );
}
