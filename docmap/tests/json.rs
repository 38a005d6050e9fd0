//! JSON round trips and the decode rules shared by every format.
#![cfg(feature = "json")]

mod common;

use anyhow::{Result, ensure};
use common::{Account, Person, Triple, person};
use docmap::{DocError, Indent, Source, Tracked, from_json, load_json, to_json};
use rstest::rstest;

#[rstest]
#[case(Indent::Compact)]
#[case(Indent::spaces(2))]
#[case(Indent::from_width(1, '\t'))]
fn person_round_trips(person: Person, #[case] indent: Indent) -> Result<()> {
    let text = to_json(&person, "", indent)?;
    let decoded = from_json::<Person>(Source::Text(&text))?;
    ensure!(*decoded == person, "decoded {decoded:?} from {text}");
    Ok(())
}

#[rstest]
fn aliases_and_declaration_order_shape_the_output(person: Person) -> Result<()> {
    let text = to_json(&person, "", Indent::Compact)?;
    ensure!(
        text.starts_with(r#"{"_id":7,"name":"Ada Lovelace","age":36,"email":null,"#),
        "unexpected prefix: {text}"
    );
    ensure!(text.contains(r#""avatar":"AAEC/v8=""#), "avatar not base64: {text}");
    Ok(())
}

#[rstest]
fn root_names_nest_the_record(person: Person) -> Result<()> {
    let text = to_json(&person, "person", Indent::Compact)?;
    ensure!(text.starts_with(r#"{"person":{"_id":7,"#), "not nested: {text}");
    Ok(())
}

#[rstest]
fn presence_reflects_the_document() -> Result<()> {
    let mut triple = Tracked::new(Triple { a: 0, b: 5, c: 0 });
    load_json(Source::Text(r#"{"a": 1, "c": 3}"#), &mut triple)?;
    ensure!(*triple == Triple { a: 1, b: 5, c: 3 }, "got {triple:?}");
    ensure!(triple.was_set("a") && triple.was_set("c"), "a and c were supplied");
    ensure!(!triple.was_set("b"), "b was absent");

    load_json(Source::Text(r#"{"b": 2}"#), &mut triple)?;
    ensure!(triple.presence().iter().eq(["b"]), "presence is rebuilt per decode");
    ensure!(triple.a == 1, "absent fields keep their value");
    Ok(())
}

#[rstest]
fn explicit_null_counts_as_present() -> Result<()> {
    let person = from_json::<Person>(Source::Text(
        r#"{"_id": 1, "name": "x", "age": null, "email": "x@example.com"}"#,
    ))?;
    ensure!(person.was_set("age") && person.age.is_none(), "null clears options");
    ensure!(person.email.as_deref() == Some("x@example.com"), "email decoded");
    ensure!(!person.was_set("tags"), "tags were absent");
    Ok(())
}

#[rstest]
fn alias_wins_over_primary_name() -> Result<()> {
    let account = from_json::<Account>(Source::Text(
        r#"{"id": 2, "_id": 1, "owner": "ops"}"#,
    ))?;
    ensure!(account.id == 1, "alias key must take precedence, got {}", account.id);
    ensure!(account.was_set("id"), "presence uses the primary name");
    Ok(())
}

#[rstest]
fn primary_name_is_the_fallback() -> Result<()> {
    let account = from_json::<Account>(Source::Text(r#"{"id": 2, "owner": "ops"}"#))?;
    ensure!(account.id == 2, "primary key read when alias absent");
    Ok(())
}

#[rstest]
fn missing_mandatory_field_names_the_alias() {
    let mut account = Tracked::new(Account::default());
    let err = load_json(Source::Text(r#"{"label": "main"}"#), &mut account)
        .expect_err("id is mandatory");
    match err {
        DocError::MissingRequiredField { path, name } => {
            assert_eq!(path, "$");
            assert_eq!(name, "_id");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(account.label, "main", "earlier fields keep decoded values");
}

#[rstest]
fn format_tagged_mandatory_marker_applies() {
    let err = from_json::<Account>(Source::Text(r#"{"_id": 1}"#)).expect_err("owner needed");
    assert!(matches!(
        err,
        DocError::MissingRequiredField { ref name, .. } if name == "owner"
    ));
}

#[rstest]
fn nested_errors_carry_their_path() {
    let text = r#"{
        "_id": 1,
        "name": "x",
        "addresses": [{"city": "a"}, {"city": 5}]
    }"#;
    let err = from_json::<Person>(Source::Text(text)).expect_err("city must be a string");
    match err {
        DocError::TypeMismatch { path, expected, .. } => {
            assert_eq!(path, "$.addresses[1].city");
            assert_eq!(expected, "string");
        }
        other => panic!("unexpected error: {other}"),
    }

    let missing = from_json::<Person>(Source::Text(
        r#"{"_id": 1, "name": "x", "home": {"street": "s"}}"#,
    ))
    .expect_err("home.city is mandatory");
    assert_eq!(missing.to_string(), "missing required field 'city' at $.home");
}

#[rstest]
#[case(r#"{"_id": 1, "name": "x", "age": -1}"#, "$.age")]
#[case(r#"{"_id": 1, "name": "x", "active": "yes"}"#, "$.active")]
#[case(r#"{"_id": 1, "name": "x", "tags": {"a": 1}}"#, "$.tags")]
fn wrong_shapes_are_mismatches(#[case] text: &str, #[case] expected_path: &str) {
    let err = from_json::<Person>(Source::Text(text)).expect_err("shape mismatch");
    assert!(
        matches!(&err, DocError::TypeMismatch { path, .. } if path == expected_path),
        "unexpected error: {err}"
    );
}

#[rstest]
fn numeric_strings_coerce() -> Result<()> {
    let person = from_json::<Person>(Source::Text(r#"{"_id": "12", "name": "x"}"#))?;
    ensure!(person.id == 12, "string id coerced");
    Ok(())
}

#[rstest]
fn malformed_input_is_a_parse_error() {
    let err = from_json::<Person>(Source::Text("{")).expect_err("truncated");
    assert!(matches!(err, DocError::Parse { .. }));
}

#[rstest]
fn file_sources_are_read() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("triple.json"))
        .map_err(|raw| anyhow::anyhow!("non UTF-8 path {}", raw.display()))?;
    std::fs::write(&path, r#"{"b": 9}"#)?;

    let triple = from_json::<Triple>(Source::new(path.as_str(), true))?;
    ensure!(triple.b == 9, "file content decoded");

    let missing = path.with_file_name("absent.json");
    let err = from_json::<Triple>(Source::File(&missing)).expect_err("no such file");
    ensure!(matches!(err, DocError::Io { .. }), "unexpected error: {err}");
    Ok(())
}

#[rstest]
fn encoding_is_idempotent(person: Person) -> Result<()> {
    let first = to_json(&person, "", Indent::spaces(4))?;
    let second = to_json(&person, "", Indent::spaces(4))?;
    ensure!(first == second, "two encodes differ");
    Ok(())
}
