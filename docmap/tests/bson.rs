//! BSON round trips, length handling and numeric widening.
#![cfg(feature = "bson")]

mod common;

use anyhow::{Result, ensure};
use common::{Account, Person, Triple, person};
use docmap::{DocError, Tracked, from_bson, load_bson, to_bson};
use rstest::rstest;

#[rstest]
fn person_round_trips(person: Person) -> Result<()> {
    let bytes = to_bson(&person)?;
    let decoded = from_bson::<Person>(&bytes, 0)?;
    ensure!(*decoded == person, "decoded {decoded:?}");
    Ok(())
}

#[rstest]
fn length_is_inferred_from_the_prefix(person: Person) -> Result<()> {
    let bytes = to_bson(&person)?;
    let inferred = from_bson::<Person>(&bytes, 0)?;
    let explicit = from_bson::<Person>(&bytes, bytes.len())?;
    ensure!(*inferred == *explicit, "inferred and explicit lengths disagree");

    let mut padded = bytes.clone();
    padded.extend_from_slice(&[0xde, 0xad]);
    let trailing = from_bson::<Person>(&padded, 0)?;
    ensure!(*trailing == person, "trailing bytes are ignored");
    Ok(())
}

#[rstest]
fn short_buffers_are_parse_errors(person: Person) -> Result<()> {
    let bytes = to_bson(&person)?;
    let err = from_bson::<Person>(&bytes, bytes.len() + 1).expect_err("buffer too short");
    ensure!(matches!(err, DocError::Parse { .. }), "unexpected error: {err}");
    let truncated = from_bson::<Person>(&bytes, 3).expect_err("truncated document");
    ensure!(matches!(truncated, DocError::Parse { .. }), "unexpected error: {truncated}");
    Ok(())
}

#[rstest]
fn documents_built_with_the_bson_crate_decode() -> Result<()> {
    let document = bson::doc! {
        "label": "main",
        "_id": 9_i64,
        "owner": "ops",
        "ignored": [1, 2, 3],
    };
    let mut bytes = Vec::new();
    document.to_writer(&mut bytes)?;
    let mut account = Tracked::new(Account::default());
    load_bson(&bytes, 0, &mut account)?;
    ensure!(account.id == 9 && account.owner == "ops", "got {account:?}");
    ensure!(account.was_set("label"), "label present");
    Ok(())
}

#[rstest]
fn integers_widen_losslessly() -> Result<()> {
    let document = bson::doc! { "a": 1_i32, "b": 2.0_f64, "c": 3_i64 };
    let mut bytes = Vec::new();
    document.to_writer(&mut bytes)?;
    let triple = from_bson::<Triple>(&bytes, 0)?;
    ensure!(*triple == Triple { a: 1, b: 2, c: 3 }, "got {triple:?}");

    let fractional = bson::doc! { "a": 1.5_f64 };
    let mut fractional_bytes = Vec::new();
    fractional.to_writer(&mut fractional_bytes)?;
    let err = from_bson::<Triple>(&fractional_bytes, 0).expect_err("fractional value");
    ensure!(matches!(err, DocError::TypeMismatch { .. }), "unexpected error: {err}");
    Ok(())
}

#[rstest]
fn strings_are_not_coerced() -> Result<()> {
    let document = bson::doc! { "a": "1" };
    let mut bytes = Vec::new();
    document.to_writer(&mut bytes)?;
    let err = from_bson::<Triple>(&bytes, 0).expect_err("string is not a number");
    ensure!(matches!(err, DocError::TypeMismatch { .. }), "unexpected error: {err}");
    Ok(())
}

#[rstest]
fn unsigned_values_above_i64_are_write_errors() {
    let account = Account {
        id: u64::MAX,
        ..Account::default()
    };
    let err = to_bson(&account).expect_err("u64::MAX does not fit");
    assert!(matches!(err, DocError::Write { .. }));
}

#[rstest]
fn encoding_is_idempotent(person: Person) -> Result<()> {
    ensure!(to_bson(&person)? == to_bson(&person)?, "two encodes differ");
    Ok(())
}
