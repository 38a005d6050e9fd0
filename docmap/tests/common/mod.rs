//! Record types shared by the integration suites.
//!
//! Each suite only exercises some of these, so unused items are expected.
#![expect(dead_code, reason = "each suite uses a subset of the fixtures")]

use std::collections::BTreeMap;

use docmap::{Binary, Condition, Record, Value, field, fields};
use rstest::fixture;

/// Postal address nested inside [`Person`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: String,
}

impl Record for Address {
    const TYPE_NAME: &'static str = "Address";
    fields!(Address => [
        field!(Address, street),
        field!(Address, city).mandatory(),
    ]);
}

/// A record touching every supported member shape.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub age: Option<u32>,
    pub email: Option<String>,
    pub active: bool,
    pub ratio: f64,
    pub tags: Vec<String>,
    pub home: Address,
    pub addresses: Vec<Address>,
    pub scores: BTreeMap<String, i64>,
    pub avatar: Binary,
}

impl Record for Person {
    const TYPE_NAME: &'static str = "Person";
    fields!(Person => [
        field!(Person, id).mandatory().alias("_id xml:ident config:person_id"),
        field!(Person, name).mandatory(),
        field!(Person, age),
        field!(Person, email),
        field!(Person, active),
        field!(Person, ratio),
        field!(Person, tags),
        field!(Person, home),
        field!(Person, addresses),
        field!(Person, scores),
        field!(Person, avatar),
    ]);
}

/// A fully populated [`Person`].
#[fixture]
pub fn person() -> Person {
    Person {
        id: 7,
        name: "Ada Lovelace".to_owned(),
        age: Some(36),
        email: None,
        active: true,
        ratio: 0.25,
        tags: vec!["maths".to_owned(), "engines".to_owned()],
        home: Address {
            street: "12 St James's Square".to_owned(),
            city: "London".to_owned(),
        },
        addresses: vec![
            Address {
                street: "Ockham Park".to_owned(),
                city: "Surrey".to_owned(),
            },
            Address {
                street: "Horsley Towers".to_owned(),
                city: "East Horsley".to_owned(),
            },
        ],
        scores: BTreeMap::from([("analysis".to_owned(), 98), ("poetry".to_owned(), 71)]),
        avatar: Binary(vec![0, 1, 2, 254, 255]),
    }
}

/// Three optional members, used for presence checks.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Triple {
    pub a: i32,
    pub b: i32,
    pub c: i32,
}

impl Record for Triple {
    const TYPE_NAME: &'static str = "Triple";
    fields!(Triple => [field!(Triple, a), field!(Triple, b), field!(Triple, c)]);
}

/// Mandatory member declared after an optional one.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Account {
    pub label: String,
    pub id: u64,
    pub owner: String,
}

impl Record for Account {
    const TYPE_NAME: &'static str = "Account";
    fields!(Account => [
        field!(Account, label),
        field!(Account, id).mandatory().alias("_id"),
        field!(Account, owner).alias("json:,me"),
    ]);
}

fn not_a_circle(scope: &docmap::EncodeScope<'_>) -> bool {
    scope.attribute("kind") != Some(&Value::from("circle"))
}

/// Members written only for some shapes.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Shape {
    pub kind: String,
    pub radius: f64,
    pub width: f64,
    pub note: String,
}

impl Record for Shape {
    const TYPE_NAME: &'static str = "Shape";
    fields!(Shape => [
        field!(Shape, kind),
        field!(Shape, radius).when(Condition::AttributeIs("kind", Value::from("circle"))),
        field!(Shape, width).when(Condition::Predicate(not_a_circle)),
        field!(Shape, note).when(Condition::AttributeIs("verbose", Value::Bool(true))),
    ]);
}

/// A circle of radius 2.
#[fixture]
pub fn circle() -> Shape {
    Shape {
        kind: "circle".to_owned(),
        radius: 2.0,
        width: 9.0,
        note: "round".to_owned(),
    }
}
