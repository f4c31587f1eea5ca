//! Kind consistency, filtering and grouping across assertion collections.

use nub_core::enums::{EntityKind, NumericRange, ValueType};
use nub_core::{Assertion, AssertionSet, CoreError, Criteria, EntityRef, ResponseCollection};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn response(person: &str, question: &str, value: f64) -> Assertion {
    Assertion::response(
        EntityRef::person(person),
        EntityRef::meeting("m1"),
        EntityRef::question(question),
        value,
        ValueType::Numeric(NumericRange::OneToTen),
    )
}

fn dot(author: &str, subject: &str, value: f64) -> Assertion {
    Assertion::dot(
        EntityRef::person(author),
        EntityRef::meeting("m1"),
        EntityRef::person(subject),
        value,
    )
}

#[rstest]
#[case::dot_into_responses(EntityKind::Response, dot("adam", "bob", 5.0))]
#[case::response_into_dots(EntityKind::Dot, response("adam", "q1", 5.0))]
fn declared_kind_rejects_mismatch(#[case] kind: EntityKind, #[case] wrong: Assertion) {
    let mut set = AssertionSet::of_kind(kind);
    let err = set.push(wrong).unwrap_err();
    assert!(matches!(err, CoreError::TypeConsistency { expected, .. } if expected == kind));
    assert!(set.is_empty());
}

#[test]
fn mixed_batch_reports_every_offender() {
    let err = AssertionSet::from_assertions(vec![
        dot("adam", "bob", 5.0),
        response("adam", "q1", 5.0),
        dot("bob", "adam", 5.0),
        response("bob", "q1", 2.0),
    ])
    .unwrap_err();
    match err {
        CoreError::InconsistentTypes { expected, indices } => {
            assert_eq!(expected, EntityKind::Dot);
            assert_eq!(indices, vec![1, 3]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn response_collection_filters_by_question() {
    let responses = ResponseCollection::from_responses(vec![
        response("adam", "q1", 3.0),
        response("bob", "q1", 8.0),
        response("adam", "q2", 6.0),
    ])
    .unwrap();

    let q1 = responses.matching(&Criteria::new().subject(EntityRef::question("q1")));
    let values: Vec<f64> = q1.iter().filter_map(Assertion::number).collect();
    assert_eq!(values, vec![3.0, 8.0]);
    assert_eq!(q1.kind(), Some(EntityKind::Response));
}

#[test]
fn sources_are_listed_once_in_first_seen_order() {
    let set = AssertionSet::from_assertions(vec![
        dot("bob", "adam", 5.0),
        dot("adam", "bob", 5.0),
        dot("bob", "charlie", 5.0),
    ])
    .unwrap();
    assert_eq!(
        set.sources(),
        vec![Some(EntityRef::person("bob")), Some(EntityRef::person("adam"))]
    );
}

#[test]
fn deserialized_collection_is_rechecked() {
    let json = serde_json::json!({
        "kind": "dot",
        "members": [serde_json::to_value(response("adam", "q1", 4.0)).unwrap()],
    });
    let set: AssertionSet = serde_json::from_value(json).unwrap();
    assert!(matches!(
        set.check_consistent_types(),
        Err(CoreError::InconsistentTypes { .. })
    ));
}
