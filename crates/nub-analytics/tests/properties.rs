//! Properties that hold across scales, sizes and weights.

use nub_analytics::foundation::weighted_average;
use nub_analytics::{believable_choice, disagrees_with, is_nubby_subject, is_polarizing};
use nub_config::{ConsensusThresholds, DisagreementThresholds, PolarizationThresholds};
use nub_core::enums::{Agreement, NumericRange, ValueType};
use nub_core::{Assertion, AssertionSet, BelievableChoice, EntityRef, Value};
use rstest::rstest;

fn weighted(values: &[(Value, f64)], value_type: ValueType) -> AssertionSet {
    AssertionSet::from_assertions(
        values
            .iter()
            .enumerate()
            .map(|(i, (v, w))| {
                Assertion::response(
                    EntityRef::person(format!("p{i}")),
                    EntityRef::meeting("m1"),
                    EntityRef::question("q1"),
                    v.clone(),
                    value_type,
                )
                .with_weight(*w)
            })
            .collect(),
    )
    .unwrap()
}

fn zero_thresholds() -> PolarizationThresholds {
    PolarizationThresholds {
        thresh_on_std_scale: 0.0,
        thresh_on_std_mapped_scale: 0.0,
        thresh_on_poles: 0.0,
        min_count_1: 0,
        min_percent_1: 0.0,
        min_count_2: 0,
        min_percent_2: 0.0,
    }
}

#[rstest]
fn identical_answers_are_never_polarizing(
    #[values(
        ValueType::Numeric(NumericRange::OneToThree),
        ValueType::Numeric(NumericRange::OneToFive),
        ValueType::Numeric(NumericRange::OneToTen),
        ValueType::CategoricalBinary
    )]
    value_type: ValueType,
    #[values(1, 2, 3, 7, 25)] n: usize,
    #[values(PolarizationThresholds::default(), zero_thresholds())]
    thresholds: PolarizationThresholds,
) {
    let value = match value_type {
        ValueType::Numeric(_) => Value::from(2.0),
        ValueType::CategoricalBinary | ValueType::OtherCategorical => Value::from("Yes"),
    };
    let set = weighted(&vec![(value, 1.0); n], value_type);
    assert!(!is_polarizing(&set, value_type, &thresholds).unwrap());
    assert!(!is_nubby_subject(&set, value_type, thresholds.thresh_on_std_mapped_scale).unwrap());
}

#[rstest]
#[case(vec![(1.0, 1.0), (5.0, 1.0)])]
#[case(vec![(2.0, 0.5), (4.0, 2.0), (5.0, 1.5)])]
#[case(vec![(3.0, 3.0)])]
#[case(vec![(1.0, 0.0), (5.0, 2.0), (2.0, 0.25)])]
fn numeric_choice_is_the_weighted_average(#[case] pairs: Vec<(f64, f64)>) {
    let value_type = ValueType::Numeric(NumericRange::OneToFive);
    let set = weighted(
        &pairs
            .iter()
            .map(|(v, w)| (Value::from(*v), *w))
            .collect::<Vec<_>>(),
        value_type,
    );
    let choice =
        believable_choice(&set, value_type, &ConsensusThresholds::default(), None).unwrap();
    let expected = weighted_average(pairs.iter().copied()).unwrap();
    assert!((choice.as_number().unwrap() - expected).abs() < 1e-12);
}

#[rstest]
fn majority_below_minimum_votes_has_no_consensus(#[values(1, 2, 3)] votes: usize) {
    let set = weighted(
        &vec![(Value::from("Yes"), 1.0); votes],
        ValueType::CategoricalBinary,
    );
    let choice = believable_choice(
        &set,
        ValueType::CategoricalBinary,
        &ConsensusThresholds::default(),
        None,
    )
    .unwrap();
    assert_eq!(choice, BelievableChoice::NoConsensus);
}

#[rstest]
fn an_answer_equal_to_the_choice_never_disagrees(
    #[values(1.0, 2.5, 4.0, 7.0, 10.0)] value: f64,
) {
    let value_type = ValueType::Numeric(NumericRange::OneToTen);
    let choice = BelievableChoice::Consensus(Value::from(value));
    let agreement = disagrees_with(
        &Value::from(value),
        &choice,
        value_type,
        &DisagreementThresholds::default(),
    )
    .unwrap();
    assert_eq!(agreement, Agreement::Agrees);
}

#[test]
fn grading_never_softens_as_distance_grows() {
    let value_type = ValueType::Numeric(NumericRange::OneToTen);
    let thresholds = DisagreementThresholds::default();
    let choice = BelievableChoice::Consensus(Value::from(5.0));
    let grades: Vec<Agreement> = (0..=40)
        .map(|step| {
            let value = 5.0 + f64::from(step) * 0.1;
            disagrees_with(&Value::from(value), &choice, value_type, &thresholds).unwrap()
        })
        .collect();
    assert!(grades.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(grades.first(), Some(&Agreement::Agrees));
    assert_eq!(grades.last(), Some(&Agreement::SignificantlyDisagrees));
}

#[test]
fn no_consensus_never_disagrees() {
    let agreement = disagrees_with(
        &Value::from("No"),
        &BelievableChoice::NoConsensus,
        ValueType::CategoricalBinary,
        &DisagreementThresholds::default(),
    )
    .unwrap();
    assert_eq!(agreement, Agreement::Agrees);
}
