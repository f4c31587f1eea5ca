//! The group's best estimate of the answer on one subject.

use nub_config::ConsensusThresholds;
use nub_core::enums::ValueType;
use nub_core::{AssertionSet, BelievableChoice, RelevanceCollection, Value};

use crate::error::AnalyticsError;
use crate::extract;
use crate::foundation::{weighted_average, weighted_shares};

/// Shares closer than this are a tie.
const TIE_TOLERANCE: f64 = 1e-9;

/// The believable choice on one subject.
///
/// Numeric: the weighted average of every value. Categorical: the value with
/// the strictly largest weighted share, if that share exceeds
/// `minimum_vote_share` and at least `minimum_votes` assertions chose it.
///
/// Weights come from `relevance` keyed by source when given (unscored
/// sources weigh nothing), else from each assertion's own weight, else 1.0.
/// Empty sets, ties, missing quorum and zero total weight all give
/// [`BelievableChoice::NoConsensus`].
///
/// # Errors
///
/// [`AnalyticsError::UnsupportedValueType`] for `OtherCategorical`, and
/// [`AnalyticsError::ValueMismatch`] for a non-number on a numeric scale.
pub fn believable_choice(
    set: &AssertionSet,
    value_type: ValueType,
    thresholds: &ConsensusThresholds,
    relevance: Option<&RelevanceCollection>,
) -> Result<BelievableChoice, AnalyticsError> {
    let choice = match extract::supported(value_type)? {
        ValueType::Numeric(_) => {
            let pairs = set
                .iter()
                .map(|a| -> Result<(f64, f64), AnalyticsError> {
                    Ok((
                        extract::number(&a.value, value_type)?,
                        extract::weight_of(a, relevance),
                    ))
                })
                .collect::<Result<Vec<_>, _>>()?;
            weighted_average(pairs).map(Value::Number).into()
        }
        _ => categorical_choice(set, thresholds, relevance),
    };
    tracing::trace!(?choice, responses = set.len(), "believable choice");
    Ok(choice)
}

fn categorical_choice(
    set: &AssertionSet,
    thresholds: &ConsensusThresholds,
    relevance: Option<&RelevanceCollection>,
) -> BelievableChoice {
    let Some(shares) = weighted_shares(
        set.iter()
            .map(|a| (a.value.clone(), extract::weight_of(a, relevance))),
    ) else {
        return BelievableChoice::NoConsensus;
    };

    let Some((leader, lead_share)) = shares
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(v, s)| (v.clone(), *s))
    else {
        return BelievableChoice::NoConsensus;
    };
    let tied = shares
        .iter()
        .filter(|(_, s)| (lead_share - s).abs() < TIE_TOLERANCE)
        .count()
        > 1;
    let votes = set.values().filter(|v| **v == leader).count();

    if tied || lead_share <= thresholds.minimum_vote_share || votes < thresholds.minimum_votes {
        tracing::trace!(%leader, lead_share, votes, tied, "no categorical consensus");
        return BelievableChoice::NoConsensus;
    }
    BelievableChoice::Consensus(leader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nub_core::enums::NumericRange;
    use nub_core::{Assertion, EntityRef, RelevanceScore};
    use pretty_assertions::assert_eq;

    fn answer(person: &str, value: impl Into<Value>, value_type: ValueType) -> Assertion {
        Assertion::response(
            EntityRef::person(person),
            EntityRef::meeting("m1"),
            EntityRef::question("q1"),
            value,
            value_type,
        )
    }

    fn votes(yes: usize, no: usize) -> AssertionSet {
        let ballots = (0..yes)
            .map(|i| answer(&format!("y{i}"), "Yes", ValueType::CategoricalBinary))
            .chain((0..no).map(|i| answer(&format!("n{i}"), "No", ValueType::CategoricalBinary)))
            .collect();
        AssertionSet::from_assertions(ballots).unwrap()
    }

    #[test]
    fn clear_majority_is_the_choice() {
        let choice = believable_choice(
            &votes(5, 1),
            ValueType::CategoricalBinary,
            &ConsensusThresholds::default(),
            None,
        )
        .unwrap();
        assert_eq!(choice, BelievableChoice::Consensus(Value::from("Yes")));
    }

    #[test]
    fn majority_below_minimum_votes_has_no_consensus() {
        let choice = believable_choice(
            &votes(3, 0),
            ValueType::CategoricalBinary,
            &ConsensusThresholds::default(),
            None,
        )
        .unwrap();
        assert_eq!(choice, BelievableChoice::NoConsensus);
    }

    #[test]
    fn relevance_can_outvote_a_headcount() {
        let relevance = RelevanceCollection::from_scores(
            (0..4)
                .map(|i| RelevanceScore::new(EntityRef::person(format!("y{i}")), 1.0))
                .chain((0..5).map(|i| RelevanceScore::new(EntityRef::person(format!("n{i}")), 0.1)))
                .collect(),
        )
        .unwrap();
        let choice = believable_choice(
            &votes(4, 5),
            ValueType::CategoricalBinary,
            &ConsensusThresholds::default(),
            Some(&relevance),
        )
        .unwrap();
        assert_eq!(choice, BelievableChoice::Consensus(Value::from("Yes")));
    }

    #[test]
    fn numeric_choice_uses_assertion_weights() {
        let range = ValueType::Numeric(NumericRange::OneToFive);
        let set = AssertionSet::from_assertions(vec![
            answer("adam", 1.0, range).with_weight(3.0),
            answer("bob", 5.0, range),
        ])
        .unwrap();
        let choice =
            believable_choice(&set, range, &ConsensusThresholds::default(), None).unwrap();
        assert_eq!(choice, BelievableChoice::Consensus(Value::Number(2.0)));
    }

    #[test]
    fn unscored_sources_leave_no_weight() {
        let range = ValueType::Numeric(NumericRange::OneToFive);
        let set = AssertionSet::from_assertions(vec![answer("adam", 4.0, range)]).unwrap();
        let choice = believable_choice(
            &set,
            range,
            &ConsensusThresholds::default(),
            Some(&RelevanceCollection::new()),
        )
        .unwrap();
        assert_eq!(choice, BelievableChoice::NoConsensus);
    }
}
