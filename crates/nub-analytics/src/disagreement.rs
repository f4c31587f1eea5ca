//! Grading each response against the believable choice.

use nub_config::{ConsensusThresholds, DisagreementThresholds};
use nub_core::enums::{Agreement, NumericRange, ValueType};
use nub_core::{
    Assertion, AssertionSet, BelievableChoice, EntityRef, RelevanceCollection, ResponseVerdict,
    Value,
};

use crate::believable_choice::believable_choice;
use crate::divisiveness::ranked_buckets;
use crate::error::AnalyticsError;
use crate::extract;
use crate::foundation::{counts, percent_of_total, sentiment_bucket};

/// Grade one value against the believable choice.
///
/// Numeric: `d = |value - choice|`; `d > threshold_high` significantly
/// disagrees, `d > threshold_low` disagrees, anything closer agrees.
/// Categorical: any value other than the choice disagrees. Without a
/// consensus there is nothing to disagree with.
///
/// # Errors
///
/// [`AnalyticsError::UnsupportedValueType`] for `OtherCategorical`, and
/// [`AnalyticsError::ValueMismatch`] when a numeric value or choice is not a
/// number.
pub fn disagrees_with(
    value: &Value,
    choice: &BelievableChoice,
    value_type: ValueType,
    thresholds: &DisagreementThresholds,
) -> Result<Agreement, AnalyticsError> {
    match extract::supported(value_type)? {
        ValueType::Numeric(_) => {
            let value = extract::number(value, value_type)?;
            let Some(choice) = choice.value() else {
                return Ok(Agreement::Agrees);
            };
            let distance = (value - extract::number(choice, value_type)?).abs();
            Ok(if distance > thresholds.threshold_high {
                Agreement::SignificantlyDisagrees
            } else if distance > thresholds.threshold_low {
                Agreement::Disagrees
            } else {
                Agreement::Agrees
            })
        }
        _ => Ok(match choice.value() {
            Some(choice) if choice != value => Agreement::Disagrees,
            _ => Agreement::Agrees,
        }),
    }
}

/// Grade every response in `set` against `choice`.
///
/// Categorical responses whose bucket is as large as the top bucket agree:
/// a response tied for most popular is not out of sync.
///
/// # Errors
///
/// As [`disagrees_with`].
pub fn grade_responses(
    set: &AssertionSet,
    choice: &BelievableChoice,
    value_type: ValueType,
    thresholds: &DisagreementThresholds,
) -> Result<Vec<ResponseVerdict>, AnalyticsError> {
    let buckets = match value_type {
        ValueType::CategoricalBinary => ranked_buckets(set),
        ValueType::Numeric(_) | ValueType::OtherCategorical => Vec::new(),
    };
    let top = buckets.first().map_or(0, |(_, count)| *count);
    let tied_with_top = |value: &Value| {
        buckets
            .iter()
            .any(|(bucket, count)| bucket == value && *count == top)
    };

    set.iter()
        .map(|response| -> Result<ResponseVerdict, AnalyticsError> {
            let mut agreement = disagrees_with(&response.value, choice, value_type, thresholds)?;
            if agreement.is_disagreement() && tied_with_top(&response.value) {
                agreement = Agreement::Agrees;
            }
            Ok(ResponseVerdict {
                source: response.source.clone(),
                value: response.value.clone(),
                agreement,
            })
        })
        .collect()
}

/// Compute the believable choice on one subject and grade every response
/// against it.
///
/// # Errors
///
/// As [`disagrees_with`].
pub fn out_of_sync_on_subject(
    set: &AssertionSet,
    value_type: ValueType,
    consensus: &ConsensusThresholds,
    thresholds: &DisagreementThresholds,
    relevance: Option<&RelevanceCollection>,
) -> Result<Vec<ResponseVerdict>, AnalyticsError> {
    let choice = believable_choice(set, value_type, consensus, relevance)?;
    grade_responses(set, &choice, value_type, thresholds)
}

/// Judge every response on whether it sits in a small minority.
///
/// Numeric responses are bucketed by sentiment, categorical ones by value. A
/// response is a unique choice when its bucket's share (0-100) of all
/// responses is below `unique_disagreement`. Each judgement is about the
/// response's source and targets the response's subject.
///
/// # Errors
///
/// As [`disagrees_with`].
#[allow(clippy::cast_precision_loss)]
pub fn unique_choice(
    set: &AssertionSet,
    value_type: ValueType,
    thresholds: &DisagreementThresholds,
) -> Result<Vec<Assertion>, AnalyticsError> {
    let buckets: Vec<Value> = match extract::supported(value_type)? {
        ValueType::Numeric(range) => set
            .iter()
            .map(|r| -> Result<Value, AnalyticsError> {
                let n = extract::number(&r.value, value_type)?;
                Ok(Value::Number(sentiment_bucket(n, range) as f64))
            })
            .collect::<Result<_, _>>()?,
        _ => set.values().cloned().collect(),
    };
    let total = buckets.len();
    let tallies = counts(buckets.iter().cloned());
    let share_of = |bucket: &Value| {
        tallies
            .iter()
            .find(|(b, _)| b == bucket)
            .and_then(|(_, count)| percent_of_total(*count, total))
            .unwrap_or(0.0)
    };

    tracing::trace!(responses = total, buckets = tallies.len(), "unique choice");
    Ok(set
        .iter()
        .zip(&buckets)
        .map(|(response, bucket)| {
            let unique = share_of(bucket) < thresholds.unique_disagreement;
            let source = response.source.clone().unwrap_or_else(EntityRef::system);
            Assertion {
                target: response.subject.clone(),
                ..Assertion::system_judgement(source, unique).with_attribute("unique_choice")
            }
        })
        .collect())
}

/// How many sentiment buckets apart two values are.
#[must_use]
pub fn bucketed_disagreement(a: f64, b: f64, range: NumericRange) -> usize {
    sentiment_bucket(a, range).abs_diff(sentiment_bucket(b, range))
}

/// Two values disagree substantively when they are more than
/// `threshold_high` apart and land in different sentiment buckets.
#[must_use]
pub fn substantive_disagreement(a: f64, b: f64, range: NumericRange, threshold_high: f64) -> bool {
    (a - b).abs() > threshold_high && bucketed_disagreement(a, b, range) > 0
}
