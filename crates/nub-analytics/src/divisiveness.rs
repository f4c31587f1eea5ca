//! Spread and polarization of the values asserted about one subject.
//!
//! Numeric subjects are measured on both the raw scale and the sentiment
//! scale (0 negative, 1 neutral, 2 positive). Categorical subjects are
//! measured through their ranked buckets.

#![allow(clippy::cast_precision_loss)]

use nub_config::PolarizationThresholds;
use nub_core::enums::{NumericRange, ValueType};
use nub_core::{AssertionSet, Value};

use crate::error::AnalyticsError;
use crate::extract;
use crate::foundation::{counts, percent_of_total, sentiment_buckets, standard_deviation};

// ---------------------------------------------------------------------------
// Numeric statistics
// ---------------------------------------------------------------------------

/// Standard deviation of raw values, or of their sentiment buckets when
/// `mapped`. `None` for no values.
#[must_use]
pub fn numeric_divisiveness(values: &[f64], range: NumericRange, mapped: bool) -> Option<f64> {
    if mapped {
        standard_deviation(&sentiment_buckets(values, range))
    } else {
        standard_deviation(values)
    }
}

/// Balance between positive and negative opinions: the smaller of the two
/// ratios between their shares. 0.0 when either pole is empty.
#[must_use]
pub fn numeric_polarizing_stat(values: &[f64], range: NumericRange) -> f64 {
    let buckets = sentiment_buckets(values, range);
    let share = |bucket: f64| {
        percent_of_total(
            buckets.iter().filter(|b| (**b - bucket).abs() < f64::EPSILON).count(),
            buckets.len(),
        )
        .unwrap_or(0.0)
    };
    let negative = share(0.0);
    let positive = share(2.0);
    if negative > 0.0 && positive > 0.0 {
        (positive / negative).min(negative / positive)
    } else {
        0.0
    }
}

/// Raw spread, sentiment spread and pole balance all above their thresholds.
#[must_use]
pub fn numeric_nubby_and_polarizing(
    values: &[f64],
    range: NumericRange,
    thresholds: &PolarizationThresholds,
) -> bool {
    let raw = numeric_divisiveness(values, range, false).unwrap_or(0.0);
    let mapped = numeric_divisiveness(values, range, true).unwrap_or(0.0);
    let poles = numeric_polarizing_stat(values, range);
    tracing::trace!(raw, mapped, poles, "nubby-and-polarizing statistics");
    raw > thresholds.thresh_on_std_scale
        && mapped > thresholds.thresh_on_std_mapped_scale
        && poles > thresholds.thresh_on_poles
}

// ---------------------------------------------------------------------------
// Categorical buckets
// ---------------------------------------------------------------------------

/// Buckets of equal values ranked by size, largest first. Equal-sized
/// buckets keep first-seen order.
#[must_use]
pub fn ranked_buckets(set: &AssertionSet) -> Vec<(Value, usize)> {
    let mut buckets = counts(set.values().cloned());
    buckets.sort_by(|a, b| b.1.cmp(&a.1));
    buckets
}

fn categorical_divisiveness(set: &AssertionSet) -> Option<f64> {
    let buckets = ranked_buckets(set);
    let (top, _) = buckets.first()?;
    let indicator: Vec<f64> = set
        .values()
        .map(|v| if v == top { 1.0 } else { 0.0 })
        .collect();
    standard_deviation(&indicator)
}

fn categorical_polarizing_stat(set: &AssertionSet) -> f64 {
    match ranked_buckets(set).as_slice() {
        [(_, top), (_, runner_up), ..] => *runner_up as f64 / *top as f64,
        _ => 0.0,
    }
}

fn categorical_is_polarizing(set: &AssertionSet, thresholds: &PolarizationThresholds) -> bool {
    let total = set.len();
    let buckets = ranked_buckets(set);
    let [(_, top), (_, runner_up), ..] = buckets.as_slice() else {
        return false;
    };
    let bucket_passes = |count: usize, min_count: usize, min_percent: f64| {
        count >= min_count && percent_of_total(count, total).is_some_and(|p| p >= min_percent)
    };
    bucket_passes(*top, thresholds.min_count_1, thresholds.min_percent_1)
        && bucket_passes(*runner_up, thresholds.min_count_2, thresholds.min_percent_2)
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Continuous spread of the set.
///
/// Numeric: standard deviation, of sentiment buckets when `mapped`.
/// Categorical: standard deviation of the in-top-bucket indicator.
///
/// # Errors
///
/// [`AnalyticsError::UnsupportedValueType`] for `OtherCategorical`, and
/// [`AnalyticsError::ValueMismatch`] for a non-number on a numeric scale.
pub fn divisiveness_stat(
    set: &AssertionSet,
    value_type: ValueType,
    mapped: bool,
) -> Result<Option<f64>, AnalyticsError> {
    match extract::supported(value_type)? {
        ValueType::Numeric(range) => Ok(numeric_divisiveness(
            &extract::numbers(set, range)?,
            range,
            mapped,
        )),
        _ => Ok(categorical_divisiveness(set)),
    }
}

/// Balance between the two poles of the set.
///
/// Numeric: [`numeric_polarizing_stat`]. Categorical: runner-up bucket size
/// over top bucket size.
///
/// # Errors
///
/// As [`divisiveness_stat`].
pub fn polarizing_stat(set: &AssertionSet, value_type: ValueType) -> Result<f64, AnalyticsError> {
    match extract::supported(value_type)? {
        ValueType::Numeric(range) => Ok(numeric_polarizing_stat(
            &extract::numbers(set, range)?,
            range,
        )),
        _ => Ok(categorical_polarizing_stat(set)),
    }
}

/// Whether the values asserted about one subject are polarizing.
///
/// Numeric: the sentiment-bucket spread exceeds `thresh_on_std_mapped_scale`
/// or the raw spread exceeds `thresh_on_std_scale`. Categorical: both the
/// top and runner-up buckets meet their count and share minimums; a
/// unanimous set has no runner-up and is never polarizing.
///
/// # Errors
///
/// As [`divisiveness_stat`].
pub fn is_polarizing(
    set: &AssertionSet,
    value_type: ValueType,
    thresholds: &PolarizationThresholds,
) -> Result<bool, AnalyticsError> {
    let polarizing = match extract::supported(value_type)? {
        ValueType::Numeric(range) => {
            let values = extract::numbers(set, range)?;
            let mapped = numeric_divisiveness(&values, range, true);
            let raw = numeric_divisiveness(&values, range, false);
            tracing::trace!(?mapped, ?raw, "numeric divisiveness");
            mapped.is_some_and(|d| d > thresholds.thresh_on_std_mapped_scale)
                || raw.is_some_and(|d| d > thresholds.thresh_on_std_scale)
        }
        _ => categorical_is_polarizing(set, thresholds),
    };
    Ok(polarizing)
}

/// Stricter than [`is_polarizing`]: spread and pole balance must all clear
/// their thresholds.
///
/// Categorical sets need both the [`is_polarizing`] bucket rule and a
/// runner-up/top ratio above `thresh_on_poles`.
///
/// # Errors
///
/// As [`divisiveness_stat`].
pub fn is_nubby_and_polarizing(
    set: &AssertionSet,
    value_type: ValueType,
    thresholds: &PolarizationThresholds,
) -> Result<bool, AnalyticsError> {
    match extract::supported(value_type)? {
        ValueType::Numeric(range) => Ok(numeric_nubby_and_polarizing(
            &extract::numbers(set, range)?,
            range,
            thresholds,
        )),
        _ => Ok(categorical_is_polarizing(set, thresholds)
            && categorical_polarizing_stat(set) > thresholds.thresh_on_poles),
    }
}

/// A subject is nubby when it has at least two answers and their spread
/// (sentiment-mapped for numeric answers) exceeds `threshold`.
///
/// # Errors
///
/// As [`divisiveness_stat`].
pub fn is_nubby_subject(
    set: &AssertionSet,
    value_type: ValueType,
    threshold: f64,
) -> Result<bool, AnalyticsError> {
    if set.len() < 2 {
        extract::supported(value_type)?;
        return Ok(false);
    }
    Ok(divisiveness_stat(set, value_type, true)?.is_some_and(|d| d > threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nub_core::{Assertion, EntityRef};
    use pretty_assertions::assert_eq;

    const TEN: ValueType = ValueType::Numeric(NumericRange::OneToTen);

    fn answers<V: Into<Value> + Clone>(values: &[V], value_type: ValueType) -> AssertionSet {
        let assertions = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                Assertion::response(
                    EntityRef::person(format!("p{i}")),
                    EntityRef::meeting("m1"),
                    EntityRef::question("q1"),
                    v.clone(),
                    value_type,
                )
            })
            .collect();
        AssertionSet::from_assertions(assertions).unwrap()
    }

    #[test]
    fn pole_balance_needs_both_poles() {
        assert!((numeric_polarizing_stat(&[1.0, 2.0, 9.0, 10.0], NumericRange::OneToTen) - 1.0).abs() < 1e-9);
        assert!((numeric_polarizing_stat(&[1.0, 9.0, 10.0, 8.0], NumericRange::OneToTen) - 1.0 / 3.0).abs() < 1e-9);
        assert!(numeric_polarizing_stat(&[8.0, 9.0, 10.0], NumericRange::OneToTen).abs() < f64::EPSILON);
    }

    #[test]
    fn ranked_buckets_are_largest_first() {
        let set = answers(&["no", "yes", "yes", "maybe", "yes", "no"], ValueType::CategoricalBinary);
        assert_eq!(
            ranked_buckets(&set),
            vec![(Value::from("yes"), 3), (Value::from("no"), 2), (Value::from("maybe"), 1)]
        );
    }

    #[test]
    fn categorical_divisiveness_of_even_split_is_half() {
        let set = answers(&["yes", "no", "yes", "no"], ValueType::CategoricalBinary);
        let d = divisiveness_stat(&set, ValueType::CategoricalBinary, true).unwrap().unwrap();
        assert!((d - 0.5).abs() < 1e-9);
        assert!((polarizing_stat(&set, ValueType::CategoricalBinary).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_set_is_not_polarizing() {
        let set = AssertionSet::new();
        assert!(!is_polarizing(&set, TEN, &PolarizationThresholds::default()).unwrap());
        assert_eq!(divisiveness_stat(&set, TEN, false).unwrap(), None);
    }

    #[test]
    fn text_on_numeric_scale_is_a_mismatch() {
        let set = answers(&["seven"], ValueType::CategoricalBinary);
        let err = is_polarizing(&set, TEN, &PolarizationThresholds::default()).unwrap_err();
        assert!(matches!(err, AnalyticsError::ValueMismatch { shape: "text", .. }));
    }

    #[test]
    fn other_categorical_is_unsupported() {
        let set = answers(&["gold"], ValueType::OtherCategorical);
        assert!(matches!(
            polarizing_stat(&set, ValueType::OtherCategorical),
            Err(AnalyticsError::UnsupportedValueType(ValueType::OtherCategorical))
        ));
    }

    #[test]
    fn single_answer_is_never_nubby() {
        let set = answers(&[1.0], TEN);
        assert!(!is_nubby_subject(&set, TEN, 0.0).unwrap());
        let split = answers(&[1.0, 10.0], TEN);
        assert!(is_nubby_subject(&split, TEN, 0.5).unwrap());
    }

    #[test]
    fn nubby_and_polarizing_needs_all_three() {
        let t = PolarizationThresholds::default();
        // Wide split between the poles.
        assert!(numeric_nubby_and_polarizing(&[1.0, 2.0, 9.0, 10.0], NumericRange::OneToTen, &t));
        // Wide raw spread but everyone is positive.
        assert!(!numeric_nubby_and_polarizing(&[7.0, 10.0, 7.0, 10.0], NumericRange::OneToTen, &t));
    }
}
