//! Pure reductions every analytic is built from.
//!
//! Undefined results are explicit: a zero total weight or an empty input
//! gives `None`, never a silent `0.0`. Percentages are on the 0-100 scale.

#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;
use std::hash::Hash;

use nub_core::enums::{NumericRange, Sentiment};

/// Weighted mean of `(value, weight)` pairs.
///
/// Returns `None` for an empty input or a zero total weight.
pub fn weighted_average<I>(values_and_weights: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (sum, total) = values_and_weights
        .into_iter()
        .fold((0.0, 0.0), |(sum, total), (v, w)| (v.mul_add(w, sum), total + w));
    (total > 0.0).then(|| sum / total)
}

/// Unweighted mean; `None` for an empty slice.
#[must_use]
pub fn average(values: &[f64]) -> Option<f64> {
    weighted_average(values.iter().map(|v| (*v, 1.0)))
}

/// `count` as a percentage of `total`; `None` when `total` is zero.
#[must_use]
pub fn percent_of_total(count: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| count as f64 * 100.0 / total as f64)
}

/// Percentage of `items` satisfying `condition`; `None` for an empty slice.
pub fn percent_satisfying_condition<T, P>(items: &[T], condition: P) -> Option<f64>
where
    P: Fn(&T) -> bool,
{
    percent_of_total(items.iter().filter(|i| condition(i)).count(), items.len())
}

/// Occurrence counts in first-seen key order.
pub fn counts<K, I>(items: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut out: Vec<(K, usize)> = Vec::new();
    for item in items {
        if let Some(&i) = index.get(&item) {
            out[i].1 += 1;
        } else {
            index.insert(item.clone(), out.len());
            out.push((item, 1));
        }
    }
    out
}

/// Each choice's share (0-100) of the total weight, in first-seen order.
///
/// Returns `None` for an empty input or a zero total weight.
pub fn weighted_shares<K, I>(values_and_weights: I) -> Option<Vec<(K, f64)>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut sums: Vec<(K, f64)> = Vec::new();
    for (key, weight) in values_and_weights {
        if let Some(&i) = index.get(&key) {
            sums[i].1 += weight;
        } else {
            index.insert(key.clone(), sums.len());
            sums.push((key, weight));
        }
    }
    let total: f64 = sums.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return None;
    }
    Some(
        sums.into_iter()
            .map(|(k, w)| (k, w * 100.0 / total))
            .collect(),
    )
}

/// Population standard deviation; `None` for an empty slice.
#[must_use]
pub fn standard_deviation(values: &[f64]) -> Option<f64> {
    let mean = average(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Standardized values. All zeros when the deviation is zero, empty for an
/// empty slice.
#[must_use]
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    let (Some(mean), Some(sd)) = (average(values), standard_deviation(values)) else {
        return Vec::new();
    };
    if sd <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - mean) / sd).collect()
}

/// Index of the bin `x` falls in, given ascending cutoffs.
///
/// `x` below the first cutoff is bin 0; `x` at or above the last cutoff is
/// `bins.len()`.
#[must_use]
pub fn digitize(x: f64, bins: &[f64]) -> usize {
    bins.partition_point(|b| *b <= x)
}

/// Sentiment bucket of `x`: 0 negative, 1 neutral, 2 positive.
#[must_use]
pub fn sentiment_bucket(x: f64, range: NumericRange) -> usize {
    digitize(x, &range.sentiment_cutoffs())
}

#[must_use]
pub fn sentiment_of(x: f64, range: NumericRange) -> Sentiment {
    Sentiment::from_bucket(sentiment_bucket(x, range))
}

// ---------------------------------------------------------------------------
// MappedValues
// ---------------------------------------------------------------------------

/// A lazy view applying `f` to every item of a slice.
///
/// The view is finite and can be iterated any number of times; the source
/// slice is never touched.
#[derive(Debug, Clone, Copy)]
pub struct MappedValues<'a, T, F> {
    items: &'a [T],
    f: F,
}

/// Map `items` through `f` lazily.
pub const fn map_values<T, F>(items: &[T], f: F) -> MappedValues<'_, T, F> {
    MappedValues { items, f }
}

impl<T, U, F> MappedValues<'_, T, F>
where
    F: Fn(&T) -> U,
{
    pub fn iter(&self) -> impl Iterator<Item = U> + '_ {
        self.items.iter().map(&self.f)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Map raw values on `range` to their sentiment buckets (as `f64`, so the
/// buckets can feed the numeric reductions).
#[must_use]
pub fn sentiment_buckets(values: &[f64], range: NumericRange) -> Vec<f64> {
    map_values(values, |v: &f64| sentiment_bucket(*v, range) as f64)
        .iter()
        .collect()
}
