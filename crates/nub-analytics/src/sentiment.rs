//! Tone of numeric assertions: per-author syntheses, weighted sentiment and
//! positive / neutral / negative tallies.

use nub_core::enums::{NumericRange, Sentiment, ValueType};
use nub_core::{Assertion, AssertionSet, EntityRef, RelevanceCollection};

use crate::error::AnalyticsError;
use crate::extract;
use crate::foundation::{average, sentiment_bucket, sentiment_of, weighted_average};

/// One source's synthesized view of one subject.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub source: Option<EntityRef>,
    pub subject: EntityRef,
    pub value: f64,
}

/// Sentiment tallies, by headcount and by weight.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SentimentCounts {
    pub negative: usize,
    pub neutral: usize,
    pub positive: usize,
    pub weighted_negative: f64,
    pub weighted_neutral: f64,
    pub weighted_positive: f64,
}

impl SentimentCounts {
    #[must_use]
    pub const fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
            Sentiment::Positive => self.positive,
        }
    }

    #[must_use]
    pub const fn weighted(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Negative => self.weighted_negative,
            Sentiment::Neutral => self.weighted_neutral,
            Sentiment::Positive => self.weighted_positive,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.negative + self.neutral + self.positive
    }

    fn add(&mut self, sentiment: Sentiment, weight: f64) {
        match sentiment {
            Sentiment::Negative => {
                self.negative += 1;
                self.weighted_negative += weight;
            }
            Sentiment::Neutral => {
                self.neutral += 1;
                self.weighted_neutral += weight;
            }
            Sentiment::Positive => {
                self.positive += 1;
                self.weighted_positive += weight;
            }
        }
    }
}

fn numeric_range(assertion: &Assertion) -> Result<NumericRange, AnalyticsError> {
    match extract::supported(assertion.value_type)? {
        ValueType::Numeric(range) => Ok(range),
        other => Err(AnalyticsError::UnsupportedValueType(other)),
    }
}

fn number(assertion: &Assertion) -> Result<f64, AnalyticsError> {
    numeric_range(assertion)?;
    extract::number(&assertion.value, assertion.value_type)
}

/// Average each source's values per subject, in first-seen order.
///
/// # Errors
///
/// [`AnalyticsError::UnsupportedValueType`] for non-numeric assertions and
/// [`AnalyticsError::ValueMismatch`] for a non-number on a numeric scale.
pub fn synthesize(set: &AssertionSet) -> Result<Vec<Synthesis>, AnalyticsError> {
    set.group_by_source_and_subject()
        .into_iter()
        .filter_map(|group| {
            let values = match group
                .members
                .iter()
                .map(|a| number(a))
                .collect::<Result<Vec<_>, _>>()
            {
                Ok(values) => values,
                Err(e) => return Some(Err(e)),
            };
            average(&values).map(|value| {
                Ok(Synthesis {
                    source: group.source.cloned(),
                    subject: group.other.clone(),
                    value,
                })
            })
        })
        .collect()
}

/// Weighted average of every numeric value in `set`; `None` when there is
/// nothing (or no weight) to average.
///
/// # Errors
///
/// As [`synthesize`].
pub fn sentiment(
    set: &AssertionSet,
    relevance: Option<&RelevanceCollection>,
) -> Result<Option<f64>, AnalyticsError> {
    let pairs = set
        .iter()
        .map(|a| -> Result<(f64, f64), AnalyticsError> {
            Ok((number(a)?, extract::weight_of(a, relevance)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(weighted_average(pairs))
}

/// Sentiment bucket of the weighted average, on the set's scale.
///
/// # Errors
///
/// As [`synthesize`].
pub fn overall_sentiment(
    set: &AssertionSet,
    relevance: Option<&RelevanceCollection>,
) -> Result<Option<Sentiment>, AnalyticsError> {
    let Some(first) = set.iter().next() else {
        return Ok(None);
    };
    let range = numeric_range(first)?;
    Ok(sentiment(set, relevance)?.map(|avg| sentiment_of(avg, range)))
}

/// Count positive, neutral and negative values, each on its own scale.
///
/// # Errors
///
/// As [`synthesize`].
pub fn sentiment_counts(
    set: &AssertionSet,
    relevance: Option<&RelevanceCollection>,
) -> Result<SentimentCounts, AnalyticsError> {
    let mut counts = SentimentCounts::default();
    for assertion in set {
        let range = numeric_range(assertion)?;
        let value = number(assertion)?;
        counts.add(
            Sentiment::from_bucket(sentiment_bucket(value, range)),
            extract::weight_of(assertion, relevance),
        );
    }
    tracing::trace!(?counts, "sentiment counts");
    Ok(counts)
}
