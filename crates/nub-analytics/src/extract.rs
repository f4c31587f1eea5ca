//! Pulling typed values and weights out of assertions.

use nub_core::enums::{NumericRange, ValueType};
use nub_core::{Assertion, AssertionSet, RelevanceCollection, Value};

use crate::error::AnalyticsError;

/// Reject the value types the engine has no dispatch for.
pub(crate) fn supported(value_type: ValueType) -> Result<ValueType, AnalyticsError> {
    match value_type {
        ValueType::Numeric(_) | ValueType::CategoricalBinary => Ok(value_type),
        ValueType::OtherCategorical => {
            tracing::warn!(%value_type, "no analytic dispatch for value type");
            Err(AnalyticsError::UnsupportedValueType(value_type))
        }
    }
}

/// The number inside `value`, which must be numeric for `value_type`.
pub(crate) fn number(value: &Value, value_type: ValueType) -> Result<f64, AnalyticsError> {
    value.as_number().ok_or_else(|| AnalyticsError::ValueMismatch {
        value_type,
        shape: value.shape(),
        value: value.to_string(),
    })
}

/// Every value of a numeric subject.
pub(crate) fn numbers(
    set: &AssertionSet,
    range: NumericRange,
) -> Result<Vec<f64>, AnalyticsError> {
    set.values()
        .map(|v| number(v, ValueType::Numeric(range)))
        .collect()
}

/// Weight an assertion carries in averages and vote shares.
///
/// With a relevance collection the source's relevance (within the
/// assertion's target, if scored there) decides and an unscored source
/// weighs nothing. Without one the assertion's own weight applies,
/// defaulting to 1.0.
pub(crate) fn weight_of(assertion: &Assertion, relevance: Option<&RelevanceCollection>) -> f64 {
    match relevance {
        Some(relevance) => assertion
            .source
            .as_ref()
            .and_then(|source| relevance.weight_in(source, &assertion.target))
            .unwrap_or(0.0),
        None => assertion.weight.unwrap_or(1.0),
    }
}
