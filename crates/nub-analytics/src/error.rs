//! Analytics error types for nub-analytics.

use nub_core::CoreError;
use nub_core::enums::ValueType;

/// Errors from engine dispatch and value extraction.
///
/// Degenerate but valid inputs (empty sets, zero weight, no quorum) are not
/// errors; those return `None`, `false` or `BelievableChoice::NoConsensus`.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// The value type has no analytic defined for it.
    #[error("unsupported value type: {0}")]
    UnsupportedValueType(ValueType),

    /// A value's shape does not match the declared value type.
    #[error("value mismatch: {value_type} expects a number, got {shape} '{value}'")]
    ValueMismatch {
        value_type: ValueType,
        shape: &'static str,
        value: String,
    },

    /// Error from the data model while assembling inputs.
    #[error("model error: {0}")]
    Core(#[from] CoreError),
}
