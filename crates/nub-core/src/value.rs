//! Assertion values, answer scales and the believable-choice sentinel.

use std::fmt;
use std::hash::{Hash, Hasher};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::NumericRange;

/// Text that binary answers use for an affirmative choice.
pub const YES: &str = "Yes";
/// Text that binary answers use for a negative choice.
pub const NO: &str = "No";

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A scalar or categorical value carried by an assertion.
///
/// Numbers compare and hash by bit pattern (with `-0.0` folded into `0.0`) so
/// values can key categorical buckets.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(_) | Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Bool(_) | Self::Number(_) => None,
        }
    }

    /// Boolean reading; `"Yes"`/`"No"` text counts as a boolean answer.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) if s.eq_ignore_ascii_case(YES) => Some(true),
            Self::Text(s) if s.eq_ignore_ascii_case(NO) => Some(false),
            Self::Text(_) | Self::Number(_) => None,
        }
    }

    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Short shape name used in error messages.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
        }
    }

    fn number_bits(n: f64) -> u64 {
        if n == 0.0 { 0 } else { n.to_bits() }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => Self::number_bits(*a) == Self::number_bits(*b),
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Bool(b) => b.hash(state),
            Self::Number(n) => Self::number_bits(*n).hash(state),
            Self::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str(YES),
            Self::Bool(false) => f.write_str(NO),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

// ---------------------------------------------------------------------------
// AnswerScale
// ---------------------------------------------------------------------------

/// The set of values a question permits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "kind", content = "options")]
pub enum AnswerScale {
    /// Any number inside a fixed range.
    Numeric(NumericRange),
    /// An explicit set of permitted scale points.
    ScaleValues(Vec<f64>),
    /// Pick one of these strings. An empty list accepts any text.
    Strings(Vec<String>),
    /// Yes / No.
    Boolean,
    /// Pick one of these numbers.
    Floats(Vec<f64>),
}

impl AnswerScale {
    /// Whether `value` is a permissible answer on this scale.
    #[must_use]
    pub fn permits(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Numeric(range), Value::Number(n)) => range.contains(*n),
            (Self::ScaleValues(points) | Self::Floats(points), Value::Number(n)) => {
                points.iter().any(|p| Value::Number(*p) == Value::Number(*n))
            }
            (Self::Strings(options), Value::Text(s)) => {
                options.is_empty() || options.iter().any(|o| o == s)
            }
            (Self::Boolean, v) => v.as_bool().is_some(),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// BelievableChoice
// ---------------------------------------------------------------------------

/// The group's best estimate of consensus on a subject.
///
/// `NoConsensus` is a first-class result for empty, tied, below-quorum or
/// zero-weight inputs; callers check it rather than catching an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "status", content = "value")]
pub enum BelievableChoice {
    Consensus(Value),
    NoConsensus,
}

impl BelievableChoice {
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Consensus(value) => Some(value),
            Self::NoConsensus => None,
        }
    }

    #[must_use]
    pub const fn is_consensus(&self) -> bool {
        matches!(self, Self::Consensus(_))
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        self.value().and_then(Value::as_number)
    }
}

impl From<Option<Value>> for BelievableChoice {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::NoConsensus, Self::Consensus)
    }
}
