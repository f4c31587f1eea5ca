//! Kind tags, question types, numeric ranges and verdict enums.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` with a matching `Display` impl.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Concrete kind of every record the model knows about.
///
/// Collections record one kind and reject members of any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    System,
    Person,
    Team,
    Meeting,
    Question,
    Action,
    Attribute,
    Assertion,
    Judgement,
    Response,
    Dot,
    Ranking,
    Comparison,
    RelevanceScore,
    MeetingNubbyClassification,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Person => "person",
            Self::Team => "team",
            Self::Meeting => "meeting",
            Self::Question => "question",
            Self::Action => "action",
            Self::Attribute => "attribute",
            Self::Assertion => "assertion",
            Self::Judgement => "judgement",
            Self::Response => "response",
            Self::Dot => "dot",
            Self::Ranking => "ranking",
            Self::Comparison => "comparison",
            Self::RelevanceScore => "relevance_score",
            Self::MeetingNubbyClassification => "meeting_nubby_classification",
        }
    }

    /// Whether this kind tags an [`Assertion`](crate::assertion::Assertion).
    #[must_use]
    pub const fn is_assertion(self) -> bool {
        matches!(
            self,
            Self::Assertion
                | Self::Judgement
                | Self::Response
                | Self::Dot
                | Self::Ranking
                | Self::Comparison
        )
    }

    /// Whether this kind tags an [`Entity`](crate::entities::Entity) variant.
    #[must_use]
    pub const fn is_entity(self) -> bool {
        matches!(
            self,
            Self::System
                | Self::Person
                | Self::Team
                | Self::Meeting
                | Self::Question
                | Self::Action
                | Self::Attribute
        )
    }

    /// Plain attributes a projection of this kind may retain.
    #[must_use]
    pub const fn allowable_attributes(self) -> &'static [&'static str] {
        match self {
            Self::System => &["description"],
            Self::Person => &["name", "role", "description", "believability"],
            Self::Team | Self::Action | Self::Attribute => &["name", "description"],
            Self::Meeting => &["name", "description", "held_at"],
            Self::Question => &["title", "description", "question_type", "scale"],
            Self::Assertion
            | Self::Judgement
            | Self::Response
            | Self::Dot
            | Self::Ranking
            | Self::Comparison => &[
                "source",
                "weight",
                "attribute",
                "description",
                "created_at",
            ],
            Self::RelevanceScore => &["context"],
            Self::MeetingNubbyClassification => &[],
        }
    }

    /// Nested collections a projection of this kind may retain.
    #[must_use]
    pub const fn allowable_collections(self) -> &'static [&'static str] {
        match self {
            Self::Person => &["dots"],
            Self::Team => &["members"],
            Self::Meeting => &["participants", "questions", "dots"],
            Self::Question => &["responses"],
            _ => &[],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NumericRange
// ---------------------------------------------------------------------------

/// Fixed range of a numeric answer scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NumericRange {
    OneToTen,
    OneToFive,
    OneToThree,
}

impl NumericRange {
    /// Inclusive lower and upper bounds.
    #[must_use]
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Self::OneToTen => (1.0, 10.0),
            Self::OneToFive => (1.0, 5.0),
            Self::OneToThree => (1.0, 3.0),
        }
    }

    /// Cutoffs separating negative / neutral / positive sentiment.
    ///
    /// A value below the first cutoff is negative, at or above the second is
    /// positive, anything in between is neutral.
    #[must_use]
    pub const fn sentiment_cutoffs(self) -> [f64; 2] {
        match self {
            Self::OneToTen => [5.0, 7.0],
            Self::OneToFive => [2.5, 3.5],
            Self::OneToThree => [1.5, 2.5],
        }
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (low, high) = self.bounds();
        (low..=high).contains(&value)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneToTen => "one_to_ten",
            Self::OneToFive => "one_to_five",
            Self::OneToThree => "one_to_three",
        }
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValueType
// ---------------------------------------------------------------------------

/// How the values of a subject are compared.
///
/// Every engine operation matches on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "type", content = "range")]
pub enum ValueType {
    /// Scaled numeric answers on a bounded range.
    Numeric(NumericRange),
    /// Yes/No or pick-one answers compared by equality.
    CategoricalBinary,
    /// Anything else (ratings, free-form); not dispatchable by the engine.
    OtherCategorical,
}

impl ValueType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Numeric(_) => "numeric",
            Self::CategoricalBinary => "categorical_binary",
            Self::OtherCategorical => "other_categorical",
        }
    }

    #[must_use]
    pub const fn numeric_range(self) -> Option<NumericRange> {
        match self {
            Self::Numeric(range) => Some(range),
            Self::CategoricalBinary | Self::OtherCategorical => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(range) => write!(f, "numeric({range})"),
            Self::CategoricalBinary | Self::OtherCategorical => f.write_str(self.as_str()),
        }
    }
}

// ---------------------------------------------------------------------------
// QuestionType
// ---------------------------------------------------------------------------

/// Type of a meeting question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Likert,
    Scale,
    Categorical,
    Binary,
    Rating,
}

impl QuestionType {
    /// The comparison semantics answers to this question follow.
    #[must_use]
    pub const fn value_type(self) -> ValueType {
        match self {
            Self::Likert => ValueType::Numeric(NumericRange::OneToFive),
            Self::Scale => ValueType::Numeric(NumericRange::OneToTen),
            Self::Categorical | Self::Binary => ValueType::CategoricalBinary,
            Self::Rating => ValueType::OtherCategorical,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Likert => "likert",
            Self::Scale => "scale",
            Self::Categorical => "categorical",
            Self::Binary => "binary",
            Self::Rating => "rating",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// Bucket of the bounded sentiment scale a numeric answer maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    /// Sentiment for a bucket index (0, 1, 2). Larger indices saturate.
    #[must_use]
    pub const fn from_bucket(bucket: usize) -> Self {
        match bucket {
            0 => Self::Negative,
            1 => Self::Neutral,
            _ => Self::Positive,
        }
    }

    #[must_use]
    pub const fn bucket(self) -> usize {
        match self {
            Self::Negative => 0,
            Self::Neutral => 1,
            Self::Positive => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Agreement
// ---------------------------------------------------------------------------

/// Graded verdict of one response against the believable choice.
///
/// ```text
/// unclassified → polarizing | not_polarizing
///              → has_believable_choice | no_consensus
///              → agrees | disagrees | significantly_disagrees
/// ```
///
/// Ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Agreement {
    Agrees,
    Disagrees,
    SignificantlyDisagrees,
}

impl Agreement {
    /// Out of sync at any sensitivity level.
    #[must_use]
    pub const fn is_disagreement(self) -> bool {
        matches!(self, Self::Disagrees | Self::SignificantlyDisagrees)
    }

    #[must_use]
    pub const fn is_significant(self) -> bool {
        matches!(self, Self::SignificantlyDisagrees)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agrees => "agrees",
            Self::Disagrees => "disagrees",
            Self::SignificantlyDisagrees => "significantly_disagrees",
        }
    }
}

impl fmt::Display for Agreement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NubbinessLevel
// ---------------------------------------------------------------------------

/// Five-step classification of how contested a meeting (or subject) was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NubbinessLevel {
    NotNubby,
    LessNubby,
    SomewhatNubby,
    Nubby,
    VeryNubby,
}

impl NubbinessLevel {
    /// Level for a bin index produced by digitizing against four cutoffs.
    #[must_use]
    pub const fn from_bin(bin: usize) -> Self {
        match bin {
            0 => Self::NotNubby,
            1 => Self::LessNubby,
            2 => Self::SomewhatNubby,
            3 => Self::Nubby,
            _ => Self::VeryNubby,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotNubby => "not_nubby",
            Self::LessNubby => "less_nubby",
            Self::SomewhatNubby => "somewhat_nubby",
            Self::Nubby => "nubby",
            Self::VeryNubby => "very_nubby",
        }
    }
}

impl fmt::Display for NubbinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_types_dispatch_to_value_types() {
        assert_eq!(
            QuestionType::Likert.value_type(),
            ValueType::Numeric(NumericRange::OneToFive)
        );
        assert_eq!(
            QuestionType::Scale.value_type(),
            ValueType::Numeric(NumericRange::OneToTen)
        );
        assert_eq!(
            QuestionType::Binary.value_type(),
            ValueType::CategoricalBinary
        );
        assert_eq!(
            QuestionType::Categorical.value_type(),
            ValueType::CategoricalBinary
        );
        assert_eq!(
            QuestionType::Rating.value_type(),
            ValueType::OtherCategorical
        );
    }

    #[test]
    fn assertion_and_entity_kinds_are_disjoint() {
        let all = [
            EntityKind::System,
            EntityKind::Person,
            EntityKind::Team,
            EntityKind::Meeting,
            EntityKind::Question,
            EntityKind::Action,
            EntityKind::Attribute,
            EntityKind::Assertion,
            EntityKind::Judgement,
            EntityKind::Response,
            EntityKind::Dot,
            EntityKind::Ranking,
            EntityKind::Comparison,
            EntityKind::RelevanceScore,
            EntityKind::MeetingNubbyClassification,
        ];
        for kind in all {
            assert!(!(kind.is_assertion() && kind.is_entity()), "{kind}");
        }
    }

    #[test]
    fn numeric_range_bounds() {
        assert!(NumericRange::OneToTen.contains(10.0));
        assert!(!NumericRange::OneToFive.contains(5.5));
        assert!(!NumericRange::OneToThree.contains(0.0));
    }

    #[test]
    fn agreement_orders_by_severity() {
        assert!(Agreement::Agrees < Agreement::Disagrees);
        assert!(Agreement::Disagrees < Agreement::SignificantlyDisagrees);
        assert!(!Agreement::Agrees.is_disagreement());
        assert!(Agreement::Disagrees.is_disagreement());
        assert!(!Agreement::Disagrees.is_significant());
    }

    #[test]
    fn nubbiness_level_saturates() {
        assert_eq!(NubbinessLevel::from_bin(0), NubbinessLevel::NotNubby);
        assert_eq!(NubbinessLevel::from_bin(4), NubbinessLevel::VeryNubby);
        assert_eq!(NubbinessLevel::from_bin(9), NubbinessLevel::VeryNubby);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", EntityKind::RelevanceScore), "relevance_score");
        assert_eq!(format!("{}", QuestionType::Likert), "likert");
        assert_eq!(format!("{}", Sentiment::Neutral), "neutral");
        assert_eq!(
            format!("{}", Agreement::SignificantlyDisagrees),
            "significantly_disagrees"
        );
        assert_eq!(format!("{}", NubbinessLevel::SomewhatNubby), "somewhat_nubby");
        assert_eq!(
            format!("{}", ValueType::Numeric(NumericRange::OneToFive)),
            "numeric(one_to_five)"
        );
        assert_eq!(
            format!("{}", ValueType::CategoricalBinary),
            "categorical_binary"
        );
    }
}
