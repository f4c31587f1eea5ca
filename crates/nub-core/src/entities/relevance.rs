use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::collection::{EntityCollection, Kinded, Project, Projection};
use crate::entity_ref::EntityRef;
use crate::enums::EntityKind;
use crate::errors::CoreError;

/// How much weight `target`'s opinions carry, optionally within a context
/// such as a meeting.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RelevanceScore {
    pub target: EntityRef,
    pub context: Option<EntityRef>,
    pub score: f64,
}

impl RelevanceScore {
    #[must_use]
    pub const fn new(target: EntityRef, score: f64) -> Self {
        Self {
            target,
            context: None,
            score,
        }
    }

    #[must_use]
    pub fn within(mut self, context: EntityRef) -> Self {
        self.context = Some(context);
        self
    }
}

impl Kinded for RelevanceScore {
    fn kind(&self) -> EntityKind {
        EntityKind::RelevanceScore
    }
}

impl Project for RelevanceScore {
    fn project(&self, projection: &Projection) -> Self {
        if projection.kind() != EntityKind::RelevanceScore {
            return self.clone();
        }
        Self {
            target: self.target.clone(),
            context: projection.attribute("context", &self.context),
            score: self.score,
        }
    }
}

/// Relevance scores keyed by the entity they weigh.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(transparent)]
pub struct RelevanceCollection(EntityCollection<RelevanceScore>);

impl Default for RelevanceCollection {
    fn default() -> Self {
        Self(EntityCollection::of_kind(EntityKind::RelevanceScore))
    }
}

impl RelevanceCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// As [`push`](Self::push), for the first bad score.
    pub fn from_scores(scores: Vec<RelevanceScore>) -> Result<Self, CoreError> {
        let mut collection = Self::new();
        for score in scores {
            collection.push(score)?;
        }
        Ok(collection)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for a negative or non-finite score.
    pub fn push(&mut self, score: RelevanceScore) -> Result<(), CoreError> {
        if !score.score.is_finite() || score.score < 0.0 {
            return Err(CoreError::Validation(format!(
                "relevance of {} must be finite and non-negative, got {}",
                score.target, score.score
            )));
        }
        self.0.push(score)
    }

    /// The weight recorded for `target`, ignoring context.
    #[must_use]
    pub fn weight_for(&self, target: &EntityRef) -> Option<f64> {
        self.0
            .iter()
            .find(|s| s.target == *target)
            .map(|s| s.score)
    }

    /// The weight recorded for `target` in `context`, falling back to a
    /// context-free score.
    #[must_use]
    pub fn weight_in(&self, target: &EntityRef, context: &EntityRef) -> Option<f64> {
        self.0
            .iter()
            .find(|s| s.target == *target && s.context.as_ref() == Some(context))
            .or_else(|| {
                self.0
                    .iter()
                    .find(|s| s.target == *target && s.context.is_none())
            })
            .map(|s| s.score)
    }

    /// Whether `target` carries any positive weight.
    #[must_use]
    pub fn is_believable(&self, target: &EntityRef) -> bool {
        self.weight_for(target).is_some_and(|w| w > 0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RelevanceScore> {
        self.0.iter()
    }
}
