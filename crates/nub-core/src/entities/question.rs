use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::assertion::{Assertion, ResponseCollection};
use crate::collection::{Kinded, Project, Projection};
use crate::entity_ref::EntityRef;
use crate::enums::{EntityKind, QuestionType, ValueType};
use crate::errors::CoreError;
use crate::value::AnswerScale;

/// A question asked in a meeting, with the answers it received.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Question {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub question_type: Option<QuestionType>,
    pub scale: Option<AnswerScale>,
    pub responses: ResponseCollection,
}

impl Question {
    pub fn new(id: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            id: id.into(),
            question_type: Some(question_type),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: AnswerScale) -> Self {
        self.scale = Some(scale);
        self
    }

    /// How answers to this question are analyzed, if the type is known.
    #[must_use]
    pub fn value_type(&self) -> Option<ValueType> {
        self.question_type.map(QuestionType::value_type)
    }

    /// Record an answer to this question.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the response is about a different
    /// question or its value is outside the answer scale, and propagates
    /// [`ResponseCollection::push`] errors.
    pub fn record_response(&mut self, response: Assertion) -> Result<(), CoreError> {
        if response.subject != self.entity_ref() {
            return Err(CoreError::Validation(format!(
                "response about {} cannot be filed under {}",
                response.subject,
                self.entity_ref()
            )));
        }
        if let Some(scale) = &self.scale {
            if !scale.permits(&response.value) {
                return Err(CoreError::Validation(format!(
                    "'{}' is not a permitted answer to {}",
                    response.value,
                    self.entity_ref()
                )));
            }
        }
        self.responses.push(response)
    }

    #[must_use]
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::question(self.id.clone())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
            && self.title.is_none()
            && self.description.is_none()
            && self.question_type.is_none()
            && self.scale.is_none()
            && self.responses.is_empty()
    }
}

impl Kinded for Question {
    fn kind(&self) -> EntityKind {
        EntityKind::Question
    }
}

impl Project for Question {
    fn project(&self, projection: &Projection) -> Self {
        if projection.kind() != EntityKind::Question {
            return self.clone();
        }
        Self {
            id: self.id.clone(),
            title: projection.attribute("title", &self.title),
            description: projection.attribute("description", &self.description),
            question_type: projection.attribute("question_type", &self.question_type),
            scale: projection.attribute("scale", &self.scale),
            responses: projection.collection("responses", &self.responses),
        }
    }
}
