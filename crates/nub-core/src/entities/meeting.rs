use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Person, Question};
use crate::assertion::{Assertion, AssertionSet};
use crate::collection::{EntityCollection, Kinded, Project, Projection};
use crate::entity_ref::EntityRef;
use crate::enums::EntityKind;
use crate::errors::CoreError;

/// A gathering where questions are asked and people dot each other.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Meeting {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub held_at: Option<DateTime<Utc>>,
    pub participants: EntityCollection<Person>,
    pub questions: EntityCollection<Question>,
    pub dots: AssertionSet,
}

impl Default for Meeting {
    fn default() -> Self {
        Self::new("")
    }
}

impl Meeting {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            held_at: None,
            participants: EntityCollection::of_kind(EntityKind::Person),
            questions: EntityCollection::of_kind(EntityKind::Question),
            dots: AssertionSet::of_kind(EntityKind::Dot),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn with_held_at(mut self, held_at: DateTime<Utc>) -> Self {
        self.held_at = Some(held_at);
        self
    }

    /// # Errors
    ///
    /// See [`EntityCollection::push`].
    pub fn add_participant(&mut self, person: Person) -> Result<(), CoreError> {
        self.participants.push(person)
    }

    /// # Errors
    ///
    /// See [`EntityCollection::push`].
    pub fn add_question(&mut self, question: Question) -> Result<(), CoreError> {
        self.questions.push(question)
    }

    /// Record a dot given during this meeting.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the dot belongs to another meeting
    /// and propagates [`AssertionSet::push`] errors.
    pub fn add_dot(&mut self, dot: Assertion) -> Result<(), CoreError> {
        if dot.target != self.entity_ref() {
            return Err(CoreError::Validation(format!(
                "dot given in {} cannot be filed under {}",
                dot.target,
                self.entity_ref()
            )));
        }
        self.dots.push(dot)
    }

    /// Every response to every question, in question order.
    ///
    /// # Errors
    ///
    /// Propagates [`AssertionSet::push`] errors for malformed deserialized
    /// responses.
    pub fn responses(&self) -> Result<AssertionSet, CoreError> {
        let mut all = AssertionSet::of_kind(EntityKind::Response);
        for question in &self.questions {
            for response in question.responses.iter() {
                all.push(response.clone())?;
            }
        }
        Ok(all)
    }

    #[must_use]
    pub fn participant_refs(&self) -> Vec<EntityRef> {
        self.participants.iter().map(Person::entity_ref).collect()
    }

    #[must_use]
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::meeting(self.id.clone())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
            && self.name.is_none()
            && self.description.is_none()
            && self.held_at.is_none()
            && self.participants.is_empty()
            && self.questions.is_empty()
            && self.dots.is_empty()
    }
}

impl Kinded for Meeting {
    fn kind(&self) -> EntityKind {
        EntityKind::Meeting
    }
}

impl Project for Meeting {
    fn project(&self, projection: &Projection) -> Self {
        if projection.kind() != EntityKind::Meeting {
            return self.clone();
        }
        let empty = Self::new(self.id.clone());
        Self {
            id: self.id.clone(),
            name: projection.attribute("name", &self.name),
            description: projection.attribute("description", &self.description),
            held_at: projection.attribute("held_at", &self.held_at),
            participants: if projection.keeps_collection("participants") {
                self.participants.clone()
            } else {
                empty.participants
            },
            questions: if projection.keeps_collection("questions") {
                self.questions.clone()
            } else {
                empty.questions
            },
            dots: if projection.keeps_collection("dots") {
                self.dots.clone()
            } else {
                empty.dots
            },
        }
    }
}
