//! Entity records for the organizational scope of an analysis.
//!
//! Every attribute is optional so each kind has a canonical empty instance
//! ([`Entity::empty`]). All structs derive `Serialize`, `Deserialize` and
//! `JsonSchema` for JSON roundtrip and schema validation.

mod action;
mod classification;
mod meeting;
mod person;
mod question;
mod relevance;
mod system;
mod team;

pub use action::{Action, Attribute};
pub use classification::{MeetingNubbyClassification, ResponseVerdict};
pub use meeting::Meeting;
pub use person::Person;
pub use question::Question;
pub use relevance::{RelevanceCollection, RelevanceScore};
pub use system::System;
pub use team::Team;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::collection::{Kinded, Project, Projection};
use crate::entity_ref::EntityRef;
use crate::enums::EntityKind;
use crate::errors::CoreError;

/// The closed set of entity records.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    System(System),
    Person(Person),
    Team(Team),
    Meeting(Meeting),
    Question(Question),
    Action(Action),
    Attribute(Attribute),
}

impl Entity {
    /// The canonical null instance of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for kinds that are not entities
    /// (assertion kinds, relevance scores, classifications).
    pub fn empty(kind: EntityKind) -> Result<Self, CoreError> {
        Ok(match kind {
            EntityKind::System => Self::System(System::default()),
            EntityKind::Person => Self::Person(Person::default()),
            EntityKind::Team => Self::Team(Team::default()),
            EntityKind::Meeting => Self::Meeting(Meeting::default()),
            EntityKind::Question => Self::Question(Question::default()),
            EntityKind::Action => Self::Action(Action::default()),
            EntityKind::Attribute => Self::Attribute(Attribute::default()),
            other => {
                return Err(CoreError::Validation(format!(
                    "{other} has no empty entity instance"
                )));
            }
        })
    }

    /// Whether every id, attribute and collection is unset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::System(e) => e.is_empty(),
            Self::Person(e) => e.is_empty(),
            Self::Team(e) => e.is_empty(),
            Self::Meeting(e) => e.is_empty(),
            Self::Question(e) => e.is_empty(),
            Self::Action(e) => e.is_empty(),
            Self::Attribute(e) => e.is_empty(),
        }
    }

    #[must_use]
    pub fn entity_ref(&self) -> EntityRef {
        match self {
            Self::System(e) => e.entity_ref(),
            Self::Person(e) => e.entity_ref(),
            Self::Team(e) => e.entity_ref(),
            Self::Meeting(e) => e.entity_ref(),
            Self::Question(e) => e.entity_ref(),
            Self::Action(e) => e.entity_ref(),
            Self::Attribute(e) => e.entity_ref(),
        }
    }
}

impl Kinded for Entity {
    fn kind(&self) -> EntityKind {
        match self {
            Self::System(_) => EntityKind::System,
            Self::Person(_) => EntityKind::Person,
            Self::Team(_) => EntityKind::Team,
            Self::Meeting(_) => EntityKind::Meeting,
            Self::Question(_) => EntityKind::Question,
            Self::Action(_) => EntityKind::Action,
            Self::Attribute(_) => EntityKind::Attribute,
        }
    }
}

impl Project for Entity {
    fn project(&self, projection: &Projection) -> Self {
        match self {
            Self::System(e) => Self::System(e.project(projection)),
            Self::Person(e) => Self::Person(e.project(projection)),
            Self::Team(e) => Self::Team(e.project(projection)),
            Self::Meeting(e) => Self::Meeting(e.project(projection)),
            Self::Question(e) => Self::Question(e.project(projection)),
            Self::Action(e) => Self::Action(e.project(projection)),
            Self::Attribute(e) => Self::Attribute(e.project(projection)),
        }
    }
}
