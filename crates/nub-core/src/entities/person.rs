use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::assertion::{Assertion, AssertionSet};
use crate::collection::{Kinded, Project, Projection};
use crate::entity_ref::EntityRef;
use crate::enums::EntityKind;
use crate::errors::CoreError;

/// A participant. `dots` holds the ratings this person received.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Person {
    pub id: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub believability: Option<f64>,
    pub dots: AssertionSet,
}

impl Default for Person {
    fn default() -> Self {
        Self::new("")
    }
}

impl Person {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            role: None,
            description: None,
            believability: None,
            dots: AssertionSet::of_kind(EntityKind::Dot),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn with_believability(mut self, believability: f64) -> Self {
        self.believability = Some(believability);
        self
    }

    /// Record a dot this person received.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the dot is about someone else, and
    /// propagates [`AssertionSet::push`] errors.
    pub fn receive_dot(&mut self, dot: Assertion) -> Result<(), CoreError> {
        if dot.subject != self.entity_ref() {
            return Err(CoreError::Validation(format!(
                "dot about {} cannot be filed under {}",
                dot.subject,
                self.entity_ref()
            )));
        }
        self.dots.push(dot)
    }

    #[must_use]
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::person(self.id.clone())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
            && self.name.is_none()
            && self.role.is_none()
            && self.description.is_none()
            && self.believability.is_none()
            && self.dots.is_empty()
    }
}

impl Kinded for Person {
    fn kind(&self) -> EntityKind {
        EntityKind::Person
    }
}

impl Project for Person {
    fn project(&self, projection: &Projection) -> Self {
        if projection.kind() != EntityKind::Person {
            return self.clone();
        }
        Self {
            id: self.id.clone(),
            name: projection.attribute("name", &self.name),
            role: projection.attribute("role", &self.role),
            description: projection.attribute("description", &self.description),
            believability: projection.attribute("believability", &self.believability),
            dots: if projection.keeps_collection("dots") {
                self.dots.clone()
            } else {
                AssertionSet::of_kind(EntityKind::Dot)
            },
        }
    }
}
