use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::collection::{Kinded, Project, Projection};
use crate::entity_ref::EntityRef;
use crate::enums::EntityKind;

/// A proposed course of action that people can weigh in on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Action {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A quality people are rated on (e.g. in dots).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Attribute {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Action {
    #[must_use]
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::action(self.id.clone())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Attribute {
    #[must_use]
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(EntityKind::Attribute, self.id.clone())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Kinded for Action {
    fn kind(&self) -> EntityKind {
        EntityKind::Action
    }
}

impl Kinded for Attribute {
    fn kind(&self) -> EntityKind {
        EntityKind::Attribute
    }
}

impl Project for Action {
    fn project(&self, projection: &Projection) -> Self {
        if projection.kind() != EntityKind::Action {
            return self.clone();
        }
        Self {
            id: self.id.clone(),
            name: projection.attribute("name", &self.name),
            description: projection.attribute("description", &self.description),
        }
    }
}

impl Project for Attribute {
    fn project(&self, projection: &Projection) -> Self {
        if projection.kind() != EntityKind::Attribute {
            return self.clone();
        }
        Self {
            id: self.id.clone(),
            name: projection.attribute("name", &self.name),
            description: projection.attribute("description", &self.description),
        }
    }
}
